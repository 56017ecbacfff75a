//! # Servo Controller Requests

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptRequest;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Requests accepted by the USC server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum UscRequest {
    /// Move the given channels directly to the given angles, bypassing the fin oscillators.
    ///
    /// Reply: `EqptResponse<()>`
    SetPositions {
        channels: Vec<usize>,
        angles_rad: Vec<f64>,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EqptRequest for UscRequest {
    fn op_name(&self) -> &'static str {
        match self {
            UscRequest::SetPositions { .. } => "set_positions",
        }
    }
}
