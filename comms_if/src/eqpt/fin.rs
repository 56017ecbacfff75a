//! # Fin Controller Requests
//!
//! The fin controller renders a sinusoid per servo from four oscillation parameters and adds the
//! servo's home angle beneath it.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptRequest;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Requests accepted by the fin controller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum FinRequest {
    /// Read the home angles of the given servos.
    ///
    /// Reply: `EqptResponse<Vec<f64>>`, one angle in radians per requested servo.
    GetHomes { servos: Vec<usize> },

    /// Write the home angles of the given servos.
    ///
    /// Reply: `EqptResponse<()>`
    SetHomes {
        servos: Vec<usize>,
        homes_rad: Vec<f64>,
    },

    /// Set the oscillation parameters of the given servos.
    ///
    /// All vectors are indexed in parallel with `servos`.
    ///
    /// Reply: `EqptResponse<()>`
    SetCommands {
        servos: Vec<usize>,
        frequency_hz: Vec<f64>,
        amplitude_rad: Vec<f64>,
        phase_rad: Vec<f64>,
        offset_rad: Vec<f64>,
    },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EqptRequest for FinRequest {
    fn op_name(&self) -> &'static str {
        match self {
            FinRequest::GetHomes { .. } => "get_homes",
            FinRequest::SetHomes { .. } => "set_homes",
            FinRequest::SetCommands { .. } => "set_commands",
        }
    }
}
