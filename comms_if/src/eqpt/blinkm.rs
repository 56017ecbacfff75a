//! # Indicator Light Requests

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptRequest;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Requests accepted by the BlinkM server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BlinkmRequest {
    /// Set the colour of the indicator as normalised RGB.
    ///
    /// Reply: `EqptResponse<()>`
    SetColor([f64; 3]),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EqptRequest for BlinkmRequest {
    fn op_name(&self) -> &'static str {
        match self {
            BlinkmRequest::SetColor(_) => "set_color",
        }
    }
}
