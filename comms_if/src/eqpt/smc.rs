//! # Thruster Motor Controller Requests

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::EqptRequest;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// End-stop state of the thruster's travel sensor.
///
/// This is the limit status register of the motor controller. Only the two analog limit switch
/// bits are interpreted by the control software, all other bits are carried but ignored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitState(pub u16);

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Requests accepted by the SMC server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum SmcRequest {
    /// Query the end-stop state.
    ///
    /// Reply: `EqptResponse<LimitState>`
    GetLimits,

    /// Arm the thruster. Must precede a nonzero speed after the motor has been stopped.
    ///
    /// Reply: `EqptResponse<()>`
    Start,

    /// Command the thruster speed, in [-1, 1].
    ///
    /// Reply: `EqptResponse<()>`
    SetSpeed(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LimitState {
    /// No end-stop asserted.
    pub const NONE: LimitState = LimitState(0);

    /// Forward end-stop (analog limit switch 1).
    pub const ANALOG1: u16 = 1 << 7;

    /// Reverse end-stop (analog limit switch 2).
    pub const ANALOG2: u16 = 1 << 8;

    /// Returns `true` if the forward end-stop is asserted.
    pub fn forward(&self) -> bool {
        self.0 & Self::ANALOG1 != 0
    }

    /// Returns `true` if the reverse end-stop is asserted.
    pub fn reverse(&self) -> bool {
        self.0 & Self::ANALOG2 != 0
    }
}

impl EqptRequest for SmcRequest {
    fn op_name(&self) -> &'static str {
        match self {
            SmcRequest::GetLimits => "get_limits",
            SmcRequest::Start => "start",
            SmcRequest::SetSpeed(_) => "set_speed",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_limit_bits() {
        assert!(!LimitState::NONE.forward());
        assert!(!LimitState::NONE.reverse());

        let fwd = LimitState(LimitState::ANALOG1);
        assert!(fwd.forward());
        assert!(!fwd.reverse());

        // Unrelated status bits (safe start, temperature) don't count as end-stops
        let other = LimitState(0b0000_0000_0000_0011);
        assert!(!other.forward());
        assert!(!other.reverse());

        let both = LimitState(LimitState::ANALOG1 | LimitState::ANALOG2);
        assert!(both.forward() && both.reverse());
    }
}
