//! Parameters structure for ThrCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for thruster control.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Params {

    // ---- JOYSTICK MAPPING ----

    /// Index of the forward trigger axis. Rests at +1.0, -1.0 fully pressed.
    pub fwd_axis: usize,

    /// Index of the reverse trigger axis. Rests at +1.0, -1.0 fully pressed.
    pub rev_axis: usize,

    /// Gain from trigger travel to speed, `speed = (1 - axis) * speed_gain`.
    pub speed_gain: f64,

    // ---- ARBITRATION ----

    /// When the thruster is started ahead of a speed command.
    pub start_policy: StartPolicy,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Policy for issuing the start action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// Start before every speed command.
    Always,

    /// Start only before commands that drive the thruster off an asserted
    /// end-stop. Commands with no end-stop asserted are sent without a start.
    LimitRelease,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            fwd_axis: 5,
            rev_axis: 2,
            speed_gain: 0.5,
            start_policy: StartPolicy::Always,
        }
    }
}
