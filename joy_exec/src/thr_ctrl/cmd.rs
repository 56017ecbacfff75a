//! Commands produced by ThrCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command for the thruster motor controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ThrusterCommand {
    /// If true the thruster must be started (armed) before the speed is set.
    pub start: bool,

    /// Signed speed demand. Positive is forward.
    ///
    /// Units: normalised, [-1, 1]
    pub speed: f64,
}
