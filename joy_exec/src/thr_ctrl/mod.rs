//! Thruster control module
//!
//! Converts the joystick trigger axes into a thruster speed demand, arbitrated against the end-stop
//! state of the thruster's travel sensor.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during ThrCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum ThrCtrlError {
    #[error("The forward and reverse triggers are both mapped to axis {0}")]
    SameTriggerAxis(usize),

    #[error("The speed gain must be a finite positive number, found {0}")]
    InvalidSpeedGain(f64),
}
