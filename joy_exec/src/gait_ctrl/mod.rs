//! Gait control module
//!
//! Maps the joystick onto oscillation parameters for the eight fin servos. One of a closed set of
//! gaits is selected at startup and applied to every joystick event.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod gait_config;
mod state;
mod calc_fish_standard;
mod calc_fish_advanced;
mod calc_turtle_standard;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use gait_config::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of fin servos driven by the gaits.
pub const NUM_SERVOS: usize = 8;

/// Index of the pitch (lateral) axis on the joystick.
pub const PITCH_AXIS: usize = 1;

/// Index of the yaw (differential) axis on the joystick.
pub const YAW_AXIS: usize = 3;

/// Index of the secondary axis, used for the rear pitch of the turtle gait.
pub const REAR_PITCH_AXIS: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during GaitCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum GaitCtrlError {
    #[error(
        "Unknown gait `{0}`, expected one of `fish_standard`, `fish_advanced` or \
        `turtle_standard`"
    )]
    UnknownGait(String),
}
