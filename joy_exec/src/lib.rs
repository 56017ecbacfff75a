//! # Joystick control library.
//!
//! This library allows the executables and benches in this crate to access the control modules
//! for the swimming robot.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Dive cycle - drives the thruster between its end-stops for bench testing
pub mod dive_cycle;

/// Equipment clients - capability interfaces and network clients for the equipment servers
pub mod eqpt_client;

/// Gait control module - converts the joystick into oscillation commands for the fin servos
pub mod gait_ctrl;

/// Joystick client - recieves joystick states from the operator station
pub mod joy_client;

/// Joystick control - handles each joystick event and dispatches the resulting commands
pub mod joy_ctrl;

/// Executable parameters
pub mod params;

/// Thruster control module - decides thruster commands subject to the end-stops
pub mod thr_ctrl;
