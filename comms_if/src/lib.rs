//! # Communications interface crate.
//!
//! Provides all common communications interfaces for the Naro control software.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Request and response definitions for equipment services (thruster, servos, fins, indicator)
pub mod eqpt;

/// Joystick state messages
pub mod joy;

/// Network module
pub mod net;
