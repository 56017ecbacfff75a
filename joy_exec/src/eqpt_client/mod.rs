//! # Equipment Clients
//!
//! Capability interfaces for the equipment the control loop drives, and the network clients that
//! implement them against the equipment servers.
//!
//! The control logic only sees the traits, so it can be exercised with in-memory doubles.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod blinkm;
mod client;
mod fin;
mod smc;
mod usc;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::smc::LimitState, net::{zmq, MonitoredSocketError}};

pub use blinkm::BlinkmClient;
pub use client::EqptClient;
pub use fin::FinClient;
pub use smc::SmcClient;
pub use usc::UscClient;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum EqptClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("The client is not connected to the server")]
    NotConnected,

    #[error("Could not send the request to the server: {0}")]
    SendError(zmq::Error),

    #[error("Could not recieve a response from the server: {0}")]
    RecvError(zmq::Error),

    #[error("Could not serialize the request: {0}")]
    SerializationError(serde_json::Error),

    #[error("Could not deserialize the response from the server: {0}")]
    DeserializeError(serde_json::Error),

    #[error("The server sent a message which was not valid UTF-8")]
    NonUtf8Response,

    #[error("The server could not execute the request: {0}")]
    ServiceError(String),
}

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// The main thruster.
pub trait ThrusterService {
    /// Read the end-stop state of the thruster.
    fn get_limits(&mut self) -> Result<LimitState, EqptClientError>;

    /// Arm the thruster ahead of a speed command.
    fn start(&mut self) -> Result<(), EqptClientError>;

    /// Command the thruster speed, in [-1, 1].
    fn set_speed(&mut self, speed: f64) -> Result<(), EqptClientError>;
}

/// Direct positioning of the fin base servos.
pub trait ServoService {
    fn set_positions(
        &mut self,
        channels: &[usize],
        angles_rad: &[f64],
    ) -> Result<(), EqptClientError>;
}

/// The fin oscillator, which renders oscillation commands on top of per-servo homes.
pub trait FinService {
    /// Read the home angles of the given servos, in radians.
    fn get_homes(&mut self, servos: &[usize]) -> Result<Vec<f64>, EqptClientError>;

    /// Set the home angles of the given servos, in radians.
    fn set_homes(&mut self, servos: &[usize], homes_rad: &[f64]) -> Result<(), EqptClientError>;

    /// Set the oscillation of the given servos. All slices are indexed alongside `servos`.
    fn set_commands(
        &mut self,
        servos: &[usize],
        frequency_hz: &[f64],
        amplitude_rad: &[f64],
        phase_rad: &[f64],
        offset_rad: &[f64],
    ) -> Result<(), EqptClientError>;
}

/// The indicator light.
pub trait IndicatorService {
    /// Set the colour as RGB components in [0, 1].
    fn set_color(&mut self, rgb: [f64; 3]) -> Result<(), EqptClientError>;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EqptClientError {
    /// Returns `true` if the server could not be reached, rather than reporting a failure.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EqptClientError::SocketError(_)
                | EqptClientError::NotConnected
                | EqptClientError::SendError(_)
                | EqptClientError::RecvError(_)
        )
    }
}
