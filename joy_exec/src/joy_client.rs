//! # Joystick Client
//!
//! Subscribes to the joystick states published by the operator station.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    joy::JoystickState,
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Joystick client
pub struct JoyClient {
    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum JoyClientError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not subscribe to the joystick topic: {0}")]
    SubscribeError(zmq::Error),

    #[error("Could not recieve a message from the publisher: {0}")]
    RecvError(zmq::Error),

    #[error("The publisher sent a message which was not valid UTF-8")]
    NonUtf8Message,

    #[error("Could not parse the recieved joystick state: {0}")]
    StateParseError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JoyClient {
    /// Create a new instance of the joystick client.
    ///
    /// This function will not block until the publisher connects.
    pub fn new(ctx: &zmq::Context, endpoint: &str) -> Result<Self, JoyClientError> {
        let socket = MonitoredSocket::new(
            ctx,
            zmq::SUB,
            SocketOptions::state_subscriber(),
            endpoint,
        )
        .map_err(JoyClientError::SocketError)?;

        socket
            .set_subscribe(b"")
            .map_err(JoyClientError::SubscribeError)?;

        Ok(Self { socket })
    }

    /// Check if the client is connected to the publisher
    pub fn is_connected(&self) -> bool {
        self.socket.connected()
    }

    /// Recieve the latest joystick state.
    ///
    /// The socket only keeps the most recent message, so states published while the previous one
    /// was being handled are skipped. Returns `Ok(None)` if nothing arrived within the receive
    /// timeout.
    pub fn recieve_state(&self) -> Result<Option<JoystickState>, JoyClientError> {
        let state_str = match self.socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => return Err(JoyClientError::NonUtf8Message),
            Err(zmq::Error::EAGAIN) => return Ok(None),
            Err(e) => return Err(JoyClientError::RecvError(e)),
        };

        serde_json::from_str(&state_str)
            .map(Some)
            .map_err(JoyClientError::StateParseError)
    }
}
