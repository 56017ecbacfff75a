//! # Equipment Server Module
//!
//! This module abstracts over the networking side of the equipment executable. Each piece of
//! equipment has its own REP socket, requests are read from all of them in turn and answered
//! before the next one is read.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::{EqptRequest, EqptResponse},
    net::{zmq, MonitoredSocket, MonitoredSocketError, SocketOptions},
};
use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::{params::EqptExecParams, sim::SimEqpt};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// An abstraction over the networking part of the equipment executable.
pub struct EqptServer {
    smc_socket: MonitoredSocket,
    usc_socket: MonitoredSocket,
    fin_socket: MonitoredSocket,
    blinkm_socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur in the [`EqptServer`]
#[derive(thiserror::Error, Debug)]
pub enum EqptServerError {
    #[error("Socket error: {0}")]
    SocketError(MonitoredSocketError),

    #[error("Could not recieve a request from the client: {0}")]
    RecvError(zmq::Error),

    #[error("Could not send a response to the client: {0}")]
    SendError(zmq::Error),

    #[error("Could not serialize the response: {0}")]
    SerializationError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EqptServer {
    /// Create a new instance of the equipment server.
    ///
    /// This function will not wait for a connection from the client before returning.
    pub fn new(ctx: &zmq::Context, params: &EqptExecParams) -> Result<Self, EqptServerError> {
        let socket = |endpoint: &str| {
            MonitoredSocket::new(ctx, zmq::REP, SocketOptions::eqpt_server(), endpoint)
        };

        Ok(Self {
            smc_socket: socket(&params.servers.smc)?,
            usc_socket: socket(&params.servers.usc)?,
            fin_socket: socket(&params.servers.fin)?,
            blinkm_socket: socket(&params.servers.blinkm)?,
        })
    }

    /// Serve at most one request on each socket.
    ///
    /// Returns the number of requests served. Errors on one socket are logged and don't stop the
    /// others being served.
    pub fn serve(&mut self, sim: &mut SimEqpt) -> usize {
        let results = [
            serve_one(&self.smc_socket, |r| sim.handle_smc(r)),
            serve_one(&self.usc_socket, |r| sim.handle_usc(r)),
            serve_one(&self.fin_socket, |r| sim.handle_fin(r)),
            serve_one(&self.blinkm_socket, |r| sim.handle_blinkm(r)),
        ];

        let mut num_served = 0;

        for result in results.iter() {
            match result {
                Ok(true) => num_served += 1,
                Ok(false) => (),
                Err(e) => warn!("Equipment server error: {}", e),
            }
        }

        num_served
    }
}

impl From<MonitoredSocketError> for EqptServerError {
    fn from(e: MonitoredSocketError) -> Self {
        EqptServerError::SocketError(e)
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Serve a single request on the socket if one is waiting.
///
/// Requests which can't be parsed are answered with `EqptResponse::Failed` so the client's
/// request/reply cycle can continue.
fn serve_one<R, H>(socket: &MonitoredSocket, mut handler: H) -> Result<bool, EqptServerError>
where
    R: DeserializeOwned + EqptRequest,
    H: FnMut(R) -> Result<String, serde_json::Error>,
{
    let req_str = match socket.recv_string(0) {
        Ok(Ok(s)) => s,
        Ok(Err(_)) => String::new(),
        Err(zmq::Error::EAGAIN) => return Ok(false),
        Err(e) => return Err(EqptServerError::RecvError(e)),
    };

    let rep_str = match serde_json::from_str::<R>(&req_str) {
        Ok(request) => {
            debug!("{} on {}", request.op_name(), socket.endpoint());
            handler(request)
        }
        Err(e) => {
            warn!("Invalid request on {}: {}", socket.endpoint(), e);
            serde_json::to_string(&EqptResponse::<()>::Failed(format!("Invalid request: {}", e)))
        }
    }
    .map_err(EqptServerError::SerializationError)?;

    socket
        .send(&rep_str, 0)
        .map_err(EqptServerError::SendError)?;

    Ok(true)
}
