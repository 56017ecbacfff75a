//! Generic request/response client for an equipment server

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::trace;
use serde::{de::DeserializeOwned, Serialize};

use comms_if::{
    eqpt::{EqptRequest, EqptResponse},
    net::{zmq, MonitoredSocket, SocketOptions},
};

use super::EqptClientError;
use crate::params::ServerParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A client connected to one equipment server.
pub struct EqptClient {
    name: String,

    socket: MonitoredSocket,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl EqptClient {
    /// Create a new client for the given server.
    ///
    /// This function will not block until the server connects.
    pub fn new(ctx: &zmq::Context, params: &ServerParams) -> Result<Self, EqptClientError> {
        let socket = MonitoredSocket::new(
            ctx,
            zmq::REQ,
            SocketOptions::eqpt_client(),
            &params.endpoint,
        )
        .map_err(EqptClientError::SocketError)?;

        Ok(Self {
            name: params.name.clone(),
            socket,
        })
    }

    /// Name of the server this client talks to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the client is connected to the server
    pub fn is_connected(&self) -> bool {
        self.socket.connected()
    }

    /// Full name of an operation on this server, such as `/smc_server/get_limits`.
    pub fn op_name<R: EqptRequest>(&self, request: &R) -> String {
        format!("{}/{}", self.name, request.op_name())
    }

    /// Send a request and wait for the reply.
    ///
    /// Blocks for at most the receive timeout of the socket. A reply of
    /// `EqptResponse::Failed` is returned as `EqptClientError::ServiceError`.
    pub fn call<R, T>(&mut self, request: &R) -> Result<T, EqptClientError>
    where
        R: EqptRequest + Serialize,
        T: DeserializeOwned,
    {
        if !self.socket.connected() {
            return Err(EqptClientError::NotConnected);
        }

        let req_str =
            serde_json::to_string(request).map_err(EqptClientError::SerializationError)?;

        trace!("{} <- {}", self.op_name(request), req_str);

        self.socket
            .send(&req_str, 0)
            .map_err(EqptClientError::SendError)?;

        let rep_str = match self.socket.recv_string(0) {
            Ok(Ok(s)) => s,
            Ok(Err(_)) => return Err(EqptClientError::NonUtf8Response),
            Err(e) => return Err(EqptClientError::RecvError(e)),
        };

        trace!("{} -> {}", self.op_name(request), rep_str);

        let response: EqptResponse<T> =
            serde_json::from_str(&rep_str).map_err(EqptClientError::DeserializeError)?;

        response.into_result().map_err(EqptClientError::ServiceError)
    }
}
