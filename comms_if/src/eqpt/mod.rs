//! # Equipment Interface
//!
//! This module defines the interface structures which will be sent to equipment servers/clients.
//!
//! Every equipment server is a request/response endpoint. A client sends one of the request enums
//! serialised as JSON and the server replies with an [`EqptResponse`] whose payload type depends
//! on the request (see each request's `Reply` note).

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

/// Indicator light (BlinkM) requests
pub mod blinkm;

/// Fin oscillator controller requests
pub mod fin;

/// Thruster motor controller (SMC) requests
pub mod smc;

/// Servo controller (USC) requests
pub mod usc;

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// -----------------------------------------------------------------------------------------------
// ENUMS
// -----------------------------------------------------------------------------------------------

/// Response from an equipment server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum EqptResponse<T> {
    /// The request was executed, with the given result.
    Ok(T),

    /// The server understood the request but could not execute it.
    Failed(String),
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

/// A request which can be sent to an equipment server.
pub trait EqptRequest {
    /// Name of the operation on the server, e.g. `"get_limits"`.
    ///
    /// Combined with the server name to give the full operation name used in logs, like
    /// `/smc_server/get_limits`.
    fn op_name(&self) -> &'static str;
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl<T> EqptResponse<T> {
    /// Convert the response into a result.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            EqptResponse::Ok(t) => Ok(t),
            EqptResponse::Failed(s) => Err(s),
        }
    }
}
