//! Thruster motor controller client

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{
    eqpt::smc::{LimitState, SmcRequest},
    net::zmq,
};

use super::{EqptClient, EqptClientError, ThrusterService};
use crate::params::ServerParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Client for the SMC server driving the main thruster.
pub struct SmcClient(EqptClient);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SmcClient {
    pub fn new(ctx: &zmq::Context, params: &ServerParams) -> Result<Self, EqptClientError> {
        EqptClient::new(ctx, params).map(Self)
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

impl ThrusterService for SmcClient {
    fn get_limits(&mut self) -> Result<LimitState, EqptClientError> {
        self.0.call(&SmcRequest::GetLimits)
    }

    fn start(&mut self) -> Result<(), EqptClientError> {
        self.0.call(&SmcRequest::Start)
    }

    fn set_speed(&mut self, speed: f64) -> Result<(), EqptClientError> {
        self.0.call(&SmcRequest::SetSpeed(speed))
    }
}
