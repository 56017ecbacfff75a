//! Indicator light client

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::blinkm::BlinkmRequest, net::zmq};

use super::{EqptClient, EqptClientError, IndicatorService};
use crate::params::ServerParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Client for the BlinkM indicator light server.
pub struct BlinkmClient(EqptClient);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl BlinkmClient {
    pub fn new(ctx: &zmq::Context, params: &ServerParams) -> Result<Self, EqptClientError> {
        EqptClient::new(ctx, params).map(Self)
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

impl IndicatorService for BlinkmClient {
    fn set_color(&mut self, rgb: [f64; 3]) -> Result<(), EqptClientError> {
        self.0.call(&BlinkmRequest::SetColor(rgb))
    }
}
