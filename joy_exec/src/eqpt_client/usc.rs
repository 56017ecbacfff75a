//! Servo controller client

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::usc::UscRequest, net::zmq};

use super::{EqptClient, EqptClientError, ServoService};
use crate::params::ServerParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Client for the USC server positioning the fin base servos directly.
pub struct UscClient(EqptClient);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl UscClient {
    pub fn new(ctx: &zmq::Context, params: &ServerParams) -> Result<Self, EqptClientError> {
        EqptClient::new(ctx, params).map(Self)
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

impl ServoService for UscClient {
    fn set_positions(
        &mut self,
        channels: &[usize],
        angles_rad: &[f64],
    ) -> Result<(), EqptClientError> {
        self.0.call(&UscRequest::SetPositions {
            channels: channels.to_vec(),
            angles_rad: angles_rad.to_vec(),
        })
    }
}
