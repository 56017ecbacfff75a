//! Fin oscillator client

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::fin::FinRequest, net::zmq};

use super::{EqptClient, EqptClientError, FinService};
use crate::params::ServerParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Client for the fin controller.
pub struct FinClient(EqptClient);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl FinClient {
    pub fn new(ctx: &zmq::Context, params: &ServerParams) -> Result<Self, EqptClientError> {
        EqptClient::new(ctx, params).map(Self)
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

impl FinService for FinClient {
    fn get_homes(&mut self, servos: &[usize]) -> Result<Vec<f64>, EqptClientError> {
        self.0.call(&FinRequest::GetHomes {
            servos: servos.to_vec(),
        })
    }

    fn set_homes(&mut self, servos: &[usize], homes_rad: &[f64]) -> Result<(), EqptClientError> {
        self.0.call(&FinRequest::SetHomes {
            servos: servos.to_vec(),
            homes_rad: homes_rad.to_vec(),
        })
    }

    fn set_commands(
        &mut self,
        servos: &[usize],
        frequency_hz: &[f64],
        amplitude_rad: &[f64],
        phase_rad: &[f64],
        offset_rad: &[f64],
    ) -> Result<(), EqptClientError> {
        self.0.call(&FinRequest::SetCommands {
            servos: servos.to_vec(),
            frequency_hz: frequency_hz.to_vec(),
            amplitude_rad: amplitude_rad.to_vec(),
            phase_rad: phase_rad.to_vec(),
            offset_rad: offset_rad.to_vec(),
        })
    }
}
