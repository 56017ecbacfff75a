//! # Equipment Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct EqptExecParams {
    /// Endpoints the equipment servers bind to
    pub servers: ServerEndpoints,

    /// Number of fin servos
    pub num_servos: usize,

    /// Thruster end-stop simulation
    pub limits: LimitsParams,
}

/// Endpoints for the request sockets of each server.
#[derive(Deserialize, Debug, Clone)]
pub struct ServerEndpoints {
    pub smc: String,
    pub usc: String,
    pub fin: String,
    pub blinkm: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LimitsParams {
    /// If set the limit register always reads this value and the thruster never travels
    pub fixed: Option<u16>,

    /// Time for the thruster to travel the whole stroke at full speed
    ///
    /// Units: seconds
    pub full_travel_s: f64,
}
