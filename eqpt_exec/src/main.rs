//! # Equipment Executable
//!
//! This executable stands in for the equipment of the robot on the bench:
//! - Thruster motor controller (SMC), with simulated end-stops
//! - Servo controller (USC)
//! - Fin oscillator controller
//! - Indicator light (BlinkM)
//!
//! Requests are applied to an in-memory model, nothing is actuated.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Equipment server abstraction.
mod eqpt_server;

/// Parameters for the equipment executable.
mod params;

/// Simulated equipment.
mod sim;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Result};
use log::{info, trace};
use std::time::{Duration, Instant};

// Internal
use eqpt_server::EqptServer;
use params::EqptExecParams;
use sim::SimEqpt;
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Interval between traces of the simulated state.
const STATE_TRACE_PERIOD: Duration = Duration::from_secs(1);

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("eqpt_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Naro Equipment Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: EqptExecParams =
        util::params::load("eqpt_exec.toml").wrap_err("Could not load eqpt_exec params")?;

    info!("Parameters loaded, simulating {} servos", params.num_servos);

    // ---- SERVER INITIALISATION ----

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let mut server = EqptServer::new(&zmq_ctx, &params).wrap_err("Failed to initialise server")?;
    let mut sim = SimEqpt::new(&params);

    info!("Server initialised");

    // ---- MAIN LOOP ----

    info!("Initialisation complete, entering main loop");

    let mut last_step = Instant::now();
    let mut last_trace = Instant::now();

    loop {
        // Each socket waits up to its receive timeout, which paces the loop
        server.serve(&mut sim);

        let now = Instant::now();
        sim.step((now - last_step).as_secs_f64());
        last_step = now;

        if now - last_trace > STATE_TRACE_PERIOD {
            trace!(
                "Homes: {:?}\n    commands: {:?}\n    positions: {:?}\n    colour: {:?}",
                sim.homes(),
                sim.commands(),
                sim.positions(),
                sim.color()
            );
            last_trace = now;
        }
    }
}
