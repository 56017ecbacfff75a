//! # Dive test
//!
//! Cycles the thruster between its end-stops.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use color_eyre::{eyre::{eyre, WrapErr}, Report};
use log::info;
use std::time::{Duration, Instant};
use structopt::StructOpt;

use joy_lib::{dive_cycle, eqpt_client::SmcClient, params::JoyExecParams};
use util::{
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Time allowed for the thruster server connection before giving up.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "dive_test", about = "Cycle the thruster between its end-stops")]
struct Opt {
    /// Initial thruster speed in [-1, 1], the sign gives the first direction of travel
    #[structopt(allow_hyphen_values = true)]
    speed: f64,

    /// Number of end-stop to end-stop traversals
    num_cycles: u32,

    /// Abort if an end-stop isn't reached within this many seconds of travel
    #[structopt(long, default_value = "30")]
    timeout_s: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    if opt.num_cycles == 0 {
        return Ok(());
    }

    // A zero speed would never reach an end-stop
    if opt.speed == 0.0 || opt.speed.abs() > 1.0 {
        return Err(eyre!("Expected a nonzero speed in [-1, 1], found {}", opt.speed));
    }

    if !opt.timeout_s.is_finite() || opt.timeout_s <= 0.0 {
        return Err(eyre!("Expected a positive timeout, found {}", opt.timeout_s));
    }

    let session = Session::new("dive_test", "sessions").wrap_err("Failed to create the session")?;
    logger_init(LevelFilter::Info, &session).wrap_err("Failed to initialise logging")?;

    let params: JoyExecParams =
        util::params::load("joy_exec.toml").wrap_err("Could not load joy_exec params")?;

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let mut smc_client = SmcClient::new(&zmq_ctx, &params.servers.smc)
        .wrap_err("Failed to initialise the SmcClient")?;

    // The client doesn't block on connection, the first start would be dropped
    let deadline = Instant::now() + CONNECT_TIMEOUT;
    while !smc_client.is_connected() {
        if Instant::now() >= deadline {
            return Err(eyre!(
                "{} not connected after {:?}",
                params.servers.smc.name,
                CONNECT_TIMEOUT
            ));
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    let report = dive_cycle::run(
        &mut smc_client,
        opt.speed,
        opt.num_cycles,
        Duration::from_secs_f64(opt.timeout_s),
        std::thread::sleep,
    )
    .wrap_err("Dive test aborted")?;

    info!(
        "Dive test complete: {} cycles, {} polls, {} failed polls",
        report.cycles, report.polls, report.failures
    );

    Ok(())
}
