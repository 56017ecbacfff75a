//! # Fin test
//!
//! Sets the position of a single fin base servo through the servo controller.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use color_eyre::{eyre::WrapErr, Report};
use structopt::StructOpt;

use joy_lib::{
    eqpt_client::{ServoService, UscClient},
    params::JoyExecParams,
};
use util::maths::deg_to_rad;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "fin_test", about = "Position a single fin servo")]
struct Opt {
    /// Servo channel
    channel: usize,

    /// Target angle in degrees
    #[structopt(allow_hyphen_values = true)]
    angle_deg: f64,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    let params: JoyExecParams =
        util::params::load("joy_exec.toml").wrap_err("Could not load joy_exec params")?;

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let mut usc_client = UscClient::new(&zmq_ctx, &params.servers.usc)
        .wrap_err("Failed to initialise the UscClient")?;

    // The client doesn't block on connection, give it a moment before the request
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(2);
    while !usc_client.is_connected() && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    usc_client
        .set_positions(&[opt.channel], &[deg_to_rad(opt.angle_deg)])
        .wrap_err_with(|| {
            format!(
                "{}/set_positions failed for channel {}",
                params.servers.usc.name, opt.channel
            )
        })?;

    println!("Servo {} set to {} deg", opt.channel, opt.angle_deg);

    Ok(())
}
