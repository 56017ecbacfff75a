//! Main joystick control executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules and clients
//!     - Main loop, for each joystick state from the source:
//!         - Read the thruster end-stops
//!         - Thruster control processing and dispatch
//!         - Routing to home adjustment, indicator, or gait control processing and dispatch
//!
//! The joystick source is either the live publisher or a replay script. Live
//! states can be recorded into a script for later replay.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use joy_lib::{
    eqpt_client::{BlinkmClient, FinClient, SmcClient},
    gait_ctrl::GaitConfig,
    joy_client::{JoyClient, JoyClientError},
    joy_ctrl::JoyCtrl,
    params::JoyExecParams,
};
use util::{
    logger::{logger_init, LevelFilter},
    replay::{JoyRecorder, JoyReplay, PendingStates},
    session::{self, Session},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Age above which a joystick state is reported as stale.
const STALE_JOY_AGE_MS: i64 = 500;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "joy_exec", about = "Joystick teleoperation of the swimming robot")]
struct Opt {
    /// Gait to swim with, overriding the parameter file. One of `fish_standard`,
    /// `fish_advanced` or `turtle_standard`.
    gait: Option<GaitConfig>,

    /// Replay a recorded joystick script instead of listening to the joystick publisher.
    #[structopt(short, long, parse(from_os_str))]
    replay: Option<PathBuf>,

    /// Record the live joystick states into a replay script at this path.
    #[structopt(long, parse(from_os_str), conflicts_with = "replay")]
    record: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the joystick states incoming to the exec.
enum JoySource {
    Remote(JoyClient),
    Replay(JoyReplay),
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    color_eyre::install()?;

    let opt = Opt::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("joy_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    info!("Naro Joystick Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opt);

    // ---- LOAD PARAMETERS ----

    let mut params: JoyExecParams =
        util::params::load("joy_exec.toml").wrap_err("Could not load joy_exec params")?;

    if let Some(gait) = opt.gait {
        info!("Gait {} selected on the command line", gait);
        params.gait = gait;
    }

    info!("Exec parameters loaded, swimming with the {} gait", params.gait);

    // ---- INITIALISE NETWORK ----

    info!("Initialising network");

    let zmq_ctx = comms_if::net::zmq::Context::new();

    let smc_client = SmcClient::new(&zmq_ctx, &params.servers.smc)
        .wrap_err("Failed to initialise the SmcClient")?;
    info!("SmcClient initialised ({})", params.servers.smc.name);

    let fin_client = FinClient::new(&zmq_ctx, &params.servers.fin)
        .wrap_err("Failed to initialise the FinClient")?;
    info!("FinClient initialised ({})", params.servers.fin.name);

    let blinkm_client = BlinkmClient::new(&zmq_ctx, &params.servers.blinkm)
        .wrap_err("Failed to initialise the BlinkmClient")?;
    info!("BlinkmClient initialised ({})", params.servers.blinkm.name);

    let mut joy_source = match opt.replay {
        Some(ref path) => {
            info!("Loading replay from {:?}", path);

            let replay = JoyReplay::new(path).wrap_err("Failed to load the replay")?;

            info!(
                "Loaded replay lasts {:.02} s and contains {} states\n",
                replay.get_duration(),
                replay.get_num_states()
            );

            JoySource::Replay(replay)
        }
        None => {
            let client = JoyClient::new(&zmq_ctx, &params.joy_endpoint)
                .wrap_err("Failed to initialise the JoyClient")?;
            info!("JoyClient listening on {}\n", params.joy_endpoint);

            JoySource::Remote(client)
        }
    };

    let mut recorder = match opt.record {
        Some(ref path) => {
            info!("Recording joystick states to {:?}", path);
            Some(JoyRecorder::create(path).wrap_err("Failed to create the recording")?)
        }
        None => None,
    };

    info!("Network initialisation complete");

    // ---- INITIALISE MODULES ----

    let mut joy_ctrl = JoyCtrl::new(&params, smc_client, fin_client, blinkm_client)
        .wrap_err("Failed to initialise JoyCtrl")?;

    info!("JoyCtrl init complete");

    for (name, connected) in [
        (&params.servers.smc.name, joy_ctrl.thruster().is_connected()),
        (&params.servers.fin.name, joy_ctrl.fin().is_connected()),
        (&params.servers.blinkm.name, joy_ctrl.indicator().is_connected()),
    ]
    .iter()
    {
        if !connected {
            warn!("{} not connected yet, its requests are dropped until it is", name);
        }
    }

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        match joy_source {
            JoySource::Remote(ref client) => match client.recieve_state() {
                Ok(Some(joy)) => {
                    let age_ms = chrono::Utc::now()
                        .signed_duration_since(joy.timestamp)
                        .num_milliseconds();

                    if age_ms > STALE_JOY_AGE_MS {
                        warn!("Joystick state is {:.3} s old", (age_ms as f64) * 0.001);
                    }

                    if let Some(ref mut recorder) = recorder {
                        if let Err(e) = recorder.record(session::get_elapsed_seconds(), &joy) {
                            warn!("Could not record joystick state: {}", e);
                        }
                    }

                    joy_ctrl.handle(&joy);
                }
                Ok(None) => (),
                Err(e @ JoyClientError::StateParseError(_))
                | Err(e @ JoyClientError::NonUtf8Message) => {
                    warn!("Dropping invalid joystick state: {}", e)
                }
                Err(e) => {
                    return Err(e).wrap_err("An error occured while receiving joystick states")
                }
            },

            JoySource::Replay(ref mut replay) => {
                match replay.get_pending(session::get_elapsed_seconds()) {
                    PendingStates::None => (),
                    PendingStates::Some(states) => {
                        for joy in states.iter() {
                            joy_ctrl.handle(joy);
                        }
                    }
                    // Exit if end of script reached
                    PendingStates::EndOfScript => {
                        info!("End of replay reached, stopping");
                        break;
                    }
                }

                std::thread::sleep(std::time::Duration::from_millis(10));
            }
        }
    }

    // ---- SHUTDOWN ----

    if let Some(recorder) = recorder {
        info!("Recorded {} joystick states", recorder.get_num_states());
    }

    info!("End of execution");

    Ok(())
}
