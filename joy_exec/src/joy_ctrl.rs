//! # Joystick Control
//!
//! Handles one joystick event at a time: reads the thruster end-stops, decides and sends the
//! thruster command, then routes the event to one of the home adjustment, indicator or gait
//! paths.
//!
//! No equipment failure stops the handling of an event. Each failed side effect is logged,
//! recorded in the [`EventReport`] and dropped, and the next event is handled as normal.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, trace, warn};
use serde::Serialize;

use comms_if::{eqpt::smc::LimitState, joy::JoystickState};
use util::{maths::deg_to_rad, module::State};

use crate::{
    eqpt_client::{EqptClientError, FinService, IndicatorService, ThrusterService},
    gait_ctrl::{GaitConfig, GaitCtrl, ServoCommandVector},
    params::{JoyExecParams, ServerParams, Servers},
    thr_ctrl::{ThrCtrl, ThrCtrlError, ThrusterCommand},
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of buttons which select a servo pair for home adjustment.
pub const NUM_PAIR_BUTTONS: usize = 4;

/// Button which, held with a pair button, selects an indicator colour instead.
pub const INDICATOR_MODIFIER_BUTTON: usize = 5;

/// Indicator colours selected by the pair buttons: green, red, blue, orange.
pub const COLORS: [[f64; 3]; NUM_PAIR_BUTTONS] = [
    [0.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.3, 0.0],
];

/// Axes adjusting the first and second servo of the selected pair's home.
pub const HOME_AXES: [usize; 2] = [1, 4];

/// Home change per event at full axis deflection.
///
/// Units: degrees
pub const HOME_STEP_DEG: f64 = 1.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Per-event controller for the swimming robot.
pub struct JoyCtrl<T, F, I> {
    thr_ctrl: ThrCtrl,
    gait_ctrl: GaitCtrl,

    servers: Servers,

    thruster: T,
    fin: F,
    indicator: I,
}

/// What happened while handling a joystick event.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventReport {
    /// End-stop state used for the thruster decision.
    pub limits: LimitState,

    /// Thruster command decided on, `None` if the thruster was left alone.
    pub thr_cmd: Option<ThrusterCommand>,

    /// The path the event was routed to.
    pub route: Route,

    /// Servo commands sent on the gait path.
    pub servo_cmd: Option<ServoCommandVector>,

    /// Full names of the operations which failed, in the order they were attempted.
    pub failed_ops: Vec<String>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Where a joystick event is routed after the thruster has been handled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Route {
    /// Synthesise and send gait commands.
    Gait,

    /// Add the deltas to the homes of the two servos.
    HomeAdjust {
        servos: [usize; 2],
        deltas_rad: [f64; 2],
    },

    /// Set the indicator colour.
    Indicator { rgb: [f64; 3] },
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<T, F, I> JoyCtrl<T, F, I>
where
    T: ThrusterService,
    F: FinService,
    I: IndicatorService,
{
    /// Create a new controller using the given equipment.
    ///
    /// `params.gait` is the gait used for the life of the controller.
    pub fn new(
        params: &JoyExecParams,
        thruster: T,
        fin: F,
        indicator: I,
    ) -> Result<Self, ThrCtrlError> {
        let mut thr_ctrl = ThrCtrl::default();
        thr_ctrl.init(params.thr_ctrl.clone())?;

        let mut gait_ctrl = GaitCtrl::default();
        match gait_ctrl.init(params.gait) {
            Ok(()) => (),
            Err(e) => match e {},
        }

        Ok(Self {
            thr_ctrl,
            gait_ctrl,
            servers: params.servers.clone(),
            thruster,
            fin,
            indicator,
        })
    }

    /// The gait in use.
    pub fn gait(&self) -> GaitConfig {
        self.gait_ctrl.config()
    }

    /// The thruster service events are dispatched to.
    pub fn thruster(&self) -> &T {
        &self.thruster
    }

    /// The fin service home adjustments and gait commands are dispatched to.
    pub fn fin(&self) -> &F {
        &self.fin
    }

    /// The indicator service colour overrides are dispatched to.
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Handle a single joystick event.
    ///
    /// Blocks on each equipment call in turn. Never fails, failures are reported in the returned
    /// report.
    pub fn handle(&mut self, joy: &JoystickState) -> EventReport {
        let mut failed_ops = Vec::new();

        // ---- THRUSTER ----

        // The end-stops are read fresh for every event. If they can't be read motion is
        // allowed, which is unsafe on a real vehicle.
        let limits = match self.thruster.get_limits() {
            Ok(l) => l,
            Err(e) => {
                let op = op_name(&self.servers.smc, "get_limits");
                warn!(
                    "{} failed, assuming no end-stop is asserted (safety fallback): {}",
                    op, e
                );
                failed_ops.push(op);
                LimitState::NONE
            }
        };

        let thr_cmd = self.thr_ctrl.decide(joy, limits);

        if let Some(cmd) = thr_cmd {
            if cmd.start {
                if let Err(e) = self.thruster.start() {
                    failed_ops.push(report_failure(&self.servers.smc, "start", &e));
                }
            }

            if let Err(e) = self.thruster.set_speed(cmd.speed) {
                failed_ops.push(report_failure(&self.servers.smc, "set_speed", &e));
            }
        }

        // ---- FINS ----

        let route = route(joy);
        let mut servo_cmd = None;

        match route {
            Route::HomeAdjust { servos, deltas_rad } => {
                self.adjust_homes(servos, deltas_rad, &mut failed_ops);
            }
            Route::Indicator { rgb } => {
                debug!("Setting indicator colour to {:?}", rgb);

                if let Err(e) = self.indicator.set_color(rgb) {
                    failed_ops.push(report_failure(&self.servers.blinkm, "set_color", &e));
                }
            }
            Route::Gait => {
                let cmd = self.gait_ctrl.synthesize(joy);

                if let Err(e) = self.fin.set_commands(
                    &ServoCommandVector::servos(),
                    &cmd.frequency_hz,
                    &cmd.amplitude_rad,
                    &cmd.phase_rad,
                    &cmd.offset_rad,
                ) {
                    failed_ops.push(report_failure(&self.servers.fin, "set_commands", &e));
                }

                servo_cmd = Some(cmd);
            }
        }

        let report = EventReport {
            limits,
            thr_cmd,
            route,
            servo_cmd,
            failed_ops,
        };

        trace!("JoyCtrl event: {:?}", report);

        report
    }

    /// Read the homes of a servo pair, add the deltas and write them back.
    fn adjust_homes(
        &mut self,
        servos: [usize; 2],
        deltas_rad: [f64; 2],
        failed_ops: &mut Vec<String>,
    ) {
        let homes = match self.fin.get_homes(&servos) {
            Ok(h) if h.len() == servos.len() => h,
            Ok(h) => {
                let op = op_name(&self.servers.fin, "get_homes");
                warn!(
                    "{} returned {} homes for {} servos, not adjusting",
                    op,
                    h.len(),
                    servos.len()
                );
                failed_ops.push(op);
                return;
            }
            Err(e) => {
                failed_ops.push(report_failure(&self.servers.fin, "get_homes", &e));
                return;
            }
        };

        let new_homes = [homes[0] + deltas_rad[0], homes[1] + deltas_rad[1]];

        debug!("Adjusting homes of servos {:?} to {:?} rad", servos, new_homes);

        if let Err(e) = self.fin.set_homes(&servos, &new_homes) {
            failed_ops.push(report_failure(&self.servers.fin, "set_homes", &e));
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Decide where an event is routed from its buttons.
///
/// Only the lowest numbered pressed button counts. A pair button (0 to 3) adjusts the homes of
/// servos `2b` and `2b + 1`, or selects an indicator colour if the modifier button is also held.
/// Any other button, or none, leaves the event on the gait path.
pub fn route(joy: &JoystickState) -> Route {
    match joy.first_pressed() {
        Some(b) if b < NUM_PAIR_BUTTONS => {
            if joy.button(INDICATOR_MODIFIER_BUTTON) {
                Route::Indicator { rgb: COLORS[b] }
            }
            else {
                Route::HomeAdjust {
                    servos: [2 * b, 2 * b + 1],
                    deltas_rad: [
                        joy.axis(HOME_AXES[0]) * deg_to_rad(HOME_STEP_DEG),
                        joy.axis(HOME_AXES[1]) * deg_to_rad(HOME_STEP_DEG),
                    ],
                }
            }
        }
        _ => Route::Gait,
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn op_name(server: &ServerParams, op: &str) -> String {
    format!("{}/{}", server.name, op)
}

/// Log a failed equipment call and return the full name of the operation.
fn report_failure(server: &ServerParams, op: &str, err: &EqptClientError) -> String {
    let op = op_name(server, op);

    if err.is_unavailable() {
        warn!("{} unavailable: {}", op, err);
    }
    else {
        warn!("{} failed: {}", op, err);
    }

    op
}
