//! # Simulated Equipment
//!
//! In-memory stand-ins for the thruster, servo controller, fin oscillator and indicator light.
//! Each request is applied to the simulated state and answered with the serialised response the
//! real server would give.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, info, warn};
use serde::Serialize;

use comms_if::eqpt::{
    blinkm::BlinkmRequest,
    fin::FinRequest,
    smc::{LimitState, SmcRequest},
    usc::UscRequest,
    EqptResponse,
};

use crate::params::{EqptExecParams, LimitsParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// State of all simulated equipment.
pub struct SimEqpt {
    thruster: SimThruster,

    /// Directly commanded servo positions, in radians
    positions: Vec<f64>,

    /// Fin servo homes, in radians
    homes: Vec<f64>,

    /// Latest oscillation command for each fin servo
    commands: Vec<Oscillation>,

    color: [f64; 3],
}

/// Oscillation parameters of one servo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Oscillation {
    pub frequency_hz: f64,
    pub amplitude_rad: f64,
    pub phase_rad: f64,
    pub offset_rad: f64,
}

/// Thruster travelling along a stroke between two end-stops.
struct SimThruster {
    params: LimitsParams,

    /// Position along the stroke, -1 at the reverse end-stop and +1 at the forward one
    position: f64,

    speed: f64,

    /// Speed commands only move the thruster once it has been started
    started: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimEqpt {
    pub fn new(params: &EqptExecParams) -> Self {
        Self {
            thruster: SimThruster {
                params: params.limits.clone(),
                position: 0.0,
                speed: 0.0,
                started: false,
            },
            positions: vec![0.0; params.num_servos],
            homes: vec![0.0; params.num_servos],
            commands: vec![Oscillation::default(); params.num_servos],
            color: [0.0; 3],
        }
    }

    /// Advance the simulation by `dt_s` seconds.
    pub fn step(&mut self, dt_s: f64) {
        self.thruster.step(dt_s);
    }

    pub fn homes(&self) -> &[f64] {
        &self.homes
    }

    pub fn commands(&self) -> &[Oscillation] {
        &self.commands
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn color(&self) -> [f64; 3] {
        self.color
    }

    /// Handle a request to the thruster motor controller.
    pub fn handle_smc(&mut self, request: SmcRequest) -> Result<String, serde_json::Error> {
        match request {
            SmcRequest::GetLimits => {
                serde_json::to_string(&EqptResponse::Ok(self.thruster.limits()))
            }
            SmcRequest::Start => {
                debug!("Thruster started");
                self.thruster.started = true;
                ok()
            }
            SmcRequest::SetSpeed(speed) => {
                if !speed.is_finite() || speed.abs() > 1.0 {
                    return failed(format!("Speed {} is outside [-1, 1]", speed));
                }

                if !self.thruster.started && speed != 0.0 {
                    warn!("Speed {:.3} set while the thruster is not started", speed);
                }

                self.thruster.speed = speed;
                ok()
            }
        }
    }

    /// Handle a request to the servo controller.
    pub fn handle_usc(&mut self, request: UscRequest) -> Result<String, serde_json::Error> {
        match request {
            UscRequest::SetPositions {
                channels,
                angles_rad,
            } => {
                if channels.len() != angles_rad.len() {
                    return failed(mismatch("angles", channels.len(), angles_rad.len()));
                }

                let positions = &mut self.positions;
                apply(&channels, positions.len(), |i, c| positions[c] = angles_rad[i])
            }
        }
    }

    /// Handle a request to the fin oscillator.
    pub fn handle_fin(&mut self, request: FinRequest) -> Result<String, serde_json::Error> {
        match request {
            FinRequest::GetHomes { servos } => {
                let missing: Vec<usize> = servos
                    .iter()
                    .copied()
                    .filter(|s| *s >= self.homes.len())
                    .collect();

                if !missing.is_empty() {
                    return failed(format!("Servos {:?} do not exist", missing));
                }

                let homes: Vec<f64> = servos.iter().map(|s| self.homes[*s]).collect();

                serde_json::to_string(&EqptResponse::Ok(homes))
            }
            FinRequest::SetHomes { servos, homes_rad } => {
                if servos.len() != homes_rad.len() {
                    return failed(mismatch("homes", servos.len(), homes_rad.len()));
                }

                info!("Setting homes of {:?} to {:?} rad", servos, homes_rad);

                let homes = &mut self.homes;
                apply(&servos, homes.len(), |i, s| homes[s] = homes_rad[i])
            }
            FinRequest::SetCommands {
                servos,
                frequency_hz,
                amplitude_rad,
                phase_rad,
                offset_rad,
            } => {
                for (name, len) in [
                    ("frequencies", frequency_hz.len()),
                    ("amplitudes", amplitude_rad.len()),
                    ("phases", phase_rad.len()),
                    ("offsets", offset_rad.len()),
                ]
                .iter()
                {
                    if *len != servos.len() {
                        return failed(mismatch(name, servos.len(), *len));
                    }
                }

                if frequency_hz.iter().any(|f| *f < 0.0) {
                    return failed("Frequencies must not be negative".into());
                }

                let commands = &mut self.commands;
                apply(
                    &servos,
                    commands.len(),
                    |i, s| {
                        commands[s] = Oscillation {
                            frequency_hz: frequency_hz[i],
                            amplitude_rad: amplitude_rad[i],
                            phase_rad: phase_rad[i],
                            offset_rad: offset_rad[i],
                        }
                    },
                )
            }
        }
    }

    /// Handle a request to the indicator light.
    pub fn handle_blinkm(&mut self, request: BlinkmRequest) -> Result<String, serde_json::Error> {
        match request {
            BlinkmRequest::SetColor(rgb) => {
                if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
                    return failed(format!("Colour {:?} is outside [0, 1]", rgb));
                }

                info!("Indicator colour set to {:?}", rgb);
                self.color = rgb;
                ok()
            }
        }
    }
}

impl SimThruster {
    fn step(&mut self, dt_s: f64) {
        if self.params.fixed.is_some() || !self.started || self.params.full_travel_s <= 0.0 {
            return;
        }

        // The stroke is 2 long, from -1 to +1
        self.position += 2.0 * self.speed * dt_s / self.params.full_travel_s;

        if self.position >= 1.0 || self.position <= -1.0 {
            self.position = self.position.max(-1.0).min(1.0);

            // Hitting an end-stop stops the motor until it is started again
            debug!("Thruster reached end-stop at {:+.0}", self.position);
            self.started = false;
            self.speed = 0.0;
        }
    }

    fn limits(&self) -> LimitState {
        if let Some(fixed) = self.params.fixed {
            return LimitState(fixed);
        }

        if self.position >= 1.0 {
            LimitState(LimitState::ANALOG1)
        }
        else if self.position <= -1.0 {
            LimitState(LimitState::ANALOG2)
        }
        else {
            LimitState::NONE
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn ok() -> Result<String, serde_json::Error> {
    serde_json::to_string(&EqptResponse::Ok(()))
}

fn failed(reason: String) -> Result<String, serde_json::Error> {
    warn!("Request failed: {}", reason);
    serde_json::to_string(&EqptResponse::<()>::Failed(reason))
}

fn mismatch(what: &str, expected: usize, found: usize) -> String {
    format!("Expected {} {}, found {}", expected, what, found)
}

/// Apply `f(index_in_request, servo)` to every servo which exists.
///
/// Servos that exist are updated even if others in the same request don't, in which case the
/// request fails.
fn apply<F>(servos: &[usize], num_servos: usize, mut f: F) -> Result<String, serde_json::Error>
where
    F: FnMut(usize, usize),
{
    let mut missing = Vec::new();

    for (i, s) in servos.iter().enumerate() {
        if *s < num_servos {
            f(i, *s);
        }
        else {
            missing.push(*s);
        }
    }

    match missing.is_empty() {
        true => ok(),
        false => failed(format!("Servos {:?} do not exist", missing)),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::ServerEndpoints;

    fn params(fixed: Option<u16>) -> EqptExecParams {
        EqptExecParams {
            servers: ServerEndpoints {
                smc: "tcp://*:5030".into(),
                usc: "tcp://*:5031".into(),
                fin: "tcp://*:5032".into(),
                blinkm: "tcp://*:5033".into(),
            },
            num_servos: 8,
            limits: LimitsParams {
                fixed,
                full_travel_s: 2.0,
            },
        }
    }

    fn limits(sim: &mut SimEqpt) -> LimitState {
        let rep = sim.handle_smc(SmcRequest::GetLimits).unwrap();
        let rep: EqptResponse<LimitState> = serde_json::from_str(&rep).unwrap();
        rep.into_result().unwrap()
    }

    fn unit(rep: Result<String, serde_json::Error>) -> Result<(), String> {
        serde_json::from_str::<EqptResponse<()>>(&rep.unwrap())
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_thruster_travel() {
        let mut sim = SimEqpt::new(&params(None));

        // Not started, so doesn't move
        unit(sim.handle_smc(SmcRequest::SetSpeed(1.0))).unwrap();
        sim.step(5.0);
        assert_eq!(limits(&mut sim), LimitState::NONE);

        unit(sim.handle_smc(SmcRequest::Start)).unwrap();
        sim.step(0.5);
        assert_eq!(limits(&mut sim), LimitState::NONE);
        sim.step(0.5);
        assert!(limits(&mut sim).forward());

        // Stopped at the end-stop until started again
        unit(sim.handle_smc(SmcRequest::SetSpeed(-1.0))).unwrap();
        sim.step(1.0);
        assert!(limits(&mut sim).forward());

        unit(sim.handle_smc(SmcRequest::Start)).unwrap();
        unit(sim.handle_smc(SmcRequest::SetSpeed(-1.0))).unwrap();
        sim.step(2.5);
        assert!(limits(&mut sim).reverse());
    }

    #[test]
    fn test_fixed_limits() {
        let mut sim = SimEqpt::new(&params(Some(LimitState::ANALOG2)));

        unit(sim.handle_smc(SmcRequest::Start)).unwrap();
        unit(sim.handle_smc(SmcRequest::SetSpeed(1.0))).unwrap();
        sim.step(10.0);

        assert_eq!(limits(&mut sim), LimitState(LimitState::ANALOG2));
        assert!(unit(sim.handle_smc(SmcRequest::SetSpeed(1.5))).is_err());
    }

    #[test]
    fn test_homes() {
        let mut sim = SimEqpt::new(&params(None));

        unit(sim.handle_fin(FinRequest::SetHomes {
            servos: vec![2, 3],
            homes_rad: vec![0.1, -0.2],
        }))
        .unwrap();

        let get_homes = |sim: &mut SimEqpt, servos: Vec<usize>| {
            let rep = sim.handle_fin(FinRequest::GetHomes { servos }).unwrap();
            serde_json::from_str::<EqptResponse<Vec<f64>>>(&rep)
                .unwrap()
                .into_result()
        };

        assert_eq!(get_homes(&mut sim, vec![3, 2]), Ok(vec![-0.2, 0.1]));

        // Any missing servo fails the whole read, nothing unparseable goes on the wire
        match get_homes(&mut sim, vec![3, 2, 9]) {
            Err(msg) => assert!(msg.contains("[9]"), "unexpected message: {}", msg),
            Ok(h) => panic!("Expected a failed reply, got {:?}", h),
        }
    }

    #[test]
    fn test_out_of_range_servo() {
        let mut sim = SimEqpt::new(&params(None));

        let result = unit(sim.handle_fin(FinRequest::SetHomes {
            servos: vec![1, 8],
            homes_rad: vec![0.3, 0.3],
        }));

        assert!(result.is_err());

        // The servo that exists is still updated
        assert_eq!(sim.homes()[1], 0.3);
    }

    #[test]
    fn test_commands() {
        let mut sim = SimEqpt::new(&params(None));

        unit(sim.handle_fin(FinRequest::SetCommands {
            servos: vec![0, 1],
            frequency_hz: vec![2.0, 2.0],
            amplitude_rad: vec![0.3, -0.3],
            phase_rad: vec![0.0, -1.5],
            offset_rad: vec![0.0, 0.1],
        }))
        .unwrap();

        assert_eq!(sim.commands()[1].phase_rad, -1.5);
        assert_eq!(sim.commands()[2], Oscillation::default());

        assert!(unit(sim.handle_fin(FinRequest::SetCommands {
            servos: vec![0, 1],
            frequency_hz: vec![2.0],
            amplitude_rad: vec![0.3, -0.3],
            phase_rad: vec![0.0, -1.5],
            offset_rad: vec![0.0, 0.1],
        }))
        .is_err());
    }

    #[test]
    fn test_positions_and_color() {
        let mut sim = SimEqpt::new(&params(None));

        unit(sim.handle_usc(UscRequest::SetPositions {
            channels: vec![4],
            angles_rad: vec![0.5],
        }))
        .unwrap();
        assert_eq!(sim.positions()[4], 0.5);

        unit(sim.handle_blinkm(BlinkmRequest::SetColor([1.0, 0.3, 0.0]))).unwrap();
        assert_eq!(sim.color(), [1.0, 0.3, 0.0]);

        assert!(unit(sim.handle_blinkm(BlinkmRequest::SetColor([2.0, 0.0, 0.0]))).is_err());
    }
}
