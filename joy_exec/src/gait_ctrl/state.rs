//! Implementations for the GaitCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use super::{
    calc_fish_advanced::calc_fish_advanced,
    calc_fish_standard::calc_fish_standard,
    calc_turtle_standard::calc_turtle_standard,
    DiffGains, GaitConfig, ServoCommandVector,
    PITCH_AXIS, REAR_PITCH_AXIS, YAW_AXIS,
};
use comms_if::joy::JoystickState;
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Gait control module state
#[derive(Default)]
pub struct GaitCtrl {
    pub(crate) config: GaitConfig,

    pub(crate) report: StatusReport,
}

/// Input data to gait control, the joystick axes the gaits read.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputData {
    /// Pitch (lateral) axis, positive drives the fins.
    pub pitch: f64,

    /// Yaw (differential) axis.
    pub yaw: f64,

    /// Secondary axis, used by the turtle gait for rear pitch.
    pub rear_pitch: f64,
}

/// Status report for GaitCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Gains applied to the side fins.
    pub gains: Option<DiffGains>,

    /// The gait produced its dive/climb posture rather than oscillation.
    pub posture: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for GaitCtrl {
    type InitData = GaitConfig;
    type InitError = std::convert::Infallible;

    type InputData = InputData;
    type OutputData = ServoCommandVector;
    type StatusReport = StatusReport;
    type ProcError = std::convert::Infallible;

    /// Initialise the GaitCtrl module with the gait to use.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        self.config = init_data;
        self.report = StatusReport::default();

        Ok(())
    }

    /// Compute the servo commands for one joystick event.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let output = synthesize_input(self.config, input_data);

        self.report = StatusReport {
            gains: Some(DiffGains::from_yaw(input_data.yaw)),
            posture: is_posture(self.config, input_data),
        };

        trace!(
            "GaitCtrl ({}) output:\n    amp: {:?}\n    phs: {:?}\n    off: {:?}",
            self.config,
            output.amplitude_rad,
            output.phase_rad,
            output.offset_rad
        );

        Ok((output, self.report))
    }
}

impl GaitCtrl {
    /// The gait this module was initialised with.
    pub fn config(&self) -> GaitConfig {
        self.config
    }

    /// Synthesise the servo commands for a joystick state.
    pub fn synthesize(&mut self, joy: &JoystickState) -> ServoCommandVector {
        match self.proc(&InputData::from(joy)) {
            Ok((output, _)) => output,
            Err(e) => match e {},
        }
    }

    /// The status report of the last synthesis.
    pub fn report(&self) -> StatusReport {
        self.report
    }
}

impl From<&JoystickState> for InputData {
    fn from(joy: &JoystickState) -> Self {
        Self {
            pitch: joy.axis(PITCH_AXIS),
            yaw: joy.axis(YAW_AXIS),
            rear_pitch: joy.axis(REAR_PITCH_AXIS),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Compute the servo commands for a joystick state with the given gait.
///
/// Pure and deterministic, the same inputs always produce the same commands.
pub fn synthesize(config: GaitConfig, joy: &JoystickState) -> ServoCommandVector {
    synthesize_input(config, &InputData::from(joy))
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn synthesize_input(config: GaitConfig, input: &InputData) -> ServoCommandVector {
    match config {
        GaitConfig::FishStandard => calc_fish_standard(input),
        GaitConfig::FishAdvanced => calc_fish_advanced(input),
        GaitConfig::TurtleStandard => calc_turtle_standard(input),
    }
}

fn is_posture(config: GaitConfig, input: &InputData) -> bool {
    match config {
        GaitConfig::FishStandard => false,
        GaitConfig::FishAdvanced | GaitConfig::TurtleStandard => input.pitch < 0.0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gait_ctrl::NUM_SERVOS;
    use util::maths::deg_to_rad;

    fn joy(pitch: f64, yaw: f64, rear: f64) -> JoystickState {
        JoystickState::new(vec![0.0, pitch, 1.0, yaw, rear, 1.0, 0.0, 0.0], vec![])
    }

    #[test]
    fn test_fish_standard_scenario() {
        let cmd = synthesize(GaitConfig::FishStandard, &joy(0.5, 0.0, 0.0));

        assert_eq!(cmd.frequency_hz, [2.0; NUM_SERVOS]);
        assert_eq!(cmd.amplitude_rad[0], 0.5 * deg_to_rad(20.0));
        assert_eq!(cmd.amplitude_rad[2], -0.5 * deg_to_rad(20.0));
        assert_eq!(cmd.amplitude_rad[1], 0.5 * deg_to_rad(25.0));
        assert_eq!(cmd.amplitude_rad[3], -0.5 * deg_to_rad(25.0));
        assert_eq!(cmd.phase_rad[1], deg_to_rad(-90.0));
        assert_eq!(cmd.phase_rad[3], deg_to_rad(-90.0));
        assert_eq!(cmd.offset_rad[5], 0.0);
        assert_eq!(cmd.amplitude_rad[6], 0.5 * deg_to_rad(20.0));
        assert_eq!(cmd.offset_rad[6], 0.0);
    }

    #[test]
    fn test_deterministic() {
        let j = joy(0.3, -0.6, 0.2);

        for g in [
            GaitConfig::FishStandard,
            GaitConfig::FishAdvanced,
            GaitConfig::TurtleStandard,
        ]
        .iter()
        {
            assert_eq!(synthesize(*g, &j), synthesize(*g, &j));
        }
    }

    #[test]
    fn test_module_state() {
        let mut gait_ctrl = GaitCtrl::default();
        gait_ctrl.init(GaitConfig::TurtleStandard).unwrap();

        let cmd = gait_ctrl.synthesize(&joy(-0.5, 0.0, 0.0));

        assert_eq!(cmd, synthesize(GaitConfig::TurtleStandard, &joy(-0.5, 0.0, 0.0)));
        assert!(gait_ctrl.report().posture);
        assert_eq!(gait_ctrl.config(), GaitConfig::TurtleStandard);

        gait_ctrl.synthesize(&joy(0.5, 0.5, 0.0));
        assert!(!gait_ctrl.report().posture);
        assert_eq!(
            gait_ctrl.report().gains,
            Some(DiffGains { left: 0.5, right: 1.0 })
        );
    }

    #[test]
    fn test_short_axes() {
        // Devices reporting fewer axes leave the missing ones centred
        let cmd = synthesize(
            GaitConfig::FishStandard,
            &JoystickState::new(vec![0.0, 1.0], vec![]),
        );

        assert_eq!(cmd.amplitude_rad[0], deg_to_rad(20.0));
        assert_eq!(cmd.offset_rad[5], 0.0);
    }
}
