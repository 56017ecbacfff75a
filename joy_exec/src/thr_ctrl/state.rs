//! Implementations for the ThrCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;

// Internal
use super::{Params, StartPolicy, ThrCtrlError, ThrusterCommand};
use comms_if::{eqpt::smc::LimitState, joy::JoystickState};
use util::{maths::clamp, module::State};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Thruster control module state
#[derive(Default)]
pub struct ThrCtrl {
    pub(crate) params: Params,

    pub(crate) report: StatusReport,
}

/// Input data to thruster control.
#[derive(Clone, Copy, Debug)]
pub struct InputData {
    /// Forward trigger axis value.
    pub fwd_trigger: f64,

    /// Reverse trigger axis value.
    pub rev_trigger: f64,

    /// End-stop state read for this event.
    pub limits: LimitState,
}

/// Status report for ThrCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Speed derived from the triggers before limit arbitration.
    pub requested_speed: f64,

    /// The request was dropped because the forward end-stop is asserted.
    pub held_at_fwd_limit: bool,

    /// The request was dropped because the reverse end-stop is asserted.
    pub held_at_rev_limit: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for ThrCtrl {
    type InitData = Params;
    type InitError = ThrCtrlError;

    type InputData = InputData;
    type OutputData = Option<ThrusterCommand>;
    type StatusReport = StatusReport;
    type ProcError = std::convert::Infallible;

    /// Initialise the ThrCtrl module with its parameters.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        if init_data.fwd_axis == init_data.rev_axis {
            return Err(ThrCtrlError::SameTriggerAxis(init_data.fwd_axis));
        }

        if !init_data.speed_gain.is_finite() || init_data.speed_gain <= 0.0 {
            return Err(ThrCtrlError::InvalidSpeedGain(init_data.speed_gain));
        }

        self.params = init_data;
        self.report = StatusReport::default();

        Ok(())
    }

    /// Decide on the thruster command for one joystick event.
    ///
    /// Never fails, a `None` output means no command is sent this event.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        let (cmd, report) = decide(
            &self.params,
            input_data.fwd_trigger,
            input_data.rev_trigger,
            input_data.limits,
        );

        self.report = report;

        Ok((cmd, report))
    }
}

impl ThrCtrl {
    /// Extract the input data for this module from a joystick state.
    pub fn input(&self, joy: &JoystickState, limits: LimitState) -> InputData {
        InputData {
            fwd_trigger: joy.trigger(self.params.fwd_axis),
            rev_trigger: joy.trigger(self.params.rev_axis),
            limits,
        }
    }

    /// Decide on the thruster command for the given joystick state and end-stop state.
    pub fn decide(&mut self, joy: &JoystickState, limits: LimitState) -> Option<ThrusterCommand> {
        let input = self.input(joy, limits);

        match self.proc(&input) {
            Ok((cmd, _)) => cmd,
            Err(e) => match e {},
        }
    }

    /// The status report of the last decision.
    pub fn report(&self) -> StatusReport {
        self.report
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Speed requested by the triggers.
///
/// The forward trigger takes priority. A released trigger reads exactly 1.0,
/// so any travel at all makes that trigger the active one.
pub fn requested_speed(fwd_trigger: f64, rev_trigger: f64, speed_gain: f64) -> f64 {
    if fwd_trigger < 1.0 {
        (1.0 - fwd_trigger) * speed_gain
    }
    else if rev_trigger < 1.0 {
        -(1.0 - rev_trigger) * speed_gain
    }
    else {
        0.0
    }
}

/// Arbitrate the requested speed against the end-stops.
///
/// Rules are evaluated in order, first match wins:
///     1. Forward end-stop asserted: only negative speeds (reversing off the
///        stop) are commanded, always with a start.
///     2. Reverse end-stop asserted: only positive speeds are commanded,
///        always with a start.
///     3. No end-stop: any speed is commanded, with a start as set by the
///        start policy.
///
/// A request rejected by an end-stop produces no command at all, the
/// thruster is not explicitly re-zeroed.
pub fn decide(
    params: &Params,
    fwd_trigger: f64,
    rev_trigger: f64,
    limits: LimitState,
) -> (Option<ThrusterCommand>, StatusReport) {
    let speed = clamp(
        &requested_speed(fwd_trigger, rev_trigger, params.speed_gain),
        &-1.0,
        &1.0,
    );

    let mut report = StatusReport {
        requested_speed: speed,
        ..Default::default()
    };

    let cmd = if limits.forward() {
        if speed < 0.0 {
            Some(ThrusterCommand { start: true, speed })
        }
        else {
            debug!("Forward end-stop asserted, holding (requested {:.3})", speed);
            report.held_at_fwd_limit = true;
            None
        }
    }
    else if limits.reverse() {
        if speed > 0.0 {
            Some(ThrusterCommand { start: true, speed })
        }
        else {
            debug!("Reverse end-stop asserted, holding (requested {:.3})", speed);
            report.held_at_rev_limit = true;
            None
        }
    }
    else {
        Some(ThrusterCommand {
            start: params.start_policy == StartPolicy::Always,
            speed,
        })
    };

    trace!("ThrCtrl: limits {:#06x}, speed {:.3} -> {:?}", limits.0, speed, cmd);

    (cmd, report)
}

#[cfg(test)]
mod test {
    use super::*;

    fn joy(fwd: f64, rev: f64) -> JoystickState {
        JoystickState::new(vec![0.0, 0.0, rev, 0.0, 0.0, fwd, 0.0, 0.0], vec![])
    }

    fn thr_ctrl(start_policy: StartPolicy) -> ThrCtrl {
        let mut t = ThrCtrl::default();
        t.init(Params {
            start_policy,
            ..Default::default()
        })
        .unwrap();
        t
    }

    #[test]
    fn test_forward_speed_law() {
        // Sweep the forward trigger over [0, 1] with reverse released
        let mut last = f64::INFINITY;
        for i in 0..=100 {
            let f = i as f64 / 100.0;
            let speed = requested_speed(f, 1.0, 0.5);

            assert_eq!(speed, (1.0 - f) * 0.5);

            // Non-increasing in f, i.e. non-decreasing in (1 - f)
            assert!(speed <= last);
            last = speed;
        }
    }

    #[test]
    fn test_forward_priority() {
        assert_eq!(requested_speed(0.0, 0.0, 0.5), 0.5);
        assert_eq!(requested_speed(1.0, 0.0, 0.5), -0.5);
        assert_eq!(requested_speed(1.0, 1.0, 0.5), 0.0);
    }

    #[test]
    fn test_reverse_no_limits() {
        let mut t = thr_ctrl(StartPolicy::Always);

        let cmd = t.decide(&joy(1.0, 0.5), LimitState::NONE);

        assert_eq!(cmd, Some(ThrusterCommand { start: true, speed: -0.25 }));
    }

    #[test]
    fn test_forward_limit_holds() {
        let mut t = thr_ctrl(StartPolicy::Always);
        let fwd_limit = LimitState(LimitState::ANALOG1);

        // Forward and zero requests are dropped
        for f in [0.0, 0.5, 0.99, 1.0].iter() {
            assert_eq!(t.decide(&joy(*f, 1.0), fwd_limit), None);
            assert!(t.report().held_at_fwd_limit);
        }

        // Reversing off the stop is allowed, with a start
        assert_eq!(
            t.decide(&joy(1.0, 0.0), fwd_limit),
            Some(ThrusterCommand { start: true, speed: -0.5 })
        );
    }

    #[test]
    fn test_reverse_limit_holds() {
        let mut t = thr_ctrl(StartPolicy::LimitRelease);
        let rev_limit = LimitState(LimitState::ANALOG2);

        assert_eq!(t.decide(&joy(1.0, 0.0), rev_limit), None);
        assert_eq!(t.decide(&joy(1.0, 1.0), rev_limit), None);
        assert!(t.report().held_at_rev_limit);

        // Start is mandatory off a limit regardless of policy
        assert_eq!(
            t.decide(&joy(0.0, 1.0), rev_limit),
            Some(ThrusterCommand { start: true, speed: 0.5 })
        );
    }

    #[test]
    fn test_forward_limit_checked_first() {
        let mut t = thr_ctrl(StartPolicy::Always);
        let both = LimitState(LimitState::ANALOG1 | LimitState::ANALOG2);

        // Positive speed would pass the reverse rule, but the forward rule wins
        assert_eq!(t.decide(&joy(0.0, 1.0), both), None);
        assert!(t.decide(&joy(1.0, 0.0), both).is_some());
    }

    #[test]
    fn test_start_policy() {
        let mut always = thr_ctrl(StartPolicy::Always);
        let mut release = thr_ctrl(StartPolicy::LimitRelease);

        assert!(always.decide(&joy(1.0, 1.0), LimitState::NONE).unwrap().start);
        assert!(!release.decide(&joy(1.0, 1.0), LimitState::NONE).unwrap().start);
        assert!(!release.decide(&joy(0.0, 1.0), LimitState::NONE).unwrap().start);
    }

    #[test]
    fn test_speed_clamped() {
        let mut t = ThrCtrl::default();
        t.init(Params {
            speed_gain: 2.0,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(t.decide(&joy(-1.0, 1.0), LimitState::NONE).unwrap().speed, 1.0);
    }

    #[test]
    fn test_missing_triggers_are_released() {
        let mut t = thr_ctrl(StartPolicy::Always);

        let cmd = t.decide(&JoystickState::new(vec![0.0, 0.3], vec![]), LimitState::NONE);

        assert_eq!(cmd, Some(ThrusterCommand { start: true, speed: 0.0 }));
    }

    #[test]
    fn test_invalid_params() {
        let mut t = ThrCtrl::default();

        assert!(matches!(
            t.init(Params { fwd_axis: 2, rev_axis: 2, ..Default::default() }),
            Err(ThrCtrlError::SameTriggerAxis(2))
        ));
        assert!(matches!(
            t.init(Params { speed_gain: f64::NAN, ..Default::default() }),
            Err(ThrCtrlError::InvalidSpeedGain(_))
        ));
    }
}
