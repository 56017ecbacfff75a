//! # Dive Cycle
//!
//! Drives the thruster back and forth between its end-stops a number of times, used to exercise
//! the dive mechanism on the bench.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};
use std::time::Duration;

use comms_if::eqpt::smc::LimitState;

use crate::eqpt_client::{EqptClientError, ThrusterService};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Period at which the end-stops are polled while travelling.
pub const LIMIT_POLL_PERIOD: Duration = Duration::from_millis(100);

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Summary of a dive cycle run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DiveReport {
    /// Number of end-stops reached.
    pub cycles: u32,

    /// Number of end-stop polls made.
    pub polls: u64,

    /// Number of end-stop polls which failed.
    pub failures: u32,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum DiveError {
    #[error("Cycle {cycle}: {op} failed: {source}")]
    CommandFailed {
        cycle: u32,
        op: &'static str,
        source: EqptClientError,
    },

    #[error("Cycle {cycle}: end-stop not reached within {timeout:?}")]
    TravelTimeout { cycle: u32, timeout: Duration },
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run `num_cycles` end-stop to end-stop traversals starting at `speed`.
///
/// Each cycle starts the thruster, commands the speed and waits until the end-stop in the
/// direction of travel asserts, then reverses. `sleep` is called between polls.
///
/// A failed `start` or `set_speed` aborts the run, as does a traversal taking longer than
/// `travel_timeout`. A failed poll reads as no end-stop. The thruster is commanded to zero speed
/// however the run ends.
pub fn run<T, S>(
    thruster: &mut T,
    speed: f64,
    num_cycles: u32,
    travel_timeout: Duration,
    mut sleep: S,
) -> Result<DiveReport, DiveError>
where
    T: ThrusterService,
    S: FnMut(Duration),
{
    let mut report = DiveReport::default();

    if num_cycles == 0 {
        return Ok(report);
    }

    let result = run_cycles(thruster, speed, num_cycles, travel_timeout, &mut sleep, &mut report);

    if let Err(e) = thruster.set_speed(0.0) {
        warn!("Could not stop the thruster: {}", e);
    }

    result.map(|_| report)
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn run_cycles<T, S>(
    thruster: &mut T,
    speed: f64,
    num_cycles: u32,
    travel_timeout: Duration,
    sleep: &mut S,
    report: &mut DiveReport,
) -> Result<(), DiveError>
where
    T: ThrusterService,
    S: FnMut(Duration),
{
    let max_polls = (travel_timeout.as_millis() / LIMIT_POLL_PERIOD.as_millis()).max(1) as u64;
    let mut speed = speed;

    for cycle in 1..=num_cycles {
        info!("Cycle {}/{}: speed {:.3}", cycle, num_cycles, speed);

        thruster
            .start()
            .map_err(|source| DiveError::CommandFailed { cycle, op: "start", source })?;
        thruster
            .set_speed(speed)
            .map_err(|source| DiveError::CommandFailed { cycle, op: "set_speed", source })?;

        let limit_mask = if speed > 0.0 {
            LimitState::ANALOG1
        }
        else {
            LimitState::ANALOG2
        };

        let mut polls = 0;

        loop {
            polls += 1;
            report.polls += 1;

            let limits = thruster.get_limits().unwrap_or_else(|e| {
                warn!("get_limits failed: {}", e);
                report.failures += 1;
                LimitState::NONE
            });

            if limits.0 & limit_mask != 0 {
                break;
            }

            if polls >= max_polls {
                return Err(DiveError::TravelTimeout {
                    cycle,
                    timeout: travel_timeout,
                });
            }

            sleep(LIMIT_POLL_PERIOD);
        }

        report.cycles += 1;
        speed = -speed;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Thruster which travels to an end-stop in a fixed number of polls.
    struct MockThruster {
        speed: f64,
        position: i32,
        travel: i32,
        speeds: Vec<f64>,
        starts: u32,
        fail_every_other_poll: bool,
        polls: u32,
        failed_starts: u32,
    }

    impl MockThruster {
        fn new(travel: i32) -> Self {
            Self {
                speed: 0.0,
                position: 0,
                travel,
                speeds: Vec::new(),
                starts: 0,
                fail_every_other_poll: false,
                polls: 0,
                failed_starts: 0,
            }
        }
    }

    impl ThrusterService for MockThruster {
        fn get_limits(&mut self) -> Result<LimitState, EqptClientError> {
            self.polls += 1;
            if self.fail_every_other_poll && self.polls % 2 == 0 {
                return Err(EqptClientError::NotConnected);
            }

            if self.speed > 0.0 {
                self.position = (self.position + 1).min(self.travel);
            }
            else if self.speed < 0.0 {
                self.position = (self.position - 1).max(-self.travel);
            }

            Ok(if self.position == self.travel {
                LimitState(LimitState::ANALOG1)
            }
            else if self.position == -self.travel {
                LimitState(LimitState::ANALOG2)
            }
            else {
                LimitState::NONE
            })
        }

        fn start(&mut self) -> Result<(), EqptClientError> {
            if self.failed_starts > 0 {
                self.failed_starts -= 1;
                return Err(EqptClientError::NotConnected);
            }
            self.starts += 1;
            Ok(())
        }

        fn set_speed(&mut self, speed: f64) -> Result<(), EqptClientError> {
            self.speed = speed;
            self.speeds.push(speed);
            Ok(())
        }
    }

    #[test]
    fn test_cycles() {
        let mut thruster = MockThruster::new(3);
        let mut sleeps = 0;

        let report = run(&mut thruster, 0.4, 3, TIMEOUT, |_| sleeps += 1).unwrap();

        assert_eq!(report.cycles, 3);
        assert_eq!(report.failures, 0);
        assert_eq!(thruster.starts, 3);
        assert_eq!(thruster.speeds, vec![0.4, -0.4, 0.4, 0.0]);

        // 3 polls out, 6 back, 6 out again, sleeping between polls that miss
        assert_eq!(report.polls, 15);
        assert_eq!(sleeps, 12);
    }

    #[test]
    fn test_zero_cycles() {
        let mut thruster = MockThruster::new(3);

        let report = run(&mut thruster, 0.4, 0, TIMEOUT, |_| ()).unwrap();

        assert_eq!(report, DiveReport::default());
        assert!(thruster.speeds.is_empty());
    }

    #[test]
    fn test_failed_polls_keep_waiting() {
        let mut thruster = MockThruster::new(2);
        thruster.fail_every_other_poll = true;

        let report = run(&mut thruster, -0.2, 1, TIMEOUT, |_| ()).unwrap();

        assert_eq!(report.cycles, 1);
        assert!(report.failures > 0);
        assert_eq!(thruster.speeds, vec![-0.2, 0.0]);
    }

    #[test]
    fn test_failed_start_aborts() {
        let mut thruster = MockThruster::new(3);
        thruster.failed_starts = 1;

        let result = run(&mut thruster, 0.4, 2, TIMEOUT, |_| ());

        assert!(matches!(
            result,
            Err(DiveError::CommandFailed { cycle: 1, op: "start", source: EqptClientError::NotConnected })
        ));

        // Never polled, never commanded a speed, but still stopped
        assert_eq!(thruster.polls, 0);
        assert_eq!(thruster.speeds, vec![0.0]);
    }

    #[test]
    fn test_unreachable_end_stop_times_out() {
        // Stroke far longer than the timeout allows
        let mut thruster = MockThruster::new(1000);
        let mut sleeps = 0;

        let result = run(&mut thruster, 0.4, 1, Duration::from_secs(1), |_| sleeps += 1);

        assert!(matches!(result, Err(DiveError::TravelTimeout { cycle: 1, .. })));
        assert_eq!(thruster.polls, 10);
        assert_eq!(sleeps, 9);
        assert_eq!(thruster.speeds, vec![0.4, 0.0]);
    }
}
