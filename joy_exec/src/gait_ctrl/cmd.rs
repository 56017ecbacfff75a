//! Servo commands output by GaitCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// Internal
use super::NUM_SERVOS;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Oscillation parameters for every fin servo, indexed by servo id.
///
/// Built fresh for each joystick event. Slots a gait does not drive stay at zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ServoCommandVector {
    /// Units: hertz
    pub frequency_hz: [f64; NUM_SERVOS],

    /// Units: radians
    pub amplitude_rad: [f64; NUM_SERVOS],

    /// Units: radians
    pub phase_rad: [f64; NUM_SERVOS],

    /// Units: radians
    pub offset_rad: [f64; NUM_SERVOS],
}

/// Left and right amplitude gains used for turning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiffGains {
    pub left: f64,
    pub right: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ServoCommandVector {
    /// A command with the given frequency on all servos and everything else zeroed.
    pub fn with_frequency(frequency_hz: f64) -> Self {
        Self {
            frequency_hz: [frequency_hz; NUM_SERVOS],
            amplitude_rad: [0.0; NUM_SERVOS],
            phase_rad: [0.0; NUM_SERVOS],
            offset_rad: [0.0; NUM_SERVOS],
        }
    }

    /// Servo ids this command addresses, in the order the parameter arrays are laid out.
    pub fn servos() -> Vec<usize> {
        (0..NUM_SERVOS).collect()
    }
}

impl DiffGains {
    /// Compute the gains for a yaw axis value.
    ///
    /// Both gains are 1.0 at zero yaw. Positive yaw attenuates the left side and negative yaw the
    /// right side, reaching zero at full deflection.
    pub fn from_yaw(yaw: f64) -> Self {
        if yaw <= 0.0 {
            Self {
                left: 1.0,
                right: 1.0 + yaw,
            }
        }
        else {
            Self {
                left: 1.0 - yaw,
                right: 1.0,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_diff_gains() {
        assert_eq!(DiffGains::from_yaw(0.0), DiffGains { left: 1.0, right: 1.0 });

        assert_eq!(DiffGains::from_yaw(1.0).left, 0.0);
        assert_eq!(DiffGains::from_yaw(1.0).right, 1.0);

        assert_eq!(DiffGains::from_yaw(-1.0).left, 1.0);
        assert_eq!(DiffGains::from_yaw(-1.0).right, 0.0);

        let g = DiffGains::from_yaw(-0.25);
        assert_eq!(g.right, 0.75);
    }

    #[test]
    fn test_with_frequency() {
        let cmd = ServoCommandVector::with_frequency(2.0);

        assert_eq!(cmd.frequency_hz, [2.0; NUM_SERVOS]);
        assert!(cmd.amplitude_rad.iter().all(|a| *a == 0.0));
        assert_eq!(ServoCommandVector::servos(), vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }
}
