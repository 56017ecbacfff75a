//! Standard turtle gait calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{DiffGains, GaitConfig, InputData, ServoCommandVector};
use util::maths::deg_to_rad;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Gain applied to the rear fins. The rear fins do not take part in turning.
const REAR_GAIN: f64 = 1.0;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Standard turtle gait.
///
/// Negative pitch selects a flat dive/climb posture with mirrored offsets on all four pitch
/// servos (1, 3, 5, 7). Otherwise the front pairs (0/2 flap, 1/3 pitch) paddle with the turning
/// gains, the rear pairs (4/6 flap, 5/7 pitch) paddle mirrored front to back, and the secondary
/// axis tilts the rear pitch servos.
pub(crate) fn calc_turtle_standard(input: &InputData) -> ServoCommandVector {
    let mut cmd =
        ServoCommandVector::with_frequency(GaitConfig::TurtleStandard.base_frequency_hz());

    let p = input.pitch;
    let s = input.rear_pitch;

    if p < 0.0 {
        cmd.offset_rad[1] = p * deg_to_rad(60.0);
        cmd.offset_rad[3] = -p * deg_to_rad(60.0);
        cmd.offset_rad[5] = -p * deg_to_rad(60.0);
        cmd.offset_rad[7] = p * deg_to_rad(60.0);
        return cmd;
    }

    let g = DiffGains::from_yaw(input.yaw);

    // Front fins
    cmd.amplitude_rad[0] = p * g.left * deg_to_rad(35.0);
    cmd.amplitude_rad[2] = -p * g.right * deg_to_rad(35.0);
    cmd.amplitude_rad[1] = p * g.left * deg_to_rad(40.0);
    cmd.amplitude_rad[3] = -p * g.right * deg_to_rad(40.0);
    cmd.phase_rad[1] = deg_to_rad(-90.0);
    cmd.phase_rad[3] = deg_to_rad(-90.0);

    // Rear fins
    cmd.amplitude_rad[4] = -p * REAR_GAIN * deg_to_rad(35.0);
    cmd.amplitude_rad[6] = p * REAR_GAIN * deg_to_rad(35.0);
    cmd.phase_rad[4] = deg_to_rad(-90.0);
    cmd.phase_rad[6] = deg_to_rad(-90.0);
    cmd.amplitude_rad[5] = -p * REAR_GAIN * deg_to_rad(40.0);
    cmd.amplitude_rad[7] = p * REAR_GAIN * deg_to_rad(40.0);
    cmd.phase_rad[5] = deg_to_rad(-180.0);
    cmd.phase_rad[7] = deg_to_rad(-180.0);
    cmd.offset_rad[5] = s * deg_to_rad(40.0);
    cmd.offset_rad[7] = -s * deg_to_rad(40.0);

    cmd
}

#[cfg(test)]
mod test {
    use super::*;

    fn input(pitch: f64, yaw: f64, rear_pitch: f64) -> InputData {
        InputData {
            pitch,
            yaw,
            rear_pitch,
        }
    }

    #[test]
    fn test_posture_branch() {
        for i in 1..=10 {
            let p = -(i as f64) / 10.0;
            let cmd = calc_turtle_standard(&input(p, 0.4, 0.8));

            assert_eq!(cmd.amplitude_rad, [0.0; 8]);

            for s in [1, 3, 5, 7].iter() {
                assert!(cmd.offset_rad[*s] != 0.0);
            }
            assert_eq!(cmd.offset_rad[1], -cmd.offset_rad[5]);
            assert_eq!(cmd.offset_rad[3], -cmd.offset_rad[7]);
        }
    }

    #[test]
    fn test_swim_branch() {
        let cmd = calc_turtle_standard(&input(0.5, 0.0, 0.5));

        assert_eq!(cmd.frequency_hz, [2.0; 8]);
        assert_eq!(cmd.amplitude_rad[0], 0.5 * deg_to_rad(35.0));
        assert_eq!(cmd.amplitude_rad[3], -0.5 * deg_to_rad(40.0));
        assert_eq!(cmd.amplitude_rad[4], -0.5 * deg_to_rad(35.0));
        assert_eq!(cmd.amplitude_rad[7], 0.5 * deg_to_rad(40.0));
        assert_eq!(cmd.phase_rad[5], deg_to_rad(-180.0));
        assert_eq!(cmd.offset_rad[5], 0.5 * deg_to_rad(40.0));
        assert_eq!(cmd.offset_rad[7], -0.5 * deg_to_rad(40.0));

        // Only the rear pitch servos are offset
        for s in [0, 1, 2, 3, 4, 6].iter() {
            assert_eq!(cmd.offset_rad[*s], 0.0);
        }
    }

    #[test]
    fn test_rear_ignores_yaw() {
        let straight = calc_turtle_standard(&input(1.0, 0.0, 0.0));
        let turning = calc_turtle_standard(&input(1.0, 0.9, 0.0));

        assert_eq!(&straight.amplitude_rad[4..], &turning.amplitude_rad[4..]);
        assert!(turning.amplitude_rad[0] < straight.amplitude_rad[0]);
    }
}
