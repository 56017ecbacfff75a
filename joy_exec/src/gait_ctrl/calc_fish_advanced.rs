//! Advanced fish gait calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{DiffGains, GaitConfig, InputData, ServoCommandVector};
use util::maths::deg_to_rad;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Advanced fish gait.
///
/// Negative pitch selects a dive/climb posture: the side pitch servos (1, 3) hold mirrored
/// offsets and nothing oscillates. Otherwise the side fins swim as in the standard gait with
/// larger amplitudes, and the back fin pair (4, 6) flaps with pitch around yaw offsets.
pub(crate) fn calc_fish_advanced(input: &InputData) -> ServoCommandVector {
    let mut cmd = ServoCommandVector::with_frequency(GaitConfig::FishAdvanced.base_frequency_hz());

    let p = input.pitch;
    let y = input.yaw;

    if p < 0.0 {
        cmd.offset_rad[1] = p * deg_to_rad(60.0);
        cmd.offset_rad[3] = -p * deg_to_rad(60.0);
        return cmd;
    }

    let g = DiffGains::from_yaw(y);

    // Side fins
    cmd.amplitude_rad[0] = p * g.left * deg_to_rad(30.0);
    cmd.amplitude_rad[2] = -p * g.right * deg_to_rad(30.0);
    cmd.amplitude_rad[1] = p * g.left * deg_to_rad(35.0);
    cmd.amplitude_rad[3] = -p * g.right * deg_to_rad(35.0);
    cmd.phase_rad[1] = deg_to_rad(-90.0);
    cmd.phase_rad[3] = deg_to_rad(-90.0);

    // Back fins
    cmd.amplitude_rad[4] = p * deg_to_rad(20.0);
    cmd.offset_rad[4] = -y * deg_to_rad(20.0);
    cmd.amplitude_rad[6] = p * deg_to_rad(20.0);
    cmd.offset_rad[6] = y * deg_to_rad(20.0);
    cmd.phase_rad[6] = deg_to_rad(-90.0);

    cmd
}

#[cfg(test)]
mod test {
    use super::*;

    fn input(pitch: f64, yaw: f64) -> InputData {
        InputData {
            pitch,
            yaw,
            rear_pitch: 0.0,
        }
    }

    #[test]
    fn test_posture_branch() {
        let cmd = calc_fish_advanced(&input(-0.5, 0.7));

        assert_eq!(cmd.frequency_hz, [1.0; 8]);
        assert_eq!(cmd.amplitude_rad, [0.0; 8]);
        assert_eq!(cmd.phase_rad, [0.0; 8]);
        assert_eq!(cmd.offset_rad[1], -0.5 * deg_to_rad(60.0));
        assert_eq!(cmd.offset_rad[3], 0.5 * deg_to_rad(60.0));

        // Yaw has no effect in the posture
        for s in [0, 2, 4, 5, 6, 7].iter() {
            assert_eq!(cmd.offset_rad[*s], 0.0);
        }
    }

    #[test]
    fn test_swim_branch() {
        let cmd = calc_fish_advanced(&input(1.0, -0.5));

        assert_eq!(cmd.amplitude_rad[0], deg_to_rad(30.0));
        assert_eq!(cmd.amplitude_rad[2], -0.5 * deg_to_rad(30.0));
        assert_eq!(cmd.amplitude_rad[1], deg_to_rad(35.0));
        assert_eq!(cmd.amplitude_rad[3], -0.5 * deg_to_rad(35.0));
        assert_eq!(cmd.amplitude_rad[4], deg_to_rad(20.0));
        assert_eq!(cmd.offset_rad[4], 0.5 * deg_to_rad(20.0));
        assert_eq!(cmd.offset_rad[6], -0.5 * deg_to_rad(20.0));
        assert_eq!(cmd.phase_rad[6], deg_to_rad(-90.0));

        // Posture servos are not offset while swimming
        assert_eq!(cmd.offset_rad[1], 0.0);
        assert_eq!(cmd.offset_rad[3], 0.0);
    }

    #[test]
    fn test_zero_pitch_swims() {
        let cmd = calc_fish_advanced(&input(0.0, 0.0));

        assert_eq!(cmd.phase_rad[1], deg_to_rad(-90.0));
        assert_eq!(cmd.amplitude_rad, [0.0; 8]);
    }
}
