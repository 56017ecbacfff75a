//! Standard fish gait calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::{DiffGains, GaitConfig, InputData, ServoCommandVector};
use util::maths::deg_to_rad;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Standard fish gait.
///
/// Side fins 0/2 flap and 1/3 pitch a quarter period behind, both scaled by pitch and the turning
/// gains, with the right side mirrored. The back fins steer: servo 5 holds a yaw offset and
/// servo 6 flaps with pitch around a yaw offset.
pub(crate) fn calc_fish_standard(input: &InputData) -> ServoCommandVector {
    let mut cmd = ServoCommandVector::with_frequency(GaitConfig::FishStandard.base_frequency_hz());

    let p = input.pitch;
    let y = input.yaw;
    let g = DiffGains::from_yaw(y);

    // Side fins
    cmd.amplitude_rad[0] = p * g.left * deg_to_rad(20.0);
    cmd.amplitude_rad[2] = -p * g.right * deg_to_rad(20.0);
    cmd.amplitude_rad[1] = p * g.left * deg_to_rad(25.0);
    cmd.amplitude_rad[3] = -p * g.right * deg_to_rad(25.0);
    cmd.phase_rad[1] = deg_to_rad(-90.0);
    cmd.phase_rad[3] = deg_to_rad(-90.0);

    // Back fins
    cmd.offset_rad[5] = -y * deg_to_rad(20.0);
    cmd.amplitude_rad[6] = p * deg_to_rad(20.0);
    cmd.offset_rad[6] = y * deg_to_rad(30.0);

    cmd
}
