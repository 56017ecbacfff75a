//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into `[min, max]`.
///
/// NaN is passed through unchanged, so callers that must never forward NaN should check for it
/// first.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Convert an angle in degrees into radians.
pub fn deg_to_rad<T>(deg: T) -> T
where
    T: Float
{
    deg.to_radians()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&1.5f64, &-1.0, &1.0), 1.0);
        assert_eq!(clamp(&-3.0f64, &-1.0, &1.0), -1.0);
        assert_eq!(clamp(&0.25f64, &-1.0, &1.0), 0.25);
        assert!(clamp(&f64::NAN, &-1.0, &1.0).is_nan());
    }

    #[test]
    fn test_deg_to_rad() {
        const PI: f64 = std::f64::consts::PI;

        assert_eq!(deg_to_rad(180f64), PI);
        assert_eq!(deg_to_rad(-90f64), -PI / 2.0);
        assert_eq!(deg_to_rad(0f64), 0.0);
    }
}
