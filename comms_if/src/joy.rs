//! # Joystick Messages
//!
//! The joystick state published by the operator station. One message is a complete snapshot of
//! the device, there is no delta encoding.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Value reported by a trigger axis when it is released.
pub const TRIGGER_RELEASED: f64 = 1.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A snapshot of the joystick.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JoystickState {
    /// Time the snapshot was taken by the operator station.
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    /// Analog axis values, normalised to [-1, 1].
    pub axes: Vec<f64>,

    /// Button states, `true` when pressed.
    #[serde(default)]
    pub buttons: Vec<bool>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JoystickState {
    /// Create a new state stamped with the current time.
    pub fn new(axes: Vec<f64>, buttons: Vec<bool>) -> Self {
        Self {
            timestamp: Utc::now(),
            axes,
            buttons,
        }
    }

    /// Get the value of an axis, or 0.0 if the device doesn't report it.
    pub fn axis(&self, index: usize) -> f64 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Get the value of a trigger axis.
    ///
    /// Triggers rest at +1.0, so a missing trigger axis reads as released rather than as half
    /// depressed.
    pub fn trigger(&self, index: usize) -> f64 {
        self.axes.get(index).copied().unwrap_or(TRIGGER_RELEASED)
    }

    /// Returns `true` if the button is pressed. Missing buttons are never pressed.
    pub fn button(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Index of the lowest numbered button which is pressed, if any.
    pub fn first_pressed(&self) -> Option<usize> {
        self.buttons.iter().position(|&b| b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_axes() {
        let joy = JoystickState::new(vec![0.1, -0.4], vec![]);

        assert_eq!(joy.axis(1), -0.4);
        assert_eq!(joy.axis(6), 0.0);
        assert_eq!(joy.trigger(5), TRIGGER_RELEASED);
        assert!(!joy.button(3));
        assert_eq!(joy.first_pressed(), None);
    }

    #[test]
    fn test_first_pressed() {
        let joy = JoystickState::new(vec![], vec![false, false, true, false, false, true]);

        assert_eq!(joy.first_pressed(), Some(2));
        assert!(joy.button(5));
    }

    #[test]
    fn test_deserialize_without_timestamp() {
        let joy: JoystickState =
            serde_json::from_str(r#"{"axes": [0.0, 0.5], "buttons": [false, true]}"#).unwrap();

        assert_eq!(joy.axes, vec![0.0, 0.5]);
        assert_eq!(joy.first_pressed(), Some(1));
    }
}
