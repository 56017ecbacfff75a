//! Gait configuration selector

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Internal
use super::GaitCtrlError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The gaits the robot can swim with.
///
/// Selected once at startup, the selection is fixed for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaitConfig {
    /// Side fins flap and pitch, back fins steer.
    FishStandard,

    /// Slower fish gait with a separate dive/climb posture for negative pitch.
    FishAdvanced,

    /// All four fin pairs paddle, with a flat dive/climb posture for negative pitch.
    TurtleStandard,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for GaitConfig {
    fn default() -> Self {
        GaitConfig::FishStandard
    }
}

impl GaitConfig {
    /// Oscillation frequency applied uniformly to every servo in this gait.
    ///
    /// Units: hertz
    pub fn base_frequency_hz(&self) -> f64 {
        match self {
            GaitConfig::FishStandard => 2.0,
            GaitConfig::FishAdvanced => 1.0,
            GaitConfig::TurtleStandard => 2.0,
        }
    }

    /// The name of the gait as written in parameter files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            GaitConfig::FishStandard => "fish_standard",
            GaitConfig::FishAdvanced => "fish_advanced",
            GaitConfig::TurtleStandard => "turtle_standard",
        }
    }
}

impl fmt::Display for GaitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GaitConfig {
    type Err = GaitCtrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fish_standard" => Ok(GaitConfig::FishStandard),
            "fish_advanced" => Ok(GaitConfig::FishAdvanced),
            "turtle_standard" => Ok(GaitConfig::TurtleStandard),
            other => Err(GaitCtrlError::UnknownGait(other.into())),
        }
    }
}
