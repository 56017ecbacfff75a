//! # Joystick Executable Parameters
//!
//! This module provide parameters for the joystick control executable. They are loaded once at
//! startup from `joy_exec.toml`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::{gait_ctrl::GaitConfig, thr_ctrl};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct JoyExecParams {
    /// Gait to swim with, unless overriden on the command line
    pub gait: GaitConfig,

    /// Network endpoint the joystick states are published on
    pub joy_endpoint: String,

    /// Equipment servers to connect to
    pub servers: Servers,

    /// Thruster control parameters
    pub thr_ctrl: thr_ctrl::Params,
}

/// The equipment servers used by the executable.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Servers {
    /// Thruster motor controller
    pub smc: ServerParams,

    /// Servo controller
    pub usc: ServerParams,

    /// Fin oscillator controller
    pub fin: ServerParams,

    /// Indicator light
    pub blinkm: ServerParams,
}

/// Name and endpoint of a single equipment server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerParams {
    /// Name of the server, prefixed to operation names in logs
    pub name: String,

    /// Network endpoint of the server's request socket
    pub endpoint: String,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for JoyExecParams {
    fn default() -> Self {
        Self {
            gait: GaitConfig::default(),
            joy_endpoint: "tcp://localhost:5020".into(),
            servers: Servers::default(),
            thr_ctrl: thr_ctrl::Params::default(),
        }
    }
}

impl Default for Servers {
    fn default() -> Self {
        Self {
            smc: ServerParams::new("/smc_server", "tcp://localhost:5030"),
            usc: ServerParams::new("/usc_server", "tcp://localhost:5031"),
            fin: ServerParams::new("/fin_controller", "tcp://localhost:5032"),
            blinkm: ServerParams::new("/blinkm_server", "tcp://localhost:5033"),
        }
    }
}

impl ServerParams {
    pub fn new(name: &str, endpoint: &str) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_params() {
        let params: JoyExecParams = util::params::from_str(
            r#"
            gait = "fish_advanced"

            [servers.fin]
            name = "/fin_controller_2"
            endpoint = "tcp://fins:6000"
            "#,
        )
        .unwrap();

        assert_eq!(params.gait, GaitConfig::FishAdvanced);
        assert_eq!(params.servers.fin.name, "/fin_controller_2");

        // Everything not given keeps its default
        assert_eq!(params.servers.smc.name, "/smc_server");
        assert_eq!(params.servers.blinkm.name, "/blinkm_server");
        assert_eq!(params.thr_ctrl.fwd_axis, 5);
    }
}
