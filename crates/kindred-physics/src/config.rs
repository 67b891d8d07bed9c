//! Physics tuning

use serde::{Deserialize, Serialize};

/// Spring, drag and drift parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// How far a person can be dragged from their anchor
    /// Default: 3.0
    #[serde(default = "default_max_drag_radius")]
    pub max_drag_radius: f64,

    /// Spring constant pulling a body back to its anchor
    /// Default: 40.0
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,

    /// Exponential velocity decay rate (per second)
    /// Default: 10.0
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Speed and distance below which a body counts as settled
    /// Default: 0.001
    #[serde(default = "default_rest_epsilon")]
    pub rest_epsilon: f64,

    /// Peak idle drift per axis; 0 disables drift
    /// Default: 0.05
    #[serde(default = "default_drift_amplitude")]
    pub drift_amplitude: f64,

    /// Base idle drift frequency (Hz)
    /// Default: 0.35
    #[serde(default = "default_drift_frequency")]
    pub drift_frequency: f64,

    /// Longest integration step (seconds); longer ticks are split
    /// Default: 1/30
    #[serde(default = "default_max_step")]
    pub max_step: f64,

    /// Seed for the per-person drift phases
    /// Default: 7
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_max_drag_radius() -> f64 {
    3.0
}

fn default_stiffness() -> f64 {
    40.0
}

fn default_damping() -> f64 {
    10.0
}

fn default_rest_epsilon() -> f64 {
    1e-3
}

fn default_drift_amplitude() -> f64 {
    0.05
}

fn default_drift_frequency() -> f64 {
    0.35
}

fn default_max_step() -> f64 {
    1.0 / 30.0
}

fn default_seed() -> u64 {
    7
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_drag_radius: default_max_drag_radius(),
            stiffness: default_stiffness(),
            damping: default_damping(),
            rest_epsilon: default_rest_epsilon(),
            drift_amplitude: default_drift_amplitude(),
            drift_frequency: default_drift_frequency(),
            max_step: default_max_step(),
            seed: default_seed(),
        }
    }
}

impl PhysicsConfig {
    /// No idle drift: settled bodies sit exactly on their anchor
    pub fn still() -> Self {
        Self {
            drift_amplitude: 0.0,
            ..Self::default()
        }
    }

    /// Stiffer, more heavily damped springs that snap back quickly
    pub fn snappy() -> Self {
        Self {
            stiffness: 120.0,
            damping: 18.0,
            ..Self::default()
        }
    }
}
