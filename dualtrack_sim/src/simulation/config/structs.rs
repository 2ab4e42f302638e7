// dualtrack_sim/src/simulation/config/structs.rs

use bevy::prelude::Resource;
use dualtrack_core::config::OdometryConfig;
use dualtrack_core::types::Pose2D;
use serde::Deserialize;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The primary Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a `scenario.toml` file.
#[derive(Resource, Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    /// Where the robot starts; the estimator is anchored here before the
    /// first cycle.
    #[serde(default)]
    pub start: Pose2D,

    #[serde(default)]
    pub odometry: OdometryConfig,

    #[serde(default)]
    pub sensors: SensorNoise,

    // The TOML has `[[drive]]`, which becomes a Vec of DriveSegment structs.
    #[serde(default)]
    pub drive: Vec<DriveSegment>,

    #[serde(default)]
    pub anchors: Vec<AnchorEvent>,
}

// =========================================================================
// == Configuration Sub-Structs ==
// =========================================================================

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Length of the session in seconds. The app exits once it has elapsed.
    pub duration_seconds: f64,
    /// Seconds between two estimation-error reports.
    #[serde(default = "default_report_every_seconds")]
    pub report_every_seconds: f64,
}

fn default_report_every_seconds() -> f64 {
    1.0
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            duration_seconds: 30.0,
            report_every_seconds: default_report_every_seconds(),
        }
    }
}

/// Noise injected by the simulated sensors.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SensorNoise {
    /// Standard deviation of per-tick wheel slip, as a fraction of the travel.
    #[serde(default)]
    pub wheel_slip_stddev: f64,
    /// Standard deviation of the inertial heading reading, in degrees.
    #[serde(default)]
    pub inertial_stddev_deg: f64,
    /// Constant inertial heading drift, in degrees per second.
    #[serde(default)]
    pub inertial_drift_deg_per_s: f64,
}

/// One leg of the commanded trajectory: constant body velocities held for a
/// fixed time. Positive `angular_velocity` turns the heading up, i.e. the
/// left wheel runs faster than the right.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DriveSegment {
    /// Forward speed, in inches per second.
    #[serde(default)]
    pub linear_velocity: f64,
    /// Turn rate, in degrees per second.
    #[serde(default)]
    pub angular_velocity: f64,
    pub duration_seconds: f64,
}

/// Re-anchors the estimator to the simulated ground truth once `at_seconds`
/// has elapsed, as if the robot had just sensed a known landmark.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnchorEvent {
    pub at_seconds: f64,
    /// Also correct the heading. Otherwise only the position is re-anchored
    /// and the estimator keeps its own heading.
    #[serde(default)]
    pub with_heading: bool,
}
