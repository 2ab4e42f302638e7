// dualtrack_sim/src/simulation/config/mod.rs

//! Loading and validating the scenario file.

pub mod structs;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use crate::cli::Cli;
pub use structs::{AnchorEvent, DriveSegment, ScenarioConfig, SensorNoise, Simulation};

/// Reads a scenario TOML file.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<ScenarioConfig, figment::Error> {
    Figment::new().merge(Toml::file(path.as_ref())).extract()
}

/// Reads the scenario named on the command line and applies the CLI overrides
/// on top of it.
pub fn load_scenario_from_cli(cli: &Cli) -> Result<ScenarioConfig, figment::Error> {
    let mut figment = Figment::new().merge(Toml::file(&cli.scenario));
    if let Some(seed) = cli.seed {
        figment = figment.merge(Serialized::default("simulation.seed", seed));
    }
    if let Some(duration) = cli.duration {
        figment = figment.merge(Serialized::default("simulation.duration_seconds", duration));
    }
    figment.extract()
}

/// Parses a scenario from an in-memory TOML string.
pub fn parse_scenario(toml: &str) -> Result<ScenarioConfig, figment::Error> {
    Figment::new().merge(Toml::string(toml)).extract()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dualtrack_core::types::Pose2D;

    #[test]
    fn test_parse_full_scenario() {
        let config = parse_scenario(
            r#"
            [simulation]
            seed = 7
            duration_seconds = 4.0

            [start]
            x = 12.0
            heading = 90.0

            [odometry.geometry]
            wheel_diameter = 4.0
            gear_ratio = 1.0
            track_width = 11.0

            [odometry.task]
            period_ms = 10
            telemetry_every = 50

            [sensors]
            wheel_slip_stddev = 0.02

            [[drive]]
            linear_velocity = 24.0
            duration_seconds = 1.0

            [[drive]]
            angular_velocity = 90.0
            duration_seconds = 1.0

            [[anchors]]
            at_seconds = 2.0
            with_heading = true
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.report_every_seconds, 1.0);
        assert_eq!(config.start, Pose2D::new(12.0, 0.0, 90.0));
        assert_eq!(config.odometry.geometry.track_width, 11.0);
        assert_eq!(config.odometry.task.telemetry_every, 50);
        assert_eq!(config.sensors.wheel_slip_stddev, 0.02);
        assert_eq!(config.sensors.inertial_stddev_deg, 0.0);
        assert_eq!(config.drive.len(), 2);
        assert_eq!(config.drive[1].linear_velocity, 0.0);
        assert_eq!(config.anchors[0].at_seconds, 2.0);
        assert!(config.anchors[0].with_heading);
        assert!(config.odometry.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_scenario("").unwrap();
        assert_eq!(config.simulation.duration_seconds, 30.0);
        assert_eq!(config.odometry.task.period_ms, 10);
        assert!(config.drive.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(parse_scenario("[sensors]\nlidar = true\n").is_err());
    }
}
