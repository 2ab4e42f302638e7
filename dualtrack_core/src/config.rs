// dualtrack_core/src/config.rs

use serde::Deserialize;
use std::f64::consts::PI;
use std::time::Duration;

use crate::error::ConfigError;

// =========================================================================
// == Drive Geometry ==
// =========================================================================

/// Fixed physical constants of the drivetrain used by the estimator.
///
/// Defaults match the reference robot: 3.25" wheels, 48:36 external gearing
/// and a 12.5" track between the two measured wheels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriveGeometry {
    /// Wheel diameter, in inches.
    #[serde(default = "default_wheel_diameter")]
    pub wheel_diameter: f64,
    /// Wheel revolutions per motor revolution.
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f64,
    /// Lateral distance between the left and right measured wheels, in inches.
    #[serde(default = "default_track_width")]
    pub track_width: f64,
}

fn default_wheel_diameter() -> f64 {
    3.25
}

fn default_gear_ratio() -> f64 {
    36.0 / 48.0
}

fn default_track_width() -> f64 {
    12.5
}

impl Default for DriveGeometry {
    fn default() -> Self {
        Self {
            wheel_diameter: default_wheel_diameter(),
            gear_ratio: default_gear_ratio(),
            track_width: default_track_width(),
        }
    }
}

impl DriveGeometry {
    /// Linear wheel travel produced by one degree of motor rotation.
    pub fn inches_per_degree(&self) -> f64 {
        self.gear_ratio * PI * self.wheel_diameter / 360.0
    }

    /// Inverse of `inches_per_degree`, used by simulated encoders.
    pub fn degrees_per_inch(&self) -> f64 {
        1.0 / self.inches_per_degree()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("wheel_diameter", self.wheel_diameter)?;
        check_positive("gear_ratio", self.gear_ratio)?;
        check_positive("track_width", self.track_width)?;
        Ok(())
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

// =========================================================================
// == Periodic Task ==
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    /// Delay between two estimator updates, in milliseconds.
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    /// Number of cycles between telemetry lines. Zero disables telemetry.
    #[serde(default = "default_telemetry_every")]
    pub telemetry_every: u32,
}

fn default_period_ms() -> u64 {
    10
}

fn default_telemetry_every() -> u32 {
    100
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            telemetry_every: default_telemetry_every(),
        }
    }
}

impl TaskConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }
}

/// Top-level odometry configuration, usually one table of a larger TOML file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OdometryConfig {
    #[serde(default)]
    pub geometry: DriveGeometry,
    #[serde(default)]
    pub task: TaskConfig,
}

impl OdometryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        self.task.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inches_per_degree_matches_wheel_circumference() {
        let geometry = DriveGeometry {
            wheel_diameter: 4.0,
            gear_ratio: 1.0,
            track_width: 10.0,
        };
        // One full motor turn rolls one wheel circumference.
        assert_relative_eq!(geometry.inches_per_degree() * 360.0, 4.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(
            geometry.inches_per_degree() * geometry.degrees_per_inch(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(OdometryConfig::default().validate(), Ok(()));
        assert_eq!(TaskConfig::default().period(), Duration::from_millis(10));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let geometry = DriveGeometry {
            track_width: 0.0,
            ..Default::default()
        };
        assert_eq!(
            geometry.validate(),
            Err(ConfigError::NonPositive {
                field: "track_width",
                value: 0.0
            })
        );

        let geometry = DriveGeometry {
            wheel_diameter: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            geometry.validate(),
            Err(ConfigError::NonPositive {
                field: "wheel_diameter",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_zero_period() {
        let config = OdometryConfig {
            task: TaskConfig {
                period_ms: 0,
                telemetry_every: 1,
            },
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPeriod));
    }
}
