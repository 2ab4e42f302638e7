// dualtrack_sim/src/simulation/plugins/vehicles/differential.rs

use bevy::prelude::*;
use dualtrack_core::types::Pose2D;
use nalgebra::Vector2;

use crate::prelude::*;

// =========================================================================
// == Ground Truth Resources ==
// =========================================================================

/// The commanded trajectory, built from the scenario's `[[drive]]` legs.
#[derive(Resource, Debug, Clone, Default)]
pub struct DriveProfile {
    segments: Vec<DriveSegment>,
}

impl DriveProfile {
    pub fn new(segments: Vec<DriveSegment>) -> Self {
        Self { segments }
    }

    /// Returns `(linear in/s, angular deg/s)` commanded at time `t`. The robot
    /// stands still once the profile is exhausted.
    pub fn command_at(&self, t: f64) -> (f64, f64) {
        let mut segment_start = 0.0;
        for segment in &self.segments {
            let segment_end = segment_start + segment.duration_seconds;
            if t < segment_end {
                return (segment.linear_velocity, segment.angular_velocity);
            }
            segment_start = segment_end;
        }
        (0.0, 0.0)
    }

    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_seconds).sum()
    }
}

/// The true state of the simulated robot.
#[derive(Resource, Debug, Clone, Default)]
pub struct GroundTruth {
    pub pose: Pose2D,
    /// Simulated time since the session started, in seconds.
    pub elapsed: f64,
    /// Wheel travel during the latest tick, in inches.
    pub left_step: f64,
    pub right_step: f64,
}

// =========================================================================
// == Kinematics ==
// =========================================================================

/// Wheel travel for a body motion of `linear` inches and `angular_deg` degrees.
///
/// Heading grows when the left wheel outruns the right, matching the sign
/// convention of the estimator's wheel-differential term.
pub fn wheel_steps(linear: f64, angular_deg: f64, track_width: f64) -> (f64, f64) {
    let half_arc = angular_deg.to_radians() * track_width / 2.0;
    (linear + half_arc, linear - half_arc)
}

/// Exact constant-velocity arc integration over `dt` seconds.
pub fn integrate_arc(
    pose: Pose2D,
    linear_velocity: f64,
    angular_velocity_deg: f64,
    dt: f64,
) -> Pose2D {
    let theta0 = pose.heading_radians();
    let dtheta = angular_velocity_deg.to_radians() * dt;

    let displacement = if dtheta.abs() < 1e-12 {
        pose.direction() * linear_velocity * dt
    } else {
        let theta1 = theta0 + dtheta;
        let radius = linear_velocity / angular_velocity_deg.to_radians();
        Vector2::new(theta1.sin() - theta0.sin(), theta0.cos() - theta1.cos()) * radius
    };

    Pose2D::new(
        pose.x + displacement.x,
        pose.y + displacement.y,
        pose.heading + angular_velocity_deg * dt,
    )
}

// =========================================================================
// == Plugin ==
// =========================================================================

pub struct DifferentialDrivePlugin;

impl Plugin for DifferentialDrivePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!");
        let profile = DriveProfile::new(config.drive.clone());
        let truth = GroundTruth {
            pose: config.start,
            ..default()
        };
        info!(
            "  -> Differential drive with {} legs ({:.1}s of motion)",
            config.drive.len(),
            profile.total_duration()
        );

        app.insert_resource(profile)
            .insert_resource(truth)
            .add_systems(
                FixedUpdate,
                advance_ground_truth.in_set(SimulationSet::Drive),
            );
    }
}

/// Moves the true robot along the profile by one fixed tick.
fn advance_ground_truth(
    time: Res<Time>,
    profile: Res<DriveProfile>,
    config: Res<ScenarioConfig>,
    mut truth: ResMut<GroundTruth>,
) {
    let dt = time.delta_secs_f64();
    let (linear_velocity, angular_velocity) = profile.command_at(truth.elapsed);

    let (left, right) = wheel_steps(
        linear_velocity * dt,
        angular_velocity * dt,
        config.odometry.geometry.track_width,
    );
    truth.left_step = left;
    truth.right_step = right;
    truth.pose = integrate_arc(truth.pose, linear_velocity, angular_velocity, dt);
    truth.elapsed += dt;
}
