// dualtrack_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::debugging::DebuggingPlugin;
use crate::simulation::plugins::estimation::OdometryEstimationPlugin;
use crate::simulation::plugins::sensors::SensorsPlugin;
use crate::simulation::plugins::vehicles::differential::DifferentialDrivePlugin;

// This prelude is for convenience for other files WITHIN the dualtrack_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
///
/// A `ScenarioConfig` resource must be inserted before this plugin is added:
/// every sub-plugin reads it while building.
pub struct DualtrackSimulationPlugin;

impl Plugin for DualtrackSimulationPlugin {
    fn build(&self, app: &mut App) {
        // Order matters: each plugin consumes resources the previous ones insert.
        app.add_plugins((
            // Fixed tick, schedule sets, PRNG.
            SimulationSetupPlugin,
            // The true robot, driven along the scenario's legs.
            DifferentialDrivePlugin,
            // Simulated encoders and inertial sensor fed from ground truth.
            SensorsPlugin,
            // The pose estimator, consuming the simulated devices.
            OdometryEstimationPlugin,
            // Telemetry, error reports and session end.
            DebuggingPlugin,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::parse_scenario;
    use crate::simulation::plugins::debugging::ErrorStats;
    use crate::simulation::plugins::vehicles::differential::GroundTruth;
    use approx::assert_abs_diff_eq;
    use bevy::time::TimeUpdateStrategy;
    use dualtrack_core::estimation::SharedPose;
    use dualtrack_core::types::Pose2D;

    const NOISELESS: &str = r#"
        [simulation]
        seed = 1
        duration_seconds = 3.0

        [start]
        x = 5.0
        y = -2.0
        heading = 30.0

        [odometry.task]
        telemetry_every = 50

        [[drive]]
        linear_velocity = 24.0
        duration_seconds = 1.0

        [[drive]]
        angular_velocity = 90.0
        duration_seconds = 1.0

        [[drive]]
        linear_velocity = 12.0
        angular_velocity = -30.0
        duration_seconds = 1.0
    "#;

    /// Runs a full session to completion and returns (truth, estimate, cycles).
    fn run_session(toml: &str) -> (Pose2D, Pose2D, u64, ErrorStats) {
        let config = parse_scenario(toml).unwrap();
        let period = config.odometry.task.period();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(period))
            .insert_resource(config)
            .add_plugins(DualtrackSimulationPlugin);
        app.finish();
        app.cleanup();

        let mut frames = 0;
        while app.should_exit().is_none() {
            app.update();
            frames += 1;
            assert!(frames < 10_000, "session never ended");
        }

        let world = app.world();
        let snapshot = world.resource::<SharedPose>().snapshot();
        let truth = world.resource::<GroundTruth>().pose;
        let stats = world.resource::<ErrorStats>().clone();
        (truth, snapshot.pose, snapshot.cycle, stats)
    }

    #[test]
    fn test_noiseless_session_tracks_ground_truth() {
        let (truth, estimate, cycles, stats) = run_session(NOISELESS);

        // One estimator cycle per 10 ms tick over a 3 s session.
        assert!((300..=302).contains(&cycles), "cycles = {}", cycles);
        assert_abs_diff_eq!(truth.heading, 30.0 + 90.0 - 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(estimate.heading, truth.heading, epsilon = 1e-6);
        // The straight leg and the in-place turn are exact. On the closing arc
        // every cycle leads the true heading by one 0.3 degree step, which
        // swings the 12" leg by about 0.06".
        assert!(estimate.distance_to(&truth) < 0.1);
        assert!(stats.max_position_error < 0.1);
    }

    #[test]
    fn test_seeded_noisy_sessions_are_reproducible() {
        let noisy = format!(
            "{}\n[sensors]\nwheel_slip_stddev = 0.05\ninertial_stddev_deg = 0.5\n",
            NOISELESS
        );
        let (_, first, _, _) = run_session(&noisy);
        let (_, second, _, _) = run_session(&noisy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_heading_anchor_removes_inertial_drift() {
        let drifting = r#"
            [simulation]
            duration_seconds = 2.0

            [sensors]
            inertial_drift_deg_per_s = 4.0

            [[drive]]
            linear_velocity = 10.0
            duration_seconds = 2.0

            [[anchors]]
            at_seconds = 1.995
            with_heading = true
        "#;
        let (truth, estimate, _, stats) = run_session(drifting);

        // Drift had time to build up a visible error before the anchor...
        assert!(stats.max_heading_error > 1.0);
        // ...and the anchor snapped the estimate back onto the true pose.
        assert!(estimate.heading.abs() < 0.1);
        assert!(estimate.distance_to(&truth) < 0.1);
    }
}
