// dualtrack_sim/src/simulation/plugins/debugging/state_error.rs

use bevy::app::AppExit;
use bevy::prelude::*;
use dualtrack_core::estimation::SharedPose;
use dualtrack_core::types::Pose2D;

use crate::prelude::*;
use crate::simulation::plugins::vehicles::differential::GroundTruth;

// =========================================================================
// == Plugin Definition ==
// =========================================================================

pub struct StateErrorDebugPlugin;

impl Plugin for StateErrorDebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ErrorStats>().add_systems(
            FixedUpdate, // Run at a predictable rate
            (log_state_estimation_error, end_session_system)
                .chain()
                .in_set(SimulationSet::Validation),
        );
    }
}

// =========================================================================
// == Error Tracking ==
// =========================================================================

/// Running comparison of the published estimate against ground truth.
#[derive(Resource, Debug, Clone, Default)]
pub struct ErrorStats {
    pub samples: u64,
    /// Latest distance between estimated and true position.
    pub position_error: f64,
    /// Latest `estimate - truth` heading difference, in degrees. Both headings
    /// are unwrapped, so this is not reduced modulo 360.
    pub heading_error: f64,
    pub max_position_error: f64,
    pub max_heading_error: f64,
    /// Simulated time of the next periodic report.
    next_report_at: f64,
}

impl ErrorStats {
    pub fn record(&mut self, truth: &Pose2D, estimate: &Pose2D) {
        self.samples += 1;
        self.position_error = estimate.distance_to(truth);
        self.heading_error = estimate.heading - truth.heading;
        self.max_position_error = self.max_position_error.max(self.position_error);
        self.max_heading_error = self.max_heading_error.max(self.heading_error.abs());
    }
}

// =========================================================================
// == Systems ==
// =========================================================================

/// Compares the estimate with ground truth every tick and logs a report every
/// `report_every_seconds` of simulated time.
fn log_state_estimation_error(
    config: Res<ScenarioConfig>,
    truth: Res<GroundTruth>,
    shared: Res<SharedPose>,
    mut stats: ResMut<ErrorStats>,
) {
    let estimate = shared.pose();
    stats.record(&truth.pose, &estimate);

    let interval = config.simulation.report_every_seconds;
    if interval <= 0.0 || truth.elapsed < stats.next_report_at {
        return;
    }
    stats.next_report_at = truth.elapsed + interval;

    info!(
        "t={:.2}s State Error | Pos Err: {:.3}\" | Hdg Err: {:.3}°",
        truth.elapsed, stats.position_error, stats.heading_error
    );
    debug!("  truth {:?} | estimate {:?}", truth.pose, estimate);
}

/// Ends the app once the scenario's session length has elapsed.
fn end_session_system(
    config: Res<ScenarioConfig>,
    truth: Res<GroundTruth>,
    stats: Res<ErrorStats>,
    shared: Res<SharedPose>,
    mut exit: EventWriter<AppExit>,
    mut finished: Local<bool>,
) {
    if *finished || truth.elapsed < config.simulation.duration_seconds {
        return;
    }
    *finished = true;

    let snapshot = shared.snapshot();
    info!(
        "Session finished after {} cycles ({:.2}s): final pose {:?}",
        snapshot.cycle, truth.elapsed, snapshot.pose
    );
    info!(
        "  Final Pos Err: {:.3}\" (max {:.3}\") | Final Hdg Err: {:.3}° (max {:.3}°)",
        stats.position_error, stats.max_position_error, stats.heading_error, stats.max_heading_error
    );
    exit.write(AppExit::Success);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_error_stats_track_latest_and_max() {
        let mut stats = ErrorStats::default();
        let truth = Pose2D::new(0.0, 0.0, 90.0);

        stats.record(&truth, &Pose2D::new(3.0, 4.0, 88.0));
        assert_abs_diff_eq!(stats.position_error, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.heading_error, -2.0, epsilon = 1e-12);

        stats.record(&truth, &Pose2D::new(0.0, 1.0, 90.5));
        assert_eq!(stats.samples, 2);
        assert_abs_diff_eq!(stats.position_error, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.max_position_error, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.max_heading_error, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_heading_error_is_not_wrapped() {
        let mut stats = ErrorStats::default();
        stats.record(&Pose2D::new(0.0, 0.0, 0.0), &Pose2D::new(0.0, 0.0, 360.0));
        assert_abs_diff_eq!(stats.heading_error, 360.0, epsilon = 1e-12);
    }
}
