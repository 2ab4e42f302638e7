// dualtrack_sim/src/simulation/core/app_state.rs

use bevy::ecs::schedule::SystemSet;

// =========================================================================
// == Main Simulation Sets (The "Data Flow Graph") ==
// =========================================================================

/// Ordered phases of one fixed-rate tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Advance the ground-truth robot along the commanded trajectory.
    Drive,
    /// Turn the ground-truth motion into simulated encoder and inertial readings.
    Sensors,
    /// Run one `PoseEstimator` cycle and publish the pose.
    Estimation,
    /// Countdown-gated pose output.
    Telemetry,
    /// Compare the estimate with ground truth and end the session when due.
    Validation,
}
