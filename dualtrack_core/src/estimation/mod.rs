// dualtrack_core/src/estimation/mod.rs

use crate::messages::PoseCommand;
use crate::types::Pose2D;

/// The contract for any algorithm that performs the "pose estimator" role.
/// Its sole responsibility is to keep the robot's planar pose current.
pub trait StateEstimator: Send {
    /// Runs one estimation cycle against the latest sensor readings and
    /// returns the resulting pose.
    fn update(&mut self) -> Pose2D;

    /// Returns the current best estimate of the pose.
    fn pose(&self) -> Pose2D;

    /// Applies a re-anchoring request between two cycles.
    fn apply(&mut self, command: PoseCommand);
}

pub mod pose_estimator;
pub mod shared;

pub use pose_estimator::PoseEstimator;
pub use shared::SharedPose;
