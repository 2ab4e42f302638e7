// dualtrack_core/src/messages.rs

use crate::types::{Pose2D, PoseAnchor};

// =========================================================================
// == Per-Cycle Estimator Data ==
// =========================================================================

/// Incremental quantities computed by a single estimator cycle.
///
/// These are overwritten every cycle and are only meaningful for the cycle
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CycleDeltas {
    /// Linear travel of the left wheel since the previous cycle.
    pub left_displacement: f64,
    /// Linear travel of the right wheel since the previous cycle.
    pub right_displacement: f64,
    /// Mean of the two wheel displacements; the forward motion of the cycle.
    pub average_displacement: f64,
    /// Fused heading change since the previous cycle, in degrees.
    pub heading_delta: f64,
    /// World-frame position change applied this cycle.
    pub dx: f64,
    pub dy: f64,
}

/// Raw readings carried from one cycle to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSnapshot {
    /// Last left encoder reading, in motor degrees.
    pub previous_left_position: f64,
    /// Last right encoder reading, in motor degrees.
    pub previous_right_position: f64,
    /// Last inertial heading reading, in degrees.
    pub previous_inertial_heading: f64,
    /// Left wheel travel since the last reset.
    pub cumulative_left_distance: f64,
    /// Right wheel travel since the last reset.
    pub cumulative_right_distance: f64,
}

// =========================================================================
// == Public API Messages ==
// =========================================================================

/// The published output of the estimator: a consistent pose plus the number
/// of completed update cycles that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseSnapshot {
    pub pose: Pose2D,
    pub cycle: u64,
}

/// Requests the owner of an estimator applies between two update cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseCommand {
    SetPosition(PoseAnchor),
    ResetHeading,
}
