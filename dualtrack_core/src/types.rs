// dualtrack_core/src/types.rs

use nalgebra::{Point2, Vector2};
use serde::Deserialize;

// --- Core Pose Type ---

/// A planar pose in the fixed world frame.
///
/// `x` and `y` are linear units (inches on the reference robot). `heading` is
/// in degrees and is deliberately left unwrapped: a robot that spins twice
/// reports 720, not 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub heading: f64,
}

impl Pose2D {
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn heading_radians(&self) -> f64 {
        self.heading.to_radians()
    }

    /// Unit vector pointing along the heading.
    pub fn direction(&self) -> Vector2<f64> {
        let h = self.heading_radians();
        Vector2::new(h.cos(), h.sin())
    }

    /// Euclidean distance between the positions of two poses.
    pub fn distance_to(&self, other: &Pose2D) -> f64 {
        (self.position() - other.position()).norm()
    }
}

// --- Re-anchoring Request ---

/// A known pose to re-anchor the estimate to.
///
/// When `heading` is `None` the estimator keeps its current heading but still
/// re-synchronizes every sensor baseline against it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoseAnchor {
    pub x: f64,
    pub y: f64,
    pub heading: Option<f64>,
}

impl PoseAnchor {
    pub const fn at(x: f64, y: f64) -> Self {
        Self { x, y, heading: None }
    }

    pub const fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }
}

impl From<Pose2D> for PoseAnchor {
    fn from(pose: Pose2D) -> Self {
        PoseAnchor::at(pose.x, pose.y).with_heading(pose.heading)
    }
}
