// dualtrack_core/src/estimation/pose_estimator.rs

use crate::abstractions::{Encoder, InertialSensor};
use crate::config::DriveGeometry;
use crate::error::ConfigError;
use crate::estimation::StateEstimator;
use crate::messages::{CycleDeltas, PoseCommand, SensorSnapshot};
use crate::types::{Pose2D, PoseAnchor};

/// Dead-reckoning estimator fusing two drive encoders with an inertial sensor.
///
/// Heading is the equal-weight average of the wheel-differential estimate and
/// the inertial reading. Position is advanced along the fused heading plus
/// half of the cycle's heading change. `update` is expected to run at a fixed
/// cadence by whoever owns the estimator.
#[derive(Debug)]
pub struct PoseEstimator {
    geometry: DriveGeometry,
    /// Cached `geometry.inches_per_degree()`.
    inches_per_degree: f64,

    left: Box<dyn Encoder>,
    right: Box<dyn Encoder>,
    inertial: Box<dyn InertialSensor>,

    pose: Pose2D,
    /// Heading at the last reset; zero point of the wheel-differential term.
    reference_heading: f64,
    deltas: CycleDeltas,
    snapshot: SensorSnapshot,
}

impl PoseEstimator {
    /// Creates an estimator at the world origin with zero heading and resets
    /// every sensor baseline.
    ///
    /// `geometry` is taken as is: a zero `track_width` turns every heading
    /// into NaN. Use [`PoseEstimator::try_new`] for unchecked input.
    pub fn new(
        geometry: DriveGeometry,
        mut left: Box<dyn Encoder>,
        mut right: Box<dyn Encoder>,
        mut inertial: Box<dyn InertialSensor>,
    ) -> Self {
        left.reset_position();
        right.reset_position();
        inertial.reset_rotation();
        inertial.reset_heading();

        Self {
            inches_per_degree: geometry.inches_per_degree(),
            geometry,
            left,
            right,
            inertial,
            pose: Pose2D::default(),
            reference_heading: 0.0,
            deltas: CycleDeltas::default(),
            snapshot: SensorSnapshot::default(),
        }
    }

    /// Like [`PoseEstimator::new`], but rejects geometry that does not
    /// validate.
    pub fn try_new(
        geometry: DriveGeometry,
        left: Box<dyn Encoder>,
        right: Box<dyn Encoder>,
        inertial: Box<dyn InertialSensor>,
    ) -> Result<Self, ConfigError> {
        geometry.validate()?;
        Ok(Self::new(geometry, left, right, inertial))
    }

    // --- Accessors ---

    pub fn x(&self) -> f64 {
        self.pose.x
    }

    pub fn y(&self) -> f64 {
        self.pose.y
    }

    pub fn heading(&self) -> f64 {
        self.pose.heading
    }

    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    pub fn reference_heading(&self) -> f64 {
        self.reference_heading
    }

    pub fn deltas(&self) -> CycleDeltas {
        self.deltas
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        self.snapshot
    }

    pub fn geometry(&self) -> &DriveGeometry {
        &self.geometry
    }

    /// Left wheel travel since the last reset, read straight from the encoder.
    pub fn left_distance(&self) -> f64 {
        self.left.position() * self.inches_per_degree
    }

    /// Right wheel travel since the last reset, read straight from the encoder.
    pub fn right_distance(&self) -> f64 {
        self.right.position() * self.inches_per_degree
    }

    /// The inertial sensor's rotation register.
    pub fn inertial_rotation(&self) -> f64 {
        self.inertial.rotation()
    }

    // --- Re-anchoring ---

    /// Moves the estimate to a known position, optionally overriding heading.
    ///
    /// Both branches re-zero the encoders and re-sync the inertial registers to
    /// the resulting heading, since the wheel-differential term is measured
    /// from `reference_heading`.
    pub fn set_position(&mut self, anchor: PoseAnchor) {
        self.pose.x = anchor.x;
        self.pose.y = anchor.y;
        if let Some(heading) = anchor.heading {
            self.pose.heading = heading;
        }
        let heading = self.pose.heading;

        self.reference_heading = heading;
        self.rezero_encoders();
        self.snapshot.previous_inertial_heading = heading;
        self.inertial.set_rotation(heading);
        self.inertial.set_heading(heading);
    }

    /// Declares the current direction of travel to be heading zero.
    pub fn reset_heading(&mut self) {
        self.pose.heading = 0.0;
        self.reference_heading = 0.0;
        self.rezero_encoders();
        self.snapshot.previous_inertial_heading = 0.0;
        self.inertial.reset_heading();
    }

    fn rezero_encoders(&mut self) {
        self.snapshot.previous_left_position = 0.0;
        self.snapshot.previous_right_position = 0.0;
        self.snapshot.cumulative_left_distance = 0.0;
        self.snapshot.cumulative_right_distance = 0.0;
        self.left.reset_position();
        self.right.reset_position();
    }

    // --- Estimation Cycle ---

    /// Runs one cycle: wheel displacement, fused heading, then position
    /// integration. Returns the new pose.
    pub fn update(&mut self) -> Pose2D {
        // Heading fusion consumes the distances computed here.
        self.update_displacement();
        self.update_heading();

        // Travel along the freshly fused heading plus half this cycle's turn.
        let travel_direction =
            (self.pose.heading + self.deltas.heading_delta / 2.0).to_radians();
        self.deltas.dx = self.deltas.average_displacement * travel_direction.cos();
        self.deltas.dy = self.deltas.average_displacement * travel_direction.sin();
        self.pose.x += self.deltas.dx;
        self.pose.y += self.deltas.dy;

        self.pose
    }

    fn update_displacement(&mut self) {
        let left = self.left.position();
        let right = self.right.position();

        let s = &mut self.snapshot;
        s.cumulative_left_distance = left * self.inches_per_degree;
        s.cumulative_right_distance = right * self.inches_per_degree;

        let d = &mut self.deltas;
        d.left_displacement = (left - s.previous_left_position) * self.inches_per_degree;
        d.right_displacement = (right - s.previous_right_position) * self.inches_per_degree;
        d.average_displacement = (d.left_displacement + d.right_displacement) / 2.0;

        s.previous_left_position = left;
        s.previous_right_position = right;
    }

    fn update_heading(&mut self) {
        let inertial = self.inertial.heading();
        let track = self.geometry.track_width;
        let s = &mut self.snapshot;

        let differential = self.reference_heading
            + ((s.cumulative_left_distance - s.cumulative_right_distance) / track).to_degrees();
        self.pose.heading = (differential + inertial) / 2.0;

        let differential_delta =
            ((self.deltas.left_displacement - self.deltas.right_displacement) / track).to_degrees();
        let inertial_delta = inertial - s.previous_inertial_heading;
        self.deltas.heading_delta = (differential_delta + inertial_delta) / 2.0;

        s.previous_inertial_heading = inertial;
    }
}

impl StateEstimator for PoseEstimator {
    fn update(&mut self) -> Pose2D {
        PoseEstimator::update(self)
    }

    fn pose(&self) -> Pose2D {
        self.pose
    }

    fn apply(&mut self, command: PoseCommand) {
        match command {
            PoseCommand::SetPosition(anchor) => self.set_position(anchor),
            PoseCommand::ResetHeading => self.reset_heading(),
        }
    }
}
