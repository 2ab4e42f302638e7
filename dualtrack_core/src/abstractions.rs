// dualtrack_core/src/abstractions.rs

use std::fmt::Debug;

// --- ENCODER TRAIT ---
// A drive motor's integrated encoder. Reads are infallible from the estimator's
// point of view: a disconnected device reports whatever its driver decides.
/// The contract for a wheel encoder consumed by the `PoseEstimator`.
/// Implementations should be `Send + Sync` so the estimator can move into the
/// odometry thread or live inside a Bevy resource.
pub trait Encoder: Debug + Send + Sync {
    /// Current cumulative rotation since the last reset, in degrees of motor shaft.
    fn position(&self) -> f64;

    /// Zeroes the internal position counter.
    fn reset_position(&mut self);
}

// --- INERTIAL SENSOR TRAIT ---
/// The contract for an inertial sensor that reports absolute yaw.
///
/// Two registers are exposed. `heading` is the unwrapped cumulative yaw the
/// estimator fuses each cycle; `rotation` is kept for display and
/// diagnostics. Both are in degrees and can be reset independently.
pub trait InertialSensor: Debug + Send + Sync {
    /// Current unwrapped heading, in degrees.
    fn heading(&self) -> f64;

    /// Current rotation, in degrees.
    fn rotation(&self) -> f64;

    /// Zeroes the rotation register.
    fn reset_rotation(&mut self);

    /// Sets the rotation register to `value` degrees.
    fn set_rotation(&mut self, value: f64);

    /// Zeroes the heading register without touching rotation.
    fn reset_heading(&mut self);

    /// Sets the heading register to `value` degrees.
    fn set_heading(&mut self, value: f64);
}
