// dualtrack_core/src/estimation/shared.rs

use parking_lot::RwLock;
use std::sync::Arc;

use crate::messages::PoseSnapshot;
use crate::types::Pose2D;

/// A pose published by one writer and read by any number of consumers.
///
/// The whole snapshot is replaced at once, so readers never observe an `x`
/// from one cycle paired with a `heading` from another. The lock is held only
/// for the copy in or out.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct SharedPose {
    inner: Arc<RwLock<PoseSnapshot>>,
}

impl SharedPose {
    pub fn new(initial: Pose2D) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PoseSnapshot {
                pose: initial,
                cycle: 0,
            })),
        }
    }

    /// Replaces the published pose and bumps the cycle counter.
    pub fn publish(&self, pose: Pose2D) {
        let mut snapshot = self.inner.write();
        snapshot.pose = pose;
        snapshot.cycle += 1;
    }

    /// Replaces the published pose without counting a cycle, e.g. after a
    /// re-anchor that happened between two updates.
    pub fn overwrite(&self, pose: Pose2D) {
        self.inner.write().pose = pose;
    }

    pub fn snapshot(&self) -> PoseSnapshot {
        *self.inner.read()
    }

    /// The latest pose, read under one lock. Prefer this over combining the
    /// single-field accessors below.
    pub fn pose(&self) -> Pose2D {
        self.inner.read().pose
    }

    // Each of these takes the lock on its own: `(x(), y())` may mix two cycles.

    pub fn x(&self) -> f64 {
        self.pose().x
    }

    pub fn y(&self) -> f64 {
        self.pose().y
    }

    pub fn heading(&self) -> f64 {
        self.pose().heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_publish_advances_cycle() {
        let shared = SharedPose::default();
        assert_eq!(shared.snapshot(), PoseSnapshot::default());

        shared.publish(Pose2D::new(1.0, 2.0, 3.0));
        shared.overwrite(Pose2D::new(4.0, 5.0, 6.0));
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.cycle, 1);
        assert_eq!(snapshot.pose, Pose2D::new(4.0, 5.0, 6.0));
        assert_eq!((shared.x(), shared.y(), shared.heading()), (4.0, 5.0, 6.0));
    }

    #[test]
    fn test_readers_never_see_torn_pose() {
        let shared = SharedPose::default();
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 1..=10_000 {
                    let v = i as f64;
                    shared.publish(Pose2D::new(v, v, v));
                }
            })
        };

        for _ in 0..10_000 {
            let pose = shared.pose();
            assert_eq!(pose.x, pose.y);
            assert_eq!(pose.y, pose.heading);
        }
        writer.join().unwrap();
        assert_eq!(shared.snapshot().cycle, 10_000);
    }
}
