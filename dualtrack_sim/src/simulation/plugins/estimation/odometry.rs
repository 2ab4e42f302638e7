// dualtrack_sim/src/simulation/plugins/estimation/odometry.rs

use bevy::prelude::*;
use dualtrack_core::estimation::{PoseEstimator, SharedPose};
use dualtrack_core::types::PoseAnchor;

use crate::prelude::*;
use crate::simulation::plugins::sensors::SensorDevices;
use crate::simulation::plugins::vehicles::differential::GroundTruth;

/// The single estimator instance of the session, owned by the ECS world.
#[derive(Resource, Debug)]
pub struct EstimatorResource(pub PoseEstimator);

/// Landmark re-anchors still to come, in time order.
#[derive(Resource, Debug, Default)]
pub struct AnchorSchedule {
    pending: Vec<AnchorEvent>,
    next: usize,
}

impl AnchorSchedule {
    pub fn new(mut events: Vec<AnchorEvent>) -> Self {
        events.sort_by(|a, b| a.at_seconds.total_cmp(&b.at_seconds));
        Self {
            pending: events,
            next: 0,
        }
    }

    /// Pops the next event if it is due at `elapsed`.
    pub fn pop_due(&mut self, elapsed: f64) -> Option<AnchorEvent> {
        let event = *self.pending.get(self.next)?;
        if event.at_seconds <= elapsed {
            self.next += 1;
            Some(event)
        } else {
            None
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len() - self.next
    }
}

pub struct OdometryEstimationPlugin;

impl Plugin for OdometryEstimationPlugin {
    fn build(&self, app: &mut App) {
        let devices = app
            .world_mut()
            .remove_resource::<SensorDevices>()
            .expect("SensorDevices not found! Add the SensorsPlugin first.");
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!");

        let mut estimator = PoseEstimator::try_new(
            config.odometry.geometry,
            devices.left,
            devices.right,
            devices.inertial,
        )
        .unwrap_or_else(|e| panic!("Invalid drive geometry: {}", e));
        // Start the estimate where the robot really is.
        estimator.set_position(PoseAnchor::from(config.start));
        info!(
            "  -> Attaching PoseEstimator (track {:.2}\", {:.4}\"/deg) at {:?}",
            config.odometry.geometry.track_width,
            config.odometry.geometry.inches_per_degree(),
            estimator.pose()
        );

        let shared = SharedPose::new(estimator.pose());
        let schedule = AnchorSchedule::new(config.anchors.clone());

        app.insert_resource(EstimatorResource(estimator))
            .insert_resource(shared)
            .insert_resource(schedule)
            .add_systems(
                FixedUpdate,
                odometry_estimation_system.in_set(SimulationSet::Estimation),
            );
    }
}

/// One estimator cycle per fixed tick, preceded by any landmark re-anchor
/// that has come due.
fn odometry_estimation_system(
    mut estimator: ResMut<EstimatorResource>,
    mut schedule: ResMut<AnchorSchedule>,
    shared: Res<SharedPose>,
    truth: Res<GroundTruth>,
) {
    while let Some(event) = schedule.pop_due(truth.elapsed) {
        let mut anchor = PoseAnchor::at(truth.pose.x, truth.pose.y);
        if event.with_heading {
            anchor = anchor.with_heading(truth.pose.heading);
        }
        let before = estimator.0.pose();
        estimator.0.set_position(anchor);
        info!(
            "Landmark re-anchor at {:.2}s: corrected {:.3}\" of drift",
            truth.elapsed,
            before.distance_to(&estimator.0.pose())
        );
        shared.overwrite(estimator.0.pose());
    }

    let pose = estimator.0.update();
    shared.publish(pose);
}
