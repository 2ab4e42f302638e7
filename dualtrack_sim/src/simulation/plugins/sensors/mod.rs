// dualtrack_sim/src/simulation/plugins/sensors/mod.rs

use bevy::prelude::*;
use crate::prelude::ScenarioConfig;
use dualtrack_core::abstractions::{Encoder, InertialSensor};
use dualtrack_core::sensors::{EncoderDriver, InertialDriver, SimulatedEncoder, SimulatedInertial};

pub mod encoders;
pub mod inertial;

/// Driver halves of the simulated devices, fed every tick from ground truth.
#[derive(Resource, Debug, Clone)]
pub struct SensorRig {
    pub left: EncoderDriver,
    pub right: EncoderDriver,
    pub imu: InertialDriver,
}

/// Device halves waiting to be handed to the estimator.
///
/// The estimation plugin removes this resource when it builds the
/// `PoseEstimator`, so it only exists during app construction.
#[derive(Resource, Debug)]
pub struct SensorDevices {
    pub left: Box<dyn Encoder>,
    pub right: Box<dyn Encoder>,
    pub inertial: Box<dyn InertialSensor>,
}

/// Creates the simulated encoders and inertial sensor.
pub struct SensorsPlugin;

impl Plugin for SensorsPlugin {
    fn build(&self, app: &mut App) {
        let start_heading = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!")
            .start
            .heading;

        let (left_encoder, left) = SimulatedEncoder::new();
        let (right_encoder, right) = SimulatedEncoder::new();
        let (inertial, imu) = SimulatedInertial::new();
        // The inertial sensor powers on already pointing along the start heading.
        imu.set_yaw(start_heading);
        info!("  -> Spawning simulated left/right drive encoders and inertial sensor");

        app.insert_resource(SensorRig { left, right, imu })
            .insert_resource(SensorDevices {
                left: Box::new(left_encoder),
                right: Box::new(right_encoder),
                inertial: Box::new(inertial),
            })
            .add_plugins((encoders::EncoderPlugin, inertial::InertialPlugin));
    }
}
