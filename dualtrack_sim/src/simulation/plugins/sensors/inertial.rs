// dualtrack_sim/src/simulation/plugins/sensors/inertial.rs

use bevy::prelude::*;
use rand_distr::{Distribution, Normal};

use crate::prelude::*;
use crate::simulation::core::SimulationRng;
use crate::simulation::plugins::sensors::encoders::encoder_sensor_system;
use crate::simulation::plugins::sensors::SensorRig;
use crate::simulation::plugins::vehicles::differential::GroundTruth;

/// Runtime state of the simulated inertial sensor.
#[derive(Resource)]
pub struct InertialModel {
    noise: Normal<f64>,
    drift_deg_per_s: f64,
}

pub struct InertialPlugin;

impl Plugin for InertialPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!");
        let stddev = config.sensors.inertial_stddev_deg;
        let model = InertialModel {
            noise: Normal::new(0.0, stddev)
                .unwrap_or_else(|e| panic!("Invalid inertial_stddev_deg {}: {}", stddev, e)),
            drift_deg_per_s: config.sensors.inertial_drift_deg_per_s,
        };

        app.insert_resource(model).add_systems(
            FixedUpdate,
            // Both sensors draw from the shared PRNG; a fixed order keeps
            // seeded runs reproducible.
            inertial_sensor_system
                .after(encoder_sensor_system)
                .in_set(SimulationSet::Sensors),
        );
    }
}

/// Reports the true yaw, corrupted by white noise and a constant drift.
fn inertial_sensor_system(
    truth: Res<GroundTruth>,
    model: Res<InertialModel>,
    rig: Res<SensorRig>,
    mut rng: ResMut<SimulationRng>,
) {
    let drift = model.drift_deg_per_s * truth.elapsed;
    let noise = model.noise.sample(&mut rng.0);
    rig.imu.set_yaw(truth.pose.heading + drift + noise);
}
