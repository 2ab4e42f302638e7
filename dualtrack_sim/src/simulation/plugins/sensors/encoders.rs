// dualtrack_sim/src/simulation/plugins/sensors/encoders.rs

use bevy::prelude::*;
use rand_distr::{Distribution, Normal};

use crate::prelude::*;
use crate::simulation::core::SimulationRng;
use crate::simulation::plugins::sensors::SensorRig;
use crate::simulation::plugins::vehicles::differential::GroundTruth;

/// Runtime state of the simulated drive encoders.
#[derive(Resource)]
pub struct EncoderModel {
    degrees_per_inch: f64,
    /// Fractional wheel slip applied to each tick's travel.
    slip: Normal<f64>,
}

pub struct EncoderPlugin;

impl Plugin for EncoderPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!");
        let stddev = config.sensors.wheel_slip_stddev;
        let model = EncoderModel {
            degrees_per_inch: config.odometry.geometry.degrees_per_inch(),
            slip: Normal::new(0.0, stddev)
                .unwrap_or_else(|e| panic!("Invalid wheel_slip_stddev {}: {}", stddev, e)),
        };

        app.insert_resource(model).add_systems(
            FixedUpdate,
            encoder_sensor_system.in_set(SimulationSet::Sensors),
        );
    }
}

/// Rolls each simulated encoder by the wheel travel of the latest tick.
pub fn encoder_sensor_system(
    truth: Res<GroundTruth>,
    model: Res<EncoderModel>,
    rig: Res<SensorRig>,
    mut rng: ResMut<SimulationRng>,
) {
    let left_slip = 1.0 + model.slip.sample(&mut rng.0);
    let right_slip = 1.0 + model.slip.sample(&mut rng.0);

    rig.left.advance(truth.left_step * left_slip * model.degrees_per_inch);
    rig.right.advance(truth.right_step * right_slip * model.degrees_per_inch);
}
