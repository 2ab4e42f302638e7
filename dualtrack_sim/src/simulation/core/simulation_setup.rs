// dualtrack_sim/src/simulation/core/simulation_setup.rs

use std::time::Duration;

use crate::prelude::*;
use crate::simulation::core::SimulationRng;

/// Reads the scenario and prepares the resources and schedule every other
/// plugin relies on.
pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // This plugin's job is to read the config and add resources and startup systems.
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found! Insert it before adding the simulation plugin.");

        if let Err(e) = config.odometry.validate() {
            panic!("Invalid odometry configuration: {}", e);
        }

        // --- 1. Add the Deterministic PRNG Resource ---
        let rng = SimulationRng::from_seed(config.simulation.seed);
        let period = Duration::from_millis(config.odometry.task.period_ms);
        info!(
            "Simulation configured: {:.1}s session, {} ms estimator period, seed {:?}",
            config.simulation.duration_seconds,
            config.odometry.task.period_ms,
            config.simulation.seed
        );

        app.insert_resource(rng);

        // The estimator period is the fixed tick: one estimator cycle per tick.
        app.insert_resource(Time::<Fixed>::from_duration(period));

        // Configure the runtime schedule graph.
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Drive,
                SimulationSet::Sensors,
                SimulationSet::Estimation,
                SimulationSet::Telemetry,
                SimulationSet::Validation,
            )
                .chain(), // .chain() enforces the order of the tuples/sets
        );
    }
}
