// dualtrack_sim/src/simulation/plugins/debugging/telemetry.rs

use bevy::prelude::*;
use dualtrack_core::estimation::SharedPose;
use dualtrack_core::task::TelemetryCountdown;

use crate::prelude::*;

/// Emits the `x:… y:… h:…` pose line every `telemetry_every` estimator cycles.
pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        let every = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found!")
            .odometry
            .task
            .telemetry_every;

        app.insert_resource(TelemetryCountdown::new(every))
            .add_systems(
                FixedUpdate,
                pose_telemetry_system.in_set(SimulationSet::Telemetry),
            );
    }
}

fn pose_telemetry_system(mut countdown: ResMut<TelemetryCountdown>, shared: Res<SharedPose>) {
    if countdown.tick() {
        let pose = shared.pose();
        info!("x:{:.3} y:{:.3} h:{:.3}", pose.x, pose.y, pose.heading);
    }
}
