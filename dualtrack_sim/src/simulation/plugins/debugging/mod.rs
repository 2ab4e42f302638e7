// dualtrack_sim/src/simulation/plugins/debugging/mod.rs

use bevy::prelude::*;

mod state_error;
mod telemetry;

pub use state_error::{ErrorStats, StateErrorDebugPlugin};
pub use telemetry::TelemetryPlugin;

/// A top-level plugin that brings in all runtime reporting: the periodic pose
/// telemetry line and the estimate-vs-truth validation.
pub struct DebuggingPlugin;

impl Plugin for DebuggingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((TelemetryPlugin, StateErrorDebugPlugin));
    }
}
