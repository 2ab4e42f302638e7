// dualtrack_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire dualtrack_core prelude so you can easily access
// pure types like `Pose2D`, `PoseEstimator`, `DriveGeometry`, etc.
pub use dualtrack_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::config::structs::*;
pub use crate::simulation::core::app_state::SimulationSet;

pub use crate::simulation::plugins::debugging::ErrorStats;
pub use crate::simulation::plugins::estimation::EstimatorResource;
pub use crate::simulation::plugins::vehicles::differential::GroundTruth;
pub use crate::DualtrackSimulationPlugin;
