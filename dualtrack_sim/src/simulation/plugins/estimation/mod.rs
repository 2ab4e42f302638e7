// dualtrack_sim/src/simulation/plugins/estimation/mod.rs

pub mod odometry;

pub use odometry::{AnchorSchedule, EstimatorResource, OdometryEstimationPlugin};
