// dualtrack_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::abstractions::{Encoder, InertialSensor};
pub use crate::estimation::StateEstimator;

// --- Core Data Structures ---
pub use crate::messages::{CycleDeltas, PoseCommand, PoseSnapshot, SensorSnapshot};
pub use crate::types::{Pose2D, PoseAnchor};

// --- Configuration & Errors ---
pub use crate::config::{DriveGeometry, OdometryConfig, TaskConfig};
pub use crate::error::{ConfigError, TaskError};

// --- Estimation & Scheduling ---
pub use crate::estimation::{PoseEstimator, SharedPose};
pub use crate::task::{OdometryHandle, OdometryTask, TelemetryCountdown};

// --- Simulated Collaborators ---
pub use crate::sensors::{EncoderDriver, InertialDriver, SimulatedEncoder, SimulatedInertial};
