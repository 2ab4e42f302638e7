// dualtrack_core/src/lib.rs

// This file defines the public modules of the library.
pub mod abstractions;
pub mod config;
pub mod error;
pub mod estimation;
pub mod messages;
pub mod prelude;
pub mod sensors;
pub mod task;
pub mod types;
