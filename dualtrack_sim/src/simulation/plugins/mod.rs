// dualtrack_sim/src/simulation/plugins/mod.rs

pub mod debugging;
pub mod estimation;
pub mod sensors;
pub mod vehicles;
