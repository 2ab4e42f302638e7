// dualtrack_sim/src/simulation/plugins/vehicles/mod.rs

pub mod differential;
