use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Dualtrack: a headless dead-reckoning simulator.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the Dualtrack simulation library.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/square_drive.toml")]
    pub scenario: PathBuf,

    /// Override the scenario's random seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the scenario's session length, in seconds.
    #[arg(long)]
    pub duration: Option<f64>,
}
