// dualtrack_sim/examples/01_headless_run.rs

//! A headless end-to-end dead-reckoning session.
//!
//! This example demonstrates how to:
//! 1. Load a simulation scenario from a TOML file, with CLI overrides.
//! 2. Set up a minimal, window-less Bevy application.
//! 3. Add the main `DualtrackSimulationPlugin` which contains all the logic.
//!
//! To run this example:
//! `cargo run --example 01_headless_run -- --scenario assets/scenarios/square_drive.toml --seed 7`

use std::time::Duration;

// --- Bevy Imports ---
use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;

// --- Project-Specific Imports ---
use dualtrack_sim::cli::Cli;
use dualtrack_sim::simulation::config::load_scenario_from_cli;
use dualtrack_sim::DualtrackSimulationPlugin;

fn main() {
    // --- 1. Load Simulation Configuration ---
    let cli = Cli::parse();
    println!("Loading scenario from: {}", cli.scenario.display());

    let config = load_scenario_from_cli(&cli).unwrap_or_else(|err| {
        panic!(
            "Failed to load scenario '{}': {}",
            cli.scenario.display(),
            err
        );
    });
    let period = Duration::from_millis(config.odometry.task.period_ms);

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    app.add_plugins((
        // No window or renderer. The runner loops as fast as it can.
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
        LogPlugin {
            level: bevy::log::Level::INFO,
            // A good filter for focusing on our crate's logs during development.
            filter: "info,dualtrack_sim=debug,dualtrack_core=debug".to_string(),
            ..default()
        },
    ))
    // Every frame advances simulated time by exactly one estimator period, so
    // a session runs faster than real time and seeded runs are reproducible.
    .insert_resource(TimeUpdateStrategy::ManualDuration(period))
    // Insert the loaded configuration as a Bevy resource so all plugins can access it.
    .insert_resource(config)
    .insert_resource(cli);

    // --- 3. Add the Main Dualtrack Simulation Plugin ---
    app.add_plugins(DualtrackSimulationPlugin);

    // --- 4. Run the App ---
    // The session ends on its own once `duration_seconds` has elapsed.
    app.run();
}
