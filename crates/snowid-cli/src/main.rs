#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, CliConfig};
use telemetry::init_telemetry;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = CliConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let stdout = std::io::stdout();
    commands::run(&config, &mut stdout.lock())
}

fn log_startup_info(config: &CliConfig) {
    tracing::debug!(
        node = config.node,
        node_bits = config.layout.node_bits(),
        step_bits = config.layout.step_bits(),
        epoch_ms = config.config.epoch_millis(),
        "starting snowid"
    );
}
