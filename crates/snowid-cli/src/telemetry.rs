//! Log output for the `snowid` binary.
//!
//! Events are written to stderr through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG` (default `info`). Stdout is reserved for command output.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_target(false)
                .with_file(true),
        )
        .try_init()?;
    Ok(())
}
