use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use snowid::{Config, Generator, Layout, SnowId};

use crate::config::{CliConfig, Command};

/// Field breakdown printed by `snowid inspect`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Inspection {
    #[serde(with = "snowid::as_native")]
    pub id: SnowId,
    pub text: SnowId,
    pub timestamp: i64,
    pub unix_millis: i64,
    pub node: i64,
    pub sequence: i64,
}

impl Inspection {
    pub fn new(id: SnowId, config: &Config, layout: &Layout) -> anyhow::Result<Self> {
        Ok(Self {
            id,
            text: id,
            timestamp: layout.timestamp(id),
            unix_millis: config.unix_millis(id)?,
            node: layout.node(id),
            sequence: layout.sequence(id),
        })
    }
}

/// Runs the parsed subcommand, writing its output to `out`.
pub fn run(cli: &CliConfig, out: &mut impl Write) -> anyhow::Result<()> {
    match &cli.command {
        Command::Generate { count, raw } => {
            let generator = Generator::with_config(cli.node, &cli.config)?;
            tracing::debug!(node = cli.node, count, "generating IDs");
            for _ in 0..*count {
                let id = generator.generate();
                if *raw {
                    writeln!(out, "{id}")?;
                } else {
                    writeln!(out, "{}", id.try_encode()?)?;
                }
            }
        }
        Command::Encode { value } => {
            let encoded = SnowId::from_raw(*value)
                .try_encode()
                .with_context(|| format!("cannot encode {value}"))?;
            writeln!(out, "{encoded}")?;
        }
        Command::Decode { text } => {
            let id = SnowId::parse(text).with_context(|| format!("cannot decode {text:?}"))?;
            writeln!(out, "{id}")?;
        }
        Command::Inspect { text } => {
            let id = SnowId::parse(text).with_context(|| format!("cannot decode {text:?}"))?;
            let inspection = Inspection::new(id, &cli.config, &cli.layout)?;
            serde_json::to_writer_pretty(&mut *out, &inspection)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
