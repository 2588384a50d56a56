use anyhow::bail;
use clap::{Parser, Subcommand};
use core::time::Duration;
use snowid::{Config, Layout};

/// Runtime configuration for the `snowid` binary.
///
/// Layout settings are global so every subcommand decodes IDs the same way
/// they were generated. All of them fall back to environment variables, which
/// may come from a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowid",
    version,
    about = "Generate, encode and inspect 63-bit Snowflake IDs"
)]
pub struct CliArgs {
    /// Node number stamped into generated IDs.
    ///
    /// Must be unique among all generators sharing an ID namespace.
    ///
    /// Environment variable: `SNOWID_NODE`
    #[arg(long, global = true, env = "SNOWID_NODE", default_value_t = 0)]
    pub node: i64,

    /// Width of the node field in bits.
    ///
    /// Environment variable: `SNOWID_NODE_BITS`
    #[arg(long, global = true, env = "SNOWID_NODE_BITS", default_value_t = Layout::DEFAULT.node_bits())]
    pub node_bits: u8,

    /// Width of the sequence field in bits. Together with `node_bits` this
    /// may not exceed 22.
    ///
    /// Environment variable: `SNOWID_STEP_BITS`
    #[arg(long, global = true, env = "SNOWID_STEP_BITS", default_value_t = Layout::DEFAULT.step_bits())]
    pub step_bits: u8,

    /// Epoch of the timestamp field, in milliseconds since 1970-01-01 UTC.
    ///
    /// Environment variable: `SNOWID_EPOCH_MS`
    #[arg(long, global = true, env = "SNOWID_EPOCH_MS", default_value_t = 1_288_834_974_657)]
    pub epoch_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate new IDs, one per line.
    Generate {
        /// How many IDs to generate.
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Print raw decimal values instead of base58.
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Convert a decimal ID to base58.
    Encode {
        /// The raw decimal value.
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Convert a base58 ID to decimal.
    Decode {
        /// The base58 text.
        text: String,
    },
    /// Print the fields of a base58 ID as JSON.
    Inspect {
        /// The base58 text.
        text: String,
    },
}

/// Validated form of [`CliArgs`].
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub node: i64,
    pub config: Config,
    pub layout: Layout,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let config = Config::new(
            args.node_bits,
            args.step_bits,
            Duration::from_millis(args.epoch_ms),
        );
        let layout = config.layout()?;

        if args.node < 0 || args.node > layout.node_max() {
            bail!(
                "SNOWID_NODE ({}) must be between 0 and {} for {} node bits",
                args.node,
                layout.node_max(),
                layout.node_bits()
            );
        }

        if let Command::Generate { count: 0, .. } = args.command {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            node: args.node,
            config,
            layout,
            command: args.command,
        })
    }
}
