//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for confirmation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One-line verdict with counters
    Summary,
    /// Every accepted response plus run statistics
    Full,
    /// JSON output
    Json,
}

/// What to do when a peer cannot be reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportErrorArg {
    /// Stop the run and report the partial result
    Abort,
    /// Count the failure as a rejection and keep walking
    Reject,
}

/// CLI arguments for fabric-confirm
#[derive(Parser, Debug)]
#[command(name = "fabric-confirm")]
#[command(author, version, about = "Model-driven endorsement collection for Fabric proposals")]
#[command(long_about = r#"
fabric-confirm collects endorsements for a transaction proposal by walking a
pre-computed automaton model. Each organization is asked in turn; the walk
stops once the recorded responses match a consensus vector, restarts when
they match a backoff vector, and gives up when the message budget runs out.

Configuration files are loaded from (in priority order):
1. FABRIC_CONFIRM_* environment variables
2. --config <path>     Explicit config file
3. ./confirm.toml      Project-level config
4. ~/.config/fabric-confirm/config.toml   Global config

Example:
  fabric-confirm --artifact models.json --model-id 3 --simulate
  fabric-confirm --artifact models.json --model-id 3 --reference expected.json -o json
  fabric-confirm --artifact models.json --list-models
"#)]
pub struct Cli {
    /// Model artifact (JSON) produced by the model checker
    #[arg(short, long, value_name = "PATH")]
    pub artifact: Option<PathBuf>,

    /// Id of the model to walk
    #[arg(short, long, value_name = "ID")]
    pub model_id: Option<u32>,

    /// Reference response (JSON); peers must reply with exactly this to count as accept
    #[arg(short, long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Use the scripted peers from the config file instead of contacting real peers
    #[arg(long)]
    pub simulate: bool,

    /// Sends to one organization before its backoff vectors are pruned
    #[arg(long, value_name = "N")]
    pub max_requests: Option<u32>,

    /// Global message budget for the run
    #[arg(long, value_name = "N")]
    pub max_messages: Option<u32>,

    /// How transport failures are handled
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_transport_error: Option<TransportErrorArg>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Append run events as JSON lines to this file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Abort the whole run after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// List the model ids in the artifact and exit
    #[arg(long)]
    pub list_models: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
