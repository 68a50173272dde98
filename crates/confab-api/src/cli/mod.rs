//! CLI command definitions for the `confab` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod config;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Chat with a hosted language model from your terminal.
#[derive(Parser)]
#[command(name = "confab", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Read configuration from this file instead of ~/.confab/config.toml.
    #[arg(long, global = true, env = "CONFAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Send a single message and print the reply.
    Ask {
        /// Message text (joined with spaces).
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Show the effective configuration.
    Config {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Per-invocation overrides of `config.toml` values.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Model identifier to request.
    #[arg(long, env = "CONFAB_MODEL")]
    pub model: Option<String>,

    /// Chat completions endpoint URL.
    #[arg(long, env = "CONFAB_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Label shown next to bot messages.
    #[arg(long)]
    pub name: Option<String>,

    /// Request timeout in seconds (unset waits indefinitely).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}
