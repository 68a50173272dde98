//! Confab CLI entry point.
//!
//! Binary name: `confab`
//!
//! Parses CLI arguments, initializes tracing and configuration, then
//! dispatches to the interactive chat loop or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use confab_observe::tracing_setup::{filter_for_verbosity, init_tracing_with, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need tracing or config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "confab", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing_with(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Chat { overrides } => {
            let state = AppState::init(cli.config.as_deref(), &overrides).await?;
            cli::chat::loop_runner::run_chat_loop(&state).await
        }

        Commands::Ask { text, overrides } => {
            let state = AppState::init(cli.config.as_deref(), &overrides).await?;
            cli::ask::ask(&state, &text.join(" "), cli.json, cli.quiet).await
        }

        Commands::Config { overrides } => {
            let state = AppState::init(cli.config.as_deref(), &overrides).await?;
            cli::config::show_config(&state, cli.json)
        }

        Commands::Completions { .. } => Ok(()),
    }
}
