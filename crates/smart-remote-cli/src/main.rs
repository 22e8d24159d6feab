//! SmartRemote CLI - drive network TVs from the terminal.
//!
//! Commands go over the TV's network API and fall back to an IR bridge when
//! the TV stops answering.

mod cli;
mod commands;
mod context;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::Context;
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::load(&cli).await?;

    match cli.command {
        Commands::Discover(args) => commands::run_discover(args, &ctx).await,
        Commands::Connect(args) => commands::run_connect(args, &ctx).await,
        Commands::Key(args) => commands::run_key(args, &ctx).await,
        Commands::Launch(args) => commands::run_launch(args, &ctx).await,
        Commands::PowerOn => commands::run_power_on(&ctx).await,
        Commands::PowerOff => commands::run_power_off(&ctx).await,
        Commands::Bridge(args) => commands::run_bridge(args, &ctx).await,
        Commands::Keys(args) => commands::run_keys(args, &ctx),
        Commands::Status => commands::run_status(&ctx).await,
        Commands::Schedule(args) => commands::run_schedule(args, &ctx).await,
        Commands::Config(args) => commands::run_config(args, &ctx).await,
    }
}
