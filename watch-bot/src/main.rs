//! msgwatch: report edited and deleted chat messages. Config from file, env and CLI args.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use watch_bot::{already_reported, load_config, run_watcher, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if already_reported(&e) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            let config = load_config(&args)?;
            run_watcher(config).await
        }
    }
}
