// src/main.rs
// llm-expert - web form for asking an LLM through an expert persona

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, run_ask, run_personas, run_server};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".llm-expert/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = match (&cli.command, cli.verbose) {
        (_, true) => Level::DEBUG,
        (Some(Commands::Ask { .. }) | Some(Commands::Personas), false) => Level::WARN,
        (Some(Commands::Serve) | None, false) => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match &cli.command {
        None | Some(Commands::Serve) => {
            run_server(&cli).await?;
        }
        Some(Commands::Ask { persona, text }) => {
            run_ask(&cli, persona, text).await?;
        }
        Some(Commands::Personas) => {
            run_personas();
        }
    }

    Ok(())
}
