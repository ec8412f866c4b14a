//! Playbook CLI Application
//!
//! Command-line interface and MCP server for playbook: pick a marketing
//! problem, launch a move and work through it day by day.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, PlaybookMcpServer};
use playbook_core::{params::ListMoves, OperationStatus, PlaybookBuilder, PlaybookError};
use renderer::TerminalRenderer;
use Commands::*;

/// Recovery hint shown when a command names a move or task that is not there.
const NOT_FOUND_HINT: &str = "Run `pb move list --all` to see your moves";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        catalog_file,
        today,
        no_color,
        command,
    } = Args::parse();

    let playbook = PlaybookBuilder::new()
        .with_database_path(database_file)
        .with_catalog_path(catalog_file)
        .with_fixed_date(today)
        .build()
        .await
        .context("Failed to initialize playbook")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Playbook started");

    let cli = Cli::new(playbook.clone(), renderer);
    let result = match command {
        Some(Problems) => cli.list_problems(),
        Some(Recommend(args)) => cli.recommend(&args.into()),
        Some(Preflight(args)) => cli.preflight(&args.into()),
        Some(Launch(args)) => cli.launch(&args.into()).await,
        Some(Move { command }) => cli.handle_move_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Track(args)) => cli.track(&args.into()).await,
        Some(Serve) => {
            info!("Starting Playbook MCP server");
            return run_stdio_server(PlaybookMcpServer::new(playbook))
                .await
                .context("MCP server failed");
        }
        None => cli.list_moves(&ListMoves::default()).await,
    };

    // domain errors get the markdown error block and a non-zero exit;
    // anything else falls through to anyhow's report
    match result {
        Err(error) => match error.downcast_ref::<PlaybookError>() {
            Some(error) => {
                cli.render_error(&OperationStatus::from_error(error, NOT_FOUND_HINT));
                std::process::exit(1);
            }
            None => Err(error),
        },
        Ok(()) => Ok(()),
    }
}
