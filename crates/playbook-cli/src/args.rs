use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::civil::Date;

use crate::cli::{LaunchArgs, MoveCommands, RecommendArgs, TaskCommands, TrackArgs};

/// Turn a business problem into a time-boxed marketing move
///
/// Playbook ranks proven marketing frameworks for the problem you have, checks
/// that the plan is ready with a preflight gate, and launches it as a
/// day-by-day checklist with a single KPI to track. Besides the command-line
/// interface it can run as an MCP (Model Context Protocol) server so AI
/// assistants can drive the same operations.
#[derive(Parser)]
#[command(version, about, name = "pb")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/playbook/playbook.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to a catalog JSON file replacing the built-in problems and
    /// frameworks
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today when computing move days
    #[arg(long, global = true)]
    pub today: Option<Date>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Playbook CLI
///
/// The wizard commands (`problems`, `recommend`, `preflight`, `launch`) work
/// from the catalog and never persist a draft. `move`, `task` and `track`
/// operate on launched moves; `serve` starts the MCP server.
#[derive(Subcommand)]
pub enum Commands {
    /// List the problems the catalog has frameworks for
    Problems,
    /// Rank frameworks for a problem and your situation
    #[command(alias = "r")]
    Recommend(RecommendArgs),
    /// Check a plan against the launch gate without launching it
    #[command(alias = "check")]
    Preflight(LaunchArgs),
    /// Assemble a plan, run the gate and launch the move when it passes
    Launch(LaunchArgs),
    /// Manage launched moves
    #[command(alias = "m")]
    Move {
        #[command(subcommand)]
        command: MoveCommands,
    },
    /// Work through a move's checklist
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Log a new value for a move's KPI
    Track(TrackArgs),
    /// Start the MCP server
    Serve,
}
