//! Integration tests comparing CLI output with the core Display
//! implementations
//!
//! The CLI in plain mode and the MCP server both print the core markdown
//! unchanged, so what the binary writes must match what the library renders.

use std::process::Command;

use jiff::civil::{date, Date};
use playbook_core::{
    display::move_list_title,
    params::{Id, LaunchMove, ListMoves},
    Playbook, PlaybookBuilder,
};
use tempfile::TempDir;

const TODAY: Date = date(2026, 10, 1);

/// Helper function to open a playbook on the same database the CLI uses
async fn open_playbook(db_path: &std::path::Path) -> Playbook {
    PlaybookBuilder::new()
        .with_database_path(Some(db_path))
        .with_fixed_date(Some(TODAY))
        .build()
        .await
        .expect("Failed to create playbook")
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pb"));
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .arg("--today")
        .arg(TODAY.to_string());

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn content_sprint_args() -> Vec<&'static str> {
    vec![
        "nobody-knows-us",
        "--framework",
        "content-sprint",
        "--input",
        "topic=Bootstrapped SaaS pricing",
        "--input",
        "format=threads",
        "--channel",
        "linkedin",
        "--baseline",
        "120",
        "--target",
        "500",
    ]
}

fn content_sprint_params() -> LaunchMove {
    LaunchMove {
        problem_id: "nobody-knows-us".to_string(),
        framework_id: Some("content-sprint".to_string()),
        inputs: [
            ("topic".to_string(), "Bootstrapped SaaS pricing".to_string()),
            ("format".to_string(), "threads".to_string()),
        ]
        .into(),
        channels: vec!["linkedin".to_string()],
        baseline: Some(120.0),
        target: Some(500.0),
        ..Default::default()
    }
}

/// The preflight report printed by the CLI is the library's report
#[tokio::test]
async fn test_preflight_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let mut args = vec!["preflight"];
    args.extend(content_sprint_args());
    let cli_output = run_cli_command(db_path.to_str().unwrap(), &args);

    let playbook = open_playbook(&db_path).await;
    let report = playbook
        .preflight(&content_sprint_params())
        .expect("Failed to run preflight");

    assert!(report.passed);
    assert_eq!(cli_output, report.to_string());
    assert!(cli_output.starts_with("# Preflight: ready to launch"));
}

/// A move launched through the CLI shows the same in the CLI and the library
#[tokio::test]
async fn test_show_move_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let mut args = vec!["launch"];
    args.extend(content_sprint_args());
    let launch_output = run_cli_command(db_str, &args);
    assert!(launch_output.contains("Launched move with ID: 1"));

    let cli_output = run_cli_command(db_str, &["move", "show", "1"]);

    let playbook = open_playbook(&db_path).await;
    let mv = playbook
        .get_move(&Id { id: 1 })
        .await
        .expect("Failed to get move")
        .expect("Move should exist");

    assert_eq!(cli_output, mv.to_string());
    assert!(launch_output.ends_with(&cli_output));
}

/// Listing through the CLI matches the MCP-style title plus summaries
#[tokio::test]
async fn test_list_moves_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let params = ListMoves::default();
    let empty_cli = run_cli_command(db_str, &["move", "list"]);
    assert_eq!(empty_cli, "# Open Moves\n\nNo moves found.\n");

    let mut args = vec!["launch"];
    args.extend(content_sprint_args());
    run_cli_command(db_str, &args);
    run_cli_command(db_str, &args);

    let cli_list = run_cli_command(db_str, &["move", "list"]);

    let playbook = open_playbook(&db_path).await;
    let summaries = playbook
        .list_moves_summary(&params)
        .await
        .expect("Failed to list moves");
    let direct = format!("# {}\n\n{summaries}", move_list_title(&params));

    assert_eq!(summaries.len(), 2);
    assert_eq!(cli_list, direct);
    // newest first
    assert!(cli_list.find("(ID: 2)") < cli_list.find("(ID: 1)"));
}
