#![allow(dead_code)]

use jiff::civil::{date, Date};
use playbook_core::{
    models::{MoveStatus, NewChecklistItem, NewMove, RunMode},
    params::LaunchMove,
    Playbook, PlaybookBuilder,
};
use tempfile::TempDir;

/// The date every test playbook treats as today.
pub const TODAY: Date = date(2026, 10, 1);

/// Helper function to create a test playbook pinned to [`TODAY`]
pub async fn create_test_playbook() -> (TempDir, Playbook) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let playbook = PlaybookBuilder::new()
        .with_database_path(Some(&db_path))
        .with_fixed_date(Some(TODAY))
        .build()
        .await
        .expect("Failed to create playbook");
    (temp_dir, playbook)
}

/// A move ready for the store, with `tasks` tasks spread over `days` days.
pub fn new_move(days: u32, tasks: u32) -> NewMove {
    NewMove {
        name: "Test move".to_string(),
        problem_type: "need-customers-fast".to_string(),
        framework_id: "founder-led-outreach".to_string(),
        framework_name: "Founder-Led Outreach".to_string(),
        campaign_id: None,
        channel: Some("email".to_string()),
        run_mode: RunMode::Solo,
        duration_days: days,
        checklist_items: (0..tasks)
            .map(|i| NewChecklistItem {
                text: format!("Task {}", i + 1),
                day: i % days + 1,
                duration_minutes: Some(30),
                position: i,
            })
            .collect(),
        metric: "Booked calls".to_string(),
        baseline: Some(0.0),
        target: Some(10.0),
        status: MoveStatus::Active,
        start_date: TODAY,
    }
}

/// Launch parameters that pass preflight for founder-led outreach.
pub fn outreach_params() -> LaunchMove {
    LaunchMove {
        problem_id: "need-customers-fast".to_string(),
        framework_id: Some("founder-led-outreach".to_string()),
        inputs: [
            ("ideal_customer".to_string(), "Agency owners".to_string()),
            ("offer".to_string(), "Free pipeline audit".to_string()),
        ]
        .into(),
        channels: vec!["email".to_string()],
        baseline: Some(0.0),
        target: Some(10.0),
        ..Default::default()
    }
}
