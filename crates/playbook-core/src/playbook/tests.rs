//! Tests for the playbook service.

use jiff::{civil::date, Timestamp};
use tempfile::TempDir;

use super::*;
use crate::{
    models::{MoveFilter, MoveResult, MoveStatus, NewMove, Outcome, TrackingUpdate},
    params::{
        AttachProof, CampaignLink, CompleteMove, DeleteMove, Id, LaunchMove, ListMoves,
        LogTracking, Recommend, SetStatus, SetTaskDay, TaskRef, TasksForDay,
    },
};

/// Helper function to create a test playbook pinned to 2026-10-01
async fn create_test_playbook() -> (TempDir, Playbook) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let playbook = PlaybookBuilder::new()
        .with_database_path(Some(&db_path))
        .with_fixed_date(Some(date(2026, 10, 1)))
        .build()
        .await
        .expect("Failed to create playbook");
    (temp_dir, playbook)
}

fn outreach_params() -> LaunchMove {
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

async fn launch_outreach(playbook: &Playbook) -> Move {
    let outcome = playbook
        .launch(&outreach_params())
        .await
        .expect("Failed to launch");
    outcome.launched().cloned().expect("Move should launch")
}

#[tokio::test]
async fn test_launch_creates_active_move() {
    let (_temp_dir, playbook) = create_test_playbook().await;

    let mv = launch_outreach(&playbook).await;

    assert_eq!(mv.status, MoveStatus::Active);
    assert_eq!(mv.name, "Founder-Led Outreach");
    assert_eq!(mv.start_date, date(2026, 10, 1));
    assert_eq!(mv.duration_days, 7);
    assert_eq!(mv.checklist_items.len(), 7);
    assert_eq!(mv.channel.as_deref(), Some("email"));
    assert_eq!(mv.tracking.metric, "Booked calls");
    assert_eq!(mv.tracking.target, Some(10.0));

    let stored = playbook
        .get_move(&Id { id: mv.id })
        .await
        .expect("Failed to get move")
        .expect("Move should exist");
    assert_eq!(stored, mv);
}

#[tokio::test]
async fn test_blocked_launch_stores_nothing() {
    let (_temp_dir, playbook) = create_test_playbook().await;

    let mut params = outreach_params();
    params.inputs.remove("ideal_customer");
    let outcome = playbook.launch(&params).await.expect("Launch should not error");

    let LaunchOutcome::Blocked { report } = outcome else {
        panic!("Launch should be blocked");
    };
    assert!(!report.passed);
    assert_eq!(
        report.failing_checks().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        ["offer.input.ideal_customer"]
    );

    let moves = playbook
        .list_moves_summary(&ListMoves {
            all: true,
            ..Default::default()
        })
        .await
        .expect("Failed to list moves");
    assert!(moves.is_empty());
}

#[tokio::test]
async fn test_launch_move_requires_passed_gate() {
    let (_temp_dir, playbook) = create_test_playbook().await;

    let draft = playbook.draft(&outreach_params()).expect("Failed to draft");
    let result = playbook.launch_move(&draft).await;
    assert!(matches!(
        result,
        Err(PlaybookError::PreflightNotPassed { failing: 0 })
    ));

    let mut draft = draft;
    draft.run_preflight().expect("Failed to run preflight");
    draft.set_input("offer", "").expect("Failed to edit draft");
    assert!(matches!(
        playbook.launch_move(&draft).await,
        Err(PlaybookError::PreflightNotPassed { .. })
    ));
}

#[tokio::test]
async fn test_future_start_and_generation_status() {
    let (_temp_dir, playbook) = create_test_playbook().await;

    let mut params = outreach_params();
    params.start_date = Some("2026-10-05".to_string());
    let pending = playbook.launch(&params).await.expect("Failed to launch");
    assert_eq!(
        pending.launched().map(|mv| mv.status),
        Some(MoveStatus::Pending)
    );

    params.generate_content = true;
    let generating = playbook.launch(&params).await.expect("Failed to launch");
    assert_eq!(
        generating.launched().map(|mv| mv.status),
        Some(MoveStatus::Generating)
    );
}

#[tokio::test]
async fn test_preflight_is_a_dry_run() {
    let (_temp_dir, playbook) = create_test_playbook().await;

    let report = playbook
        .preflight(&outreach_params())
        .expect("Failed to run preflight");
    assert!(report.passed);

    let moves = playbook
        .list_moves_summary(&ListMoves::default())
        .await
        .expect("Failed to list moves");
    assert!(moves.is_empty());
}

#[tokio::test]
async fn test_recommend_and_problems() {
    let (_temp_dir, playbook) = create_test_playbook().await;

    let problems = playbook.list_problems();
    assert_eq!(problems.len(), 4);
    assert_eq!(problems[0].id, "need-customers-fast");

    let ranked = playbook.recommend(&Recommend {
        problem_id: Some("need-customers-fast".to_string()),
        limit: Some(2),
        ..Default::default()
    });
    assert_eq!(ranked.len(), 2);
    assert!(ranked[0].fit_score >= ranked[1].fit_score);

    let unknown = playbook.recommend(&Recommend {
        problem_id: Some("no-such-problem".to_string()),
        ..Default::default()
    });
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_task_operations() {
    let (_temp_dir, playbook) = create_test_playbook().await;
    let mv = launch_outreach(&playbook).await;
    let task_id = mv.checklist_items[2].id;

    let task = playbook
        .toggle_task_done(&TaskRef {
            move_id: mv.id,
            task_id,
        })
        .await
        .expect("Failed to toggle task");
    assert!(task.done);

    let task = playbook
        .set_task_day(&SetTaskDay {
            move_id: mv.id,
            task_id,
            day: 6,
        })
        .await
        .expect("Failed to reschedule task");
    assert_eq!(task.day, 6);

    let task = playbook
        .attach_proof_to_task(&AttachProof {
            move_id: mv.id,
            task_id,
            url: Some("  https://example.com/sent  ".to_string()),
            note: Some("   ".to_string()),
        })
        .await
        .expect("Failed to attach proof");
    let proof = task.proof.expect("Proof should be attached");
    assert_eq!(proof.url.as_deref(), Some("https://example.com/sent"));
    assert_eq!(proof.note, None);
    assert!(task.done);

    let day_six = playbook
        .move_tasks_for_day(&TasksForDay {
            id: mv.id,
            day: Some(6),
        })
        .await
        .expect("Failed to list tasks");
    assert_eq!(day_six.tasks.len(), 1);
    assert_eq!(day_six.tasks[0].id, task_id);

    let result = playbook
        .set_task_day(&SetTaskDay {
            move_id: mv.id,
            task_id,
            day: 8,
        })
        .await;
    assert!(matches!(result, Err(PlaybookError::InvalidInput { .. })));

    let result = playbook
        .toggle_task_done(&TaskRef {
            move_id: mv.id,
            task_id: 9999,
        })
        .await;
    assert!(matches!(result, Err(PlaybookError::TaskNotFound { .. })));
}

#[tokio::test]
async fn test_day_number_and_default_day() {
    let (_temp_dir, playbook) = create_test_playbook().await;
    let mut params = outreach_params();
    params.start_date = Some("2026-09-29".to_string());
    let outcome = playbook.launch(&params).await.expect("Failed to launch");
    let mv = outcome.launched().expect("Move should launch");

    let day = playbook
        .move_day_number(&Id { id: mv.id })
        .await
        .expect("Failed to get day");
    assert_eq!(day, 3);

    let today = playbook
        .move_tasks_for_day(&TasksForDay { id: mv.id, day: None })
        .await
        .expect("Failed to list tasks");
    assert_eq!(today.day, 3);
    assert_eq!(today.tasks.len(), 1);

    let result = playbook
        .move_tasks_for_day(&TasksForDay {
            id: mv.id,
            day: Some(0),
        })
        .await;
    assert!(matches!(result, Err(PlaybookError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_lifecycle_and_completion() {
    let (_temp_dir, playbook) = create_test_playbook().await;
    let mv = launch_outreach(&playbook).await;

    let paused = playbook
        .update_status(&SetStatus {
            id: mv.id,
            status: MoveStatus::Paused,
        })
        .await
        .expect("Failed to pause");
    assert_eq!(paused.status, MoveStatus::Paused);

    let result = playbook
        .update_status(&SetStatus {
            id: mv.id,
            status: MoveStatus::Completed,
        })
        .await;
    assert!(matches!(
        result,
        Err(PlaybookError::InvalidTransition {
            from: MoveStatus::Paused,
            to: MoveStatus::Completed
        })
    ));

    let done = playbook
        .complete_move(&CompleteMove {
            id: mv.id,
            outcome: Outcome::Won,
            learning: Some("  Warm intros convert best  ".to_string()),
        })
        .await
        .expect("Failed to complete");
    assert_eq!(done.status, MoveStatus::Completed);
    assert_eq!(
        done.result,
        Some(MoveResult {
            outcome: Outcome::Won,
            learning: Some("Warm intros convert best".to_string()),
        })
    );

    // completed moves are read-only
    let toggle = playbook
        .toggle_task_done(&TaskRef {
            move_id: mv.id,
            task_id: mv.checklist_items[0].id,
        })
        .await;
    assert!(matches!(toggle, Err(PlaybookError::MoveCompleted { .. })));
    let track = playbook
        .add_tracking_update(&LogTracking {
            move_id: mv.id,
            value: 4.0,
        })
        .await;
    assert!(matches!(track, Err(PlaybookError::MoveCompleted { .. })));
    let resume = playbook
        .update_status(&SetStatus {
            id: mv.id,
            status: MoveStatus::Active,
        })
        .await;
    assert!(matches!(resume, Err(PlaybookError::MoveCompleted { .. })));

    let open = playbook
        .list_moves_summary(&ListMoves::default())
        .await
        .expect("Failed to list moves");
    assert!(open.is_empty());
    let completed = playbook
        .list_moves_summary(&ListMoves {
            status: Some(MoveStatus::Completed),
            ..Default::default()
        })
        .await
        .expect("Failed to list moves");
    assert_eq!(completed.len(), 1);
}

#[tokio::test]
async fn test_tracking_updates_append() {
    let (_temp_dir, playbook) = create_test_playbook().await;
    let mv = launch_outreach(&playbook).await;

    for value in [1.0, 3.0] {
        playbook
            .add_tracking_update(&LogTracking {
                move_id: mv.id,
                value,
            })
            .await
            .expect("Failed to log update");
    }
    let result = playbook
        .add_tracking_update(&LogTracking {
            move_id: mv.id,
            value: f64::NAN,
        })
        .await;
    assert!(matches!(result, Err(PlaybookError::InvalidInput { .. })));

    let stored = playbook
        .get_move(&Id { id: mv.id })
        .await
        .expect("Failed to get move")
        .expect("Move should exist");
    let values: Vec<f64> = stored.tracking.updates.iter().map(|u| u.value).collect();
    assert_eq!(values, [1.0, 3.0]);
}

#[tokio::test]
async fn test_campaign_link_and_delete() {
    let (_temp_dir, playbook) = create_test_playbook().await;
    let mv = launch_outreach(&playbook).await;

    let linked = playbook
        .attach_move_to_campaign(&CampaignLink {
            id: mv.id,
            campaign_id: 42,
        })
        .await
        .expect("Failed to link campaign");
    assert_eq!(linked.campaign_id, Some(42));

    let in_campaign = playbook
        .list_moves_summary(&ListMoves {
            campaign_id: Some(42),
            ..Default::default()
        })
        .await
        .expect("Failed to list moves");
    assert_eq!(in_campaign.len(), 1);

    let unlinked = playbook
        .detach_move_from_campaign(&Id { id: mv.id })
        .await
        .expect("Failed to unlink campaign");
    assert_eq!(unlinked.campaign_id, None);

    let unconfirmed = playbook
        .delete_move(&DeleteMove {
            id: mv.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(unconfirmed, Err(PlaybookError::InvalidInput { .. })));

    let deleted = playbook
        .delete_move(&DeleteMove {
            id: mv.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete move");
    assert_eq!(deleted.id, mv.id);

    let again = playbook
        .delete_move(&DeleteMove {
            id: mv.id,
            confirmed: true,
        })
        .await;
    assert!(matches!(again, Err(PlaybookError::MoveNotFound { .. })));
}

/// Store whose status writes always lose the compare-and-set, as if another
/// writer got there first.
struct RacingStore(Database);

impl MoveStore for RacingStore {
    fn create_move(&mut self, new_move: &NewMove) -> Result<Move> {
        self.0.create_move(new_move)
    }

    fn get_move(&self, id: u64) -> Result<Option<Move>> {
        self.0.get_move(id)
    }

    fn list_moves(&self, filter: &MoveFilter) -> Result<Vec<Move>> {
        self.0.list_moves(filter)
    }

    fn update_task(&mut self, move_id: u64, task: &crate::models::ChecklistItem) -> Result<()> {
        self.0.update_task(move_id, task)
    }

    fn append_tracking_update(
        &mut self,
        move_id: u64,
        value: f64,
        recorded_at: Timestamp,
    ) -> Result<TrackingUpdate> {
        self.0.append_tracking_update(move_id, value, recorded_at)
    }

    fn transition_status(&mut self, _: u64, _: MoveStatus, _: MoveStatus) -> Result<bool> {
        Ok(false)
    }

    fn complete_move(&mut self, _: u64, _: MoveStatus, _: &MoveResult) -> Result<bool> {
        Ok(false)
    }

    fn set_campaign(&mut self, move_id: u64, campaign_id: Option<u64>) -> Result<()> {
        self.0.set_campaign(move_id, campaign_id)
    }

    fn delete_move(&mut self, id: u64) -> Result<bool> {
        self.0.delete_move(id)
    }
}

#[tokio::test]
async fn test_lost_status_race_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let database = Database::new(temp_dir.path().join("race.db")).expect("Failed to open db");
    let playbook = Playbook::with_store(
        RacingStore(database),
        Catalog::builtin().expect("Failed to load catalog"),
    )
    .with_fixed_date(Some(date(2026, 10, 1)));

    let outcome = playbook
        .launch(&outreach_params())
        .await
        .expect("Failed to launch");
    let mv = outcome.launched().expect("Move should launch");

    let result = playbook
        .update_status(&SetStatus {
            id: mv.id,
            status: MoveStatus::Paused,
        })
        .await;
    assert!(matches!(
        result,
        Err(PlaybookError::InvalidTransition {
            from: MoveStatus::Active,
            to: MoveStatus::Paused
        })
    ));

    let result = playbook
        .complete_move(&CompleteMove {
            id: mv.id,
            outcome: Outcome::Meh,
            learning: None,
        })
        .await;
    assert!(matches!(result, Err(PlaybookError::InvalidTransition { .. })));

    let stored = playbook
        .get_move(&Id { id: mv.id })
        .await
        .expect("Failed to get move")
        .expect("Move should exist");
    assert_eq!(stored.status, MoveStatus::Active);
}
