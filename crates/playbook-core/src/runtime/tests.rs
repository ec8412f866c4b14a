use jiff::{civil::date, Timestamp, ToSpan};

use super::*;
use crate::models::{RunMode, Tracking, TrackingUpdate};

fn task(id: u64, day: u32, done: bool) -> ChecklistItem {
    ChecklistItem {
        id,
        text: format!("Task {id}"),
        done,
        day,
        duration_minutes: Some(30),
        proof: None,
        position: (id - 1) as u32,
    }
}

fn sample_move(tasks: Vec<ChecklistItem>) -> Move {
    let now = Timestamp::now();
    Move {
        id: 1,
        name: "Outreach week".to_string(),
        problem_type: "need-customers-fast".to_string(),
        framework_id: "founder-led-outreach".to_string(),
        framework_name: "Founder-Led Outreach".to_string(),
        campaign_id: None,
        channel: Some("email".to_string()),
        run_mode: RunMode::Solo,
        duration_days: 10,
        checklist_items: tasks,
        tracking: Tracking {
            metric: "Booked calls".to_string(),
            baseline: Some(0.0),
            target: Some(10.0),
            updates: vec![],
        },
        status: MoveStatus::Active,
        result: None,
        start_date: date(2026, 10, 1),
        created_at: now,
        updated_at: now,
    }
}

fn ten_tasks(done: usize) -> Vec<ChecklistItem> {
    (1..=10).map(|i| task(i, i as u32, (i as usize) <= done)).collect()
}

#[test]
fn test_day_number_clamped() {
    let mv = sample_move(vec![]);
    assert_eq!(mv.day_number_on(date(2026, 9, 20)), 1);
    assert_eq!(mv.day_number_on(date(2026, 10, 1)), 1);
    assert_eq!(mv.day_number_on(date(2026, 10, 4)), 4);
    assert_eq!(mv.day_number_on(date(2026, 10, 10)), 10);
    assert_eq!(mv.day_number_on(date(2027, 1, 1)), 10);
}

#[test]
fn test_progress_without_tasks_is_zero() {
    let mv = sample_move(vec![]);
    assert_eq!(mv.progress(), Progress { completed: 0, total: 0 });
    assert_eq!(mv.progress().percent(), 0);
}

#[test]
fn test_progress_percent() {
    let mv = sample_move(vec![task(1, 1, true), task(2, 1, false), task(3, 2, false)]);
    assert_eq!(mv.progress().completed, 1);
    assert_eq!(mv.progress().total, 3);
    assert_eq!(mv.progress().percent(), 33);
}

#[test]
fn test_health_classification() {
    // day 6 of 10: half of the calendar is behind us
    let today = date(2026, 10, 6);
    assert_eq!(sample_move(ten_tasks(5)).health_on(today), MoveHealth::OnTrack);
    assert_eq!(sample_move(ten_tasks(4)).health_on(today), MoveHealth::AtRisk);
    assert_eq!(sample_move(ten_tasks(1)).health_on(today), MoveHealth::OffTrack);

    let mut done = sample_move(ten_tasks(0));
    done.complete(Outcome::Meh, None).unwrap();
    assert_eq!(done.health_on(today), MoveHealth::Done);

    // nothing expected before the move starts
    assert_eq!(
        sample_move(ten_tasks(0)).health_on(date(2026, 9, 1)),
        MoveHealth::OnTrack
    );
}

#[test]
fn test_tasks_grouped_by_day() {
    let mv = sample_move(vec![task(1, 2, false), task(2, 1, false), task(3, 2, true)]);
    let days = mv.tasks_by_day();
    assert_eq!(days.keys().copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(days[&2].iter().map(|t| t.id).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(mv.tasks_for_day(1).len(), 1);
    assert!(mv.tasks_for_day(9).is_empty());
}

#[test]
fn test_double_toggle_restores() {
    let mut mv = sample_move(vec![task(1, 1, false)]);
    assert!(mv.toggle_task(1).unwrap().done);
    assert!(!mv.toggle_task(1).unwrap().done);
}

#[test]
fn test_unknown_task() {
    let mut mv = sample_move(vec![task(1, 1, false)]);
    let err = mv.toggle_task(7).unwrap_err();
    assert!(matches!(
        err,
        PlaybookError::TaskNotFound {
            move_id: 1,
            task_id: 7
        }
    ));
}

#[test]
fn test_set_task_day_range() {
    let mut mv = sample_move(vec![task(1, 1, false)]);
    assert_eq!(mv.set_task_day(1, 10).unwrap().day, 10);
    assert!(matches!(
        mv.set_task_day(1, 0),
        Err(PlaybookError::InvalidInput { .. })
    ));
    assert!(mv.set_task_day(1, 11).is_err());
    assert_eq!(mv.checklist_items[0].day, 10);
}

#[test]
fn test_proof_independent_of_done() {
    let mut mv = sample_move(vec![task(1, 1, false)]);
    let proof = Proof {
        url: Some("https://example.com/post".to_string()),
        note: None,
    };
    let item = mv.attach_proof(1, proof.clone()).unwrap();
    assert!(!item.done);
    assert_eq!(item.proof, Some(proof));

    let replaced = Proof {
        url: None,
        note: Some("Sent from my phone".to_string()),
    };
    assert_eq!(mv.attach_proof(1, replaced.clone()).unwrap().proof, Some(replaced));
    assert!(mv.attach_proof(1, Proof::default()).is_err());
}

#[test]
fn test_transition_table() {
    let mut mv = sample_move(vec![]);
    mv.status = MoveStatus::Pending;
    assert_eq!(mv.transition_to(MoveStatus::Generating).unwrap(), MoveStatus::Pending);
    assert!(mv.transition_to(MoveStatus::Paused).is_err());
    mv.transition_to(MoveStatus::Active).unwrap();
    mv.transition_to(MoveStatus::Paused).unwrap();
    mv.transition_to(MoveStatus::Active).unwrap();
    assert!(matches!(
        mv.transition_to(MoveStatus::Pending),
        Err(PlaybookError::InvalidTransition { .. })
    ));
    // completion only through complete()
    assert!(matches!(
        mv.transition_to(MoveStatus::Completed),
        Err(PlaybookError::InvalidTransition { .. })
    ));
}

#[test]
fn test_pending_move_cannot_complete() {
    let mut mv = sample_move(vec![]);
    mv.status = MoveStatus::Pending;
    assert!(matches!(
        mv.complete(Outcome::Won, None),
        Err(PlaybookError::InvalidTransition { .. })
    ));
}

#[test]
fn test_completed_move_rejects_every_mutation() {
    let mut mv = sample_move(vec![task(1, 1, false)]);
    mv.status = MoveStatus::Paused;
    assert_eq!(
        mv.complete(Outcome::Won, Some("  Warm intros work  ".to_string()))
            .unwrap(),
        MoveStatus::Paused
    );
    assert_eq!(mv.status, MoveStatus::Completed);
    assert_eq!(
        mv.result.as_ref().unwrap().learning.as_deref(),
        Some("Warm intros work")
    );

    let completed = |r: Result<()>| matches!(r, Err(PlaybookError::MoveCompleted { id: 1 }));
    assert!(completed(mv.toggle_task(1).map(|_| ())));
    assert!(completed(mv.set_task_day(1, 2).map(|_| ())));
    assert!(completed(mv.set_task_day(1, 99).map(|_| ())));
    assert!(completed(
        mv.attach_proof(1, Proof {
            url: None,
            note: Some("late".to_string())
        })
        .map(|_| ())
    ));
    assert!(completed(mv.validate_observation(1.0, Timestamp::now())));
    assert!(completed(mv.transition_to(MoveStatus::Active).map(|_| ())));
    assert!(completed(mv.complete(Outcome::Failed, None).map(|_| ())));
    assert!(completed(mv.set_campaign(Some(3))));
    assert!(!mv.checklist_items[0].done);
}

#[test]
fn test_observation_validation() {
    let mut mv = sample_move(vec![]);
    let now = Timestamp::now();
    mv.tracking.updates.push(TrackingUpdate {
        id: 1,
        value: 3.0,
        recorded_at: now,
    });

    assert!(mv.validate_observation(4.0, now).is_ok());
    assert!(mv.validate_observation(f64::INFINITY, now).is_err());
    assert!(mv.validate_observation(4.0, now - 1.hour()).is_err());
}

#[test]
fn test_campaign_link() {
    let mut mv = sample_move(vec![]);
    mv.set_campaign(Some(9)).unwrap();
    assert_eq!(mv.campaign_id, Some(9));
    mv.set_campaign(None).unwrap();
    assert_eq!(mv.campaign_id, None);
}
