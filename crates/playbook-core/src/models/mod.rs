//! Data models for moves, their tasks and their tracking log.
//!
//! This module contains the persisted side of the system: the [`Move`]
//! created when a plan draft launches, its [`ChecklistItem`]s and its
//! [`Tracking`] log. Display implementations live in
//! [`crate::display::models`]; lifecycle operations live in
//! [`crate::runtime`].
//!
//! # Examples
//!
//! ```rust
//! use playbook_core::models::{Move, MoveStatus, RunMode, Tracking};
//! use jiff::{civil::date, Timestamp};
//!
//! let mv = Move {
//!     id: 1,
//!     name: "Launch week".to_string(),
//!     problem_type: "need-customers-fast".to_string(),
//!     framework_id: "founder-led-outreach".to_string(),
//!     framework_name: "Founder-Led Outreach".to_string(),
//!     campaign_id: None,
//!     channel: Some("email".to_string()),
//!     run_mode: RunMode::Solo,
//!     duration_days: 7,
//!     checklist_items: vec![],
//!     tracking: Tracking {
//!         metric: "Booked calls".to_string(),
//!         baseline: Some(0.0),
//!         target: Some(10.0),
//!         updates: vec![],
//!     },
//!     status: MoveStatus::Active,
//!     result: None,
//!     start_date: date(2026, 10, 1),
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! assert_eq!(mv.day_number_on(date(2026, 10, 3)), 3);
//! ```

pub mod filters;
pub mod moves;
pub mod status;
pub mod summary;
pub mod task;
pub mod tracking;


pub use filters::MoveFilter;
pub use moves::{Move, MoveResult, NewMove};
pub use status::{MoveHealth, MoveStatus, Outcome, RunMode};
pub use summary::MoveSummary;
pub use task::{ChecklistItem, NewChecklistItem, Proof};
pub use tracking::{Tracking, TrackingUpdate};
