//! Core library for Playbook, a guided marketing-plan wizard.
//!
//! A user picks a problem, answers a few situation questions, and gets a
//! ranked list of frameworks. The chosen framework seeds a [`draft::PlanDraft`]
//! whose slots are edited, validated by the preflight gate and finally
//! materialized into a persisted [`models::Move`]: a day-by-day checklist with
//! KPI tracking and a small lifecycle.
//!
//! ```text
//! Catalog ─▶ recommender ─▶ PlanDraft/slots ─▶ preflight ─▶ MoveFactory ─▶ runtime
//!                                                                        (MoveStore)
//! ```
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Collections and operation results
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use playbook_core::{params::{Recommend, TaskRef}, PlaybookBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let playbook = PlaybookBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let ranked = playbook.recommend(&Recommend {
//!     problem_id: Some("need-customers-fast".to_string()),
//!     ..Default::default()
//! });
//! println!("{ranked}");
//!
//! let task = playbook
//!     .toggle_task_done(&TaskRef { move_id: 1, task_id: 3 })
//!     .await?;
//! println!("{task}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod draft;
pub mod error;
pub mod factory;
pub mod models;
pub mod params;
pub mod playbook;
pub mod preflight;
pub mod recommender;
pub mod runtime;
pub mod situation;
pub mod store;

// Re-export commonly used types
pub use catalog::Catalog;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, MoveSummaries, OperationStatus, Problems,
    Recommendations, UpdateResult,
};
pub use draft::{PlanDraft, PlanDraftBuilder, WizardStep};
pub use error::{PlaybookError, Result};
pub use factory::MoveFactory;
pub use models::{
    ChecklistItem, Move, MoveFilter, MoveHealth, MoveStatus, MoveSummary, Outcome, RunMode,
    TrackingUpdate,
};
pub use playbook::{LaunchOutcome, Playbook, PlaybookBuilder};
pub use preflight::PreflightReport;
pub use recommender::Recommendation;
pub use store::MoveStore;
