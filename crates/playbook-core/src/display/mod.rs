//! Display formatting and result types.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation results go through wrapper types so every interface renders
//! the same markdown.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Collections &  │    │   Formatted     │
//! │  (Move, Task)   │───▶│  Result Types   │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (MoveSummaries, Recommendations,
//!   Problems)
//! - [`results`]: Operation result types (CreateResult, UpdateResult,
//!   DeleteResult)
//! - [`status`]: Status messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use playbook_core::{
//!     display::{OperationStatus, UpdateResult},
//!     models::ChecklistItem,
//! };
//!
//! let task = ChecklistItem {
//!     id: 1,
//!     text: "List 20 prospects".to_string(),
//!     done: true,
//!     day: 1,
//!     duration_minutes: Some(45),
//!     proof: None,
//!     position: 0,
//! };
//!
//! let result = UpdateResult::with_changes(task, vec!["Marked as done".to_string()]);
//! assert!(result.to_string().contains("Updated task with ID: 1"));
//!
//! let status = OperationStatus::failure("Move with ID 9 not found".to_string());
//! assert!(status.to_string().starts_with("Error:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{move_list_title, MoveSummaries, Problems, Recommendations};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
