//! High-level API tying the wizard pipeline to the move runtime.
//!
//! [`Playbook`] is the service every interface talks to. It owns the catalog
//! and an injected [`MoveStore`], and exposes each operation as an async
//! method that runs its store work on the blocking pool.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   wizard_ops    │    │    move_ops     │    │    MoveStore    │
//! │ (recommend,     │───▶│ (tasks, status, │───▶│  (db::Database) │
//! │  preflight,     │    │  tracking,      │    │                 │
//! │  launch)        │    │  completion)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Every runtime operation is read, validate, write: the move is loaded, the
//! change is checked by the pure rules in [`crate::runtime`], and only the
//! changed part is written back. Status writes are compare-and-set against
//! the status that was read.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use playbook_core::{params::{LaunchMove, ListMoves}, PlaybookBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let playbook = PlaybookBuilder::new()
//!     .with_database_path(Some("/tmp/playbook.db"))
//!     .build()
//!     .await?;
//!
//! let params = LaunchMove {
//!     problem_id: "need-customers-fast".to_string(),
//!     framework_id: Some("founder-led-outreach".to_string()),
//!     inputs: [
//!         ("ideal_customer".to_string(), "Agency owners".to_string()),
//!         ("offer".to_string(), "Free pipeline audit".to_string()),
//!     ]
//!     .into(),
//!     channels: vec!["email".to_string()],
//!     baseline: Some(0.0),
//!     target: Some(10.0),
//!     ..Default::default()
//! };
//! let outcome = playbook.launch(&params).await?;
//! println!("{outcome}");
//!
//! let open = playbook.list_moves_summary(&ListMoves::default()).await?;
//! println!("{open}");
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex};

use jiff::{civil::Date, Zoned};
use tokio::task;

use crate::{
    catalog::Catalog,
    db::Database,
    error::{PlaybookError, Result},
    models::Move,
    store::MoveStore,
};

pub mod builder;
pub mod move_ops;
pub mod wizard_ops;

#[cfg(test)]
mod tests;

pub use builder::PlaybookBuilder;
pub use wizard_ops::LaunchOutcome;

/// Main interface for running the wizard and managing moves.
pub struct Playbook<S: MoveStore = Database> {
    store: Arc<Mutex<S>>,
    catalog: Arc<Catalog>,
    fixed_today: Option<Date>,
}

impl<S: MoveStore> Clone for Playbook<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
            fixed_today: self.fixed_today,
        }
    }
}

impl<S: MoveStore> Playbook<S> {
    /// Wrap an already opened store.
    pub fn with_store(store: S, catalog: Catalog) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            catalog: Arc::new(catalog),
            fixed_today: None,
        }
    }

    /// Pin "today" instead of reading the system clock.
    pub fn with_fixed_date(mut self, today: Option<Date>) -> Self {
        self.fixed_today = today;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The date the runtime considers to be today.
    pub fn today(&self) -> Date {
        self.fixed_today.unwrap_or_else(|| Zoned::now().date())
    }

    /// Run store work on the blocking pool.
    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut S) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || {
            let mut guard = store.lock().map_err(|_| PlaybookError::Configuration {
                message: "Move store lock poisoned".to_string(),
            })?;
            f(&mut guard)
        })
        .await
        .map_err(|e| PlaybookError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Load a move or fail with `MoveNotFound`.
fn load<S: MoveStore>(store: &S, id: u64) -> Result<Move> {
    store
        .get_move(id)?
        .ok_or(PlaybookError::MoveNotFound { id })
}
