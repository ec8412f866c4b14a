//! Builder for creating and configuring Playbook instances.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use tokio::task;

use super::Playbook;
use crate::{
    catalog::Catalog,
    db::Database,
    error::{PlaybookError, Result},
};

/// Builder for creating and configuring Playbook instances.
#[derive(Debug, Clone, Default)]
pub struct PlaybookBuilder {
    database_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    fixed_today: Option<Date>,
}

impl PlaybookBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/playbook/playbook.db` or
    /// `~/.local/share/playbook/playbook.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets a catalog file to use instead of the built-in catalog.
    pub fn with_catalog_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.catalog_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Pins the runtime's notion of today.
    pub fn with_fixed_date(mut self, today: Option<Date>) -> Self {
        self.fixed_today = today;
        self
    }

    /// Builds the configured playbook instance.
    ///
    /// # Errors
    ///
    /// Returns `PlaybookError::FileSystem` if the database or catalog path is
    /// unusable, `PlaybookError::Catalog` if the catalog is invalid, and
    /// `PlaybookError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Playbook> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PlaybookError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let catalog = match &self.catalog_path {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::builtin()?,
        };
        log::debug!(
            "Catalog {} loaded: {} problems, {} frameworks",
            catalog.version,
            catalog.problems.len(),
            catalog.frameworks.len()
        );

        let db_path_clone = db_path.clone();
        let database = task::spawn_blocking(move || Database::new(&db_path_clone))
            .await
            .map_err(|e| PlaybookError::Configuration {
                message: format!("Task join error: {e}"),
            })??;
        log::debug!("Database opened at {}", db_path.display());

        Ok(Playbook::with_store(database, catalog).with_fixed_date(self.fixed_today))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("playbook")
            .place_data_file("playbook.db")
            .map_err(|e| PlaybookError::XdgDirectory(e.to_string()))
    }
}
