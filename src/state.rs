//! Shared application state for the HTTP layer.
//!
//! Holds the startup [`Config`] only. Each request opens its own SQLite
//! connection through [`ClinicState::open_db`] and drops it before the
//! response goes out; nothing is pooled.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;

use crate::config::Config;
use crate::db::{self, DatabaseError};

#[derive(Debug, Clone)]
pub struct ClinicState {
    config: Arc<Config>,
}

impl ClinicState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn db_path(&self) -> &Path {
        &self.config.database_path
    }

    /// Open a database connection for one request.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(self.db_path())
    }

    /// Bring the schema up to date and optionally seed demo data.
    /// Runs once at startup, before the server accepts requests.
    pub fn prepare_storage(&self) -> Result<(), DatabaseError> {
        if let Some(parent) = self.db_path().parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = self.open_db()?;
        db::migrate(&conn)?;
        if self.config.seed_demo_data {
            db::seed::seed_demo_data(&mut conn)?;
        }
        tracing::info!(path = %self.db_path().display(), "Storage ready");
        Ok(())
    }
}
