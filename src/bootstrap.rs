//! One-shot local store bootstrap.
//!
//! Creates the store directory, opens the database file inside it, and runs
//! the settings transaction from [`crate::storage`].

use crate::error::{Result, ToolError};
use crate::model::UserSettings;
use crate::storage::{BootstrapOutcome, SettingsStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What `init-db` did, for display.
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapReport {
    pub store_dir: PathBuf,
    pub db_path: PathBuf,
    pub seed_inserted: bool,
    #[serde(skip)]
    pub schema_sql: String,
    pub rows: Vec<UserSettings>,
}

/// Create `store_dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_store_dir(store_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(store_dir)
        .map_err(|e| ToolError::path_error("create directory", store_dir, e))?;
    debug!("Store directory ready: {}", store_dir.display());
    Ok(())
}

/// Bootstrap the settings database under `store_dir`.
///
/// Safe to run repeatedly: an existing directory, table, or seed row is left
/// as it is.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the database cannot
/// be opened, or any statement fails.
pub fn run(store_dir: &Path, db_file_name: &str) -> Result<BootstrapReport> {
    ensure_store_dir(store_dir)?;

    let db_path = store_dir.join(db_file_name);
    let mut store = SettingsStore::open(&db_path)?;
    let BootstrapOutcome {
        schema_sql,
        seed_inserted,
        rows,
    } = store.bootstrap(&UserSettings::seed())?;
    debug!("Table schema: {schema_sql}");

    Ok(BootstrapReport {
        store_dir: store_dir.to_path_buf(),
        db_path,
        seed_inserted,
        schema_sql,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let store_dir = temp.path().join("local-store").join("sqlite");

        let report = run(&store_dir, "sqlite.db").unwrap();

        assert!(store_dir.is_dir());
        assert!(report.db_path.is_file());
        assert!(report.seed_inserted);

        let mut expected = UserSettings::seed();
        expected.updated_at = report.rows[0].updated_at;
        assert_eq!(report.rows, vec![expected]);
    }

    #[test]
    fn test_run_twice_keeps_single_row() {
        let temp = TempDir::new().unwrap();
        let store_dir = temp.path().join("store");

        let first = run(&store_dir, "sqlite.db").unwrap();
        let second = run(&store_dir, "sqlite.db").unwrap();

        assert!(!second.seed_inserted);
        assert_eq!(second.rows.len(), 1);
        assert_eq!(first.rows[0].updated_at, second.rows[0].updated_at);
    }

    #[test]
    fn test_store_dir_blocked_by_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("local-store");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = run(&blocker.join("sqlite"), "sqlite.db").unwrap_err();
        assert!(matches!(err, ToolError::PathError { .. }));
    }
}
