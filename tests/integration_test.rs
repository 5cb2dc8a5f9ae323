//! Integration tests for grove-tools.
//!
//! These tests drive the library API against real files:
//! - Bootstrap runs against on-disk databases
//! - In-place repair of HTML files

use grove_tools::bootstrap;
use grove_tools::encoding::{self, REPLACEMENTS};
use grove_tools::model::SEED_ACCOUNT;
use grove_tools::{SettingsStore, ToolError, UserSettings};
use tempfile::TempDir;

#[test]
fn test_bootstrap_then_reopen() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("local-store").join("sqlite");

    let report = bootstrap::run(&store_dir, "sqlite.db").unwrap();
    assert_eq!(report.db_path, store_dir.join("sqlite.db"));
    assert!(report.schema_sql.starts_with("CREATE TABLE user_settings"));

    // The transaction committed, so a fresh connection sees the row.
    let store = SettingsStore::open(&report.db_path).unwrap();
    let seed = store.get(SEED_ACCOUNT).unwrap().unwrap();
    assert_eq!(seed.account, "0.0.123456");
    assert_eq!(seed.updated_at, report.rows[0].updated_at);
}

#[test]
fn test_bootstrap_preserves_customized_seed() {
    let temp = TempDir::new().unwrap();
    let store_dir = temp.path().join("store");
    bootstrap::run(&store_dir, "sqlite.db").unwrap();

    let store = SettingsStore::open(store_dir.join("sqlite.db")).unwrap();
    store
        .connection()
        .execute(
            "UPDATE user_settings SET demo_bypass = 1 WHERE account = ?1",
            [SEED_ACCOUNT],
        )
        .unwrap();
    drop(store);

    let report = bootstrap::run(&store_dir, "sqlite.db").unwrap();
    assert!(!report.seed_inserted);
    assert!(report.rows[0].demo_bypass);
}

#[test]
fn test_bootstrap_rolls_back_on_failure() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("sqlite.db");

    // The table is created in `main`, but the unqualified seed insert
    // resolves to this connection's temp table and fails on its columns.
    let mut store = SettingsStore::open(&db_path).unwrap();
    store
        .connection()
        .execute_batch("CREATE TEMP TABLE user_settings (account TEXT PRIMARY KEY);")
        .unwrap();

    let err = store.bootstrap(&UserSettings::seed()).unwrap_err();
    assert!(matches!(err, ToolError::Database(_)));
    drop(store);

    // The table created before the failed insert must not reach the file.
    let store = SettingsStore::open(&db_path).unwrap();
    assert_eq!(store.table_schema().unwrap(), None);
}

#[test]
fn test_fix_file_reports_per_rule_hits() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("index.html");
    std::fs::write(
        &path,
        b"<nav>Home \xE2\x86\x92 Groves \xE2\x86\x92 Harvest</nav><b>\xE2\x9C\x93</b>",
    )
    .unwrap();

    let report = encoding::fix_file(&path).unwrap();

    assert_eq!(report.rules_applied, REPLACEMENTS.len());
    assert_eq!(report.total_occurrences, 3);
    let arrow = report.hits.iter().find(|hit| hit.name == "arrow").unwrap();
    assert_eq!(arrow.occurrences, 2);
    let check = report.hits.iter().find(|hit| hit.name == "check mark").unwrap();
    assert_eq!(check.occurrences, 1);
    let matched: Vec<_> = report.matched().map(|hit| hit.name).collect();
    assert_eq!(matched.len(), 2);
    assert!(matched.contains(&"arrow") && matched.contains(&"check mark"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "<nav>Home \u{2192} Groves \u{2192} Harvest</nav><b>\u{2713}</b>"
    );
}

#[test]
fn test_fix_file_transcodes_legacy_bytes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("index.html");
    std::fs::write(&path, b"Caf\xE9 \xA9 2024").unwrap();

    let report = encoding::fix_file(&path).unwrap();

    assert_eq!(report.total_occurrences, 0);
    assert_eq!(report.bytes_read, 11);
    assert_eq!(report.bytes_written, 13);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Caf\u{e9} \u{a9} 2024"
    );
}

#[test]
fn test_fix_file_missing_path() {
    let temp = TempDir::new().unwrap();
    let err = encoding::fix_file(&temp.path().join("absent.html")).unwrap_err();
    assert!(matches!(err, ToolError::PathError { operation: "read", .. }));
    assert!(err.suggestion().is_some());
}
