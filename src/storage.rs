//! `SQLite` storage for local user settings.
//!
//! Owns the `user_settings` schema and the idempotent seed insert used by
//! `init-db`.

use crate::error::{Result, ToolError};
use crate::model::UserSettings;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use tracing::{debug, info};

/// Name of the settings table.
pub const SETTINGS_TABLE: &str = "user_settings";

const CREATE_SETTINGS_SQL: &str = r"
CREATE TABLE IF NOT EXISTS user_settings (
    account TEXT PRIMARY KEY NOT NULL,
    skip_farmer_verification INTEGER DEFAULT 0,
    skip_investor_verification INTEGER DEFAULT 0,
    demo_bypass INTEGER DEFAULT 0,
    updated_at INTEGER DEFAULT (strftime('%s', 'now') * 1000)
);
";

const SELECT_SETTINGS_SQL: &str = "SELECT account, skip_farmer_verification, \
     skip_investor_verification, demo_bypass, updated_at FROM user_settings";

/// Result of running the bootstrap transaction.
#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    /// `CREATE` statement as stored in `sqlite_master`.
    pub schema_sql: String,
    /// Whether the seed row was new (false when it already existed).
    pub seed_inserted: bool,
    /// Every row in the table after the insert.
    pub rows: Vec<UserSettings>,
}

/// `SQLite` settings store
pub struct SettingsStore {
    conn: Connection,
}

impl SettingsStore {
    /// Open or create the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be opened or created.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        debug!("Opening database at {}", db_path.display());
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying database connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the table, insert `seed` if absent, and read every row back,
    /// all in one transaction.
    ///
    /// Nothing is committed if any step fails.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails or the table is missing after
    /// creation.
    pub fn bootstrap(&mut self, seed: &UserSettings) -> Result<BootstrapOutcome> {
        let tx = self.conn.transaction()?;

        create_schema(&tx)?;
        let schema_sql = table_schema(&tx)?.ok_or(ToolError::MissingTable {
            table: SETTINGS_TABLE,
        })?;
        info!("Created/verified {SETTINGS_TABLE} table");

        let seed_inserted = insert_if_absent(&tx, seed)?;
        if seed_inserted {
            info!(account = %seed.account, "Inserted default settings record");
        } else {
            info!(account = %seed.account, "Default settings record already present");
        }

        let rows = all_settings(&tx)?;
        tx.commit()?;

        Ok(BootstrapOutcome {
            schema_sql,
            seed_inserted,
            rows,
        })
    }

    /// Create the settings table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    pub fn create_schema(&self) -> Result<()> {
        create_schema(&self.conn)
    }

    /// Insert `settings` unless a row with the same account exists.
    ///
    /// Returns `true` when a row was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_if_absent(&self, settings: &UserSettings) -> Result<bool> {
        insert_if_absent(&self.conn, settings)
    }

    /// All rows, ordered by account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_settings(&self) -> Result<Vec<UserSettings>> {
        all_settings(&self.conn)
    }

    /// Look up one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, account: &str) -> Result<Option<UserSettings>> {
        let sql = format!("{SELECT_SETTINGS_SQL} WHERE account = ?1");
        let settings = self
            .conn
            .query_row(&sql, params![account], settings_from_row)
            .optional()?;
        Ok(settings)
    }

    /// The stored `CREATE` statement, or `None` if the table is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if `sqlite_master` cannot be queried.
    pub fn table_schema(&self) -> Result<Option<String>> {
        table_schema(&self.conn)
    }
}

fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_SETTINGS_SQL)?;
    Ok(())
}

fn table_schema(conn: &Connection) -> Result<Option<String>> {
    let sql = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![SETTINGS_TABLE],
            |row| row.get(0),
        )
        .optional()?;
    Ok(sql)
}

fn insert_if_absent(conn: &Connection, settings: &UserSettings) -> Result<bool> {
    let changed = if let Some(updated_at) = settings.updated_at {
        conn.execute(
            "INSERT OR IGNORE INTO user_settings (account, skip_farmer_verification, \
             skip_investor_verification, demo_bypass, updated_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                settings.account,
                settings.skip_farmer_verification,
                settings.skip_investor_verification,
                settings.demo_bypass,
                updated_at,
            ],
        )?
    } else {
        // Leave updated_at out so the column default stamps the row.
        conn.execute(
            "INSERT OR IGNORE INTO user_settings (account, skip_farmer_verification, \
             skip_investor_verification, demo_bypass) VALUES (?1, ?2, ?3, ?4)",
            params![
                settings.account,
                settings.skip_farmer_verification,
                settings.skip_investor_verification,
                settings.demo_bypass,
            ],
        )?
    };
    Ok(changed > 0)
}

fn all_settings(conn: &Connection) -> Result<Vec<UserSettings>> {
    let mut stmt = conn.prepare(&format!("{SELECT_SETTINGS_SQL} ORDER BY account"))?;
    let rows = stmt
        .query_map([], settings_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn settings_from_row(row: &Row<'_>) -> rusqlite::Result<UserSettings> {
    Ok(UserSettings {
        account: row.get(0)?,
        skip_farmer_verification: row.get::<_, Option<bool>>(1)?.unwrap_or(false),
        skip_investor_verification: row.get::<_, Option<bool>>(2)?.unwrap_or(false),
        demo_bypass: row.get::<_, Option<bool>>(3)?.unwrap_or(false),
        updated_at: row.get(4)?,
    })
}
