//! grove-tools - local store bootstrap and frontend encoding repair
//!
//! Two one-shot utilities that share this library:
//!
//! - `init-db` creates `local-store/sqlite/sqlite.db`, the `user_settings`
//!   table, and a default settings row
//! - `fix-encoding` rewrites known mis-encoded glyphs in
//!   `frontend/index.html` as UTF-8
//!
//! # Modules
//!
//! - [`bootstrap`] - Directory creation and the bootstrap run
//! - [`storage`] - `SQLite` settings store
//! - [`encoding`] - Replacement table and in-place file repair
//! - [`config`] - Layered configuration
//! - [`error`] - Error types

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;

pub use cli::{CommonArgs, FixEncodingCli, InitDbCli, OutputFormat};
pub use config::Config;
pub use error::{Result, ToolError};
pub use model::UserSettings;
pub use storage::SettingsStore;

/// Standard width for header dividers in CLI output
pub const HEADER_DIVIDER_WIDTH: usize = 60;

/// One-line rendering of a flag for text output.
#[must_use]
pub const fn format_flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Render an epoch-millisecond timestamp as `millis (RFC 3339)`.
#[must_use]
pub fn format_epoch_millis(value: Option<i64>) -> String {
    match value {
        Some(millis) => chrono::DateTime::from_timestamp_millis(millis).map_or_else(
            || millis.to_string(),
            |dt| format!("{millis} ({})", dt.format("%Y-%m-%dT%H:%M:%SZ")),
        ),
        None => "unset".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_epoch_millis, format_flag};

    #[test]
    fn format_flag_words() {
        assert_eq!(format_flag(true), "yes");
        assert_eq!(format_flag(false), "no");
    }

    #[test]
    fn format_epoch_millis_renders_utc() {
        assert_eq!(
            format_epoch_millis(Some(1_700_000_000_000)),
            "1700000000000 (2023-11-14T22:13:20Z)"
        );
        assert_eq!(format_epoch_millis(None), "unset");
        assert_eq!(format_epoch_millis(Some(i64::MAX)), i64::MAX.to_string());
    }
}
