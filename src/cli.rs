//! CLI definitions for the `init-db` and `fix-encoding` binaries.
//!
//! Uses clap for argument parsing with derive macros. Every flag is optional;
//! a bare invocation uses the configured (by default, hardcoded) paths.

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// Flags shared by both binaries.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Be verbose (show debug info)
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    pub verbose: bool,

    /// Be quiet (suppress non-error output)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// init-db - Bootstrap the local settings database
#[derive(Parser, Debug)]
#[command(name = "init-db")]
#[command(version)]
#[command(about = "Create the local SQLite store and seed the user_settings table")]
#[command(long_about = r#"
Creates ./local-store/sqlite/sqlite.db (and its directory) if missing,
creates the user_settings table if missing, inserts the default account
0.0.123456 unless it already exists, and prints every row.

Safe to run repeatedly: existing data is never modified.
"#)]
pub struct InitDbCli {
    /// Directory that holds the database file
    #[arg(long, env = "GROVE_STORE_DIR")]
    pub store_dir: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// fix-encoding - Repair mis-encoded glyphs in the frontend HTML
#[derive(Parser, Debug)]
#[command(name = "fix-encoding")]
#[command(version)]
#[command(about = "Rewrite known mis-encoded glyph sequences in an HTML file as UTF-8")]
#[command(long_about = r#"
Reads frontend/index.html byte-for-byte as ISO-8859-1, replaces the 13 known
corrupted glyph sequences (emoji, arrows, check marks, dashes) with the
correct characters, and writes the file back as UTF-8.

The file is overwritten in place. No backup is made.
"#)]
pub struct FixEncodingCli {
    /// HTML file to rewrite
    #[arg(long, env = "GROVE_HTML")]
    pub html: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

impl OutputFormat {
    /// Whether this format emits JSON.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json | Self::JsonPretty)
    }

    /// Serialize `value` in this format's JSON style.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn to_json<T: serde::Serialize>(self, value: &T) -> serde_json::Result<String> {
        if self == Self::JsonPretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definitions_are_valid() {
        InitDbCli::command().debug_assert();
        FixEncodingCli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_uses_defaults() {
        let cli = FixEncodingCli::try_parse_from(["fix-encoding"]).unwrap();
        assert_eq!(cli.common.format, OutputFormat::Text);
        assert!(!cli.common.verbose);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(InitDbCli::try_parse_from(["init-db", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_store_dir_flag() {
        let cli = InitDbCli::try_parse_from(["init-db", "--store-dir", "/tmp/x", "-f", "json"])
            .unwrap();
        assert_eq!(cli.store_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.common.format.is_json());
    }
}
