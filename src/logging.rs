//! Logging setup for the grove-tools binaries.
//!
//! Diagnostics go to stderr so stdout stays reserved for operator output and
//! JSON reports. `RUST_LOG`, when set, replaces the filter derived from the
//! `-q`/`-v` flags.
//!
//! ```rust
//! use grove_tools::logging::{init_logging, Verbosity};
//!
//! init_logging(Verbosity::from_flags(false, true), false);
//! tracing::debug!("store directory resolved");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose events pass the flag-derived filter.
const LOG_TARGETS: &[&str] = &["grove_tools", "init_db", "fix_encoding"];

/// How much the binaries report on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// `-q`: errors only.
    Quiet,
    /// No flag: warnings and errors, one compact line each.
    #[default]
    Normal,
    /// `-v`: debug events, pretty-printed with time and module path.
    Verbose,
}

impl Verbosity {
    /// Map the `--quiet`/`--verbose` flags; quiet wins.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    const fn level(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }

    fn filter_directive(self) -> String {
        let level = self.level();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbosity: Verbosity, colors: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(verbosity.filter_directive())
    };
    let registry = tracing_subscriber::registry().with(env_filter);

    if verbosity == Verbosity::Verbose {
        let layer = fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_ansi(colors);
        registry.with(layer).try_init().ok();
    } else {
        let layer = fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_ansi(colors)
            .with_target(false)
            .without_time();
        registry.with(layer).try_init().ok();
    }
}

/// Times one run of a binary and logs how it ended.
pub struct OperationGuard {
    name: &'static str,
    start: std::time::Instant,
}

impl OperationGuard {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        tracing::debug!(operation = name, "Starting operation");
        Self {
            name,
            start: std::time::Instant::now(),
        }
    }

    pub fn complete(self) {
        tracing::info!(
            operation = self.name,
            duration_ms = self.start.elapsed().as_millis(),
            "Operation completed"
        );
    }

    pub fn fail(self, error: &dyn std::error::Error) {
        tracing::error!(
            operation = self.name,
            duration_ms = self.start.elapsed().as_millis(),
            error = %error,
            "Operation failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_map_to_verbosity() {
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(true, false), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
    }

    #[test]
    fn test_normal_run_only_shows_warnings() {
        assert_eq!(
            Verbosity::Normal.filter_directive(),
            "grove_tools=warn,init_db=warn,fix_encoding=warn"
        );
    }

    #[test]
    fn test_filter_directive_covers_all_targets() {
        let directive = Verbosity::Verbose.filter_directive();
        for target in LOG_TARGETS {
            assert!(directive.contains(&format!("{target}=debug")));
        }
        assert!(Verbosity::Quiet.filter_directive().starts_with("grove_tools=error"));
    }
}
