//! init-db - bootstrap the local settings database
//!
//! Creates the store directory and database file, the `user_settings` table,
//! and the default settings row, then prints every row.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use tracing::debug;

use grove_tools::bootstrap::{self, BootstrapReport};
use grove_tools::logging::{OperationGuard, Verbosity, init_logging};
use grove_tools::{
    Config, HEADER_DIVIDER_WIDTH, InitDbCli, format_epoch_millis, format_flag,
};

fn main() -> Result<()> {
    let cli = InitDbCli::parse();
    init_logging(
        Verbosity::from_flags(cli.common.quiet, cli.common.verbose),
        std::env::var_os("NO_COLOR").is_none(),
    );

    let config = Config::load()?;
    if !config.output.colors {
        colored::control::set_override(false);
    }

    let store_dir = cli
        .store_dir
        .clone()
        .unwrap_or_else(|| config.paths.store_dir.clone());
    let store_dir = std::path::absolute(&store_dir)
        .with_context(|| format!("Failed to resolve {}", store_dir.display()))?;
    debug!("Resolved store directory: {}", store_dir.display());

    let guard = OperationGuard::new("init-db");
    let report = match bootstrap::run(&store_dir, &config.paths.db_file) {
        Ok(report) => report,
        Err(e) => {
            guard.fail(&e);
            if let Some(hint) = e.suggestion() {
                eprintln!("{} {hint}", "Hint:".cyan());
            }
            return Err(e).context("Database bootstrap failed");
        }
    };
    guard.complete();

    if cli.common.format.is_json() {
        println!("{}", cli.common.format.to_json(&report)?);
    } else if !cli.common.quiet {
        print_report(&report, &store_dir);
    }

    Ok(())
}

fn print_report(report: &BootstrapReport, store_dir: &Path) {
    println!("{}", "Bootstrapping local settings store...".bold().cyan());
    println!("  Database directory: {}", store_dir.display());
    println!("  {} Database directory ready", "✓".green());
    println!("  Database file: {}", report.db_path.display());
    println!("  {} user_settings table created/verified", "✓".green());
    if report.seed_inserted {
        println!("  {} Default user settings record inserted", "✓".green());
    } else {
        println!(
            "  {} Default user settings record already present",
            "•".dimmed()
        );
    }
    println!();

    println!("{}", format!("Table contents ({} rows)", report.rows.len()).bold());
    println!("{}", "─".repeat(HEADER_DIVIDER_WIDTH).dimmed());
    for row in &report.rows {
        println!("  {}", row.account.yellow());
        println!(
            "    skip_farmer_verification:   {}",
            format_flag(row.skip_farmer_verification)
        );
        println!(
            "    skip_investor_verification: {}",
            format_flag(row.skip_investor_verification)
        );
        println!("    demo_bypass:                {}", format_flag(row.demo_bypass));
        println!(
            "    updated_at:                 {}",
            format_epoch_millis(row.updated_at)
        );
    }
    println!("{}", "─".repeat(HEADER_DIVIDER_WIDTH).dimmed());
    println!("{}", "Database operations completed".green());
}
