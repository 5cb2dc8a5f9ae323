//! fix-encoding - repair mis-encoded glyphs in the frontend HTML
//!
//! Rewrites the target file in place as UTF-8. No backup is kept.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use grove_tools::encoding::{self, FixReport};
use grove_tools::logging::{OperationGuard, Verbosity, init_logging};
use grove_tools::{Config, FixEncodingCli};

fn main() -> Result<()> {
    let cli = FixEncodingCli::parse();
    init_logging(
        Verbosity::from_flags(cli.common.quiet, cli.common.verbose),
        std::env::var_os("NO_COLOR").is_none(),
    );

    let config = Config::load()?;
    if !config.output.colors {
        colored::control::set_override(false);
    }

    let html = cli.html.clone().unwrap_or_else(|| config.paths.html.clone());

    let guard = OperationGuard::new("fix-encoding");
    let report = match encoding::fix_file(&html) {
        Ok(report) => report,
        Err(e) => {
            guard.fail(&e);
            if let Some(hint) = e.suggestion() {
                eprintln!("{} {hint}", "Hint:".cyan());
            }
            return Err(e).with_context(|| format!("Encoding repair of {} failed", html.display()));
        }
    };
    guard.complete();

    if cli.common.format.is_json() {
        println!("{}", cli.common.format.to_json(&report)?);
    } else if !cli.common.quiet {
        print_report(&report, cli.common.verbose);
    }

    Ok(())
}

fn print_report(report: &FixReport, verbose: bool) {
    for hit in report.matched() {
        println!(
            "  Fixed {} -> {} ({}x)",
            hit.name,
            hit.correct,
            hit.occurrences
        );
    }
    if verbose {
        for hit in report.hits.iter().filter(|hit| hit.occurrences == 0) {
            println!("  {} {} not found", "•".dimmed(), hit.name);
        }
    }

    println!(
        "{} Fixed all encoding issues in {}",
        "✓".green(),
        report.path.display()
    );
    println!("   Applied {} replacements", report.rules_applied);
}
