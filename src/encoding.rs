//! Repair of mis-encoded glyphs in the frontend HTML.
//!
//! The file is read as ISO-8859-1, so each byte becomes one `char` in
//! `U+0000..=U+00FF`. A glyph whose UTF-8 bytes were kept but reinterpreted
//! this way shows up as a run of Latin-1 characters; [`REPLACEMENTS`] maps
//! each such run back to the glyph, and the result is written as UTF-8.

use crate::error::{Result, ToolError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One literal rewrite rule.
#[derive(Debug, Clone, Copy)]
pub struct Replacement {
    /// Short label used in reports.
    pub name: &'static str,
    /// The glyph's UTF-8 bytes, one Latin-1 char per byte.
    pub corrupted: &'static str,
    /// The glyph itself.
    pub correct: &'static str,
}

/// Fixed rule set, applied in order. No key is a substring of another.
pub const REPLACEMENTS: &[Replacement] = &[
    Replacement {
        name: "bell",
        corrupted: "\u{f0}\u{9f}\u{94}\u{94}",
        correct: "\u{1f514}",
    },
    Replacement {
        name: "money bag",
        corrupted: "\u{f0}\u{9f}\u{92}\u{b0}",
        correct: "\u{1f4b0}",
    },
    Replacement {
        name: "herb",
        corrupted: "\u{f0}\u{9f}\u{8c}\u{bf}",
        correct: "\u{1f33f}",
    },
    Replacement {
        name: "handshake",
        corrupted: "\u{f0}\u{9f}\u{a4}\u{9d}",
        correct: "\u{1f91d}",
    },
    Replacement {
        name: "globe",
        corrupted: "\u{f0}\u{9f}\u{8c}\u{8d}",
        correct: "\u{1f30d}",
    },
    Replacement {
        name: "rocket",
        corrupted: "\u{f0}\u{9f}\u{9a}\u{80}",
        correct: "\u{1f680}",
    },
    Replacement {
        name: "arrow",
        corrupted: "\u{e2}\u{86}\u{92}",
        correct: "\u{2192}",
    },
    Replacement {
        name: "satellite",
        corrupted: "\u{f0}\u{9f}\u{9b}\u{b0}\u{ef}\u{b8}\u{8f}",
        correct: "\u{1f6f0}\u{fe0f}",
    },
    Replacement {
        name: "pin",
        corrupted: "\u{f0}\u{9f}\u{93}\u{8d}",
        correct: "\u{1f4cd}",
    },
    Replacement {
        name: "check mark",
        corrupted: "\u{e2}\u{9c}\u{93}",
        correct: "\u{2713}",
    },
    Replacement {
        name: "down triangle",
        corrupted: "\u{e2}\u{96}\u{be}",
        correct: "\u{25be}",
    },
    Replacement {
        name: "scales",
        corrupted: "\u{e2}\u{9a}\u{96}\u{ef}\u{b8}\u{8f}",
        correct: "\u{2696}\u{fe0f}",
    },
    Replacement {
        name: "em dash",
        corrupted: "\u{e2}\u{80}\u{94}",
        correct: "\u{2014}",
    },
];

/// Occurrences replaced by one rule.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RuleHit {
    pub name: &'static str,
    pub correct: &'static str,
    pub occurrences: usize,
}

/// Output of [`repair`].
#[derive(Debug, Clone)]
pub struct Repair {
    pub text: String,
    /// One entry per rule, in table order.
    pub hits: Vec<RuleHit>,
}

impl Repair {
    /// Total occurrences replaced across all rules.
    #[must_use]
    pub fn total_occurrences(&self) -> usize {
        self.hits.iter().map(|hit| hit.occurrences).sum()
    }

}

/// What `fix-encoding` did to a file.
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub path: PathBuf,
    /// Number of rules applied (always the table length).
    pub rules_applied: usize,
    pub total_occurrences: usize,
    pub bytes_read: usize,
    pub bytes_written: usize,
    pub hits: Vec<RuleHit>,
}

impl FixReport {
    /// Rules that matched at least once.
    pub fn matched(&self) -> impl Iterator<Item = &RuleHit> {
        self.hits.iter().filter(|hit| hit.occurrences > 0)
    }
}

/// Decode bytes as ISO-8859-1.
#[must_use]
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Apply every rule in [`REPLACEMENTS`] to `text`.
#[must_use]
pub fn repair(text: &str) -> Repair {
    let mut text = text.to_owned();
    let mut hits = Vec::with_capacity(REPLACEMENTS.len());

    for rule in REPLACEMENTS {
        let (replaced, occurrences) = replace_counting(&text, rule.corrupted, rule.correct);
        if occurrences > 0 {
            text = replaced;
            debug!(rule = rule.name, occurrences, "Replaced corrupted sequence");
        }
        hits.push(RuleHit {
            name: rule.name,
            correct: rule.correct,
            occurrences,
        });
    }

    Repair { text, hits }
}

/// `str::replace` that also reports how many matches it replaced.
fn replace_counting(text: &str, from: &str, to: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;
    for (start, found) in text.match_indices(from) {
        out.push_str(&text[last..start]);
        out.push_str(to);
        last = start + found.len();
        count += 1;
    }
    out.push_str(&text[last..]);
    (out, count)
}

/// Rewrite `path` in place: read as ISO-8859-1, repair, write as UTF-8.
///
/// No backup is kept.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written.
pub fn fix_file(path: &Path) -> Result<FixReport> {
    let bytes = std::fs::read(path).map_err(|e| ToolError::path_error("read", path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let repaired = repair(&decode_latin1(&bytes));
    let total_occurrences = repaired.total_occurrences();

    std::fs::write(path, repaired.text.as_bytes())
        .map_err(|e| ToolError::path_error("write", path, e))?;
    info!(
        path = %path.display(),
        occurrences = total_occurrences,
        "Rewrote file as UTF-8"
    );

    Ok(FixReport {
        path: path.to_path_buf(),
        rules_applied: REPLACEMENTS.len(),
        total_occurrences,
        bytes_read: bytes.len(),
        bytes_written: repaired.text.len(),
        hits: repaired.hits,
    })
}
