//! Report formatter - renders catalog entries with activation-status glyphs.
//!
//! Glyphs: `✓` explicitly enabled and active, `+` active as an implicit
//! dependency of something else, `·` available but inactive.

use colored::*;
use regex::Regex;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, PluginRecord};
use crate::cli_output::{ICON_DEP, ICON_HINT, ICON_SUCCESS};
use crate::error::{PlugmanError, PlugmanResult};

/// Activation status of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// In the active directory because the user asked for it
    Explicit,

    /// In the active directory only as a dependency
    Implicit,

    /// Available in the catalog but not active
    Inactive,
}

impl Status {
    pub fn of(name: &str, active: &BTreeSet<String>, explicit: &BTreeSet<String>) -> Self {
        if !active.contains(name) {
            Status::Inactive
        } else if explicit.contains(name) {
            Status::Explicit
        } else {
            Status::Implicit
        }
    }

    fn glyph(self) -> ColoredString {
        match self {
            Status::Explicit => ICON_SUCCESS.green(),
            Status::Implicit => ICON_DEP.cyan(),
            Status::Inactive => ICON_HINT.dimmed(),
        }
    }
}

/// Compile a name filter; a bad pattern is a fatal error.
pub fn compile_pattern(pattern: &str) -> PlugmanResult<Regex> {
    Regex::new(pattern).map_err(|e| PlugmanError::Pattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn compact_line(record: &PluginRecord, status: Status) -> String {
    format!(
        "{} {} {}",
        status.glyph(),
        record.name.white().bold(),
        format!("v{}", record.version).dimmed()
    )
}

fn full_lines(record: &PluginRecord, status: Status) -> Vec<String> {
    let mut lines = vec![compact_line(record, status)];
    if !record.description.is_empty() {
        lines.push(format!("    {}", record.description.dimmed()));
    }
    if !record.dependencies.is_empty() {
        lines.push(format!(
            "    requires: {}",
            record.dependencies.join(", ").cyan()
        ));
    }
    lines
}

/// Render the catalog, filtered by an optional name pattern.
pub fn render(
    catalog: &Catalog,
    active: &BTreeSet<String>,
    explicit: &BTreeSet<String>,
    pattern: Option<&Regex>,
    compact: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    for record in catalog.iter() {
        if let Some(re) = pattern {
            if !re.is_match(&record.name) {
                continue;
            }
        }

        let status = Status::of(&record.name, active, explicit);
        if compact {
            lines.push(compact_line(record, status));
        } else {
            lines.extend(full_lines(record, status));
        }
    }

    lines
}
