//! Enabled-set store - persists the explicitly-requested plugin names.
//!
//! The explicit set is the only long-lived state this tool owns; it is the
//! source of truth for *why* a plugin is active, as opposed to the active
//! directory, which records *what* is active. Stored as pretty JSON in
//! `enabled.lock` under the state directory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlugmanError, PlugmanResult};

/// Current schema version for enabled.lock
pub const SCHEMA_VERSION: &str = "1.0";

const LOCK_FILE: &str = "enabled.lock";

/// On-disk shape of the enabled set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnabledState {
    /// Schema version for forward compatibility
    pub schema_version: String,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,

    /// Explicitly enabled plugin names
    pub plugins: BTreeSet<String>,
}

impl Default for EnabledState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            updated_at: Utc::now(),
            plugins: BTreeSet::new(),
        }
    }
}

fn lock_path(state_dir: &Path) -> PathBuf {
    state_dir.join(LOCK_FILE)
}

/// Load the explicit set from the state directory.
///
/// A missing file is the empty set. Any other read or parse failure is a
/// fatal [`PlugmanError::State`], distinct from activation I/O errors.
pub fn load(state_dir: &Path) -> PlugmanResult<BTreeSet<String>> {
    let path = lock_path(state_dir);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => {
            return Err(PlugmanError::State {
                path,
                reason: e.to_string(),
            })
        }
    };

    let state: EnabledState = serde_json::from_str(&content).map_err(|e| PlugmanError::State {
        path: path.clone(),
        reason: format!("failed to parse: {}", e),
    })?;

    log::debug!(
        "loaded {} explicit name(s) from {}",
        state.plugins.len(),
        path.display()
    );
    Ok(state.plugins)
}

/// Persist the explicit set, creating the state directory if needed.
pub fn save(state_dir: &Path, plugins: &BTreeSet<String>) -> PlugmanResult<()> {
    let path = lock_path(state_dir);

    let write = || -> std::io::Result<()> {
        fs::create_dir_all(state_dir)?;
        let state = EnabledState {
            schema_version: SCHEMA_VERSION.to_string(),
            updated_at: Utc::now(),
            plugins: plugins.clone(),
        };
        let content = serde_json::to_string_pretty(&state).map_err(std::io::Error::other)?;
        fs::write(&path, content)
    };

    write().map_err(|e| PlugmanError::State {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    log::debug!(
        "saved {} explicit name(s) to {}",
        plugins.len(),
        path.display()
    );
    Ok(())
}
