//! Manager configuration - `config.json` in the manager home.
//!
//! Every field has a default, so a missing config file is a fully usable
//! configuration. `runtime_provides` lists dependency names already
//! satisfied by the base runtime; archive metadata drops them from
//! plugin-level dependencies at the collaborator boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PlugmanError, PlugmanResult};
use crate::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Directories scanned for available plugin packages.
    /// Empty means the single default `<home>/catalog`.
    pub catalog_dirs: Vec<PathBuf>,

    /// Runtime directory holding active packages; default `<home>/active`.
    pub active_dir: Option<PathBuf>,

    /// Directory for enabled.lock; default the home directory itself.
    pub state_dir: Option<PathBuf>,

    /// Dependency names the base runtime already provides
    pub runtime_provides: BTreeSet<String>,
}

impl ManagerConfig {
    /// Load the config from `<home>/config.json`, or defaults if absent.
    pub fn load(home: &Path) -> PlugmanResult<Self> {
        let path = paths::config_path(home);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(PlugmanError::Config(e.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| {
            PlugmanError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Catalog source directories, resolved against the home dir.
    pub fn catalog_dirs(&self, home: &Path) -> Vec<PathBuf> {
        if self.catalog_dirs.is_empty() {
            vec![paths::catalog_dir(home)]
        } else {
            self.catalog_dirs.clone()
        }
    }

    /// Active directory, resolved against the home dir.
    pub fn active_dir(&self, home: &Path) -> PathBuf {
        self.active_dir
            .clone()
            .unwrap_or_else(|| paths::active_dir(home))
    }

    /// State directory, resolved against the home dir.
    pub fn state_dir(&self, home: &Path) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(|| home.to_path_buf())
    }
}
