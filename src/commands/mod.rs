//! Command handlers for the plugman CLI.
//!
//! Each invocation rebuilds the catalog and active set from disk; only the
//! explicit-enabled set persists across runs. There is no cross-process
//! locking: two concurrent invocations can race on the active directory
//! and enabled.lock (known limitation).

mod disable;
mod enable;
mod list;
mod prune;

pub use disable::run_disable;
pub use enable::run_enable;
pub use list::run_list;
pub use prune::run_prune;

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::archive;
use crate::catalog::Catalog;
use crate::cli_output;
use crate::config::ManagerConfig;
use crate::error::{PlugmanError, PlugmanResult};
use crate::paths;
use crate::state;
use crate::store::DirStore;

/// Resolved runtime environment for one invocation.
pub struct Env {
    home: PathBuf,
    config: ManagerConfig,
}

impl Env {
    /// Resolve the manager home (`--home` override or `~/.plugman`) and
    /// load its configuration.
    pub fn load(home_override: Option<PathBuf>) -> PlugmanResult<Self> {
        let home = match home_override {
            Some(home) => home,
            None => paths::plugman_dir().map_err(|e| PlugmanError::Config(e.to_string()))?,
        };
        let config = ManagerConfig::load(&home)?;
        Ok(Self { home, config })
    }

    /// Build the available catalog by scanning every configured catalog
    /// directory, surfacing per-archive warnings.
    pub fn catalog(&self) -> (Catalog, Vec<String>) {
        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for dir in self.config.catalog_dirs(&self.home) {
            let scan = archive::scan_dir(&dir, &self.config.runtime_provides);
            records.extend(scan.records);
            warnings.extend(scan.warnings);
        }

        (Catalog::build(records), warnings)
    }

    /// Rebuild the active set by scanning the active directory.
    pub fn active(&self) -> (Catalog, Vec<String>) {
        let scan = archive::scan_dir(&self.active_dir(), &self.config.runtime_provides);
        (Catalog::build(scan.records), scan.warnings)
    }

    pub fn active_dir(&self) -> PathBuf {
        self.config.active_dir(&self.home)
    }

    pub fn state_dir(&self) -> PathBuf {
        self.config.state_dir(&self.home)
    }

    pub fn store(&self) -> DirStore {
        DirStore::new(self.active_dir())
    }

    pub fn explicit(&self) -> PlugmanResult<BTreeSet<String>> {
        state::load(&self.state_dir())
    }
}

/// Surface aggregated non-fatal warnings once per invocation.
fn warn_all(warnings: &[String]) {
    for warning in warnings {
        cli_output::warn(warning);
    }
}
