//! Plugin catalog - deduplicated name -> record mapping.
//!
//! A catalog is built once per invocation from raw (possibly duplicate-name)
//! metadata records and never mutated afterwards; recomputation happens by
//! re-scanning sources.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A single installable plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord {
    /// Unique symbolic name, the catalog's primary key
    pub name: String,

    /// Version string, compared lexically during deduplication
    pub version: String,

    /// Free-text description, display only
    #[serde(default)]
    pub description: String,

    /// Names of plugins this plugin requires (no version constraints)
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Path to the backing package archive; used only by activation
    pub location: PathBuf,
}

/// Compare two version strings.
///
/// This is a plain lexical comparison, matching the observed upstream
/// behavior: "10" sorts before "2", so multi-digit components misorder.
/// Kept as-is rather than switching to semver, because which package wins
/// deduplication depends on the exact rule (see DESIGN.md).
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Deduplicated, immutable collection of plugin records keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: BTreeMap<String, PluginRecord>,
}

impl Catalog {
    /// Build a catalog from raw records, deduplicating by name.
    ///
    /// When a name appears more than once, the record with the strictly
    /// greatest version under [`version_cmp`] wins; on equal versions the
    /// first-seen record is kept.
    pub fn build(records: impl IntoIterator<Item = PluginRecord>) -> Self {
        let mut map: BTreeMap<String, PluginRecord> = BTreeMap::new();

        for record in records {
            match map.get(&record.name) {
                Some(existing)
                    if version_cmp(&record.version, &existing.version) != Ordering::Greater =>
                {
                    log::debug!(
                        "catalog: dropping {} v{} (kept v{})",
                        record.name,
                        record.version,
                        existing.version
                    );
                }
                _ => {
                    map.insert(record.name.clone(), record);
                }
            }
        }

        Self { records: map }
    }

    /// All plugin names in the catalog.
    pub fn names(&self) -> BTreeSet<String> {
        self.records.keys().cloned().collect()
    }

    /// Get a record by name.
    pub fn get(&self, name: &str) -> Option<&PluginRecord> {
        self.records.get(name)
    }

    /// Filter the catalog to the requested names, in catalog order.
    ///
    /// Requested names absent from the catalog are silently omitted;
    /// callers diff against the input to detect misses.
    pub fn lookup<'a>(&self, names: impl IntoIterator<Item = &'a String>) -> Vec<PluginRecord> {
        let wanted: BTreeSet<&str> = names.into_iter().map(|s| s.as_str()).collect();
        self.records
            .values()
            .filter(|r| wanted.contains(r.name.as_str()))
            .cloned()
            .collect()
    }

    /// Whether the catalog contains a plugin with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterate records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &PluginRecord> {
        self.records.values()
    }
}

#[cfg(test)]
pub(crate) fn record(name: &str, version: &str, deps: &[&str]) -> PluginRecord {
    PluginRecord {
        name: name.to_string(),
        version: version.to_string(),
        description: String::new(),
        dependencies: deps.iter().map(|d| d.to_string()).collect(),
        location: PathBuf::from(format!("/catalog/{}.tar.gz", name)),
    }
}
