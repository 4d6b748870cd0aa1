//! Archive metadata collaborator.
//!
//! A plugin package is a gzipped tar archive carrying a `plugin.json`
//! descriptor. The descriptor is validated against a strict schema at this
//! boundary; anything that does not match is a Metadata error, never
//! partially interpreted. One bad archive is excluded from the catalog and
//! reported as a warning, it never aborts catalog construction.

use flate2::read::GzDecoder;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;
use walkdir::WalkDir;

use crate::catalog::PluginRecord;
use crate::error::{PlugmanError, PlugmanResult};

/// Descriptor file name inside a plugin archive.
pub const DESCRIPTOR_NAME: &str = "plugin.json";

/// Strict descriptor schema. Unknown fields are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Descriptor {
    name: String,

    #[serde(default = "default_version")]
    version: String,

    #[serde(default)]
    description: String,

    #[serde(default)]
    depends: Vec<String>,
}

fn default_version() -> String {
    "0".to_string()
}

fn metadata_err(archive: &Path, reason: impl Into<String>) -> PlugmanError {
    PlugmanError::Metadata {
        archive: archive.to_path_buf(),
        reason: reason.into(),
    }
}

/// Read a plugin record out of a package archive.
///
/// Dependencies already provided by the base runtime (`provided`) are not
/// tracked as plugin-level dependencies: they are satisfied without any
/// catalog entry, so following them would only produce dangling references.
pub fn read_metadata(archive: &Path, provided: &BTreeSet<String>) -> PlugmanResult<PluginRecord> {
    let file = File::open(archive).map_err(|e| metadata_err(archive, e.to_string()))?;
    let mut tar = Archive::new(GzDecoder::new(file));

    let entries = tar
        .entries()
        .map_err(|e| metadata_err(archive, format!("not a readable tar.gz: {}", e)))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| metadata_err(archive, e.to_string()))?;
        let is_descriptor = {
            let path = entry
                .path()
                .map_err(|e| metadata_err(archive, e.to_string()))?;
            path.file_name()
                .map(|f| f == DESCRIPTOR_NAME)
                .unwrap_or(false)
        };
        if !is_descriptor {
            continue;
        }

        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .map_err(|e| metadata_err(archive, e.to_string()))?;

        let descriptor: Descriptor = serde_json::from_str(&content)
            .map_err(|e| metadata_err(archive, format!("invalid {}: {}", DESCRIPTOR_NAME, e)))?;

        let dependencies = descriptor
            .depends
            .into_iter()
            .filter(|d| !provided.contains(d))
            .collect();

        return Ok(PluginRecord {
            name: descriptor.name,
            version: descriptor.version,
            description: descriptor.description,
            dependencies,
            location: archive.to_path_buf(),
        });
    }

    Err(metadata_err(
        archive,
        format!("no {} descriptor found", DESCRIPTOR_NAME),
    ))
}

/// Result of scanning a directory for plugin packages.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Records parsed from readable archives
    pub records: Vec<PluginRecord>,

    /// One warning per archive that could not be read
    pub warnings: Vec<String>,
}

fn is_package(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".tar.gz")
}

/// Scan a directory for `*.tar.gz` packages and read their metadata.
///
/// A missing directory yields an empty result; per-archive failures are
/// aggregated into warnings.
pub fn scan_dir(dir: &Path, provided: &BTreeSet<String>) -> ScanResult {
    let mut result = ScanResult::default();

    if !dir.exists() {
        log::debug!("scan: {} does not exist, empty catalog", dir.display());
        return result;
    }

    let mut packages: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_package(e.path()))
        .map(|e| e.into_path())
        .collect();
    packages.sort();

    for package in packages {
        match read_metadata(&package, provided) {
            Ok(record) => result.records.push(record),
            Err(e) => result.warnings.push(e.to_string()),
        }
    }

    log::debug!(
        "scan: {} -> {} record(s), {} warning(s)",
        dir.display(),
        result.records.len(),
        result.warnings.len()
    );
    result
}
