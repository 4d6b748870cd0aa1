//! Filesystem collaborator: copies packages into and removes them from the
//! active directory. Reconciliation drives it through the [`PackageStore`]
//! trait so the engine stays testable without touching real directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::PluginRecord;
use crate::error::{PlugmanError, PlugmanResult};

/// Activation/deactivation operations on a runtime directory.
pub trait PackageStore {
    /// Copy the record's backing package into the active directory,
    /// creating parent directories. Returns the activated path.
    fn activate(&self, record: &PluginRecord) -> PlugmanResult<PathBuf>;

    /// Remove the record's backing package. Absence of the file is
    /// already-satisfied, not an error.
    fn deactivate(&self, record: &PluginRecord) -> PlugmanResult<()>;
}

/// Production store backed by a single active directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    active_dir: PathBuf,
}

impl DirStore {
    pub fn new(active_dir: impl Into<PathBuf>) -> Self {
        Self {
            active_dir: active_dir.into(),
        }
    }

    pub fn active_dir(&self) -> &Path {
        &self.active_dir
    }

    fn target_for(&self, record: &PluginRecord) -> PlugmanResult<PathBuf> {
        let file_name = record.location.file_name().ok_or_else(|| {
            PlugmanError::Metadata {
                archive: record.location.clone(),
                reason: "package location has no file name".to_string(),
            }
        })?;
        Ok(self.active_dir.join(file_name))
    }
}

impl PackageStore for DirStore {
    fn activate(&self, record: &PluginRecord) -> PlugmanResult<PathBuf> {
        let target = self.target_for(record)?;

        let io_err = |source| PlugmanError::Activation {
            name: record.name.clone(),
            source,
        };

        fs::create_dir_all(&self.active_dir).map_err(io_err)?;
        fs::copy(&record.location, &target).map_err(io_err)?;

        log::debug!(
            "activated {} v{} -> {}",
            record.name,
            record.version,
            target.display()
        );
        Ok(target)
    }

    fn deactivate(&self, record: &PluginRecord) -> PlugmanResult<()> {
        match fs::remove_file(&record.location) {
            Ok(()) => {
                log::debug!(
                    "deactivated {} ({})",
                    record.name,
                    record.location.display()
                );
                Ok(())
            }
            // Idempotent: already gone means already satisfied.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlugmanError::Deactivation {
                name: record.name.clone(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record_at(name: &str, location: PathBuf) -> PluginRecord {
        PluginRecord {
            name: name.to_string(),
            version: "1.0".to_string(),
            description: String::new(),
            dependencies: vec![],
            location,
        }
    }

    #[test]
    fn test_activate_copies_into_active_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("cat").join("demo.tar.gz");
        fs::create_dir_all(source.parent().unwrap()).unwrap();
        fs::write(&source, b"payload").unwrap();

        let store = DirStore::new(temp.path().join("active"));
        let target = store.activate(&record_at("demo", source)).unwrap();

        assert!(target.exists());
        assert_eq!(fs::read(target).unwrap(), b"payload");
    }

    #[test]
    fn test_activate_missing_source_is_fatal() {
        let temp = TempDir::new().unwrap();
        let store = DirStore::new(temp.path().join("active"));
        let missing = record_at("demo", temp.path().join("nope.tar.gz"));

        match store.activate(&missing) {
            Err(PlugmanError::Activation { name, .. }) => assert_eq!(name, "demo"),
            other => panic!("expected Activation error, got {:?}", other),
        }
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let active = temp.path().join("demo.tar.gz");
        fs::write(&active, b"payload").unwrap();

        let store = DirStore::new(temp.path());
        let record = record_at("demo", active.clone());

        store.deactivate(&record).unwrap();
        assert!(!active.exists());

        // Second removal: already satisfied.
        store.deactivate(&record).unwrap();
    }
}
