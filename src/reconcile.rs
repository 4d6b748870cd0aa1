//! Reconciliation engine - diffs desired state against the active directory.
//!
//! `enable` and `disable` both chain into `prune` at the command layer, so
//! anything that becomes unreachable from the explicit set is physically
//! removed in the same invocation. Persisting the explicit set is the
//! caller's job and happens only after every activation succeeded; a copy
//! failure aborts before any state is written, keeping the persisted set
//! consistent with the filesystem.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, PluginRecord};
use crate::error::PlugmanResult;
use crate::graph::{DependencyGraph, EdgeDirection};
use crate::store::PackageStore;

/// Result of an enable run.
#[derive(Debug)]
pub struct EnableOutcome {
    /// Plugins copied into the active directory, in activation order
    pub activated: Vec<PluginRecord>,

    /// Requested names absent from the catalog (warning, not fatal)
    pub missing: BTreeSet<String>,

    /// New explicit set to persist after success
    pub explicit: BTreeSet<String>,
}

/// Result of a prune run.
#[derive(Debug)]
pub struct PruneOutcome {
    /// Plugins removed from the active directory
    pub deactivated: Vec<PluginRecord>,
}

/// Result of a disable run.
#[derive(Debug)]
pub struct DisableOutcome {
    /// Names removed from the explicit set
    pub removed: BTreeSet<String>,

    /// Requested names absent from the active set (warning, not fatal)
    pub missing: BTreeSet<String>,

    /// New explicit set to persist
    pub explicit: BTreeSet<String>,
}

/// Enable the requested plugins plus their transitive dependencies.
///
/// Unknown names are collected into `missing` and resolution proceeds with
/// the found subset. Activation stops at the first I/O failure; plugins
/// copied before the failure stay in place (no rollback), and since the
/// explicit set is persisted by the caller only on success, it never gets
/// ahead of the filesystem.
pub fn enable(
    requested: &BTreeSet<String>,
    catalog: &Catalog,
    explicit: &BTreeSet<String>,
    active: &Catalog,
    store: &dyn PackageStore,
) -> PlugmanResult<EnableOutcome> {
    let catalog_names = catalog.names();

    let missing: BTreeSet<String> = requested.difference(&catalog_names).cloned().collect();
    let found: BTreeSet<String> = requested.intersection(&catalog_names).cloned().collect();

    let new_explicit: BTreeSet<String> = explicit.union(&found).cloned().collect();

    let graph = DependencyGraph::build(catalog, EdgeDirection::Forward);
    let required = graph.reachable(&new_explicit);
    log::debug!(
        "enable: {} explicit name(s) close over {} required plugin(s)",
        new_explicit.len(),
        required.len()
    );

    let active_names = active.names();
    let to_activate: BTreeSet<String> = required.difference(&active_names).cloned().collect();

    let mut activated = Vec::new();
    for record in catalog.lookup(&to_activate) {
        store.activate(&record)?;
        activated.push(record);
    }

    Ok(EnableOutcome {
        activated,
        missing,
        explicit: new_explicit,
    })
}

/// Remove every active plugin not reachable from the explicit set.
///
/// Covers both implicit dependencies whose dependents were removed and
/// stale leftovers. Idempotent: a second run right after the first is a
/// no-op.
pub fn prune(
    catalog: &Catalog,
    explicit: &BTreeSet<String>,
    active: &Catalog,
    store: &dyn PackageStore,
) -> PlugmanResult<PruneOutcome> {
    let graph = DependencyGraph::build(catalog, EdgeDirection::Forward);
    let required = graph.reachable(explicit);

    let removable: BTreeSet<String> = active
        .names()
        .difference(&required)
        .cloned()
        .collect();
    log::debug!(
        "prune: {} active, {} required, {} removable",
        active.len(),
        required.len(),
        removable.len()
    );

    let mut deactivated = Vec::new();
    for record in active.lookup(&removable) {
        store.deactivate(&record)?;
        deactivated.push(record);
    }

    Ok(PruneOutcome { deactivated })
}

/// Withdraw explicit-enable intent for the requested plugins.
///
/// Everything that transitively depends on a requested name is a candidate,
/// but only candidates currently in the explicit set are removed from it:
/// you cannot explicitly disable what you never explicitly enabled. No
/// files are touched here; physical removal is deferred to the chained
/// prune, which also catches implicit dependencies that became unreachable.
pub fn disable(
    requested: &BTreeSet<String>,
    active: &Catalog,
    explicit: &BTreeSet<String>,
) -> DisableOutcome {
    let active_names = active.names();

    let missing: BTreeSet<String> = requested.difference(&active_names).cloned().collect();
    let found: BTreeSet<String> = requested.intersection(&active_names).cloned().collect();

    let graph = DependencyGraph::build(active, EdgeDirection::Reverse);
    let candidates = graph.reachable(&found);
    log::debug!(
        "disable: {} found name(s), {} dependent candidate(s)",
        found.len(),
        candidates.len()
    );

    let removed: BTreeSet<String> = candidates.intersection(explicit).cloned().collect();
    let new_explicit: BTreeSet<String> = explicit.difference(&removed).cloned().collect();

    DisableOutcome {
        removed,
        missing,
        explicit: new_explicit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::test_support::write_simple_package;
    use crate::archive::scan_dir;
    use crate::store::DirStore;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn scan(dir: &Path) -> Catalog {
        Catalog::build(scan_dir(dir, &BTreeSet::new()).records)
    }

    /// Catalog dir with a -> nothing, b -> a, c -> b; empty active dir.
    fn chain_fixture() -> (TempDir, Catalog, DirStore) {
        let temp = TempDir::new().unwrap();
        let catalog_dir = temp.path().join("catalog");
        fs::create_dir_all(&catalog_dir).unwrap();
        write_simple_package(&catalog_dir, "a", "1.0", &[]);
        write_simple_package(&catalog_dir, "b", "1.0", &["a"]);
        write_simple_package(&catalog_dir, "c", "1.0", &["b"]);

        let catalog = scan(&catalog_dir);
        let store = DirStore::new(temp.path().join("active"));
        (temp, catalog, store)
    }

    fn active_catalog(store: &DirStore) -> Catalog {
        scan(store.active_dir())
    }

    #[test]
    fn test_enable_activates_transitive_closure() {
        let (_temp, catalog, store) = chain_fixture();

        let outcome = enable(
            &set(&["c"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        let activated: BTreeSet<String> =
            outcome.activated.iter().map(|r| r.name.clone()).collect();
        assert_eq!(activated, set(&["a", "b", "c"]));
        assert_eq!(outcome.explicit, set(&["c"]));
        assert!(outcome.missing.is_empty());
        assert_eq!(active_catalog(&store).len(), 3);
    }

    #[test]
    fn test_enable_unknown_name_is_warning_not_error() {
        let (_temp, catalog, store) = chain_fixture();

        let outcome = enable(
            &set(&["a", "ghost"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        assert_eq!(outcome.missing, set(&["ghost"]));
        assert_eq!(outcome.explicit, set(&["a"]));
        assert_eq!(outcome.activated.len(), 1);
    }

    #[test]
    fn test_enable_skips_already_active() {
        let (_temp, catalog, store) = chain_fixture();

        enable(
            &set(&["b"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        // Second enable of c: a and b already active, only c copied.
        let outcome = enable(
            &set(&["c"]),
            &catalog,
            &set(&["b"]),
            &active_catalog(&store),
            &store,
        )
        .unwrap();

        let activated: BTreeSet<String> =
            outcome.activated.iter().map(|r| r.name.clone()).collect();
        assert_eq!(activated, set(&["c"]));
        assert_eq!(outcome.explicit, set(&["b", "c"]));
    }

    #[test]
    fn test_prune_removes_unreachable() {
        let (_temp, catalog, store) = chain_fixture();

        enable(
            &set(&["c"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        // Explicit intent shrinks to just a; b and c become unreachable.
        let outcome = prune(&catalog, &set(&["a"]), &active_catalog(&store), &store).unwrap();
        let removed: BTreeSet<String> =
            outcome.deactivated.iter().map(|r| r.name.clone()).collect();
        assert_eq!(removed, set(&["b", "c"]));
        assert_eq!(active_catalog(&store).names(), set(&["a"]));
    }

    #[test]
    fn test_prune_keeps_explicit_plugin_gone_from_catalog() {
        let (temp, catalog, store) = chain_fixture();

        enable(
            &set(&["a"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        // a's archive disappears from the catalog sources. The explicit
        // intent still covers it, so prune must leave the active copy alone.
        fs::remove_file(temp.path().join("catalog").join("a.tar.gz")).unwrap();
        let rescanned = scan(&temp.path().join("catalog"));
        assert!(!rescanned.contains("a"));

        let outcome = prune(&rescanned, &set(&["a"]), &active_catalog(&store), &store).unwrap();
        assert!(outcome.deactivated.is_empty());
        assert!(active_catalog(&store).contains("a"));
    }

    #[test]
    fn test_enable_then_prune_is_fixpoint() {
        let (_temp, catalog, store) = chain_fixture();
        let explicit = set(&["c"]);

        enable(
            &explicit,
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        let first = prune(&catalog, &explicit, &active_catalog(&store), &store).unwrap();
        assert!(first.deactivated.is_empty());

        let second = prune(&catalog, &explicit, &active_catalog(&store), &store).unwrap();
        assert!(second.deactivated.is_empty());
    }

    #[test]
    fn test_disable_removes_dependents_from_explicit() {
        let (_temp, catalog, store) = chain_fixture();

        enable(
            &set(&["b", "c"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        // Disabling b drags its dependent c out of the explicit set too.
        let outcome = disable(&set(&["b"]), &active_catalog(&store), &set(&["b", "c"]));
        assert_eq!(outcome.removed, set(&["b", "c"]));
        assert!(outcome.explicit.is_empty());
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_disable_implicit_dependency_is_noop_on_explicit() {
        let (_temp, catalog, store) = chain_fixture();

        enable(
            &set(&["c"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();

        // a is active only as an implicit dependency. Disabling it reports
        // its explicitly-enabled dependent c, but a itself stays active
        // until a prune finds it unreachable.
        let active = active_catalog(&store);
        let outcome = disable(&set(&["a"]), &active, &set(&["c"]));
        assert_eq!(outcome.removed, set(&["c"]));
        assert!(outcome.explicit.is_empty());
        assert!(active_catalog(&store).contains("a"));
    }

    #[test]
    fn test_disable_unknown_name_is_missing() {
        let (_temp, _catalog, store) = chain_fixture();
        let outcome = disable(&set(&["ghost"]), &active_catalog(&store), &BTreeSet::new());
        assert_eq!(outcome.missing, set(&["ghost"]));
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_end_to_end_enable_disable_prune() {
        let (_temp, catalog, store) = chain_fixture();

        // enable(["c"]) activates the whole chain, explicit = {c}.
        let enabled = enable(
            &set(&["c"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();
        assert_eq!(enabled.explicit, set(&["c"]));
        assert_eq!(active_catalog(&store).names(), set(&["a", "b", "c"]));

        // disable(["c"]): reverse closure from c over the active catalog is
        // just {c}; explicit drops to empty.
        let disabled = disable(&set(&["c"]), &active_catalog(&store), &enabled.explicit);
        assert_eq!(disabled.removed, set(&["c"]));
        assert!(disabled.explicit.is_empty());

        // Chained prune clears the whole chain.
        let pruned = prune(
            &catalog,
            &disabled.explicit,
            &active_catalog(&store),
            &store,
        )
        .unwrap();
        let removed: BTreeSet<String> =
            pruned.deactivated.iter().map(|r| r.name.clone()).collect();
        assert_eq!(removed, set(&["a", "b", "c"]));
        assert!(active_catalog(&store).is_empty());
    }

    #[test]
    fn test_enable_cyclic_dependencies() {
        let temp = TempDir::new().unwrap();
        let catalog_dir = temp.path().join("catalog");
        fs::create_dir_all(&catalog_dir).unwrap();
        write_simple_package(&catalog_dir, "x", "1.0", &["y"]);
        write_simple_package(&catalog_dir, "y", "1.0", &["x"]);

        let catalog = scan(&catalog_dir);
        let store = DirStore::new(temp.path().join("active"));

        let outcome = enable(
            &set(&["x"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        )
        .unwrap();
        let activated: BTreeSet<String> =
            outcome.activated.iter().map(|r| r.name.clone()).collect();
        assert_eq!(activated, set(&["x", "y"]));
    }

    #[test]
    fn test_enable_failure_aborts_without_explicit_update() {
        let temp = TempDir::new().unwrap();
        let catalog_dir = temp.path().join("catalog");
        fs::create_dir_all(&catalog_dir).unwrap();
        write_simple_package(&catalog_dir, "a", "1.0", &[]);
        write_simple_package(&catalog_dir, "b", "1.0", &["a"]);

        let catalog = scan(&catalog_dir);
        // Break b's backing file so its copy fails mid-run.
        fs::remove_file(catalog_dir.join("b.tar.gz")).unwrap();

        let store = DirStore::new(temp.path().join("active"));
        let result = enable(
            &set(&["b"]),
            &catalog,
            &BTreeSet::new(),
            &Catalog::default(),
            &store,
        );
        assert!(result.is_err());
    }
}
