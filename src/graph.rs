//! Dependency graph construction and reachability queries.
//!
//! Built fresh from a catalog per query, never persisted. Cycles are
//! tolerated: closure is plain reachability, not a topological ordering,
//! so a cyclic dependency declaration is not an error at this layer.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::catalog::Catalog;

/// Direction in which edges are laid down when building the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Edge A -> B means "A requires B" (dependencies-of queries)
    Forward,

    /// Edge B -> A means "A requires B" (dependents-of queries)
    Reverse,
}

/// Directed graph over the plugin names of one catalog.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Build a graph from the catalog's declared dependencies.
    ///
    /// Every catalog name becomes a node even when it has no edges, so
    /// closure queries starting from any catalog member succeed. A
    /// dependency reference to a name absent from the catalog creates no
    /// edge; the catalog is the universe of nodes.
    pub fn build(catalog: &Catalog, direction: EdgeDirection) -> Self {
        let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for record in catalog.iter() {
            edges.entry(record.name.clone()).or_default();
        }

        for record in catalog.iter() {
            for dep in &record.dependencies {
                if !catalog.contains(dep) {
                    log::debug!(
                        "graph: {} depends on '{}', not in catalog, skipping edge",
                        record.name,
                        dep
                    );
                    continue;
                }
                let (from, to) = match direction {
                    EdgeDirection::Forward => (record.name.as_str(), dep.as_str()),
                    EdgeDirection::Reverse => (dep.as_str(), record.name.as_str()),
                };
                edges
                    .entry(from.to_string())
                    .or_default()
                    .push(to.to_string());
            }
        }

        Self { edges }
    }

    /// All nodes reachable from any seed, inclusive of the seeds themselves.
    ///
    /// Every seed is part of the result, even one that is not a graph node;
    /// such a seed just has no edges to follow. Keeping it matters to prune:
    /// an explicitly-enabled plugin whose archive vanished from the catalog
    /// must still count as required. BFS with a visited set, so cyclic
    /// graphs terminate.
    pub fn reachable<'a>(&self, seeds: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        for seed in seeds {
            if visited.insert(seed.clone()) && self.edges.contains_key(seed.as_str()) {
                queue.push_back(seed.as_str());
            }
        }

        while let Some(node) = queue.pop_front() {
            if let Some(nexts) = self.edges.get(node) {
                for next in nexts {
                    if visited.insert(next.clone()) {
                        queue.push_back(next.as_str());
                    }
                }
            }
        }

        visited
    }
}
