//! Prune command - remove active plugins unreachable from the explicit set.

use std::collections::BTreeSet;

use super::{warn_all, Env};
use crate::catalog::Catalog;
use crate::cli_output;
use crate::error::PlugmanResult;
use crate::reconcile;

pub fn run_prune(env: &Env) -> PlugmanResult<()> {
    let (catalog, warnings) = env.catalog();
    warn_all(&warnings);
    let explicit = env.explicit()?;
    chain_prune(env, &catalog, &explicit)
}

/// Prune against a fresh scan of the active directory. Shared tail of the
/// enable and disable flows.
pub(super) fn chain_prune(
    env: &Env,
    catalog: &Catalog,
    explicit: &BTreeSet<String>,
) -> PlugmanResult<()> {
    let (active, warnings) = env.active();
    warn_all(&warnings);

    let outcome = reconcile::prune(catalog, explicit, &active, &env.store())?;

    if outcome.deactivated.is_empty() {
        cli_output::hint("nothing to prune");
    } else {
        for record in &outcome.deactivated {
            cli_output::info(&format!("pruned {} v{}", record.name, record.version));
        }
    }
    Ok(())
}
