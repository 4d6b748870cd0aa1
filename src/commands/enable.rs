//! Enable command - activate plugins and their transitive dependencies.

use std::collections::BTreeSet;

use super::{prune::chain_prune, warn_all, Env};
use crate::cli_output;
use crate::error::PlugmanResult;
use crate::reconcile;
use crate::state;

pub fn run_enable(env: &Env, names: Vec<String>) -> PlugmanResult<()> {
    let requested: BTreeSet<String> = names.into_iter().collect();

    let (catalog, warnings) = env.catalog();
    warn_all(&warnings);
    let (active, active_warnings) = env.active();
    warn_all(&active_warnings);
    let explicit = env.explicit()?;
    let store = env.store();

    let outcome = reconcile::enable(&requested, &catalog, &explicit, &active, &store)?;

    for name in &outcome.missing {
        cli_output::warn(&format!("plugin '{}' not found in catalog", name));
    }

    if outcome.activated.is_empty() {
        cli_output::info("no plugins to enable");
    } else {
        for record in &outcome.activated {
            cli_output::success(&format!("enabled {} v{}", record.name, record.version));
        }
    }

    // All activations succeeded; persist exactly once, then chain prune so
    // previously-auto-enabled plugins that lost their last dependent go away.
    state::save(&env.state_dir(), &outcome.explicit)?;
    chain_prune(env, &catalog, &outcome.explicit)
}
