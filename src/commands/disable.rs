//! Disable command - withdraw explicit-enable intent.
//!
//! Disable itself touches no files; the chained prune removes whatever the
//! smaller explicit set no longer reaches.

use std::collections::BTreeSet;

use super::{prune::chain_prune, warn_all, Env};
use crate::cli_output;
use crate::error::PlugmanResult;
use crate::reconcile;
use crate::state;

pub fn run_disable(env: &Env, names: Vec<String>) -> PlugmanResult<()> {
    let requested: BTreeSet<String> = names.into_iter().collect();

    let (catalog, warnings) = env.catalog();
    warn_all(&warnings);
    let (active, active_warnings) = env.active();
    warn_all(&active_warnings);
    let explicit = env.explicit()?;

    let outcome = reconcile::disable(&requested, &active, &explicit);

    for name in &outcome.missing {
        cli_output::warn(&format!("plugin '{}' is not active", name));
    }

    if outcome.removed.is_empty() {
        cli_output::info("no plugins to disable");
    } else {
        for name in &outcome.removed {
            cli_output::success(&format!("disabled {}", name));
        }
    }

    state::save(&env.state_dir(), &outcome.explicit)?;
    chain_prune(env, &catalog, &outcome.explicit)
}
