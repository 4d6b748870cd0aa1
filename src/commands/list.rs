//! List command - show catalog entries with activation-status glyphs.

use super::{warn_all, Env};
use crate::cli_output;
use crate::error::PlugmanResult;
use crate::report;

pub fn run_list(env: &Env, pattern: Option<String>, compact: bool) -> PlugmanResult<()> {
    let (catalog, warnings) = env.catalog();
    warn_all(&warnings);
    let (active, active_warnings) = env.active();
    warn_all(&active_warnings);
    let explicit = env.explicit()?;

    let regex = match pattern {
        Some(p) => Some(report::compile_pattern(&p)?),
        None => None,
    };

    if catalog.is_empty() {
        cli_output::warn("no plugins in catalog");
        cli_output::hint("drop .tar.gz packages into the catalog directory");
        return Ok(());
    }

    let lines = report::render(
        &catalog,
        &active.names(),
        &explicit,
        regex.as_ref(),
        compact,
    );

    if lines.is_empty() {
        cli_output::warn("no plugins match the pattern");
        return Ok(());
    }

    cli_output::header(&format!("Plugins ({})", catalog.len()));
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
