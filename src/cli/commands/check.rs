//! check command - Report what fix would change without changing it

use anyhow::{bail, Context as _, Result};
use serde::Serialize;

use super::context_for;
use crate::cli::args::TreeArgs;
use crate::engine::{self, Plan};
use crate::ui::output::{self, Verbosity};

/// JSON shape printed by `check --json`.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    clean: bool,
    digest: String,
    plan: &'a Plan,
}

/// Plan a full pass and fail if it would change anything.
pub fn check(tree: &TreeArgs, json: bool, verbosity: Verbosity) -> Result<()> {
    let mut ctx = context_for(tree)?;
    ctx.dry_run = true;

    let report = engine::run(&ctx)
        .with_context(|| format!("Check failed for '{}'", ctx.root.display()))?;
    let plan = &report.plan;

    if json {
        let out = CheckOutput {
            clean: plan.is_empty(),
            digest: plan.digest().context("Failed to compute plan digest")?,
            plan,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("Failed to serialize plan")?
        );
    } else {
        output::print(plan.preview(), verbosity);
    }

    if !plan.is_empty() {
        bail!(
            "{} file(s) need changes; run 'yamlnorm fix' to apply them",
            plan.changed_count()
        );
    }

    Ok(())
}
