//! fix command - Validate and rename every YAML file under the root

use anyhow::{Context as _, Result};

use super::context_for;
use crate::cli::args::TreeArgs;
use crate::engine::{self, PlanStep};
use crate::ui::output::{self, Verbosity};

/// Validate every YAML file and rename it to match its content.
pub fn fix(tree: &TreeArgs, dry_run: bool, verbosity: Verbosity) -> Result<()> {
    let mut ctx = context_for(tree)?;
    ctx.dry_run = dry_run;
    if ctx.policy.bumps_version() && !dry_run {
        output::warn(
            "versioned policy bumps the patch version of every file on every run",
            verbosity,
        );
    }

    let report = engine::run(&ctx)
        .with_context(|| format!("Failed to process '{}'", ctx.root.display()))?;
    let plan = &report.plan;

    if dry_run {
        output::print(plan.preview(), verbosity);
        return Ok(());
    }

    for file in plan.changed() {
        for step in &file.steps {
            let line = match step {
                PlanStep::Rename { from, to } => format!(
                    "Renamed {} -> {}",
                    output::format_path(&plan.root, from),
                    output::format_path(&plan.root, to)
                ),
                PlanStep::RewriteVersion {
                    to,
                    old_version,
                    new_version,
                    ..
                } => format!(
                    "Bumped {} {} -> {}",
                    output::format_path(&plan.root, to),
                    old_version,
                    new_version
                ),
            };
            output::print(line, verbosity);
        }
    }

    output::print(
        format!(
            "Processed {} file(s), changed {}.",
            plan.files().len(),
            plan.changed_count()
        ),
        verbosity,
    );

    Ok(())
}
