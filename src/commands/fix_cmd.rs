//! The `imagefix` run: sync, load, reconcile, repack, report.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::services::catalog::{self, load_card_images};
use crate::services::config::{load_overrides, RunConfig};
use crate::services::interact::{Confirmer, FsImageCopier};
use crate::services::matcher::CandidateIndex;
use crate::services::reconcile::reconcile_cards;
use crate::services::report::RunReport;
use crate::services::vmod::ModuleWorkspace;

/// Repair the module named by `config`, asking `confirmer` about uncertain
/// matches and about overwriting an existing output file.
///
/// Per-card problems end up in the report. Only setup failures (override
/// file, image database, unreadable module, repack) are errors.
pub fn run_fix(config: &RunConfig, confirmer: &mut dyn Confirmer) -> Result<RunReport> {
    if config.offline {
        log::info!("Offline: using image database at {}", config.image_db.display());
    } else {
        refresh_image_db(config)?;
    }

    let overrides = load_overrides(&config.overrides_path)?;
    let catalog = load_card_images(&config.image_db)
        .with_context(|| format!("Loading image database {}", config.image_db.display()))?;
    let index = CandidateIndex::build(catalog);

    let workspace = ModuleWorkspace::extract(&config.module_path)
        .with_context(|| format!("Opening module {}", config.module_path.display()))?;
    let cards = workspace.cards()?;

    let copier = FsImageCopier::new(&config.image_db, workspace.path());
    let outcomes = reconcile_cards(&cards, &index, &overrides, confirmer, &copier);
    let mut report = RunReport::new(&config.module_path, outcomes);

    let output = config.output_path();
    if report.applied_count() == 0 {
        log::info!("No images changed, not writing {}", output.display());
    } else if confirm_output(&output, confirmer) {
        workspace
            .repack(&output)
            .with_context(|| format!("Writing module {}", output.display()))?;
        report.output = Some(output);
    } else {
        log::warn!("Kept existing {}, repaired module discarded", output.display());
    }

    if let Some(path) = &config.report_path {
        report
            .write_json(path)
            .with_context(|| format!("Writing report {}", path.display()))?;
    }

    Ok(report)
}

/// A failed sync is only fatal when there is no local copy to fall back on.
fn refresh_image_db(config: &RunConfig) -> Result<()> {
    match catalog::sync_image_db(&config.image_db, &config.source) {
        Ok(_) => Ok(()),
        Err(e) if config.image_db.join("images").is_dir() => {
            log::warn!("Image database sync failed, using local copy: {e}");
            Ok(())
        }
        Err(e) => bail!("No local image database and sync failed: {e}"),
    }
}

fn confirm_output(output: &Path, confirmer: &mut dyn Confirmer) -> bool {
    !output.exists()
        || confirmer.confirm(&format!("{} already exists. Overwrite?", output.display()))
}

#[cfg(test)]
#[path = "tests/fix_cmd_tests.rs"]
mod tests;
