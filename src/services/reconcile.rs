//! Reconciles every module card against the catalog.
//!
//! Resolution is pure and runs on the rayon pool over shared read-only
//! state. Decisions, prompts and copies then run one card at a time in
//! module order, so at most one prompt is ever pending.

use rayon::prelude::*;

use crate::services::interact::{Confirmer, ImageCopier};
use crate::services::matcher::{
    decide, CandidateIndex, MatchResult, ModuleCard, OverrideTable, Resolver, SkipReason, Verdict,
};
use crate::services::report::{CardOutcome, OutcomeStatus};
use crate::services::vmod::is_excluded;
use crate::types::errors::{ApplyError, ResolveError};

pub fn reconcile_cards(
    cards: &[ModuleCard],
    index: &CandidateIndex,
    overrides: &OverrideTable,
    confirmer: &mut dyn Confirmer,
    copier: &dyn ImageCopier,
) -> Vec<CardOutcome> {
    let resolver = Resolver::new(index, overrides);

    // None marks an excluded card
    let resolutions: Vec<Option<Result<MatchResult, ResolveError>>> = cards
        .par_iter()
        .map(|card| (!is_excluded(card.name())).then(|| resolver.resolve(card)))
        .collect();

    cards
        .iter()
        .zip(resolutions)
        .map(|(card, resolution)| match resolution {
            None => {
                log::info!("Excluded: {card}");
                CardOutcome::new(card, OutcomeStatus::Excluded)
            }
            Some(Err(ResolveError::UnknownFaction { label })) => {
                log::warn!("Skipping {card}: unrecognised faction '{label}'");
                CardOutcome::new(
                    card,
                    OutcomeStatus::Skipped {
                        reason: SkipReason::UnknownFaction { label },
                    },
                )
            }
            Some(Ok(result)) => settle_card(card, &result, confirmer, copier),
        })
        .collect()
}

fn settle_card(
    card: &ModuleCard,
    result: &MatchResult,
    confirmer: &mut dyn Confirmer,
    copier: &dyn ImageCopier,
) -> CardOutcome {
    let verdict = decide(card, result).settle(confirmer);
    let outcome = |status| CardOutcome::new(card, status);

    match verdict {
        Verdict::Apply { matched, confirmed } => {
            let applied = outcome(match copy_image(copier, &matched.image_path, card) {
                Ok(()) if confirmed => OutcomeStatus::Confirmed,
                Ok(()) => OutcomeStatus::AutoApplied,
                Err(e) => {
                    log::warn!("{e}");
                    OutcomeStatus::Failed {
                        error: e.to_string(),
                    }
                }
            });
            log::debug!("{card} -> {matched} ({:.3})", result.score);
            applied.with_match(result.score, Some(&matched.image_path))
        }
        Verdict::Declined(matched) => {
            log::info!("Declined {card} -> {matched}");
            outcome(OutcomeStatus::Declined).with_match(result.score, Some(&matched.image_path))
        }
        Verdict::Skipped(reason) => {
            log::warn!("Skipping {card}: {reason}");
            outcome(OutcomeStatus::Skipped { reason }).with_match(result.score, None)
        }
    }
}

fn copy_image(
    copier: &dyn ImageCopier,
    source_path: &str,
    card: &ModuleCard,
) -> Result<(), ApplyError> {
    copier
        .copy(source_path, &card.target_path)
        .map_err(|cause| ApplyError {
            source_path: source_path.to_string(),
            target_path: card.target_path.clone(),
            cause,
        })
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
