//! Confidence policy: turns a match into auto-apply, ask, or skip.
//!
//! `decide` is pure. Only `Decision::settle` talks to a `Confirmer`, so the
//! resolver never blocks on a human.

use serde::Serialize;

use super::types::{CanonicalCard, MatchResult, ModuleCard, Stage, CERTAIN};
use crate::services::interact::Confirmer;

/// Why a card was not matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Faction label matched none of the known factions.
    UnknownFaction { label: String },
    /// A stage had nothing to score against.
    NoCandidates,
    /// An override named a card the catalog does not have.
    OverrideTargetMissing { target: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnknownFaction { label } => write!(f, "unknown faction '{label}'"),
            SkipReason::NoCandidates => write!(f, "no candidates"),
            SkipReason::OverrideTargetMissing { target } => {
                write!(f, "override target '{target}' not in catalog")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    AutoApply(CanonicalCard),
    Confirm {
        matched: CanonicalCard,
        prompt: String,
    },
    Skip(SkipReason),
}

/// What happened after any confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Apply {
        matched: CanonicalCard,
        confirmed: bool,
    },
    Declined(CanonicalCard),
    Skipped(SkipReason),
}

pub fn decide(card: &ModuleCard, result: &MatchResult) -> Decision {
    match &result.matched {
        Some(matched) if result.score == CERTAIN => Decision::AutoApply(matched.clone()),
        Some(matched) => Decision::Confirm {
            prompt: render_prompt(card, matched, result.score),
            matched: matched.clone(),
        },
        None if result.score == CERTAIN => {
            let target = result
                .stage(Stage::Name)
                .and_then(|stage| stage.resolved.clone())
                .unwrap_or_default();
            Decision::Skip(SkipReason::OverrideTargetMissing { target })
        }
        None => Decision::Skip(SkipReason::NoCandidates),
    }
}

/// Human-readable prompt for an uncertain match.
pub fn render_prompt(card: &ModuleCard, matched: &CanonicalCard, score: f64) -> String {
    format!("Low match found: {score:.3}: {card} -> {matched}")
}

impl Decision {
    pub fn settle(self, confirmer: &mut dyn Confirmer) -> Verdict {
        match self {
            Decision::AutoApply(matched) => Verdict::Apply {
                matched,
                confirmed: false,
            },
            Decision::Confirm { matched, prompt } => {
                if confirmer.confirm(&prompt) {
                    Verdict::Apply {
                        matched,
                        confirmed: true,
                    }
                } else {
                    Verdict::Declined(matched)
                }
            }
            Decision::Skip(reason) => Verdict::Skipped(reason),
        }
    }
}

#[cfg(test)]
#[path = "tests/policy_tests.rs"]
mod tests;
