//! Hierarchical resolution of module cards against the canonical catalog.
//!
//! Pilots: faction → ship → name. Upgrades: category → name. Each stage is
//! either an override hit (score 1.0, fuzzy scoring skipped) or a best match
//! over the candidates left by the previous stage.

use regex::Regex;
use std::sync::LazyLock;

use super::index::CandidateIndex;
use super::normalizer::normalize_name;
use super::overrides::OverrideTable;
use super::similarity::cosine_similarity;
use super::types::{
    CanonicalCard, CardKind, Faction, MatchResult, MatchSource, ModuleCard, NameMatch, Stage,
    StageOutcome,
};
use crate::types::errors::ResolveError;

static RE_SCUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)scum").expect("Invalid regex"));
static RE_IMPERIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)imperial").expect("Invalid regex"));
static RE_REBEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)rebel").expect("Invalid regex"));

/// Classify a module faction label. Checked in order scum, imperial, rebel.
pub fn derive_faction(label: &str) -> Option<Faction> {
    if RE_SCUM.is_match(label) {
        Some(Faction::Scum)
    } else if RE_IMPERIAL.is_match(label) {
        Some(Faction::Imperial)
    } else if RE_REBEL.is_match(label) {
        Some(Faction::Rebels)
    } else {
        None
    }
}

/// Best fuzzy match of `target` among `candidates`.
///
/// Candidates are normalized before scoring but returned verbatim. Ties keep
/// the earliest candidate; an empty candidate list yields score `-1`.
pub fn best_match<'c, I>(target: &str, candidates: I) -> NameMatch
where
    I: IntoIterator<Item = &'c str>,
{
    let mut best = NameMatch::none();
    for candidate in candidates {
        let score = cosine_similarity(&normalize_name(candidate), target);
        if score > best.score {
            best = NameMatch {
                name: Some(candidate.to_string()),
                score,
                source: MatchSource::Fuzzy,
            };
        }
    }
    best
}

/// Resolves module cards using shared, read-only catalog state.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a CandidateIndex,
    overrides: &'a OverrideTable,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a CandidateIndex, overrides: &'a OverrideTable) -> Self {
        Self { index, overrides }
    }

    pub fn resolve(&self, card: &ModuleCard) -> Result<MatchResult, ResolveError> {
        match &card.kind {
            CardKind::Pilot {
                faction,
                ship,
                name,
            } => self.resolve_pilot(faction, ship, name),
            CardKind::Upgrade { category, name } => Ok(self.resolve_upgrade(category, name)),
        }
    }

    pub fn resolve_pilot(
        &self,
        faction_label: &str,
        ship_label: &str,
        name_label: &str,
    ) -> Result<MatchResult, ResolveError> {
        let faction = derive_faction(faction_label).ok_or_else(|| ResolveError::UnknownFaction {
            label: faction_label.to_string(),
        })?;

        // Ships filed by variant keep each variant in a folder named after it
        let ship_target = if self.overrides.is_filed_by_variant(&normalize_name(ship_label)) {
            normalize_name(name_label)
        } else {
            normalize_name(ship_label)
        };
        let ship = self.match_ship(faction, &ship_target);
        let mut stages = vec![StageOutcome::new(Stage::Ship, &ship_target, &ship)];

        let candidates = match &ship.name {
            Some(ship_name) => self.index.pilots_for(faction.folder_name(), ship_name),
            None => Vec::new(),
        };

        let name_target = normalize_name(name_label);
        let (name, matched) = self.match_name(&name_target, &candidates);
        stages.push(StageOutcome::new(Stage::Name, &name_target, &name));

        Ok(MatchResult {
            matched,
            score: name.score,
            stages,
        })
    }

    pub fn resolve_upgrade(&self, category_label: &str, name_label: &str) -> MatchResult {
        let category_target = normalize_name(category_label);
        let category = self.match_upgrade_category(&category_target);
        let mut stages = vec![StageOutcome::new(
            Stage::UpgradeCategory,
            &category_target,
            &category,
        )];

        let candidates = match &category.name {
            Some(category_name) => self.index.upgrades_for(category_name),
            None => Vec::new(),
        };

        let name_target = normalize_name(name_label);
        let (name, matched) = self.match_name(&name_target, &candidates);
        stages.push(StageOutcome::new(Stage::Name, &name_target, &name));

        MatchResult {
            matched,
            score: name.score,
            stages,
        }
    }

    /// Ship stage for an already-normalized ship label.
    pub fn match_ship(&self, faction: Faction, normalized_ship: &str) -> NameMatch {
        if let Some(target) = self.overrides.lookup_ship(normalized_ship) {
            return NameMatch::overridden(target);
        }
        let ships = self.index.pilot_ships_for(faction.folder_name());
        best_match(normalized_ship, ships.iter().map(String::as_str))
    }

    /// Category stage for an already-normalized category label.
    pub fn match_upgrade_category(&self, normalized_category: &str) -> NameMatch {
        if let Some(target) = self.overrides.lookup_upgrade_category(normalized_category) {
            return NameMatch::overridden(target);
        }
        let categories = self.index.upgrade_categories_all();
        best_match(normalized_category, categories.iter().map(String::as_str))
    }

    /// Name stage: override or fuzzy over the distinct names of the narrowed
    /// set, then the first card carrying the winning name.
    fn match_name(
        &self,
        normalized_name: &str,
        candidates: &[&CanonicalCard],
    ) -> (NameMatch, Option<CanonicalCard>) {
        let found = match self.overrides.lookup_name(normalized_name) {
            Some(target) => NameMatch::overridden(target),
            None => {
                let mut names: Vec<&str> = Vec::with_capacity(candidates.len());
                for card in candidates {
                    if !names.contains(&card.name()) {
                        names.push(card.name());
                    }
                }
                best_match(normalized_name, names)
            }
        };

        let matched = found.name.as_deref().and_then(|winner| {
            candidates
                .iter()
                .find(|card| card.name() == winner)
                .map(|card| (*card).clone())
        });

        (found, matched)
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
