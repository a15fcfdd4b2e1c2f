//! Deterministic lookup structures over the canonical image catalog.

use std::collections::BTreeMap;

use super::types::{CanonicalCard, CardKind};

/// Positions into `CandidateIndex::cards`, in catalog load order.
pub type PostingList = Vec<usize>;

/// The canonical catalog, queryable by faction, ship and upgrade category.
///
/// Built once and read-only afterwards, so a shared reference can serve any
/// number of concurrent resolutions.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    cards: Vec<CanonicalCard>,
    /// faction -> distinct ship names, first-seen order.
    ships_by_faction: BTreeMap<String, Vec<String>>,
    /// Distinct upgrade categories, first-seen order.
    categories: Vec<String>,
    pilots: BTreeMap<(String, String), PostingList>,
    upgrades: BTreeMap<String, PostingList>,
}

impl CandidateIndex {
    pub fn build(cards: Vec<CanonicalCard>) -> Self {
        let mut ships_by_faction: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut categories: Vec<String> = Vec::new();
        let mut pilots: BTreeMap<(String, String), PostingList> = BTreeMap::new();
        let mut upgrades: BTreeMap<String, PostingList> = BTreeMap::new();

        for (position, card) in cards.iter().enumerate() {
            match &card.kind {
                CardKind::Pilot { faction, ship, .. } => {
                    let ships = ships_by_faction.entry(faction.clone()).or_default();
                    if !ships.contains(ship) {
                        ships.push(ship.clone());
                    }
                    pilots
                        .entry((faction.clone(), ship.clone()))
                        .or_default()
                        .push(position);
                }
                CardKind::Upgrade { category, .. } => {
                    if !categories.contains(category) {
                        categories.push(category.clone());
                    }
                    upgrades.entry(category.clone()).or_default().push(position);
                }
            }
        }

        log::debug!(
            "Indexed {} catalog cards: {} factions, {} upgrade categories",
            cards.len(),
            ships_by_faction.len(),
            categories.len()
        );

        Self {
            cards,
            ships_by_faction,
            categories,
            pilots,
            upgrades,
        }
    }

    /// Distinct ship names filed under `faction`.
    pub fn pilot_ships_for(&self, faction: &str) -> &[String] {
        self.ships_by_faction
            .get(faction)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct categories across every upgrade card.
    pub fn upgrade_categories_all(&self) -> &[String] {
        &self.categories
    }

    pub fn pilots_for(&self, faction: &str, ship: &str) -> Vec<&CanonicalCard> {
        self.pilots
            .get(&(faction.to_string(), ship.to_string()))
            .map(|posting| self.collect(posting))
            .unwrap_or_default()
    }

    pub fn upgrades_for(&self, category: &str) -> Vec<&CanonicalCard> {
        self.upgrades
            .get(category)
            .map(|posting| self.collect(posting))
            .unwrap_or_default()
    }

    pub fn cards(&self) -> &[CanonicalCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    fn collect(&self, posting: &PostingList) -> Vec<&CanonicalCard> {
        posting.iter().map(|&position| &self.cards[position]).collect()
    }
}

#[cfg(test)]
#[path = "tests/index_tests.rs"]
mod tests;
