//! Human-curated name overrides that bypass fuzzy matching.

use std::collections::{HashMap, HashSet};

use super::normalizer::normalize_name;

/// Ship labels whose catalog folders are filed by variant name by default.
pub const DEFAULT_VARIANT_SHIPS: &[&str] = &["CR90 Corvette"];

/// Three independent lookups keyed by normalized module label.
///
/// Pilot and upgrade names share the `names` namespace. Targets are
/// canonical names used verbatim; nothing guarantees they exist in the
/// catalog.
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    ships: HashMap<String, String>,
    upgrade_categories: HashMap<String, String>,
    names: HashMap<String, String>,
    variant_ships: HashSet<String>,
}

impl OverrideTable {
    /// Build a table, normalizing every key.
    pub fn new<S, U, N>(ships: S, upgrade_categories: U, names: N) -> Self
    where
        S: IntoIterator<Item = (String, String)>,
        U: IntoIterator<Item = (String, String)>,
        N: IntoIterator<Item = (String, String)>,
    {
        Self {
            ships: normalized_map("ship", ships),
            upgrade_categories: normalized_map("upgrade_type", upgrade_categories),
            names: normalized_map("name", names),
            variant_ships: variant_ships_default(),
        }
    }

    /// Replace the set of ship labels filed by variant name.
    pub fn with_variant_ships<I, T>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.variant_ships = labels
            .into_iter()
            .map(|label| normalize_name(label.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        self
    }

    pub fn lookup_ship(&self, normalized: &str) -> Option<&str> {
        self.ships.get(normalized).map(String::as_str)
    }

    pub fn lookup_upgrade_category(&self, normalized: &str) -> Option<&str> {
        self.upgrade_categories.get(normalized).map(String::as_str)
    }

    pub fn lookup_name(&self, normalized: &str) -> Option<&str> {
        self.names.get(normalized).map(String::as_str)
    }

    /// Whether the catalog files this ship's pilots under the pilot's own
    /// name instead of the ship name.
    pub fn is_filed_by_variant(&self, normalized_ship: &str) -> bool {
        self.variant_ships.contains(normalized_ship)
    }

    pub fn len(&self) -> usize {
        self.ships.len() + self.upgrade_categories.len() + self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn variant_ships_default() -> HashSet<String> {
    DEFAULT_VARIANT_SHIPS
        .iter()
        .map(|label| normalize_name(label))
        .collect()
}

fn normalized_map<I>(category: &str, entries: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut map = HashMap::new();
    for (key, target) in entries {
        let normalized = normalize_name(&key);
        if normalized.is_empty() {
            log::warn!("Ignoring {category} override with empty key '{key}'");
            continue;
        }
        if let Some(previous) = map.insert(normalized.clone(), target) {
            log::warn!(
                "Duplicate {category} override for '{normalized}', replacing '{previous}'"
            );
        }
    }
    map
}

#[cfg(test)]
#[path = "tests/overrides_tests.rs"]
mod tests;
