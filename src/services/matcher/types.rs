//! Domain types for the card matcher.
//!
//! Contains: CardKind, CanonicalCard, ModuleCard, Faction, Stage,
//! MatchSource, NameMatch, StageOutcome, MatchResult.

use serde::{Deserialize, Serialize};

/// Score reported for overrides and exact matches.
pub const CERTAIN: f64 = 1.0;

/// Score reported when a stage had nothing to score against.
pub const NO_CANDIDATES: f64 = -1.0;

/// The kind-specific identity of a card.
///
/// Pilots are scoped by faction and ship, upgrades by category. Keeping them
/// as separate variants means an upgrade never has a faction to read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKind {
    Pilot {
        faction: String,
        ship: String,
        name: String,
    },
    Upgrade {
        category: String,
        name: String,
    },
}

impl CardKind {
    pub fn name(&self) -> &str {
        match self {
            CardKind::Pilot { name, .. } | CardKind::Upgrade { name, .. } => name,
        }
    }

    pub fn is_pilot(&self) -> bool {
        matches!(self, CardKind::Pilot { .. })
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardKind::Pilot {
                faction,
                ship,
                name,
            } => write!(f, "{faction}/{ship}/{name}"),
            CardKind::Upgrade { category, name } => write!(f, "{category}/{name}"),
        }
    }
}

/// One reference image from the canonical archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalCard {
    #[serde(flatten)]
    pub kind: CardKind,
    /// Locator of the image, relative to the image database root.
    pub image_path: String,
}

impl CanonicalCard {
    pub fn pilot(faction: &str, ship: &str, name: &str, image_path: &str) -> Self {
        Self {
            kind: CardKind::Pilot {
                faction: faction.to_string(),
                ship: ship.to_string(),
                name: name.to_string(),
            },
            image_path: image_path.to_string(),
        }
    }

    pub fn upgrade(category: &str, name: &str, image_path: &str) -> Self {
        Self {
            kind: CardKind::Upgrade {
                category: category.to_string(),
                name: name.to_string(),
            },
            image_path: image_path.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }
}

impl std::fmt::Display for CanonicalCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

/// One card slot inside the game module that needs an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCard {
    #[serde(flatten)]
    pub kind: CardKind,
    /// Image file name inside the module's `images/` folder.
    pub target_path: String,
}

impl ModuleCard {
    pub fn pilot(faction: &str, ship: &str, name: &str, target_path: &str) -> Self {
        Self {
            kind: CardKind::Pilot {
                faction: faction.to_string(),
                ship: ship.to_string(),
                name: name.to_string(),
            },
            target_path: target_path.to_string(),
        }
    }

    pub fn upgrade(category: &str, name: &str, target_path: &str) -> Self {
        Self {
            kind: CardKind::Upgrade {
                category: category.to_string(),
                name: name.to_string(),
            },
            target_path: target_path.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }
}

impl std::fmt::Display for ModuleCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.kind.fmt(f)
    }
}

/// The three factions the image archive files pilots under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Scum,
    Imperial,
    Rebels,
}

impl Faction {
    /// Folder name used by the image archive.
    pub fn folder_name(&self) -> &'static str {
        match self {
            Faction::Scum => "scum",
            Faction::Imperial => "imperial",
            Faction::Rebels => "rebels",
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// Which step of the hierarchical lookup produced a stage outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ship,
    UpgradeCategory,
    Name,
}

/// Where a stage's answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Override,
    Fuzzy,
}

/// Result of one best-match stage over plain names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    /// Winning candidate, verbatim as it appears in the catalog (or the
    /// override target).
    pub name: Option<String>,
    pub score: f64,
    pub source: MatchSource,
}

impl NameMatch {
    pub fn none() -> Self {
        Self {
            name: None,
            score: NO_CANDIDATES,
            source: MatchSource::Fuzzy,
        }
    }

    pub fn overridden(target: &str) -> Self {
        Self {
            name: Some(target.to_string()),
            score: CERTAIN,
            source: MatchSource::Override,
        }
    }
}

/// Trace entry for a single stage, kept for the end-of-run audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageOutcome {
    pub stage: Stage,
    /// Normalized label the stage searched for.
    pub target: String,
    pub resolved: Option<String>,
    pub score: f64,
    pub source: MatchSource,
}

impl StageOutcome {
    pub fn new(stage: Stage, target: &str, found: &NameMatch) -> Self {
        Self {
            stage,
            target: target.to_string(),
            resolved: found.name.clone(),
            score: found.score,
            source: found.source,
        }
    }
}

/// Final answer for one module card.
///
/// `score` is the name-stage score only: `1.0` is certain (override or
/// exact), `[0, 1)` is an uncertain fuzzy match, `-1.0` means the last stage
/// had no candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Option<CanonicalCard>,
    pub score: f64,
    pub stages: Vec<StageOutcome>,
}

impl MatchResult {
    pub fn is_certain(&self) -> bool {
        self.score == CERTAIN
    }

    pub fn has_no_candidates(&self) -> bool {
        self.score < 0.0
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages.iter().find(|outcome| outcome.stage == stage)
    }
}
