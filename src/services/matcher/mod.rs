//! Card matcher: maps module cards onto canonical catalog images.
//!
//! Normalizes labels, narrows candidates hierarchically (faction → ship or
//! upgrade category → name), scores with bigram cosine similarity, and lets
//! curated overrides short-circuit any stage.
pub mod index;
pub mod normalizer;
pub mod overrides;
pub mod policy;
pub mod resolver;
pub mod similarity;
pub mod types;

pub use index::CandidateIndex;
pub use normalizer::normalize_name;
pub use overrides::OverrideTable;
pub use policy::{decide, Decision, SkipReason, Verdict};
pub use resolver::{best_match, derive_faction, Resolver};
pub use similarity::cosine_similarity;
pub use types::{
    CanonicalCard, CardKind, Faction, MatchResult, ModuleCard, NameMatch, Stage, CERTAIN,
    NO_CANDIDATES,
};
