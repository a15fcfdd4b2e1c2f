//! Label normalization for card, ship and category names.

use deunicode::deunicode;
use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex for stripping everything but lowercase ASCII alphanumerics.
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").expect("Invalid regex"));

/// Reduce a label to its comparison key.
///
/// Pipeline:
/// 1. Transliterate non-Latin characters via deunicode (`é` → `e`)
/// 2. Lowercase
/// 3. Remove every non-alphanumeric character (no separator is inserted)
///
/// `"Luke Skywalker"`, `"luke_skywalker"` and `"Luke-Skywalker!"` all map to
/// `"lukeskywalker"`. Total and idempotent; empty input gives empty output.
pub fn normalize_name(label: &str) -> String {
    let latin = deunicode(label);
    RE_NON_ALNUM
        .replace_all(&latin.to_lowercase(), "")
        .into_owned()
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
