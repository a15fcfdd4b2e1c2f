//! Character-bigram cosine similarity.

use std::collections::BTreeMap;

/// Cosine similarity between the bigram multisets of two strings.
///
/// Returns a value in `[0, 1]`. Inputs are compared as given; callers that
/// want case/punctuation insensitivity normalize first.
///
/// Boundaries:
/// - identical strings (including two empty strings) score `1.0`
/// - an empty string against a non-empty one scores `0.0`
/// - a one-character string is treated as a single gram
///
/// Counts are integers and the dot product only visits shared grams, so the
/// result does not depend on argument order. The conventional order is
/// `(candidate, target)`.
pub fn cosine_similarity(candidate: &str, target: &str) -> f64 {
    if candidate == target {
        return 1.0;
    }

    let left = bigram_counts(candidate);
    let right = bigram_counts(target);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let dot: u64 = left
        .iter()
        .filter_map(|(gram, count)| right.get(gram).map(|other| count * other))
        .sum();
    if dot == 0 {
        return 0.0;
    }

    let left_norm: u64 = left.values().map(|count| count * count).sum();
    let right_norm: u64 = right.values().map(|count| count * count).sum();

    // sqrt(n * n) is exact for integer n, so equal multisets give exactly 1.0
    let denominator = ((left_norm * right_norm) as f64).sqrt();
    (dot as f64 / denominator).clamp(0.0, 1.0)
}

fn bigram_counts(text: &str) -> BTreeMap<(char, Option<char>), u64> {
    let chars: Vec<char> = text.chars().collect();
    let mut counts = BTreeMap::new();

    match chars.len() {
        0 => {}
        1 => {
            counts.insert((chars[0], None), 1);
        }
        _ => {
            for pair in chars.windows(2) {
                *counts.entry((pair[0], Some(pair[1]))).or_insert(0) += 1;
            }
        }
    }

    counts
}

#[cfg(test)]
#[path = "tests/similarity_tests.rs"]
mod tests;
