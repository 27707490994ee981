//! Token-set similarity scoring.
//!
//! The score is an order-independent overlap ratio between the normalized
//! word sets of two strings, scaled 0-100:
//! `|A ∩ B| / |A ∪ B| * 100`. Tokens are lowercased and split on
//! non-alphanumeric characters, so casing, punctuation, and word order
//! never affect the score.

use std::collections::BTreeSet;

/// Split a string into its set of normalized tokens.
fn tokens(s: &str) -> BTreeSet<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

/// Token-set similarity between two strings, 0-100.
///
/// Two empty-token inputs compare as identical (100).
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let ta = tokens(a);
    let tb = tokens(b);

    if ta.is_empty() && tb.is_empty() {
        return 100.0;
    }

    let inter = ta.intersection(&tb).count() as f64;
    let union = ta.union(&tb).count() as f64;
    if union == 0.0 { 0.0 } else { inter / union * 100.0 }
}
