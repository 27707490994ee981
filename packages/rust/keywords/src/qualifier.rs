//! Keyword qualification and ranking.
//!
//! Reduces a noisy candidate list to a small, prioritized set an editor or
//! generator can act on. Both operations are pure: filtering against
//! inclusive volume/difficulty thresholds, and ranking by a composite
//! `volume / (difficulty + 1)` score with a stable descending sort.

use std::cmp::Ordering;

use tracing::debug;

use seoforge_shared::{Keyword, KeywordGroup, QualifiedKeyword, Result, SeoForgeError};

/// Filters and ranks keyword candidates against configured thresholds.
#[derive(Debug, Clone)]
pub struct KeywordQualifier {
    min_volume: u32,
    max_difficulty: f64,
}

impl KeywordQualifier {
    /// Create a qualifier, validating the threshold domain.
    ///
    /// `max_difficulty` must be finite and within `[0, 100]`; anything else
    /// is a caller precondition violation reported as
    /// [`SeoForgeError::InvalidThreshold`].
    pub fn new(min_volume: u32, max_difficulty: f64) -> Result<Self> {
        if !max_difficulty.is_finite() || !(0.0..=100.0).contains(&max_difficulty) {
            return Err(SeoForgeError::invalid_threshold(format!(
                "max_difficulty {max_difficulty} outside [0, 100]"
            )));
        }

        Ok(Self {
            min_volume,
            max_difficulty,
        })
    }

    /// Minimum search volume for a candidate to pass.
    pub fn min_volume(&self) -> u32 {
        self.min_volume
    }

    /// Maximum keyword difficulty for a candidate to pass.
    pub fn max_difficulty(&self) -> f64 {
        self.max_difficulty
    }

    /// Keep candidates with `search_volume >= min_volume` and
    /// `difficulty <= max_difficulty`. Both bounds inclusive.
    ///
    /// Pure and total over the documented input domain: empty in, empty
    /// out. Values outside the domain (the provider's contract) are not
    /// clamped here.
    pub fn filter(&self, candidates: &[Keyword]) -> Vec<Keyword> {
        let passed: Vec<Keyword> = candidates
            .iter()
            .filter(|kw| kw.qualifies(self.min_volume, self.max_difficulty))
            .cloned()
            .collect();

        debug!(
            candidates = candidates.len(),
            passed = passed.len(),
            min_volume = self.min_volume,
            max_difficulty = self.max_difficulty,
            "filtered keyword candidates"
        );

        passed
    }
}

/// Attach a ranking score to every candidate and sort best-first.
///
/// `score = search_volume / (difficulty + 1)`, so a zero-difficulty
/// keyword scores its raw volume. The sort is stable: equal scores keep
/// their relative input order, making the output reproducible.
///
/// Ranking is independent of qualification; callers may rank an
/// unfiltered set.
pub fn rank(candidates: &[Keyword]) -> Vec<QualifiedKeyword> {
    let mut scored: Vec<QualifiedKeyword> = candidates
        .iter()
        .map(|kw| QualifiedKeyword {
            score: score(kw),
            keyword: kw.clone(),
        })
        .collect();

    // Vec::sort_by is stable; reversed operands give descending order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

/// The composite ranking score for one keyword.
fn score(kw: &Keyword) -> f64 {
    f64::from(kw.metrics.search_volume) / (kw.metrics.difficulty + 1.0)
}

/// Build a keyword group for an article, marking the primary.
pub fn group(mut primary: Keyword, secondary: Vec<Keyword>, topic: impl Into<String>) -> KeywordGroup {
    primary.is_primary = true;
    KeywordGroup {
        primary,
        secondary,
        topic: topic.into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use seoforge_shared::KeywordMetrics;

    fn kw(text: &str, volume: u32, difficulty: f64) -> Keyword {
        Keyword::new(
            text,
            KeywordMetrics {
                search_volume: volume,
                difficulty,
                ..Default::default()
            },
        )
    }

    #[test]
    fn new_rejects_out_of_domain_difficulty() {
        assert!(KeywordQualifier::new(0, -0.1).is_err());
        assert!(KeywordQualifier::new(0, 100.1).is_err());
        assert!(KeywordQualifier::new(0, f64::NAN).is_err());
        assert!(KeywordQualifier::new(0, 0.0).is_ok());
        assert!(KeywordQualifier::new(0, 100.0).is_ok());
    }

    #[test]
    fn filter_applies_inclusive_bounds() {
        let q = KeywordQualifier::new(5000, 30.0).unwrap();
        let candidates = vec![
            kw("a", 6000, 20.0),
            kw("b", 3000, 20.0), // fails volume
            kw("c", 5000, 30.0), // exactly on both bounds
            kw("d", 9000, 30.1), // fails difficulty
        ];

        let passed = q.filter(&candidates);
        let texts: Vec<&str> = passed.iter().map(|k| k.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[test]
    fn filter_empty_in_empty_out() {
        let q = KeywordQualifier::new(5000, 30.0).unwrap();
        assert!(q.filter(&[]).is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let q = KeywordQualifier::new(2000, 50.0).unwrap();
        let candidates = vec![kw("a", 6000, 20.0), kw("b", 1000, 20.0), kw("c", 2000, 50.0)];

        let once = q.filter(&candidates);
        let twice = q.filter(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_is_monotonic_under_widened_thresholds() {
        let narrow = KeywordQualifier::new(5000, 30.0).unwrap();
        let wide = KeywordQualifier::new(1000, 60.0).unwrap();
        let candidates = vec![
            kw("a", 6000, 20.0),
            kw("b", 3000, 20.0),
            kw("c", 5500, 45.0),
            kw("d", 500, 80.0),
        ];

        let narrow_pass = narrow.filter(&candidates);
        let wide_pass = wide.filter(&candidates);

        for k in &narrow_pass {
            assert!(wide_pass.contains(k), "widening dropped {}", k.text);
        }
    }

    #[test]
    fn rank_is_a_stable_permutation() {
        let candidates = vec![
            kw("first", 4000, 19.0),  // score 200
            kw("second", 2000, 9.0),  // score 200, ties with first
            kw("third", 9000, 29.0),  // score 300
        ];

        let ranked = rank(&candidates);
        assert_eq!(ranked.len(), candidates.len());

        let texts: Vec<&str> = ranked.iter().map(|q| q.keyword.text.as_str()).collect();
        // third wins, then the tied pair in input order
        assert_eq!(texts, vec!["third", "first", "second"]);
    }

    #[test]
    fn rank_zero_difficulty_scores_raw_volume() {
        let ranked = rank(&[kw("x", 1000, 0.0)]);
        assert_eq!(ranked[0].score, 1000.0);
    }

    #[test]
    fn rank_favors_volume_over_low_difficulty() {
        // score(x) = 1000 / 1 = 1000; score(y) = 2000 / 10 = 200
        let ranked = rank(&[kw("x", 1000, 0.0), kw("y", 2000, 9.0)]);
        let texts: Vec<&str> = ranked.iter().map(|q| q.keyword.text.as_str()).collect();
        assert_eq!(texts, vec!["x", "y"]);
    }

    #[test]
    fn rank_does_not_refilter() {
        // A candidate that would fail any sensible threshold still ranks.
        let ranked = rank(&[kw("weak", 10, 99.0)]);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn group_marks_primary() {
        let g = group(
            kw("main keyword", 5000, 10.0),
            vec![kw("secondary", 2000, 15.0)],
            "Test Topic",
        );
        assert!(g.primary.is_primary);
        assert_eq!(g.keyword_strings(), vec!["main keyword", "secondary"]);
        assert_eq!(g.topic, "Test Topic");
    }
}
