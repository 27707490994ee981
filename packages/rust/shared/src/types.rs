//! Core domain types for seoforge articles, keywords, and posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text;

// ---------------------------------------------------------------------------
// KeywordMetrics
// ---------------------------------------------------------------------------

/// Externally-supplied metrics for a keyword candidate.
///
/// Values are immutable once scored by the metrics provider. Out-of-domain
/// values (e.g. difficulty above 100) are the provider's contract to
/// prevent; no clamping happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetrics {
    /// Estimated monthly search volume.
    #[serde(default)]
    pub search_volume: u32,
    /// Keyword difficulty score, 0 (easy) to 100 (hard).
    #[serde(default)]
    pub difficulty: f64,
    /// Cost per click in USD.
    #[serde(default)]
    pub cpc: f64,
    /// Competition level, 0 to 1.
    #[serde(default)]
    pub competition: f64,
    /// Competition level category ("LOW", "MEDIUM", "HIGH", or empty).
    #[serde(default)]
    pub competition_level: String,
}

impl KeywordMetrics {
    /// Map a categorical competition level to its numeric equivalent.
    ///
    /// Providers sometimes return only the category; this is the fallback
    /// used when the numeric field is absent.
    pub fn competition_from_level(level: &str) -> f64 {
        match level.to_ascii_uppercase().as_str() {
            "LOW" => 0.25,
            "MEDIUM" => 0.5,
            "HIGH" => 0.75,
            _ => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Keyword
// ---------------------------------------------------------------------------

/// A keyword candidate for SEO targeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// The keyword phrase.
    pub text: String,
    /// Provider-supplied metrics.
    #[serde(default)]
    pub metrics: KeywordMetrics,
    /// Where the keyword came from (e.g. "suggested", "provider").
    #[serde(default = "default_keyword_source")]
    pub source: String,
    /// Whether this is the primary keyword of an article.
    #[serde(default)]
    pub is_primary: bool,
}

fn default_keyword_source() -> String {
    "suggested".into()
}

impl Keyword {
    /// Create a keyword with the given phrase and metrics.
    pub fn new(text: impl Into<String>, metrics: KeywordMetrics) -> Self {
        Self {
            text: text.into(),
            metrics,
            source: default_keyword_source(),
            is_primary: false,
        }
    }

    /// Check whether the keyword meets the given quality thresholds.
    /// Both bounds are inclusive.
    pub fn qualifies(&self, min_volume: u32, max_difficulty: f64) -> bool {
        self.metrics.search_volume >= min_volume && self.metrics.difficulty <= max_difficulty
    }
}

/// A keyword with its derived ranking score attached.
///
/// `score = search_volume / (difficulty + 1)`; the `+ 1` keeps
/// zero-difficulty keywords scoring by raw volume instead of dividing
/// by zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedKeyword {
    pub keyword: Keyword,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// KeywordGroup
// ---------------------------------------------------------------------------

/// A group of related keywords selected for one article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// The primary target keyword.
    pub primary: Keyword,
    /// Supporting keywords.
    #[serde(default)]
    pub secondary: Vec<Keyword>,
    /// Associated topic/title, if any.
    #[serde(default)]
    pub topic: String,
}

impl KeywordGroup {
    /// All keyword phrases in the group, primary first.
    pub fn keyword_strings(&self) -> Vec<String> {
        std::iter::once(self.primary.text.clone())
            .chain(self.secondary.iter().map(|k| k.text.clone()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// ExistingPost
// ---------------------------------------------------------------------------

/// An already-published post, used as the cross-linking reference corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingPost {
    /// Post title.
    pub title: String,
    /// Full URL to the post.
    pub url: String,
    /// Post category.
    #[serde(default)]
    pub category: String,
    /// Post tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ExistingPost {
    /// Extract the slug (last path segment) from the post URL.
    pub fn slug(&self) -> String {
        let path = url::Url::parse(&self.url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| self.url.clone());

        path.trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or("")
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Article
// ---------------------------------------------------------------------------

/// Metadata for a generated article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleMeta {
    /// Article title (H1).
    pub title: String,
    /// SEO meta description (150-160 chars).
    #[serde(default)]
    pub meta_description: String,
    /// Primary target keyword.
    pub primary_keyword: String,
    /// Secondary target keywords.
    #[serde(default)]
    pub secondary_keywords: Vec<String>,
    /// Search intent type.
    #[serde(default = "default_search_intent")]
    pub search_intent: String,
    /// Article author.
    #[serde(default)]
    pub author: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Article word count.
    #[serde(default)]
    pub word_count: usize,
    /// Estimated reading time.
    #[serde(default)]
    pub reading_time_minutes: usize,
}

fn default_search_intent() -> String {
    "informational".into()
}

impl ArticleMeta {
    /// Generate the URL slug from the title.
    pub fn slug(&self) -> String {
        text::slugify(&self.title)
    }
}

/// A link inserted into an article body, pointing at an existing post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalLink {
    /// Title of the destination post.
    pub title: String,
    /// Destination URL.
    pub url: String,
    /// The visible anchor text, with the casing found in the body.
    pub anchor_text: String,
}

/// A complete generated article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub meta: ArticleMeta,
    /// Full article body in Markdown.
    pub content: String,
    /// Internal links added by the cross-linker, in insertion order.
    #[serde(default)]
    pub internal_links: Vec<InternalLink>,
}

impl Article {
    /// Create an article with no links attached yet.
    pub fn new(meta: ArticleMeta, content: impl Into<String>) -> Self {
        Self {
            meta,
            content: content.into(),
            internal_links: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
