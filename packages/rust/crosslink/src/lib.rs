//! Internal cross-linking for generated articles.
//!
//! Given an article and a corpus of existing posts, the [`CrossLinker`]
//! selects contextually relevant posts by token-set similarity and weaves
//! a bounded number of Markdown links into the article body. The whole
//! pass is pure CPU work over its arguments: no I/O, no shared state, and
//! safe to run concurrently from independent call sites.

mod anchors;
mod inserter;
pub mod similarity;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use seoforge_shared::{Article, ExistingPost, InternalLink, LinkingConfig};

use inserter::LinkInserter;

// ---------------------------------------------------------------------------
// CrossLinker
// ---------------------------------------------------------------------------

/// Inserts internal links into article bodies.
///
/// Link density is tied to article length: the target count is
/// `max(1, round(word_count / 1000 * links_per_1k_words))`.
#[derive(Debug, Clone)]
pub struct CrossLinker {
    /// Target internal links per 1000 words of body.
    pub links_per_1k_words: f64,
    /// Minimum token-set similarity (0-100) for a post to be a candidate.
    pub min_similarity: f64,
}

impl Default for CrossLinker {
    fn default() -> Self {
        Self {
            links_per_1k_words: 3.5,
            min_similarity: 60.0,
        }
    }
}

impl From<&LinkingConfig> for CrossLinker {
    fn from(config: &LinkingConfig) -> Self {
        Self {
            links_per_1k_words: config.links_per_1k_words,
            min_similarity: config.min_similarity,
        }
    }
}

impl CrossLinker {
    /// Weave internal links into the article body.
    ///
    /// Mutates `article.content` and sets `article.internal_links`; also
    /// returns the inserted links in insertion order. An empty corpus is
    /// a no-op, not an error. Each post contributes at most one link, and
    /// no two links in one article share a destination URL.
    #[instrument(skip_all, fields(title = %article.meta.title, posts = posts.len()))]
    pub fn link(&self, article: &mut Article, posts: &[ExistingPost]) -> Vec<InternalLink> {
        if posts.is_empty() {
            article.internal_links.clear();
            return Vec::new();
        }

        let target = self.target_links(article.meta.word_count);
        // Oversample by 2 so anchor-match failures don't starve the target.
        let pool = self.select_candidates(article, posts, target + 2);

        debug!(
            target,
            pool = pool.len(),
            "selected cross-link candidates"
        );

        let mut inserter = LinkInserter::new(std::mem::take(&mut article.content));
        let mut added: Vec<InternalLink> = Vec::new();
        let mut used_urls: BTreeSet<String> = BTreeSet::new();

        for post in pool {
            if added.len() >= target {
                break;
            }
            if used_urls.contains(&post.url) {
                continue;
            }

            match inserter.insert_first(&anchors::anchor_candidates(&post.title), &post.url) {
                Some(anchor_text) => {
                    used_urls.insert(post.url.clone());
                    added.push(InternalLink {
                        title: post.title.clone(),
                        url: post.url.clone(),
                        anchor_text,
                    });
                }
                None => {
                    debug!(post = %post.title, "no anchor found, skipping post");
                }
            }
        }

        article.content = inserter.into_content();
        article.internal_links = added.clone();

        debug!(links = added.len(), "cross-link pass complete");
        added
    }

    /// Preview link opportunities without mutating the article.
    ///
    /// Runs the same selection pass as [`link`](Self::link), then reports
    /// the first findable, not-already-linked anchor per candidate post
    /// together with a short surrounding-text snippet.
    pub fn suggest(&self, article: &Article, posts: &[ExistingPost]) -> Vec<LinkSuggestion> {
        if posts.is_empty() {
            return Vec::new();
        }

        let target = self.target_links(article.meta.word_count);
        let pool = self.select_candidates(article, posts, target + 2);
        let content_lower = article.content.to_lowercase();

        let mut suggestions = Vec::new();

        for post in pool {
            for anchor in anchors::anchor_candidates(&post.title) {
                let anchor_lower = anchor.to_lowercase();
                if !content_lower.contains(&anchor_lower) {
                    continue;
                }
                // Skip anchors that are already link text somewhere.
                if content_lower.contains(&format!("[{anchor_lower}]")) {
                    continue;
                }

                suggestions.push(LinkSuggestion {
                    post_title: post.title.clone(),
                    post_url: post.url.clone(),
                    context: context_snippet(&article.content, &anchor, 50),
                    anchor,
                });
                break;
            }
        }

        suggestions
    }

    /// Target link count for a body of `word_count` words.
    fn target_links(&self, word_count: usize) -> usize {
        let computed = (word_count as f64 / 1000.0 * self.links_per_1k_words).round() as usize;
        computed.max(1)
    }

    /// Score, filter, and order the corpus; return at most `max` posts.
    ///
    /// Self-matches (case-insensitive title equality) are excluded, and
    /// candidates below `min_similarity` are dropped. Ties keep corpus
    /// order.
    fn select_candidates<'a>(
        &self,
        article: &Article,
        posts: &'a [ExistingPost],
        max: usize,
    ) -> Vec<&'a ExistingPost> {
        let article_text = format!(
            "{} {} {}",
            article.meta.title,
            article.meta.primary_keyword,
            article.meta.secondary_keywords.join(" ")
        );
        let article_title_lower = article.meta.title.to_lowercase();

        let mut scored: Vec<(&ExistingPost, f64)> = posts
            .iter()
            .filter(|post| post.title.to_lowercase() != article_title_lower)
            .filter_map(|post| {
                let post_text = format!("{} {}", post.title, post.tags.join(" "));
                let score = similarity::token_set_ratio(&article_text, &post_text);
                (score >= self.min_similarity).then_some((post, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(max);
        scored.into_iter().map(|(post, _)| post).collect()
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// A non-destructive link opportunity for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    /// Title of the post that could be linked.
    pub post_title: String,
    /// Destination URL.
    pub post_url: String,
    /// The anchor phrase found in the body.
    pub anchor: String,
    /// Surrounding text with the anchor bolded.
    pub context: String,
}

/// A ±`context_chars` snippet around the first occurrence of `phrase`.
fn context_snippet(content: &str, phrase: &str, context_chars: usize) -> String {
    let Ok(re) = RegexBuilder::new(&regex::escape(phrase))
        .case_insensitive(true)
        .build()
    else {
        return String::new();
    };

    let Some(m) = re.find(content) else {
        return String::new();
    };

    let before_full = &content[..m.start()];
    let skipped = before_full.chars().count().saturating_sub(context_chars);
    let before_start = before_full
        .char_indices()
        .nth(skipped)
        .map_or(m.start(), |(i, _)| i);

    let after_full = &content[m.end()..];
    let after_end = after_full
        .char_indices()
        .nth(context_chars)
        .map_or(after_full.len(), |(i, _)| i);

    format!(
        "...{}**{}**{}...",
        &content[before_start..m.start()],
        m.as_str(),
        &after_full[..after_end]
    )
}

// ---------------------------------------------------------------------------
// Link distribution analysis
// ---------------------------------------------------------------------------

/// Position of one Markdown link within an article body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkPosition {
    pub anchor: String,
    pub url: String,
    /// Link start offset as a percentage of the body length, one decimal.
    pub position_percent: f64,
}

/// Summary of link usage across an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDistribution {
    pub total_links: usize,
    pub internal_links: usize,
    pub external_links: usize,
    /// Links per 1000 words; 0 when the word count is unknown.
    pub links_per_1k_words: f64,
    pub distribution: Vec<LinkPosition>,
}

/// Analyze how Markdown links are distributed through an article.
///
/// Links whose URL contains `site_host` count as internal; everything
/// else is external.
pub fn analyze_link_distribution(article: &Article, site_host: &str) -> LinkDistribution {
    static LINK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

    let content = &article.content;
    let total_length = content.len().max(1);

    let mut internal = 0usize;
    let mut distribution = Vec::new();

    for caps in LINK_RE.captures_iter(content) {
        let whole = caps.get(0).expect("whole match");
        let anchor = caps[1].to_string();
        let url = caps[2].to_string();

        if url.contains(site_host) {
            internal += 1;
        }

        let percent = whole.start() as f64 / total_length as f64 * 100.0;
        distribution.push(LinkPosition {
            anchor,
            url,
            position_percent: (percent * 10.0).round() / 10.0,
        });
    }

    let total_links = distribution.len();
    let links_per_1k_words = if article.meta.word_count > 0 {
        let per_1k = total_links as f64 / (article.meta.word_count as f64 / 1000.0);
        (per_1k * 100.0).round() / 100.0
    } else {
        0.0
    };

    LinkDistribution {
        total_links,
        internal_links: internal,
        external_links: total_links - internal,
        links_per_1k_words,
        distribution,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use seoforge_shared::ArticleMeta;

    fn meta(title: &str, primary: &str, word_count: usize) -> ArticleMeta {
        ArticleMeta {
            title: title.into(),
            meta_description: String::new(),
            primary_keyword: primary.into(),
            secondary_keywords: vec![],
            search_intent: "informational".into(),
            author: String::new(),
            created_at: Utc::now(),
            word_count,
            reading_time_minutes: 0,
        }
    }

    fn article(title: &str, primary: &str, content: &str, word_count: usize) -> Article {
        Article::new(meta(title, primary, word_count), content)
    }

    fn post(title: &str, url: &str, tags: &[&str]) -> ExistingPost {
        ExistingPost {
            title: title.into(),
            url: url.into(),
            category: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn empty_corpus_is_a_no_op() {
        let linker = CrossLinker::default();
        let mut art = article("Remote Work", "remote work", "Learn about remote work.", 500);
        let before = art.content.clone();

        let links = linker.link(&mut art, &[]);
        assert!(links.is_empty());
        assert_eq!(art.content, before);
        assert!(art.internal_links.is_empty());
    }

    #[test]
    fn links_similar_post_with_original_casing() {
        let linker = CrossLinker::default();
        let mut art = article(
            "Remote Work",
            "remote work",
            "Learn about remote work today.",
            500,
        );
        let posts = vec![post("Remote Work Tips", "/tips", &[])];

        let links = linker.link(&mut art, &posts);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "/tips");
        assert_eq!(links[0].anchor_text, "remote work");
        assert!(art.content.contains("[remote work](/tips)"));
        assert_eq!(art.internal_links, links);
    }

    #[test]
    fn never_links_to_self_by_title() {
        let linker = CrossLinker::default();
        let mut art = article(
            "Remote Work",
            "remote work",
            "All about remote work here.",
            500,
        );
        let posts = vec![post("REMOTE WORK", "/self", &["remote", "work"])];

        let links = linker.link(&mut art, &posts);
        assert!(links.is_empty());
        assert!(!art.content.contains("/self"));
    }

    #[test]
    fn never_duplicates_destination_urls() {
        let linker = CrossLinker {
            links_per_1k_words: 10.0,
            min_similarity: 30.0,
        };
        let mut art = article(
            "Remote Work Guide",
            "remote work",
            "Remote work tips and more remote work tips again and remote work advice.",
            1000,
        );
        // Two corpus entries pointing at the same URL
        let posts = vec![
            post("Remote Work Tips", "/tips", &[]),
            post("Remote Work Tips Extended", "/tips", &["remote", "work"]),
        ];

        let links = linker.link(&mut art, &posts);
        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        let unique: BTreeSet<&str> = urls.iter().copied().collect();
        assert_eq!(urls.len(), unique.len());
    }

    #[test]
    fn dissimilar_posts_are_filtered_out() {
        let linker = CrossLinker::default();
        let mut art = article(
            "Remote Work",
            "remote work",
            "Learn about remote work and gardening today.",
            500,
        );
        let posts = vec![post("Growing Tomatoes In Winter", "/tomatoes", &["gardening"])];

        let links = linker.link(&mut art, &posts);
        assert!(links.is_empty());
    }

    #[test]
    fn oversample_compensates_for_anchor_failures() {
        // word_count 300 -> target max(1, round(0.3 * 3.5)) = 1, pool of 3.
        // The most similar post's title never appears in the body; the
        // next one (similar only through its tags) does.
        let linker = CrossLinker {
            links_per_1k_words: 3.5,
            min_similarity: 30.0,
        };
        let mut art = article(
            "Remote Work",
            "remote work",
            "Thoughts on office setup choices today.",
            300,
        );
        let posts = vec![
            post("Remote Work Trends", "/trends", &[]),
            post("Office Setup Choices", "/office", &["remote", "work"]),
        ];

        let links = linker.link(&mut art, &posts);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "/office");
    }

    #[test]
    fn zero_word_count_still_targets_one_link() {
        let linker = CrossLinker::default();
        assert_eq!(linker.target_links(0), 1);
        assert_eq!(linker.target_links(2000), 7);
    }

    #[test]
    fn respects_target_link_count() {
        // 1000 words at 2.0/1k -> exactly 2 links even with 3 viable posts.
        let linker = CrossLinker {
            links_per_1k_words: 2.0,
            min_similarity: 10.0,
        };
        let mut art = article(
            "Job Hunting",
            "job hunting",
            "Job hunting means interview preparation, resume polish, and salary negotiation.",
            1000,
        );
        let posts = vec![
            post("Job Hunting Interview Preparation", "/interview", &["job", "hunting"]),
            post("Job Hunting Resume Polish", "/resume", &["job", "hunting"]),
            post("Job Hunting Salary Negotiation", "/salary", &["job", "hunting"]),
        ];

        let links = linker.link(&mut art, &posts);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn suggest_does_not_mutate() {
        let linker = CrossLinker::default();
        let art = article(
            "Remote Work",
            "remote work",
            "Learn about remote work today.",
            500,
        );
        let posts = vec![post("Remote Work Tips", "/tips", &[])];

        let before = art.content.clone();
        let suggestions = linker.suggest(&art, &posts);
        assert_eq!(art.content, before);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].post_url, "/tips");
        assert_eq!(suggestions[0].anchor.to_lowercase(), "remote work");
        assert!(suggestions[0].context.contains("**remote work**"));
    }

    #[test]
    fn suggest_skips_already_linked_anchors() {
        let linker = CrossLinker::default();
        let art = article(
            "Remote Work",
            "remote work",
            "See [remote work tips](/old) already linked.",
            500,
        );
        let posts = vec![post("Remote Work Tips", "/tips", &["remote", "work"])];

        let suggestions = linker.suggest(&art, &posts);
        // The full-title anchor is already link text; shorter windows
        // ("remote work", "work tips") only occur inside that span too,
        // where they are not wrapped as link text themselves.
        for s in &suggestions {
            assert_ne!(s.anchor.to_lowercase(), "remote work tips");
        }
    }

    #[test]
    fn analyze_counts_and_classifies_links() {
        let mut m = meta("Analysis", "analysis", 2000);
        m.word_count = 2000;
        let art = Article::new(
            m,
            "Intro [guide](https://example.com/blog/guide) middle \
             [external](https://other.net/page) end.",
        );

        let dist = analyze_link_distribution(&art, "example.com");
        assert_eq!(dist.total_links, 2);
        assert_eq!(dist.internal_links, 1);
        assert_eq!(dist.external_links, 1);
        assert_eq!(dist.links_per_1k_words, 1.0);
        assert_eq!(dist.distribution.len(), 2);
        assert!(dist.distribution[0].position_percent < dist.distribution[1].position_percent);
    }

    #[test]
    fn analyze_handles_zero_word_count() {
        let art = article("Empty", "empty", "No links at all.", 0);
        let dist = analyze_link_distribution(&art, "example.com");
        assert_eq!(dist.total_links, 0);
        assert_eq!(dist.links_per_1k_words, 0.0);
    }

    #[test]
    fn context_snippet_bounds_and_bolds() {
        let content = "a".repeat(80) + " remote work " + &"b".repeat(80);
        let snippet = context_snippet(&content, "remote work", 50);
        assert!(snippet.starts_with("..."));
        assert!(snippet.ends_with("..."));
        assert!(snippet.contains("**remote work**"));
        // 50 chars each side + anchor + bold markers + ellipses
        assert!(snippet.chars().count() <= 50 * 2 + 11 + 4 + 6);
    }
}
