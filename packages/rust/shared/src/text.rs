//! Text utilities for SEO content processing.
//!
//! Each helper is a pure function over `&str`. Markdown-aware passes use
//! `LazyLock<Regex>` statics compiled once per process.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum slug length before word-boundary truncation.
const DEFAULT_SLUG_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Convert text to a URL-friendly slug, truncated at 100 characters.
pub fn slugify(text: &str) -> String {
    slugify_truncated(text, DEFAULT_SLUG_LEN)
}

/// Convert text to a URL-friendly slug with a custom length cap.
///
/// Lowercases, strips punctuation, hyphenates whitespace/underscore runs,
/// collapses repeated hyphens, and truncates at a word boundary.
pub fn slugify_truncated(text: &str, max_length: usize) -> String {
    static SEP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid regex"));
    static DASH_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_'))
        .collect();

    let slug = SEP_RE.replace_all(&cleaned, "-");
    let slug = DASH_RE.replace_all(&slug, "-");
    let slug = slug.trim_matches('-').to_string();

    if slug.chars().count() <= max_length {
        return slug;
    }

    let head: String = slug.chars().take(max_length).collect();
    match head.rfind('-') {
        Some(i) if i > 0 => head[..i].to_string(),
        _ => head,
    }
}

// ---------------------------------------------------------------------------
// Word counting
// ---------------------------------------------------------------------------

/// Count words in Markdown text.
///
/// Images are dropped entirely, links count only their anchor text, and
/// formatting characters are stripped before splitting on whitespace.
pub fn count_words(text: &str) -> usize {
    static IMAGE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"));
    static LINK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex"));

    let no_images = IMAGE_RE.replace_all(text, "");
    let no_links = LINK_RE.replace_all(&no_images, "$1");

    let clean: String = no_links
        .chars()
        .map(|c| match c {
            '#' | '*' | '_' | '`' | '[' | ']' | '(' | ')' => ' ',
            other => other,
        })
        .collect();

    clean.split_whitespace().count()
}

/// Truncate text to `max_length` characters, preserving whole words.
pub fn truncate_text(text: &str, max_length: usize, suffix: &str) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }

    let take = max_length.saturating_sub(suffix.chars().count());
    let head: String = text.chars().take(take).collect();

    match head.rfind(' ') {
        Some(i) if i > 0 => format!("{}{suffix}", &head[..i]),
        _ => format!("{head}{suffix}"),
    }
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

/// A heading extracted from Markdown content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level, 1-6.
    pub level: usize,
    /// Heading text without the leading hashes.
    pub text: String,
    /// 1-based line number in the source.
    pub line: usize,
}

/// Extract all ATX headings from Markdown content.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    static H_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("valid regex"));

    markdown
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            H_RE.captures(line).map(|caps| Heading {
                level: caps[1].len(),
                text: caps[2].trim().to_string(),
                line: i + 1,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Keyword density
// ---------------------------------------------------------------------------

/// Keyword density as a percentage of total words.
///
/// Counts case-insensitive occurrences of the phrase; each occurrence
/// contributes one word per word in the phrase.
pub fn keyword_density(content: &str, keyword: &str) -> f64 {
    let word_count = count_words(content);
    if word_count == 0 || keyword.trim().is_empty() {
        return 0.0;
    }

    let occurrences = content
        .to_lowercase()
        .matches(&keyword.to_lowercase())
        .count();
    let keyword_words = keyword.split_whitespace().count();

    (occurrences * keyword_words) as f64 / word_count as f64 * 100.0
}

// ---------------------------------------------------------------------------
// First paragraph
// ---------------------------------------------------------------------------

/// Extract the first non-heading paragraph from Markdown content.
pub fn extract_first_paragraph(markdown: &str) -> String {
    let mut paragraph_lines: Vec<&str> = Vec::new();
    let mut in_paragraph = false;

    for line in markdown.lines() {
        let stripped = line.trim();

        if stripped.is_empty() || stripped.starts_with('#') {
            if in_paragraph {
                break;
            }
            continue;
        }

        in_paragraph = true;
        paragraph_lines.push(stripped);
    }

    paragraph_lines.join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("10 Remote Work Tips!"), "10-remote-work-tips");
        assert_eq!(slugify("What's New — 2026"), "whats-new-2026");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
    }

    #[test]
    fn slugify_collapses_hyphens() {
        assert_eq!(slugify("a -- b --- c"), "a-b-c");
        assert_eq!(slugify("--leading and trailing--"), "leading-and-trailing");
    }

    #[test]
    fn slugify_truncates_at_word_boundary() {
        let long = "alpha bravo charlie delta echo";
        assert_eq!(slugify_truncated(long, 17), "alpha-bravo");
        // Exactly fitting input is untouched
        assert_eq!(slugify_truncated("alpha-bravo", 11), "alpha-bravo");
    }

    #[test]
    fn count_words_plain_text() {
        assert_eq!(count_words("one two three"), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn count_words_strips_markdown() {
        // Image dropped, link counts anchor only, heading hashes stripped
        let md = "# Title\n\n![alt text](img.png)\n\nSee [the guide](https://example.com/guide) now.";
        assert_eq!(count_words(md), 5); // Title, See, the, guide, now
    }

    #[test]
    fn truncate_text_preserves_words() {
        assert_eq!(truncate_text("short", 10, "..."), "short");
        assert_eq!(
            truncate_text("the quick brown fox jumps", 15, "..."),
            "the quick..."
        );
    }

    #[test]
    fn extract_headings_levels_and_lines() {
        let md = "# One\n\ntext\n\n## Two\n### Three";
        let headings = extract_headings(md);
        assert_eq!(headings.len(), 3);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[0].text, "One");
        assert_eq!(headings[1].line, 5);
        assert_eq!(headings[2].level, 3);
    }

    #[test]
    fn keyword_density_counts_phrase_words() {
        // 10 words, "remote work" twice -> 2 * 2 / 10 * 100 = 40%
        let content = "remote work is great and remote work is here now";
        let density = keyword_density(content, "remote work");
        assert!((density - 40.0).abs() < 1e-9);
    }

    #[test]
    fn keyword_density_empty_content() {
        assert_eq!(keyword_density("", "anything"), 0.0);
        assert_eq!(keyword_density("some words", ""), 0.0);
    }

    #[test]
    fn first_paragraph_skips_headings() {
        let md = "# Title\n\n## Sub\n\nFirst line\nsecond line\n\nNext paragraph";
        assert_eq!(extract_first_paragraph(md), "First line second line");
    }
}
