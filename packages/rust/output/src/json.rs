//! Structured JSON article writer.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use seoforge_shared::{Article, InternalLink, KeywordGroup, Result, SeoForgeError};

/// Schema version of the JSON output format.
const OUTPUT_VERSION: &str = "1.0";

/// Writes articles as `<slug>.json` files for downstream tooling.
#[derive(Debug, Clone)]
pub struct JsonWriter {
    output_dir: PathBuf,
}

/// Root structure of the JSON document.
#[derive(Serialize)]
struct ArticleJson<'a> {
    version: &'static str,
    generated_at: DateTime<Utc>,
    metadata: MetadataJson<'a>,
    seo: SeoJson<'a>,
    internal_links: &'a [InternalLink],
    content: &'a str,
}

#[derive(Serialize)]
struct MetadataJson<'a> {
    title: &'a str,
    slug: String,
    meta_description: &'a str,
    author: &'a str,
    created_at: DateTime<Utc>,
    word_count: usize,
    reading_time_minutes: usize,
}

#[derive(Serialize)]
struct SeoJson<'a> {
    primary_keyword: &'a str,
    secondary_keywords: &'a [String],
    search_intent: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword_group: Option<&'a KeywordGroup>,
}

impl JsonWriter {
    /// Create a writer, ensuring the output directory exists.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| SeoForgeError::io(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    /// Write the article to `<output_dir>/<slug>.json`, optionally
    /// embedding the keyword group the article was generated from.
    #[instrument(skip_all, fields(title = %article.meta.title))]
    pub fn write(&self, article: &Article, keywords: Option<&KeywordGroup>) -> Result<PathBuf> {
        let meta = &article.meta;
        let doc = ArticleJson {
            version: OUTPUT_VERSION,
            generated_at: Utc::now(),
            metadata: MetadataJson {
                title: &meta.title,
                slug: meta.slug(),
                meta_description: &meta.meta_description,
                author: &meta.author,
                created_at: meta.created_at,
                word_count: meta.word_count,
                reading_time_minutes: meta.reading_time_minutes,
            },
            seo: SeoJson {
                primary_keyword: &meta.primary_keyword,
                secondary_keywords: &meta.secondary_keywords,
                search_intent: &meta.search_intent,
                keyword_group: keywords,
            },
            internal_links: &article.internal_links,
            content: &article.content,
        };

        let path = self.output_dir.join(format!("{}.json", meta.slug()));
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| SeoForgeError::Serialize(e.to_string()))?;

        std::fs::write(&path, json).map_err(|e| SeoForgeError::io(&path, e))?;
        debug!(path = %path.display(), "wrote json article");

        Ok(path)
    }

    /// Directory articles are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
