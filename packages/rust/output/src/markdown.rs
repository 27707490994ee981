//! Markdown article writer with YAML frontmatter.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, instrument};

use seoforge_shared::{Article, Result, SeoForgeError};

/// Writes articles as `<slug>.md` files with YAML frontmatter.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    output_dir: PathBuf,
}

/// The frontmatter block, serialized in declaration order.
#[derive(Serialize)]
struct Frontmatter<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
    lastmod: String,
    author: &'a str,
    tags: Vec<&'a str>,
    keywords: Vec<&'a str>,
    reading_time: String,
    word_count: usize,
    seo: SeoBlock<'a>,
}

#[derive(Serialize)]
struct SeoBlock<'a> {
    title: &'a str,
    description: &'a str,
    /// Left empty for the publishing step to fill in.
    canonical: &'a str,
}

impl MarkdownWriter {
    /// Create a writer, ensuring the output directory exists.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|e| SeoForgeError::io(&output_dir, e))?;
        Ok(Self { output_dir })
    }

    /// Write the article to `<output_dir>/<slug>.md`.
    #[instrument(skip_all, fields(title = %article.meta.title))]
    pub fn write(&self, article: &Article) -> Result<PathBuf> {
        let content = build_markdown(article)?;
        let path = self.output_dir.join(format!("{}.md", article.meta.slug()));

        std::fs::write(&path, content).map_err(|e| SeoForgeError::io(&path, e))?;
        debug!(path = %path.display(), "wrote markdown article");

        Ok(path)
    }

    /// Directory articles are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Build the full `---\n<yaml>---\n\n<body>` document.
fn build_markdown(article: &Article) -> Result<String> {
    let meta = &article.meta;

    let keywords: Vec<&str> = std::iter::once(meta.primary_keyword.as_str())
        .chain(meta.secondary_keywords.iter().map(String::as_str))
        .collect();
    // Tags are the keyword list capped at the primary plus five secondary.
    let tags: Vec<&str> = keywords.iter().copied().take(6).collect();

    let frontmatter = Frontmatter {
        title: &meta.title,
        description: &meta.meta_description,
        date: meta.created_at.format("%Y-%m-%d").to_string(),
        lastmod: Utc::now().format("%Y-%m-%d").to_string(),
        author: &meta.author,
        tags,
        keywords,
        reading_time: format!("{} min read", meta.reading_time_minutes),
        word_count: meta.word_count,
        seo: SeoBlock {
            title: &meta.title,
            description: &meta.meta_description,
            canonical: "",
        },
    };

    let yaml =
        serde_yaml::to_string(&frontmatter).map_err(|e| SeoForgeError::Serialize(e.to_string()))?;

    Ok(format!("---\n{yaml}---\n\n{}", article.content))
}
