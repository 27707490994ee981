//! End-to-end article finalization: qualify keywords → attach a keyword
//! group → cross-link → write Markdown + JSON.
//!
//! The pipeline is synchronous and file-output only; fetching candidates
//! and the post corpus is the caller's concern.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use seoforge_crosslink::CrossLinker;
use seoforge_keywords::KeywordQualifier;
use seoforge_output::{JsonWriter, MarkdownWriter};
use seoforge_shared::{
    AppConfig, Article, ExistingPost, Keyword, KeywordGroup, Result, text,
};

/// Average reading speed used for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 238;

/// How many secondary keywords a derived group carries.
const MAX_SECONDARY_KEYWORDS: usize = 5;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the finalize pipeline.
#[derive(Debug, Clone)]
pub struct FinalizeConfig {
    /// Minimum search volume for a keyword to qualify.
    pub min_volume: u32,
    /// Maximum keyword difficulty for a keyword to qualify.
    pub max_difficulty: f64,
    /// Target internal links per 1000 words.
    pub links_per_1k_words: f64,
    /// Minimum similarity (0-100) for a cross-link candidate.
    pub min_similarity: f64,
    /// Directory for Markdown and JSON output.
    pub output_dir: PathBuf,
}

impl From<&AppConfig> for FinalizeConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            min_volume: config.defaults.min_volume,
            max_difficulty: config.defaults.max_difficulty,
            links_per_1k_words: config.linking.links_per_1k_words,
            min_similarity: config.linking.min_similarity,
            output_dir: PathBuf::from(&config.defaults.output_dir),
        }
    }
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
///
/// Injected by the caller; there is no global reporter state.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, result: &PipelineResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _result: &PipelineResult) {}
}

/// Result of the finalize pipeline.
#[derive(Debug)]
pub struct PipelineResult {
    /// Path to the written Markdown file.
    pub markdown_path: PathBuf,
    /// Path to the written JSON file.
    pub json_path: PathBuf,
    /// Keywords that passed qualification.
    pub qualified: usize,
    /// Internal links inserted into the article.
    pub links_added: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full finalize pipeline over one article.
///
/// 1. Qualify and rank the keyword candidates
/// 2. Attach a keyword group (top-ranked primary + secondary)
/// 3. Recompute word count and reading time
/// 4. Cross-link against the existing-post corpus
/// 5. Write Markdown and JSON output
///
/// Empty candidate lists and an empty corpus are handled silently; the
/// article is still written.
#[instrument(skip_all, fields(title = %article.meta.title, candidates = candidates.len(), posts = posts.len()))]
pub fn finalize_article(
    config: &FinalizeConfig,
    mut article: Article,
    candidates: &[Keyword],
    posts: &[ExistingPost],
    progress: &dyn ProgressReporter,
) -> Result<PipelineResult> {
    let start = Instant::now();

    // --- Phase 1: Keyword qualification ---
    progress.phase("Qualifying keywords");
    let qualifier = KeywordQualifier::new(config.min_volume, config.max_difficulty)?;
    let qualified = qualifier.filter(candidates);
    let ranked = seoforge_keywords::rank(&qualified);

    info!(
        candidates = candidates.len(),
        qualified = qualified.len(),
        "keyword qualification complete"
    );

    // --- Phase 2: Keyword group ---
    let group: Option<KeywordGroup> = ranked.first().map(|top| {
        let secondary: Vec<Keyword> = ranked
            .iter()
            .skip(1)
            .take(MAX_SECONDARY_KEYWORDS)
            .map(|q| q.keyword.clone())
            .collect();
        seoforge_keywords::group(top.keyword.clone(), secondary, article.meta.title.clone())
    });

    if let Some(g) = &group {
        if article.meta.primary_keyword.is_empty() {
            article.meta.primary_keyword = g.primary.text.clone();
        }
        if article.meta.secondary_keywords.is_empty() {
            article.meta.secondary_keywords =
                g.secondary.iter().map(|k| k.text.clone()).collect();
        }
    }

    // --- Phase 3: Word count & reading time ---
    article.meta.word_count = text::count_words(&article.content);
    article.meta.reading_time_minutes = article.meta.word_count.div_ceil(WORDS_PER_MINUTE).max(1);

    // --- Phase 4: Cross-linking ---
    progress.phase("Cross-linking");
    let linker = CrossLinker {
        links_per_1k_words: config.links_per_1k_words,
        min_similarity: config.min_similarity,
    };
    let links = linker.link(&mut article, posts);

    info!(links = links.len(), "cross-link pass complete");

    // --- Phase 5: Output ---
    progress.phase("Writing output");
    let markdown_writer = MarkdownWriter::new(&config.output_dir)?;
    let json_writer = JsonWriter::new(&config.output_dir)?;

    let markdown_path = markdown_writer.write(&article)?;
    let json_path = json_writer.write(&article, group.as_ref())?;

    let result = PipelineResult {
        markdown_path,
        json_path,
        qualified: qualified.len(),
        links_added: links.len(),
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        markdown = %result.markdown_path.display(),
        json = %result.json_path.display(),
        links = result.links_added,
        elapsed_ms = result.elapsed.as_millis(),
        "finalize pipeline complete"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
