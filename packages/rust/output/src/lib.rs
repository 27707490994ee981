//! File output for finished articles: Markdown with YAML frontmatter and
//! structured JSON. Writers own their output directory; everything else
//! in the workspace stays I/O-free.

mod json;
mod markdown;

pub use json::JsonWriter;
pub use markdown::MarkdownWriter;
