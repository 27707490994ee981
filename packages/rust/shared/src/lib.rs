//! Shared types, error model, configuration, and text utilities for seoforge.
//!
//! This crate is the foundation depended on by all other seoforge crates.
//! It provides:
//! - [`SeoForgeError`] — the unified error type
//! - Domain types ([`Keyword`], [`Article`], [`ExistingPost`], [`InternalLink`])
//! - Configuration ([`AppConfig`], config loading)
//! - Markdown-aware text helpers ([`text`])

pub mod config;
pub mod error;
pub mod text;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, LinkingConfig, SiteConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{Result, SeoForgeError};
pub use types::{
    Article, ArticleMeta, ExistingPost, InternalLink, Keyword, KeywordGroup, KeywordMetrics,
    QualifiedKeyword,
};
