//! Core article pipeline for seoforge.
//!
//! Composes keyword qualification, cross-linking, and output writing into
//! a single synchronous pass over an article draft.

pub mod pipeline;

pub use pipeline::{
    FinalizeConfig, PipelineResult, ProgressReporter, SilentProgress, finalize_article,
};
