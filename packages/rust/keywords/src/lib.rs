//! Keyword qualification and ranking for seoforge.
//!
//! The qualifier is a pure, synchronous component: it filters provider-
//! scored candidates against inclusive thresholds and ranks them by a
//! composite volume/difficulty score. It performs no I/O; fetching
//! metrics is the caller's concern.

mod qualifier;

pub use qualifier::{KeywordQualifier, group, rank};
