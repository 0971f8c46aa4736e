//! Meeting transcript normalization and AI analysis.
//!
//! This crate turns an uploaded transcript file into structured meeting intelligence:
//! - Format-specific text extraction (plain text, WebVTT, Word documents, PDF)
//! - Prompt rendering for an external LLM with an explicit output contract
//! - Tolerant parsing of the model's completion with field-level defaulting
//! - Merging of caller-supplied and AI-suggested tags
//!
//! Unreadable input is a hard failure ([`InputError`]). A failed or unusable
//! enrichment step never is: it degrades to a structurally complete fallback
//! result wrapped in [`AnalysisOutcome::Degraded`].

pub mod analysis;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod prompt;
pub mod tags;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Error, InputError};
pub use types::analysis::{
    ActionItem, AnalysisOutcome, AnalysisResult, DegradedReason, Priority,
};
pub use types::transcript::{NormalizedTranscript, RawUpload, SourceFormat};
