//! Application layer of the meeting insights pipeline.
//!
//! Wires the provider-agnostic `meeting-ai` core to concrete collaborators: the
//! Anthropic gateway that performs the LLM call, and the upload orchestration that
//! derives a title, parses caller tags and runs the pipeline.
//!
//! Consumers of `domain` do not need to depend on `meeting-ai` directly for the
//! types that cross this boundary; they are re-exported here.
pub use meeting_ai::{
    ActionItem, AnalysisOutcome, AnalysisResult, DegradedReason, InputError,
    NormalizedTranscript, Priority, RawUpload, SourceFormat,
};

pub mod error;
pub mod gateway;
pub mod meeting_upload;
