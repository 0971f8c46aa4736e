//! LLM completion provider trait.

use crate::Error;
use async_trait::async_trait;

/// Abstraction over a large-language-model endpoint used for transcript analysis.
///
/// Implementations issue exactly one request per call and never retry; the analysis
/// layer treats any error as a degraded outcome. Prompt rendering, completion
/// sanitizing and field-level validation live in [`crate::analysis`], so an
/// implementation only moves text across the wire.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send `prompt` as a single user message and return the raw completion text.
    ///
    /// Transport problems (connection errors, timeouts, non-2xx statuses) must map to
    /// the matching [`Error`] variant. A response envelope that cannot be decoded into
    /// a completion maps to [`Error::Deserialization`].
    async fn complete(&self, prompt: &str) -> Result<String, Error>;

    /// Return unique identifier for this provider (e.g., "anthropic").
    ///
    /// Used in log lines only.
    fn provider_id(&self) -> &'static str;
}
