//! Types for LLM-powered transcript analysis.

use serde::Serialize;
use std::fmt;

/// Summary stored when no credential is configured for the LLM provider.
pub const CREDENTIAL_MISSING_SUMMARY: &str =
    "AI analysis unavailable. Please configure Anthropic API key.";

/// Summary stored when the LLM call or its output could not be used.
pub const ANALYSIS_UNAVAILABLE_SUMMARY: &str = "Analysis unavailable. Please try again.";

/// Tag attached to every fallback result.
pub const FALLBACK_TAG: &str = "meeting";

/// Urgency of an extracted action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Maps a label from model output onto the enum.
    ///
    /// Matching is exact; anything else (including other casings) becomes `Medium`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "High" => Priority::High,
            "Low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

/// Task extracted from a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub description: String,
    /// Empty when the model did not name an owner.
    pub assigned_to: String,
    pub priority: Priority,
}

/// Structured meeting intelligence.
///
/// Every field is always present, whether it came from the model or from a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub action_items: Vec<ActionItem>,
    pub key_decisions: Vec<String>,
    pub important_dates: Vec<String>,
    /// Unique, in first-seen order.
    pub tags: Vec<String>,
}

impl AnalysisResult {
    /// Placeholder result used whenever enrichment degrades.
    pub fn fallback(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            action_items: Vec::new(),
            key_decisions: Vec::new(),
            important_dates: Vec::new(),
            tags: vec![FALLBACK_TAG.to_string()],
        }
    }

    pub fn with_tags(self, tags: Vec<String>) -> Self {
        Self { tags, ..self }
    }
}

/// Why enrichment could not complete. For server-side logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    CredentialMissing,
    TransportFailure,
    ParseFailure,
}

impl DegradedReason {
    /// Summary text for the fallback result of this reason.
    pub fn fallback_summary(&self) -> &'static str {
        match self {
            DegradedReason::CredentialMissing => CREDENTIAL_MISSING_SUMMARY,
            DegradedReason::TransportFailure | DegradedReason::ParseFailure => {
                ANALYSIS_UNAVAILABLE_SUMMARY
            }
        }
    }
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DegradedReason::CredentialMissing => write!(f, "credential missing"),
            DegradedReason::TransportFailure => write!(f, "transport failure"),
            DegradedReason::ParseFailure => write!(f, "parse failure"),
        }
    }
}

/// Result of the enrichment step. Both variants carry a complete [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success {
        result: AnalysisResult,
    },
    Degraded {
        result: AnalysisResult,
        reason: DegradedReason,
    },
}

impl AnalysisOutcome {
    /// Degraded outcome carrying the standard fallback result for `reason`.
    pub fn degraded(reason: DegradedReason) -> Self {
        AnalysisOutcome::Degraded {
            result: AnalysisResult::fallback(reason.fallback_summary()),
            reason,
        }
    }

    pub fn result(&self) -> &AnalysisResult {
        match self {
            AnalysisOutcome::Success { result } | AnalysisOutcome::Degraded { result, .. } => {
                result
            }
        }
    }

    pub fn into_result(self) -> AnalysisResult {
        match self {
            AnalysisOutcome::Success { result } | AnalysisOutcome::Degraded { result, .. } => {
                result
            }
        }
    }

    pub fn degraded_reason(&self) -> Option<DegradedReason> {
        match self {
            AnalysisOutcome::Success { .. } => None,
            AnalysisOutcome::Degraded { reason, .. } => Some(*reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded_reason().is_some()
    }

    /// Applies `f` to the carried result, keeping the variant and reason.
    pub fn map_result(self, f: impl FnOnce(AnalysisResult) -> AnalysisResult) -> Self {
        match self {
            AnalysisOutcome::Success { result } => AnalysisOutcome::Success { result: f(result) },
            AnalysisOutcome::Degraded { result, reason } => AnalysisOutcome::Degraded {
                result: f(result),
                reason,
            },
        }
    }
}
