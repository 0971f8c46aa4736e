//! LLM-backed transcript analysis with degrade-on-failure semantics.
//!
//! [`analyze`] is the single entry point. It runs one bounded provider call and
//! always returns an [`AnalysisOutcome`]; no error reaches the caller:
//!
//! - no provider configured -> `Degraded(CredentialMissing)` without any I/O
//! - provider error -> `Degraded(TransportFailure)`
//! - completion that is not a JSON object -> `Degraded(ParseFailure)`
//! - anything else -> `Success`, after every field has been validated and defaulted

use crate::error::Error;
use crate::prompt::build_prompt;
use crate::tags::reconcile;
use crate::traits::analysis::Provider;
use crate::types::analysis::{
    ActionItem, AnalysisOutcome, AnalysisResult, DegradedReason, Priority,
};
use log::*;
use serde_json::{Map, Value};

/// Analyze `transcript` with `provider`, or degrade when there is none.
pub async fn analyze(provider: Option<&dyn Provider>, transcript: &str) -> AnalysisOutcome {
    let Some(provider) = provider else {
        warn!("No LLM credential configured, skipping transcript analysis");
        return AnalysisOutcome::degraded(DegradedReason::CredentialMissing);
    };

    let prompt = build_prompt(transcript);
    debug!(
        "Requesting analysis from provider [{}] for {} character transcript",
        provider.provider_id(),
        transcript.len()
    );

    let completion = match provider.complete(&prompt).await {
        Ok(completion) => completion,
        Err(err) => {
            let reason = classify(&err);
            warn!(
                "Provider [{}] analysis failed ({}): {}",
                provider.provider_id(),
                reason,
                err
            );
            return AnalysisOutcome::degraded(reason);
        }
    };

    match parse_completion(&completion) {
        Some(result) => {
            info!(
                "Analysis complete: {} action items, {} decisions, {} dates, {} tags",
                result.action_items.len(),
                result.key_decisions.len(),
                result.important_dates.len(),
                result.tags.len()
            );
            AnalysisOutcome::Success { result }
        }
        None => {
            warn!(
                "Provider [{}] returned a completion that is not a JSON object",
                provider.provider_id()
            );
            AnalysisOutcome::degraded(DegradedReason::ParseFailure)
        }
    }
}

/// An undecodable response envelope counts as unusable output; everything else is transport.
fn classify(err: &Error) -> DegradedReason {
    match err {
        Error::Deserialization(_) => DegradedReason::ParseFailure,
        _ => DegradedReason::TransportFailure,
    }
}

/// Remove surrounding markdown code fences (```json or bare ```) and whitespace.
pub fn strip_code_fences(completion: &str) -> &str {
    let trimmed = completion.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.get(..4) {
        Some(lang) if lang.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a completion into a fully defaulted [`AnalysisResult`].
///
/// Returns `None` when the sanitized text is not a JSON object. Every field is then
/// checked on its own; a missing or mistyped field falls back to its empty value
/// instead of rejecting the whole payload.
pub fn parse_completion(completion: &str) -> Option<AnalysisResult> {
    let value: Value = serde_json::from_str(strip_code_fences(completion)).ok()?;
    let fields = value.as_object()?;

    let ai_tags = string_list(fields, "tags");

    Some(AnalysisResult {
        summary: fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        action_items: action_items(fields),
        key_decisions: string_list(fields, "keyDecisions"),
        important_dates: string_list(fields, "importantDates"),
        tags: reconcile(&[], &ai_tags),
    })
}

fn string_list(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn action_items(fields: &Map<String, Value>) -> Vec<ActionItem> {
    let Some(items) = fields.get("actionItems").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| {
            let text = |key: &str| {
                item.get(key)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            ActionItem {
                description: text("description"),
                assigned_to: text("assignedTo"),
                priority: item
                    .get("priority")
                    .and_then(Value::as_str)
                    .map(Priority::from_label)
                    .unwrap_or_default(),
            }
        })
        .collect()
}
