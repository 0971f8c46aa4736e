//! End-to-end pipeline: extract, analyze, reconcile tags.

use crate::analysis::analyze;
use crate::error::InputError;
use crate::extract::extract_upload;
use crate::tags::reconcile;
use crate::traits::analysis::Provider;
use crate::types::analysis::AnalysisOutcome;
use crate::types::transcript::{NormalizedTranscript, RawUpload};
use log::*;

/// What the pipeline hands back for a readable upload.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub transcript: NormalizedTranscript,
    /// Its result's tags are already merged with the caller's tags.
    pub outcome: AnalysisOutcome,
}

/// Run one upload through the pipeline.
///
/// Fails only on input errors. Enrichment problems are reported through
/// [`AnalysisOutcome::Degraded`] and never abort the run.
pub async fn run(
    upload: &RawUpload,
    user_tags: &[String],
    provider: Option<&dyn Provider>,
) -> Result<PipelineOutput, InputError> {
    let transcript = extract_upload(upload).map_err(|e| {
        info!("Rejecting upload {}: {}", upload.filename, e);
        e
    })?;

    let outcome = analyze(provider, transcript.text())
        .await
        .map_result(|result| {
            let tags = reconcile(user_tags, &result.tags);
            result.with_tags(tags)
        });

    if let Some(reason) = outcome.degraded_reason() {
        warn!(
            "Stored fallback analysis for {} ({})",
            upload.filename, reason
        );
    }

    Ok(PipelineOutput {
        transcript,
        outcome,
    })
}
