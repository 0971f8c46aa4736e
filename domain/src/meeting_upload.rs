//! Upload orchestration: turns one uploaded transcript file into the record the
//! caller stores, with title, tags and analysis filled in.

use crate::error::Error;
use log::*;
use meeting_ai::pipeline;
use meeting_ai::traits::analysis::Provider;
use meeting_ai::{AnalysisOutcome, NormalizedTranscript, RawUpload};
use serde::Serialize;

/// Extensions stripped from a filename when deriving a title. Longer suffixes
/// come first so `.docx` is not cut down to `.doc`.
const TITLE_SUFFIXES: [&str; 5] = [".docx", ".doc", ".txt", ".vtt", ".pdf"];

/// Caller-supplied metadata accompanying an upload.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub title: Option<String>,
    /// Raw JSON array of tag strings, as submitted with the upload form.
    pub tags: Option<String>,
}

/// A successfully processed upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedUpload {
    pub title: String,
    pub file_name: String,
    pub file_size: u64,
    pub transcript: NormalizedTranscript,
    /// The final tag set, identical to the tags of the outcome's result.
    pub tags: Vec<String>,
    pub outcome: AnalysisOutcome,
}

/// Caller title when it has any content, otherwise the filename without its
/// transcript extension.
pub fn derive_title(explicit: Option<&str>, filename: &str) -> String {
    if let Some(title) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let lower = filename.to_ascii_lowercase();
    TITLE_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix))
        .map(|suffix| filename[..filename.len() - suffix.len()].to_string())
        .unwrap_or_else(|| filename.to_string())
}

/// Parses the caller's tags from a JSON array string.
///
/// Anything that is not a JSON array yields no tags; non-string elements are skipped.
pub fn parse_user_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(values)) => values
            .into_iter()
            .filter_map(|value| match value {
                serde_json::Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        Ok(_) => {
            debug!("Ignoring user tags that are not a JSON array: {}", raw);
            Vec::new()
        }
        Err(e) => {
            debug!("Ignoring malformed user tags {:?}: {}", raw, e);
            Vec::new()
        }
    }
}

/// Extracts, analyzes and tags one upload.
///
/// Returns an error only when the file itself cannot be used; every analysis
/// problem is reported through the returned [`AnalysisOutcome`].
pub async fn process_upload(
    upload: RawUpload,
    options: UploadOptions,
    provider: Option<&dyn Provider>,
) -> Result<ProcessedUpload, Error> {
    let title = derive_title(options.title.as_deref(), &upload.filename);
    let user_tags = parse_user_tags(options.tags.as_deref());

    info!(
        "Processing upload {} ({} bytes) with {}",
        upload.filename,
        upload.declared_size,
        provider.map_or("no analysis provider", |p| p.provider_id())
    );

    let output = pipeline::run(&upload, &user_tags, provider).await?;
    let tags = output.outcome.result().tags.clone();

    Ok(ProcessedUpload {
        title,
        file_name: upload.filename,
        file_size: upload.declared_size,
        transcript: output.transcript,
        tags,
        outcome: output.outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::anthropic::{AnthropicClient, AnthropicSettings};
    use meeting_ai::{DegradedReason, InputError, SourceFormat};
    use mockito::Server;
    use secrecy::SecretString;
    use std::time::Duration;

    fn client_for(base_url: &str) -> AnthropicClient {
        AnthropicClient::new(AnthropicSettings {
            api_key: SecretString::new("sk-test".to_string()),
            base_url: base_url.to_string(),
            model: "claude-test".to_string(),
            version: "2023-06-01".to_string(),
            max_tokens: 2000,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn envelope(text: &str) -> String {
        serde_json::json!({ "content": [{ "type": "text", "text": text }] }).to_string()
    }

    #[test]
    fn test_derive_title_prefers_explicit_title() {
        assert_eq!(
            derive_title(Some("Weekly sync"), "standup.txt"),
            "Weekly sync"
        );
        assert_eq!(derive_title(Some("   "), "standup.txt"), "standup");
    }

    #[test]
    fn test_derive_title_strips_known_extensions() {
        assert_eq!(derive_title(None, "Q3 Planning.DOCX"), "Q3 Planning");
        assert_eq!(derive_title(None, "notes.doc"), "notes");
        assert_eq!(derive_title(None, "call.vtt"), "call");
        assert_eq!(derive_title(None, "board.Pdf"), "board");
        assert_eq!(derive_title(None, "archive.tar.gz"), "archive.tar.gz");
        assert_eq!(derive_title(None, "README"), "README");
    }

    #[test]
    fn test_parse_user_tags() {
        assert_eq!(
            parse_user_tags(Some(r#"["sales", 3, "q3", null]"#)),
            vec!["sales".to_string(), "q3".to_string()]
        );
        assert!(parse_user_tags(Some("sales,q3")).is_empty());
        assert!(parse_user_tags(Some(r#"{"tags":["a"]}"#)).is_empty());
        assert!(parse_user_tags(Some("")).is_empty());
        assert!(parse_user_tags(None).is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_upload_is_input_error() {
        let upload = RawUpload::new(b"ID3...".to_vec(), "meeting.mp3");

        let err = process_upload(upload, UploadOptions::default(), None)
            .await
            .unwrap_err();

        assert_eq!(
            err.input_error(),
            Some(&InputError::UnsupportedFormat("mp3".to_string()))
        );
        assert_eq!(err.to_string(), "Unsupported file format: .mp3");
    }

    #[tokio::test]
    async fn test_upload_without_provider_uses_credential_fallback() {
        let upload = RawUpload::new(b"Alice: hi\nBob: hello".to_vec(), "Standup.txt");
        let options = UploadOptions {
            title: None,
            tags: Some(r#"["sales","q3"]"#.to_string()),
        };

        let processed = process_upload(upload, options, None).await.unwrap();

        assert_eq!(processed.title, "Standup");
        assert_eq!(processed.file_name, "Standup.txt");
        assert_eq!(processed.file_size, 20);
        assert_eq!(processed.transcript.text(), "Alice: hi\nBob: hello");
        assert_eq!(
            processed.outcome.degraded_reason(),
            Some(DegradedReason::CredentialMissing)
        );
        assert_eq!(
            processed.outcome.result().summary,
            "AI analysis unavailable. Please configure Anthropic API key."
        );
        assert_eq!(
            processed.tags,
            vec!["sales".to_string(), "q3".to_string(), "meeting".to_string()]
        );
    }

    #[tokio::test]
    async fn test_vtt_upload_with_provider_merges_tags() {
        let mut server = Server::new_async().await;
        let completion = r#"{"summary":"Budget review.","actionItems":[],"keyDecisions":["Approve budget"],"importantDates":[],"tags":["Q3","budget","sales"]}"#;
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", "sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(completion))
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let upload = RawUpload::new(
            b"WEBVTT\n\n00:00:01.000 --> 00:00:04.000\nAlice: Let's approve the budget.\n".to_vec(),
            "budget.vtt",
        );
        let options = UploadOptions {
            title: Some("Budget".to_string()),
            tags: Some(r#"["sales","q3"]"#.to_string()),
        };

        let processed = process_upload(upload, options, Some(&client))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(processed.title, "Budget");
        assert_eq!(processed.transcript.source_format(), SourceFormat::WebVtt);
        assert_eq!(
            processed.transcript.text(),
            "Alice: Let's approve the budget."
        );
        assert!(!processed.outcome.is_degraded());
        assert_eq!(
            processed.tags,
            vec![
                "sales".to_string(),
                "q3".to_string(),
                "Q3".to_string(),
                "budget".to_string()
            ]
        );
        assert_eq!(processed.tags, processed.outcome.result().tags);
    }

    #[tokio::test]
    async fn test_provider_failure_still_produces_record() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(503)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let upload = RawUpload::new(b"Alice: hi".to_vec(), "chat.txt");

        let processed = process_upload(upload, UploadOptions::default(), Some(&client))
            .await
            .unwrap();

        assert_eq!(
            processed.outcome.degraded_reason(),
            Some(DegradedReason::TransportFailure)
        );
        assert_eq!(
            processed.outcome.result().summary,
            "Analysis unavailable. Please try again."
        );
        assert_eq!(processed.tags, vec!["meeting".to_string()]);
    }

    #[test]
    fn test_processed_upload_serializes_outcome_status() {
        let upload = RawUpload::new(b"Alice: hi".to_vec(), "chat.txt");
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let processed = runtime
            .block_on(process_upload(upload, UploadOptions::default(), None))
            .unwrap();

        let json = serde_json::to_value(&processed).unwrap();
        assert_eq!(json["fileName"], "chat.txt");
        assert_eq!(json["outcome"]["status"], "degraded");
        assert_eq!(json["transcript"]["sourceFormat"], "plain");
    }
}
