//! Anthropic Messages API client for transcript analysis.
//!
//! Sends the rendered analysis prompt as a single user message and hands the first
//! text block of the reply back to `meeting-ai`, which owns all parsing of the
//! completion itself.

use crate::error::Error;
use async_trait::async_trait;
use log::*;
use meeting_ai::traits::analysis::Provider;
use meeting_auth::api_key::{ApiKeyAuth, ApiKeyProvider, ProviderAuth};
use meeting_auth::http::HttpClientBuilder;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;

/// Everything needed to reach the Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub version: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl AnthropicSettings {
    /// Settings from `config`, or `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.anthropic_api_key()?;

        Some(Self {
            api_key: SecretString::new(api_key),
            base_url: config.anthropic_base_url().to_string(),
            model: config.anthropic_model().to_string(),
            version: config.anthropic_version().to_string(),
            max_tokens: config.anthropic_max_tokens,
            timeout: config.llm_timeout(),
        })
    }
}

/// Request body for `POST /messages`
#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<Message<'a>>,
}

/// A single conversation turn
#[derive(Debug, Serialize)]
pub struct Message<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Response envelope from `POST /messages`
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// One block of the model's reply
#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Anthropic API client
pub struct AnthropicClient {
    client: reqwest::Client,
    auth: ApiKeyAuth,
    base_url: String,
    model: String,
    version: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Create a new Anthropic client from explicit settings
    pub fn new(settings: AnthropicSettings) -> Result<Self, Error> {
        let auth = ApiKeyAuth::new(ApiKeyProvider::Anthropic, settings.api_key)?;
        let client = HttpClientBuilder::new()
            .with_timeout(settings.timeout)
            .with_user_agent(format!("meeting-insights/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            auth,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model,
            version: settings.version,
            max_tokens: settings.max_tokens,
        })
    }

    /// Build a client from application config.
    ///
    /// Returns `Ok(None)` when no API key is configured, which callers pass on to the
    /// analyzer so it can degrade without attempting any network I/O.
    pub fn from_config(config: &Config) -> Result<Option<Self>, Error> {
        match AnthropicSettings::from_config(config) {
            Some(settings) => Ok(Some(Self::new(settings)?)),
            None => {
                info!("ANTHROPIC_API_KEY not configured, transcript analysis disabled");
                Ok(None)
            }
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

#[async_trait]
impl Provider for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, meeting_ai::Error> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        debug!(
            "Calling Anthropic model {} (max_tokens={})",
            self.model, self.max_tokens
        );

        let response = self
            .auth
            .authenticate(self.client.post(self.messages_url()))
            .header("anthropic-version", &self.version)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to call Anthropic Messages API: {:?}", e);
                transport_error(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_seconds = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or_default();
            let error_text = response.text().await.unwrap_or_default();
            error!("Anthropic API: {} - {}", status, error_text);
            return Err(status_error(status, error_text, retry_after_seconds));
        }

        let body: MessagesResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Anthropic response: {:?}", e);
            if e.is_decode() {
                meeting_ai::Error::Deserialization(e.to_string())
            } else {
                transport_error(e)
            }
        })?;

        debug!("Anthropic response stop_reason: {:?}", body.stop_reason);

        body.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                warn!("Anthropic response carried no text content");
                meeting_ai::Error::Deserialization(
                    "response has no text in its first content block".to_string(),
                )
            })
    }

    fn provider_id(&self) -> &'static str {
        ApiKeyProvider::Anthropic.as_str()
    }
}

fn transport_error(err: reqwest::Error) -> meeting_ai::Error {
    if err.is_timeout() {
        meeting_ai::Error::Timeout(err.to_string())
    } else {
        meeting_ai::Error::Network(err.to_string())
    }
}

fn status_error(status: StatusCode, body: String, retry_after_seconds: u64) -> meeting_ai::Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            meeting_ai::Error::Authentication(format!("{status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => meeting_ai::Error::RateLimited {
            retry_after_seconds,
        },
        _ => meeting_ai::Error::Provider(format!("{status}: {body}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use meeting_ai::analysis::analyze;
    use meeting_ai::{DegradedReason, Priority};
    use mockito::{Matcher, Server, ServerGuard};

    const TEST_KEY: &str = "test_api_key_123";

    async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    fn settings_for(base_url: &str) -> AnthropicSettings {
        AnthropicSettings {
            api_key: SecretString::new(TEST_KEY.to_string()),
            base_url: base_url.to_string(),
            model: "claude-test".to_string(),
            version: "2023-06-01".to_string(),
            max_tokens: 2000,
            timeout: Duration::from_secs(5),
        }
    }

    fn envelope(text: &str) -> String {
        serde_json::json!({
            "id": "msg_123",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": text }],
            "stop_reason": "end_turn"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_complete_sends_single_authenticated_request() {
        let mut server = setup_test_server().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("x-api-key", TEST_KEY)
            .match_header("anthropic-version", "2023-06-01")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "claude-test",
                "max_tokens": 2000,
                "messages": [{ "role": "user", "content": "Summarize this" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope("{\"summary\":\"ok\"}"))
            .expect(1)
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let completion = client.complete("Summarize this").await.unwrap();

        assert_eq!(completion, "{\"summary\":\"ok\"}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_analyze_end_to_end_with_fenced_completion() {
        let mut server = setup_test_server().await;
        let completion = "```json\n{\"summary\":\"Team agreed on launch.\",\"actionItems\":[{\"description\":\"x\",\"priority\":\"urgent\"}],\"keyDecisions\":[\"Launch Monday\"],\"importantDates\":[\"Monday\"],\"tags\":[\"launch\"]}\n```";
        let _mock = server
            .mock("POST", "/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope(completion))
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let outcome = analyze(Some(&client), "Alice: launch Monday").await;

        assert!(!outcome.is_degraded());
        let result = outcome.result();
        assert_eq!(result.summary, "Team agreed on launch.");
        assert_eq!(result.action_items[0].priority, Priority::Medium);
        assert_eq!(result.key_decisions, vec!["Launch Monday".to_string()]);
        assert_eq!(result.tags, vec!["launch".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_transport_failure() {
        let mut server = setup_test_server().await;
        let mock = server
            .mock("POST", "/messages")
            .with_status(500)
            .with_body("{\"type\":\"error\"}")
            .expect(1)
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let outcome = analyze(Some(&client), "Alice: hi").await;

        assert_eq!(
            outcome.degraded_reason(),
            Some(DegradedReason::TransportFailure)
        );
        assert_eq!(outcome.result().tags, vec!["meeting".to_string()]);
        // No retry after the failure.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_codes_map_to_error_variants() {
        let mut server = setup_test_server().await;
        let _unauthorized = server
            .mock("POST", "/messages")
            .with_status(401)
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let err = client.complete("x").await.unwrap_err();
        assert!(matches!(err, meeting_ai::Error::Authentication(_)));

        let mut server = setup_test_server().await;
        let _limited = server
            .mock("POST", "/messages")
            .with_status(429)
            .with_header("retry-after", "30")
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let err = client.complete("x").await.unwrap_err();
        assert!(matches!(
            err,
            meeting_ai::Error::RateLimited {
                retry_after_seconds: 30
            }
        ));
    }

    #[tokio::test]
    async fn test_non_json_completion_degrades_to_parse_failure() {
        let mut server = setup_test_server().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(envelope("I could not find any action items in this meeting."))
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let outcome = analyze(Some(&client), "Alice: hi").await;

        assert_eq!(outcome.degraded_reason(), Some(DegradedReason::ParseFailure));
        let result = outcome.result();
        assert_eq!(result.tags, vec!["meeting".to_string()]);
        assert!(result.action_items.is_empty());
        assert!(result.key_decisions.is_empty());
        assert!(result.important_dates.is_empty());
    }

    #[tokio::test]
    async fn test_envelope_without_text_is_deserialization_error() {
        let mut server = setup_test_server().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\"content\":[]}")
            .create_async()
            .await;

        let client = AnthropicClient::new(settings_for(&server.url())).unwrap();
        let err = client.complete("x").await.unwrap_err();

        assert!(matches!(err, meeting_ai::Error::Deserialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_degrades_to_transport_failure() {
        // Nothing listens on port 1.
        let client = AnthropicClient::new(settings_for("http://127.0.0.1:1")).unwrap();
        let outcome = analyze(Some(&client), "Alice: hi").await;

        assert_eq!(
            outcome.degraded_reason(),
            Some(DegradedReason::TransportFailure)
        );
    }

    #[test]
    fn test_blank_api_key_is_config_error() {
        let mut settings = settings_for("http://localhost");
        settings.api_key = SecretString::new("  ".to_string());

        let err = AnthropicClient::new(settings).err().unwrap();
        assert_eq!(
            err.error_kind,
            crate::error::DomainErrorKind::Internal(crate::error::InternalErrorKind::Config)
        );
    }

    #[test]
    fn test_from_config_without_key_is_none() {
        let config = Config::try_parse_from(["meeting_insights"])
            .unwrap()
            .set_anthropic_api_key(None);

        assert!(AnthropicClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_with_key_builds_client() {
        let config = Config::try_parse_from(["meeting_insights", "--anthropic-api-key", "sk-1"])
            .unwrap()
            .set_anthropic_base_url("http://localhost:9/".to_string());

        let client = AnthropicClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.messages_url(), "http://localhost:9/messages");
        assert_eq!(client.provider_id(), "anthropic");
    }
}
