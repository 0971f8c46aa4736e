//! API key authentication trait and implementation.

use log::*;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{api_key_error, ApiKeyErrorKind, Error};

/// Known API key providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyProvider {
    Anthropic,
}

impl ApiKeyProvider {
    /// Get the provider identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyProvider::Anthropic => "anthropic",
        }
    }

    /// Header the provider expects the key in.
    pub fn header_name(&self) -> &'static str {
        match self {
            ApiKeyProvider::Anthropic => "x-api-key",
        }
    }
}

/// Trait for authenticating HTTP requests with API keys.
///
/// Implementations handle provider-specific authentication patterns like:
/// - Anthropic: `x-api-key: xxx`
pub trait ProviderAuth: Send + Sync {
    /// Apply authentication to a request builder.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}

/// API key authentication implementation.
///
/// The key value is validated once at construction and marked sensitive so it never
/// shows up in `Debug` output of the request.
///
/// # Examples
///
/// ```rust,ignore
/// // Anthropic: x-api-key: xxx (no prefix)
/// let auth = ApiKeyAuth::new(
///     ApiKeyProvider::Anthropic,
///     SecretString::new("api_key_here".to_string()),
/// )?;
/// ```
pub struct ApiKeyAuth {
    header_name: HeaderName,
    header_value: HeaderValue,
}

impl ApiKeyAuth {
    /// Create a new API key authenticator.
    ///
    /// Fails with [`ApiKeyErrorKind::InvalidFormat`] when the key is blank or
    /// contains characters that cannot be sent in an HTTP header.
    pub fn new(provider: ApiKeyProvider, api_key: SecretString) -> Result<Self, Error> {
        let key = api_key.expose_secret().trim();
        if key.is_empty() {
            return Err(api_key_error(
                ApiKeyErrorKind::InvalidFormat,
                "API key is empty",
            ));
        }

        let mut header_value = HeaderValue::from_str(key).map_err(|e| {
            warn!("Failed to create {} auth header: {:?}", provider.as_str(), e);
            api_key_error(
                ApiKeyErrorKind::InvalidFormat,
                "API key contains invalid header characters",
            )
        })?;
        header_value.set_sensitive(true);

        Ok(Self {
            header_name: HeaderName::from_static(provider.header_name()),
            header_value,
        })
    }
}

impl ProviderAuth for ApiKeyAuth {
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(self.header_name.clone(), self.header_value.clone())
    }
}
