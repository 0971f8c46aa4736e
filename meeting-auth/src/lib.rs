//! # meeting-auth
//!
//! Authentication and HTTP plumbing for the external services the meeting
//! pipeline calls:
//! - API key authentication for LLM providers (Anthropic)
//! - HTTP client building with a bounded request timeout
//!
//! ## Architecture
//!
//! `domain` gateways pair an [`api_key::ApiKeyAuth`] with a client from
//! [`http::HttpClientBuilder`] and stamp every outbound request with the
//! provider's credential header.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meeting_auth::{
//!     api_key::{ApiKeyAuth, ApiKeyProvider, ProviderAuth},
//!     http::HttpClientBuilder,
//! };
//! ```

pub mod api_key;
pub mod error;
pub mod http;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
