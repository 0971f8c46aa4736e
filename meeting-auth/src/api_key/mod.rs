//! API key authentication for service providers.
//!
//! Provides traits and implementations for authenticating requests to services
//! that use API keys carried in a request header.

mod auth;

pub use auth::{ApiKeyAuth, ApiKeyProvider, ProviderAuth};
