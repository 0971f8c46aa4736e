//! Error types for meeting AI operations.

use std::fmt;

/// Universal error type that abstracts provider-specific errors into common variants.
///
/// LLM provider implementations map their native failures onto these variants so the
/// analysis layer can classify them without knowing which provider produced them.
/// None of these ever escape [`crate::analysis::analyze`]; they are folded into a
/// degraded outcome there.
#[derive(Debug)]
pub enum Error {
    /// The provider rejected the credential (401/403).
    Authentication(String),

    /// Connection refused, DNS failure, TLS failure or a dropped connection.
    Network(String),

    /// The provider answered with a non-success status not covered above.
    Provider(String),

    /// The request exceeded the configured transport timeout.
    Timeout(String),

    /// Provider rate limit exceeded.
    RateLimited { retry_after_seconds: u64 },

    /// The provider's response envelope could not be decoded into a completion.
    Deserialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::Provider(msg) => write!(f, "Provider error: {}", msg),
            Error::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Error::RateLimited {
                retry_after_seconds,
            } => {
                write!(f, "Rate limited: retry after {}s", retry_after_seconds)
            }
            Error::Deserialization(msg) => write!(f, "Deserialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Hard failures while turning an upload into text.
///
/// These are terminal for the request: the caller should reject the upload and
/// show the message to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The filename's extension has no registered extractor. Holds the lowercase
    /// extension, empty when the filename has none.
    UnsupportedFormat(String),

    /// A text-based format (plain text, WebVTT) decoded to nothing but whitespace.
    EmptyContent,

    /// A structured document (Word, PDF) opened fine but carries no text layer.
    NoTextContent,

    /// The container could not be opened or parsed at all.
    Unreadable { format: String, message: String },
}

impl InputError {
    pub(crate) fn unreadable(format: &str, message: impl fmt::Display) -> Self {
        InputError::Unreadable {
            format: format.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported file format: .{}", ext)
            }
            InputError::EmptyContent => write!(f, "File is empty or contains no readable text"),
            InputError::NoTextContent => write!(f, "No text content found in document"),
            InputError::Unreadable { format, message } => {
                write!(f, "Failed to parse {} file: {}", format, message)
            }
        }
    }
}

impl std::error::Error for InputError {}
