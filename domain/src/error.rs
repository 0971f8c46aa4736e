//! Error types for the `domain` layer.
use meeting_ai::InputError;
use meeting_auth::error::{
    ApiKeyErrorKind, Error as MeetingAuthError, ErrorKind as MeetingAuthErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. Callers use `error_kind` to decide between rejecting an upload
/// with a user-facing message (`Internal(Input(_))`) and a server-side failure.
///
/// Enrichment failures never appear here; they are carried by
/// [`meeting_ai::AnalysisOutcome::Degraded`].
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// The upload cannot be read; the message is safe to show to the user.
    Input(InputError),
    Config,
}

/// Enum representing the various kinds of external errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
}

impl Error {
    /// The input error behind this error, if the upload itself was unreadable.
    pub fn input_error(&self) -> Option<&InputError> {
        match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Input(err)) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            DomainErrorKind::Internal(InternalErrorKind::Input(err)) => write!(f, "{err}"),
            _ => write!(f, "Domain Error: {self:?}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<InputError> for Error {
    fn from(err: InputError) -> Self {
        Error {
            source: Some(Box::new(err.clone())),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Input(err)),
        }
    }
}

impl From<MeetingAuthError> for Error {
    fn from(err: MeetingAuthError) -> Self {
        let error_kind = match &err.error_kind {
            MeetingAuthErrorKind::Http(_) => DomainErrorKind::External(ExternalErrorKind::Network),
            MeetingAuthErrorKind::ApiKey(ApiKeyErrorKind::InvalidFormat) => {
                DomainErrorKind::Internal(InternalErrorKind::Config)
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}
