//! Application Errors
//!
//! A small, closed error taxonomy shared by every layer. Lower layers
//! classify a failure and attach the originating cause; the inbound
//! adapter turns the kind into a status code and only ever shows the
//! message to callers.

use std::fmt;
use thiserror::Error;

/// Boxed lower-level cause attached to an [`AppError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure category of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or semantically invalid caller input.
    Validation,
    /// Requested resource does not exist.
    NotFound,
    /// Infrastructure failure (GeoIP provider, uninitialized resource).
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged application error.
///
/// `Display` renders only the user-facing message. The wrapped cause is
/// reachable through [`std::error::Error::source`] and [`AppError::detail`].
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn validation_with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::validation(message).with_source(source)
    }

    pub fn not_found_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::not_found(message).with_source(source)
    }

    pub fn internal_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::internal(message).with_source(source)
    }

    /// Attach a lower-level cause for diagnostics.
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// User-facing message.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_internal(&self) -> bool {
        self.kind == ErrorKind::Internal
    }

    /// Message plus wrapped cause, for logs only.
    pub fn detail(&self) -> String {
        match &self.source {
            Some(source) => format!("{}: {}", self.message, source),
            None => self.message.clone(),
        }
    }
}
