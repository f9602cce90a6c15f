use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for s3put operations
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<StatusCode>,
    body: Option<String>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request descriptor cannot be signed: the canonical URI is not
    /// absolute, the payload is absent, the method is not PUT, etc.
    InvalidDescriptor,

    /// Access key id or secret access key is empty, or no credential could be loaded.
    MissingCredentials,

    /// The storage endpoint answered with anything other than `200 OK`.
    UploadRejected,

    /// Configuration error (missing bucket, region, ...)
    ConfigInvalid,

    /// Unexpected errors (network, I/O, header construction, ...)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            body: None,
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the response that caused this error.
    pub fn with_response(mut self, status: StatusCode, body: impl Into<String>) -> Self {
        self.status = Some(status);
        self.body = Some(body.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Status code returned by the storage endpoint, if any.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Response body returned by the storage endpoint, if any.
    pub fn response_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Check if this error was raised before any network interaction.
    ///
    /// Such errors are caused by the caller's input or configuration and
    /// will fail again on every attempt.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidDescriptor | ErrorKind::MissingCredentials | ErrorKind::ConfigInvalid
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDescriptor, message)
    }

    /// Create a missing credentials error
    pub fn missing_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingCredentials, message)
    }

    /// Create an upload rejected error carrying the response.
    pub fn upload_rejected(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(
            ErrorKind::UploadRejected,
            format!("storage endpoint responded with {status}"),
        )
        .with_response(status, body)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidDescriptor => write!(f, "invalid descriptor"),
            ErrorKind::MissingCredentials => write!(f, "missing credentials"),
            ErrorKind::UploadRejected => write!(f, "upload rejected"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::invalid_descriptor(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::invalid_descriptor(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::invalid_descriptor(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
