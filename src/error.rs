use crate::transport::TransportError;
use std::fmt;
use thiserror::Error;

/// Phase of an invocation in which an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Checking tool parameters
    Validation,
    /// Converting effective headers to wire headers
    HeaderEncoding,
    /// Loading or rendering the tool manifest
    Manifest,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Validation => "validation",
            Stage::HeaderEncoding => "header encoding",
            Stage::Manifest => "manifest",
        })
    }
}

/// What the host needs to fix a rejected invocation: the offending parameter,
/// the underlying parser message and the stage that raised it.
///
/// Rendered after the error message as `[stage] at <parameter>: cause`, skipping
/// absent parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Tool parameter at fault, e.g. `headers` or `headers.X-Trace`
    pub parameter: Option<String>,
    pub cause: Option<String>,
    pub stage: Option<Stage>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a parameter rejected during validation.
    pub fn parameter(name: impl Into<String>) -> Self {
        Self {
            parameter: Some(name.into()),
            stage: Some(Stage::Validation),
            ..Self::default()
        }
    }

    pub fn at(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn in_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn caused_by(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(stage) = self.stage {
            write!(f, " [{stage}]")?;
        }
        if let Some(parameter) = &self.parameter {
            write!(f, " at `{parameter}`")?;
        }
        if let Some(cause) = &self.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

/// Unified error type for a streaming request invocation.
///
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected before any network I/O (bad URL, headers, body or method).
    #[error("Invalid input: {message}{context}")]
    InvalidInput {
        message: String,
        context: ErrorContext,
    },

    /// The server answered with a status outside `[200, 300)`.
    #[error("HTTP Error: {status}{}", .reason.as_ref().map(|r| format!(" {}", r)).unwrap_or_default())]
    HttpStatus { status: u16, reason: Option<String> },

    /// Connection, timeout or body-read failure.
    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unexpected error: {message}{context}")]
    Unexpected {
        message: String,
        context: ErrorContext,
    },
}

impl Error {
    /// Create a new invalid-input error with structured context
    pub fn invalid_input_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::InvalidInput {
            message: msg.into(),
            context,
        }
    }

    /// Create a new unexpected error with structured context
    pub fn unexpected_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Unexpected {
            message: msg.into(),
            context,
        }
    }

    pub fn http_status(status: u16, reason: Option<&str>) -> Self {
        Error::HttpStatus {
            status,
            reason: reason.map(str::to_string),
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidInput { context, .. } | Error::Unexpected { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Status code carried by an [`Error::HttpStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(TransportError::Http(e))
    }
}
