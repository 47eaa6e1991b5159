//! Error types for dataset loading and configuration.
//!
//! Row-level problems never surface here: malformed cells are defaulted by the
//! normalizer. These errors describe whole-upload failures, which leave the
//! previously loaded dataset untouched.

use std::fmt;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Structured context describing where a dataset error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "load_file", "parse_config")
    pub operation: Option<String>,
    /// File name or other identifier of the input
    pub source_name: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = Some(source_name.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref source) = self.source_name {
            parts.push(format!("source={}", source));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for dataset and configuration operations
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The uploaded content could not be decoded into records.
    #[error("Decode error: {message} {context}")]
    Decode {
        message: String,
        context: ErrorContext,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported format: {message} {context}")]
    UnsupportedFormat {
        message: String,
        context: ErrorContext,
    },

    /// Configuration file missing, unreadable or invalid.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Reading the input failed before decoding started.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },
}

impl DatasetError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn decode_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Decode {
            message: message.into(),
            context,
        }
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn io_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Io {
            message: message.into(),
            context,
        }
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Decode { context, .. }
            | Self::UnsupportedFormat { context, .. }
            | Self::Configuration { context, .. }
            | Self::Io { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::Decode { context, .. }
            | Self::UnsupportedFormat { context, .. }
            | Self::Configuration { context, .. }
            | Self::Io { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }

    /// Add or update the source name in the error context.
    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        match &mut self {
            Self::Decode { context, .. }
            | Self::UnsupportedFormat { context, .. }
            | Self::Configuration { context, .. }
            | Self::Io { context, .. } => {
                context.source_name = Some(source_name.into());
            }
        }
        self
    }
}
