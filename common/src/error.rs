//! Error handling for the veneer-common crate.

use thiserror::Error;

/// Common error type shared by every veneer crate.
///
/// Each variant carries a human readable message and, optionally, the
/// underlying error that caused it.
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid configuration: {message}")]
    ConfigurationError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Unsupported operation: {message}")]
    UnsupportedOperation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Invalid argument: {message}")]
    ArgumentError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Data source failed: {message}")]
    SourceError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Serialization failed: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Deserialization failed: {message}")]
    DeserializationError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },
}

/// Result type alias for common operations.
pub type Result<T> = std::result::Result<T, CommonError>;

/// Error severity levels for categorizing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The caller can correct the call and try again
    Low,
    /// The operation failed but the proxy and its source are intact
    Medium,
    /// A wrapper type is misconfigured and cannot be used as declared
    High,
    /// An invariant of the proxy itself was broken
    Critical,
}

/// Error category for grouping related error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Declaring wrapper types and loading their configuration
    Configuration,
    /// Routing a call through the forwarding allow-list
    Dispatch,
    /// Failures raised by the wrapped data source
    DataSource,
    /// Converting configuration records to and from text
    DataProcessing,
    /// Internal logic errors
    Internal,
}

/// Trait for rich error diagnostics with context and suggestions.
pub trait Diagnose {
    /// Get the error severity level.
    fn severity(&self) -> ErrorSeverity;

    /// Get the error category.
    fn category(&self) -> ErrorCategory;

    /// Get additional context about the error.
    fn context(&self) -> Vec<String>;

    /// Get suggestions for resolving the error.
    fn suggestions(&self) -> Vec<String>;
}

impl CommonError {
    /// Create a configuration error with a custom message.
    pub fn configuration_error<S: Into<String>>(message: S) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with a custom message and source error.
    pub fn configuration_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an unsupported operation error with a custom message.
    pub fn unsupported_operation<S: Into<String>>(message: S) -> Self {
        Self::UnsupportedOperation {
            message: message.into(),
            source: None,
        }
    }

    /// Create an argument error with a custom message.
    pub fn argument_error<S: Into<String>>(message: S) -> Self {
        Self::ArgumentError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a data source error with a custom message.
    pub fn source_error<S: Into<String>>(message: S) -> Self {
        Self::SourceError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a data source error with a custom message and source error.
    pub fn source_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::SourceError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a serialization error with a custom message and source error.
    pub fn serialization_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a deserialization error with a custom message and source error.
    pub fn deserialization_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::DeserializationError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create an internal error with a custom message.
    pub fn internal_error<S: Into<String>>(message: S) -> Self {
        Self::InternalError {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error with a custom message and source error.
    pub fn internal_error_with_source<S: Into<String>, E: Into<anyhow::Error>>(
        message: S,
        source: E,
    ) -> Self {
        Self::InternalError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The message this error was created with, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            CommonError::ConfigurationError { message, .. }
            | CommonError::UnsupportedOperation { message, .. }
            | CommonError::ArgumentError { message, .. }
            | CommonError::SourceError { message, .. }
            | CommonError::SerializationError { message, .. }
            | CommonError::DeserializationError { message, .. }
            | CommonError::InternalError { message, .. } => message,
        }
    }
}

impl Diagnose for CommonError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            CommonError::ConfigurationError { .. } => ErrorSeverity::High,
            CommonError::UnsupportedOperation { .. } => ErrorSeverity::Low,
            CommonError::ArgumentError { .. } => ErrorSeverity::Low,
            CommonError::SourceError { .. } => ErrorSeverity::Medium,
            CommonError::SerializationError { .. } => ErrorSeverity::Medium,
            CommonError::DeserializationError { .. } => ErrorSeverity::Medium,
            CommonError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            CommonError::ConfigurationError { .. } => ErrorCategory::Configuration,
            CommonError::UnsupportedOperation { .. } => ErrorCategory::Dispatch,
            CommonError::ArgumentError { .. } => ErrorCategory::Dispatch,
            CommonError::SourceError { .. } => ErrorCategory::DataSource,
            CommonError::SerializationError { .. } => ErrorCategory::DataProcessing,
            CommonError::DeserializationError { .. } => ErrorCategory::DataProcessing,
            CommonError::InternalError { .. } => ErrorCategory::Internal,
        }
    }

    fn context(&self) -> Vec<String> {
        let mut context = Vec::new();

        match self {
            CommonError::ConfigurationError { message, .. } => {
                context.push(format!("Configuration context: {}", message));
                context.push(
                    "The wrapper type was rejected while it was being declared".to_string(),
                );
            }
            CommonError::UnsupportedOperation { message, .. } => {
                context.push(format!("Dispatch context: {}", message));
                context.push(
                    "The operation is not forwarded by this wrapper type or not known to its source"
                        .to_string(),
                );
            }
            CommonError::ArgumentError { message, .. } => {
                context.push(format!("Argument context: {}", message));
                context.push(
                    "A forwarded operation received an argument of an unexpected type".to_string(),
                );
            }
            CommonError::SourceError { message, .. } => {
                context.push(format!("Data source context: {}", message));
                context.push("The wrapped data source reported this failure".to_string());
            }
            CommonError::SerializationError { message, .. } => {
                context.push(format!("Serialization context: {}", message));
            }
            CommonError::DeserializationError { message, .. } => {
                context.push(format!("Deserialization context: {}", message));
                context.push("This may indicate malformed or outdated configuration".to_string());
            }
            CommonError::InternalError { message, .. } => {
                context.push(format!("Internal error context: {}", message));
                context.push("This indicates an unexpected internal condition".to_string());
            }
        }

        context
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            CommonError::ConfigurationError { .. } => vec![
                "Remove reserved names such as `each` or `to_vec` from the forward list"
                    .to_string(),
                "Check that every forwarded operation name is non-empty".to_string(),
            ],
            CommonError::UnsupportedOperation { .. } => vec![
                "Declare the operation when building the wrapper type".to_string(),
                "Check the operation name against the data source's supported operations"
                    .to_string(),
            ],
            CommonError::ArgumentError { .. } => vec![
                "Check the number and order of arguments".to_string(),
                "Wrap each argument in a `Value` of the exact type the source expects"
                    .to_string(),
            ],
            CommonError::SourceError { .. } => vec![
                "Inspect the source error for the underlying cause".to_string(),
            ],
            CommonError::SerializationError { .. } => vec![
                "Verify every configuration field is serializable".to_string(),
            ],
            CommonError::DeserializationError { .. } => vec![
                "Validate the configuration document syntax".to_string(),
                "Remove fields the configuration format does not define".to_string(),
            ],
            CommonError::InternalError { .. } => vec![
                "Report this issue to the development team".to_string(),
                "Check logs for additional details".to_string(),
            ],
        }
    }
}

/// Conversion utilities for seamless integration between anyhow and CommonError.
pub mod conversion {
    use super::*;

    /// Convert anyhow::Error to CommonError with automatic categorization.
    pub fn from_anyhow(error: anyhow::Error) -> CommonError {
        let error_str = error.to_string().to_lowercase();

        // Order matters - more specific patterns should come first
        if error_str.contains("unsupported") || error_str.contains("unknown operation") {
            CommonError::UnsupportedOperation {
                message: "Unsupported operation".to_string(),
                source: Some(error),
            }
        } else if error_str.contains("argument") {
            CommonError::ArgumentError {
                message: "Invalid argument".to_string(),
                source: Some(error),
            }
        } else if error_str.contains("config") || error_str.contains("reserved") {
            CommonError::configuration_error_with_source("Configuration error", error)
        } else if error_str.contains("deserialize") || error_str.contains("deserialization") {
            CommonError::deserialization_error_with_source("Deserialization failed", error)
        } else if error_str.contains("serialize") || error_str.contains("serialization") {
            CommonError::serialization_error_with_source("Serialization failed", error)
        } else if error_str.contains("source") {
            CommonError::source_error_with_source("Data source failed", error)
        } else {
            CommonError::internal_error_with_source("Internal error", error)
        }
    }

    /// Convert Result<T, anyhow::Error> to Result<T, CommonError>.
    pub fn from_anyhow_result<T>(result: anyhow::Result<T>) -> Result<T> {
        result.map_err(from_anyhow)
    }
}

/// Context helpers for adding rich context to errors.
pub mod context {
    use super::*;

    /// Extension trait for adding context to Results.
    pub trait ErrorContext<T> {
        /// Add context to an error with automatic categorization.
        fn with_context<F>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> String;

        /// Report the error as a failure of the wrapped data source.
        fn with_source_context<F>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> String;

        /// Report the error as a configuration failure.
        fn with_config_context<F>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> String;
    }

    impl<T, E> ErrorContext<T> for std::result::Result<T, E>
    where
        E: Into<anyhow::Error>,
    {
        fn with_context<F>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> String,
        {
            self.map_err(|e| {
                let context = f();
                conversion::from_anyhow(e.into().context(context))
            })
        }

        fn with_source_context<F>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> String,
        {
            self.map_err(|e| {
                let context = f();
                CommonError::source_error_with_source(context, e.into())
            })
        }

        fn with_config_context<F>(self, f: F) -> Result<T>
        where
            F: FnOnce() -> String,
        {
            self.map_err(|e| {
                let context = f();
                CommonError::configuration_error_with_source(context, e.into())
            })
        }
    }
}

pub use context::ErrorContext;
/// Re-export commonly used types and traits.
pub use conversion::{from_anyhow, from_anyhow_result};
