use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum FacadeError {
    #[error("{operation} did not complete within {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("{operation} failed: {source}")]
    ServiceError {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("{resource} not found: {name}")]
    NotFound { resource: &'static str, name: String },

    #[error("Local file does not exist: {}", .path.display())]
    MissingLocalFile { path: PathBuf },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    Service,
    NotFound,
    LocalIo,
    Configuration,
}

impl FacadeError {
    pub fn service(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::ServiceError {
            operation,
            source: source.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout { .. } => ErrorCategory::Timeout,
            Self::ServiceError { .. } => ErrorCategory::Service,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::MissingLocalFile { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::LocalIo
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Whether a caller may reasonably try the same call again. The facade itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(self.category(), ErrorCategory::Timeout | ErrorCategory::Service)
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Timeout => {
                "Increase --timeout-secs or check network connectivity to the AWS endpoint"
            }
            ErrorCategory::Service => {
                "Check credentials, region and permissions for the target service"
            }
            ErrorCategory::NotFound => {
                "Verify the table, bucket or key name and the configured region"
            }
            ErrorCategory::LocalIo => "Check that the local path exists and is readable/writable",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Service => 1,
            ErrorCategory::Timeout => 2,
            ErrorCategory::Configuration => 3,
            ErrorCategory::NotFound => 4,
            ErrorCategory::LocalIo => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, FacadeError>;
