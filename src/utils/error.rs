use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Reference error: {message}")]
    ReferenceError { message: String },

    #[error("Capacity error: {message}")]
    CapacityError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Reference,
    Capacity,
    Storage,
    Configuration,
}

impl ReservationError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::ReferenceError {
            message: message.into(),
        }
    }

    pub fn capacity(message: impl Into<String>) -> Self {
        Self::CapacityError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ReferenceError { .. } => ErrorCategory::Reference,
            Self::CapacityError { .. } => ErrorCategory::Capacity,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Short message for terminal output, without the variant prefix.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, message } => format!("invalid {}: {}", field, message),
            Self::ReferenceError { message } | Self::CapacityError { message } => message.clone(),
            Self::IoError(e) => format!("could not write data files: {}", e),
            Self::SerializationError(e) => format!("could not encode data: {}", e),
            Self::ConfigError { message } => format!("bad configuration: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
