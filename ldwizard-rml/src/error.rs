//! RML error types

use thiserror::Error;

/// RML-specific errors
#[derive(Debug, Error)]
pub enum RmlError {
    /// Error parsing a Turtle mapping document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error reading or converting a YARRRML document
    #[error("YARRRML error: {0}")]
    Yarrrml(String),

    /// Missing required property in mapping
    #[error("Missing required property: {0}")]
    MissingProperty(String),

    /// Invalid property value
    #[error("Invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },

    /// Invalid template syntax
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// A logical source has no table bound to it
    #[error("No input bound to logical source '{0}'")]
    UnboundSource(String),

    /// Column not found in the header of the bound table
    #[error("Column not found: {column} in source {source_name}")]
    ColumnNotFound { column: String, source_name: String },

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

impl RmlError {
    pub(crate) fn invalid(property: &str, message: impl Into<String>) -> Self {
        RmlError::InvalidValue {
            property: property.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for RML operations
pub type RmlResult<T> = Result<T, RmlError>;
