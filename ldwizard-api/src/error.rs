//! Error types for the LD Wizard API

use ldwizard_graph_format::FormatError;
use ldwizard_rml::RmlError;
use ldwizard_tabular::TabularError;
use thiserror::Error;

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transformation mode or input shape other than RML over a row matrix
    #[error("Unsupported transformation kind: {0}")]
    UnsupportedTransformationKind(String),

    /// More than one TriplesMap in a mapping document (strict extraction;
    /// best-effort extraction reports it as a warning)
    #[error("Only a single TriplesMap is supported, found {count}")]
    MultipleTriplesMapFound { count: usize },

    /// Mapping document could not be parsed
    #[error("Issue loading the mapping file: {0}")]
    MappingDocumentParse(String),

    /// A rule references a column name that does not match exactly one
    /// column (strict extraction)
    #[error("Unresolved column reference '{column}' for predicate <{predicate}>")]
    UnresolvedColumnReference { column: String, predicate: String },

    /// A rule could not be interpreted (strict extraction)
    #[error("Invalid mapping: {0}")]
    InvalidMapping(String),

    /// Tabular input rejected by shape validation
    #[error(transparent)]
    RowShape(#[from] TabularError),

    /// Configuration invariant violated
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// RML loading or execution failure
    #[error(transparent)]
    Rml(#[from] RmlError),

    /// Turtle serialization failure
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Configuration (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ApiError::InvalidConfig(message.into())
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
