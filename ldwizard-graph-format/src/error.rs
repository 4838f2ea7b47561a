//! Error types for graph formatting

/// Error type for formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Turtle has no syntax for named graphs
    #[error("Cannot write quad in named graph {graph} as Turtle")]
    NamedGraph { graph: String },

    /// Writing to the output buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Result type for formatting operations
pub type Result<T> = std::result::Result<T, FormatError>;
