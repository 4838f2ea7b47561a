//! Error types for Turtle parsing

/// Error type for Turtle parsing operations
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// Syntax error reported by the underlying parser (1-based position)
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: u64,
        column: u64,
        message: String,
    },

    /// Invalid base IRI supplied by the caller
    #[error("IRI resolution error: {0}")]
    IriResolution(String),

    /// Construct that has no counterpart in the graph IR
    #[error("Unsupported construct: {0}")]
    Unsupported(String),
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;

impl TurtleError {
    /// Create a parse error
    pub fn parse(line: u64, column: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}
