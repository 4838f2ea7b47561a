//! Turtle (TTL) parser for LD Wizard.
//!
//! This crate parses Turtle into any `ldwizard_graph_ir::GraphSink`. It is
//! used to read RML mapping documents.
//!
//! # Example
//!
//! ```
//! use ldwizard_graph_turtle::parse_graph;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! let graph = parse_graph(turtle).unwrap();
//! assert_eq!(graph.len(), 2);
//! ```

pub mod error;
pub mod parser;

pub use error::{Result, TurtleError};
pub use parser::{parse, parse_with_base};

use ldwizard_graph_ir::{Graph, GraphCollectorSink};

/// Parse a Turtle document into an in-memory `Graph`.
pub fn parse_graph(input: &str) -> Result<Graph> {
    let mut sink = GraphCollectorSink::new();
    parse(input, &mut sink)?;
    Ok(sink.finish())
}
