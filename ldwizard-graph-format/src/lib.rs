//! RDF graph formatters
//!
//! This crate converts an `ldwizard_graph_ir::Graph` to Turtle. IRIs are
//! compacted against a [`PrefixMap`] that starts from the well-known
//! namespaces plus the configured base IRI.
//!
//! # Example
//!
//! ```
//! use ldwizard_graph_ir::{Graph, Term};
//! use ldwizard_graph_format::{format_turtle, PrefixMap};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//!
//! let prefixes = PrefixMap::well_known("http://example.org/");
//! let ttl = format_turtle(&graph, &prefixes).unwrap();
//! assert!(ttl.contains(":alice foaf:name \"Alice\" ."));
//! ```

mod error;
mod prefix;
mod turtle;

pub use error::{FormatError, Result};
pub use prefix::{is_valid_local_name, PrefixMap};
pub use turtle::{escape_turtle_string, format_turtle};
