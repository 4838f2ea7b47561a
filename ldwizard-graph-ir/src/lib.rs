//! Format-agnostic RDF graph intermediate representation
//!
//! This crate provides the canonical types exchanged between the Turtle
//! parser, the mapping extractor, the transformation executor and the Turtle
//! formatter.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form. Compaction
//!    is handled by formatters at output time.
//!
//! 2. **Explicit datatypes** - Literals always have an explicit datatype.
//!    Plain strings use `xsd:string`, language-tagged strings use
//!    `rdf:langString`.
//!
//! 3. **Insertion order is preserved** - `Graph` and `QuadStore` keep quads in
//!    the order they were added so that output built from them is
//!    reproducible.
//!
//! # Example
//!
//! ```
//! use ldwizard_graph_ir::{Graph, QuadStore, Term};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//!
//! let store = QuadStore::from_graph(&graph);
//! let names: Vec<_> = store
//!     .match_pattern(None, Some(&Term::iri("http://xmlns.com/foaf/0.1/name")), None)
//!     .collect();
//! assert_eq!(names.len(), 1);
//! ```

pub mod datatype;
mod graph;
mod quad;
mod sink;
mod store;
mod term;

pub use datatype::Datatype;
pub use graph::{Graph, SubjectGroup};
pub use quad::Quad;
pub use sink::{GraphCollectorSink, GraphSink, TermId};
pub use store::QuadStore;
pub use term::{BlankId, Term};
