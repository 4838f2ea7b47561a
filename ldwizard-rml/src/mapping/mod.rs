//! RML mapping structures
//!
//! This module provides the in-memory representation of RML mappings.
//! These structures are produced by the [`crate::loader`] module or built
//! directly by callers, and consumed by the [`crate::materialize`] module.

mod document;
mod term_map;
mod triples_map;

pub use document::RmlMapping;
pub use term_map::{ConstantValue, ObjectMap, PredicateMap, PredicateObjectMap, TermType};
pub use triples_map::{LogicalSource, SubjectMap, TriplesMap};
