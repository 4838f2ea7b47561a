//! RML mapping support for LD Wizard
//!
//! This crate models the subset of RML (the RDF Mapping Language) that LD
//! Wizard reads and writes, loads it from Turtle or YARRRML, and executes it
//! over tabular rows.
//!
//! # Supported RML Features
//!
//! - `rr:TriplesMap` with `rml:logicalSource` (`rml:source`,
//!   `rml:referenceFormulation ql:CSV`), or `rr:logicalTable` for plain R2RML
//! - `rr:subjectMap` with `rr:template`, `rml:reference`, `rr:constant`,
//!   `rr:class`, `rr:termType`
//! - `rr:predicateObjectMap` with `rr:predicate`/`rr:predicateMap` and
//!   `rr:object`/`rr:objectMap`
//! - `rr:objectMap` with `rml:reference` (or `rr:column`), `rr:constant`,
//!   `rr:template`, `rr:datatype`, `rr:language`
//!
//! Joins (`rr:parentTriplesMap`) and graph maps are rejected as unsupported.
//!
//! # Usage
//!
//! Load a mapping with [`RmlLoader::from_turtle()`] or
//! [`RmlLoader::from_yarrrml()`], call `compile()` to get an [`RmlMapping`],
//! then run it with [`execute()`] over an [`InputSources`] binding.

pub mod error;
pub mod loader;
pub mod mapping;
pub mod materialize;
pub mod template;
pub mod vocab;
pub mod yarrrml;

pub use error::{RmlError, RmlResult};
pub use loader::{MappingExtractor, RmlLoader};
pub use mapping::{
    ConstantValue, LogicalSource, ObjectMap, PredicateMap, PredicateObjectMap, RmlMapping,
    SubjectMap, TermType, TriplesMap,
};
pub use materialize::{execute, expand_template, iri_escape, InputSources};
pub use template::Template;
pub use vocab::{QL, R2RML, RML};
