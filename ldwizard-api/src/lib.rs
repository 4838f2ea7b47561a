//! LD Wizard API
//!
//! The two directions of the CSV to RDF wizard, over a plain
//! [`TransformationConfig`] value:
//!
//! - **forward**: [`generate_mapping`]/[`generate_rml`] build the RML mapping
//!   for a configuration, [`apply_transformation`] runs it over a row matrix
//!   and returns Turtle
//! - **reverse**: [`extract_config`] reads an RML or YARRRML document back
//!   into a configuration
//!
//! [`load_mapping`] and [`execute_rml`] run an existing mapping document as
//! written.
//!
//! # Example
//!
//! ```
//! use ldwizard_api::{
//!     apply_transformation, ColumnConfig, TransformationConfig, TransformationKind,
//!     TransformationSource,
//! };
//!
//! let config = TransformationConfig {
//!     base_iri: "http://ex.org/".into(),
//!     key: Some(0),
//!     column_configuration: vec![
//!         ColumnConfig::new("id"),
//!         ColumnConfig::new("name").with_property("http://ex.org/name"),
//!     ],
//!     ..Default::default()
//! };
//! let rows = vec![
//!     vec!["id".to_string(), "name".to_string()],
//!     vec!["1".to_string(), "Alice".to_string()],
//! ];
//!
//! let turtle = apply_transformation(
//!     TransformationKind::Rml,
//!     TransformationSource::Matrix(rows),
//!     &config,
//! )
//! .unwrap();
//! assert!(turtle.contains(":1 :name \"Alice\" ."));
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod transform;

pub use config::{
    ColumnConfig, ColumnRefinement, TransformationConfig, DEFAULT_BASE_IRI,
    DEFAULT_SOURCE_FILE_NAME,
};
pub use error::{ApiError, Result};
pub use extract::{
    extract_config, extract_from_graph, ExtractMode, ExtractWarning, Extraction, MappingFormat,
};
pub use generate::{generate_mapping, generate_rml, TRIPLES_MAP_IRI};
pub use transform::{
    apply_transformation, apply_transformation_with, execute_mapping, execute_rml, load_mapping,
    to_turtle, transform_table, TransformationKind, TransformationSource,
};

// Re-exported so callers need not depend on the lower crates directly
pub use ldwizard_graph_format::PrefixMap;
pub use ldwizard_tabular::{read_csv, CsvProps, RowTable};
