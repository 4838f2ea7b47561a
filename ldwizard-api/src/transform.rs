//! Transformation entry point
//!
//! Runs a [`TransformationConfig`] over tabular input and returns Turtle.
//! Only the RML kind over an in-memory row matrix is executable; every
//! other combination fails with
//! [`ApiError::UnsupportedTransformationKind`] before any work is done.
//!
//! A mapping document can also be executed as written with
//! [`load_mapping`] and [`execute_rml`], without going through a
//! configuration.

use ldwizard_graph_format::{format_turtle, PrefixMap};
use ldwizard_graph_ir::{Graph, Quad};
use ldwizard_rml::{execute, InputSources, RmlMapping};
use ldwizard_tabular::RowTable;
use serde::{Deserialize, Serialize};

use crate::config::TransformationConfig;
use crate::error::{ApiError, Result};
use crate::extract::{load_document, MappingFormat};
use crate::generate::generate_mapping;

/// Transformation script flavours a configuration can be exported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformationKind {
    Rml,
    Cow,
    Sparql,
}

impl std::fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransformationKind::Rml => "rml",
            TransformationKind::Cow => "cow",
            TransformationKind::Sparql => "sparql",
        };
        f.write_str(name)
    }
}

/// Input handed to [`apply_transformation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformationSource {
    /// Row matrix; row 0 holds the headers
    Matrix(Vec<Vec<String>>),
    /// Raw file content that has not been tokenized yet
    Raw(String),
}

/// Execute `config` over `source` and serialize the result as Turtle
///
/// Output prefixes are the well-known set with `:` bound to the base IRI.
pub fn apply_transformation(
    kind: TransformationKind,
    source: TransformationSource,
    config: &TransformationConfig,
) -> Result<String> {
    let prefixes = PrefixMap::well_known(&config.base_iri);
    apply_transformation_with(kind, source, config, &prefixes)
}

/// [`apply_transformation`] with an explicit prefix table
pub fn apply_transformation_with(
    kind: TransformationKind,
    source: TransformationSource,
    config: &TransformationConfig,
    prefixes: &PrefixMap,
) -> Result<String> {
    let matrix = match (kind, source) {
        (TransformationKind::Rml, TransformationSource::Matrix(matrix)) => matrix,
        (TransformationKind::Rml, TransformationSource::Raw(_)) => {
            return Err(ApiError::UnsupportedTransformationKind(
                "rml requires a row matrix source".to_string(),
            ))
        }
        (other, _) => return Err(ApiError::UnsupportedTransformationKind(other.to_string())),
    };

    let table = RowTable::from_matrix(matrix)?;
    let quads = transform_table(config, &table)?;
    to_turtle(quads, prefixes)
}

/// Validate `table`, generate the mapping for `config` and execute it
pub fn transform_table(config: &TransformationConfig, table: &RowTable) -> Result<Vec<Quad>> {
    table.validate()?;
    let mapping = generate_mapping(config)?;
    execute_mapping(&mapping, &config.source_file_name, table)
}

/// Execute an existing mapping with `table` bound to `source_name`
pub fn execute_mapping(
    mapping: &RmlMapping,
    source_name: &str,
    table: &RowTable,
) -> Result<Vec<Quad>> {
    let quads = execute(mapping, &InputSources::single(source_name, table))?;
    tracing::debug!(
        rows = table.num_rows(),
        quads = quads.len(),
        "transformation complete"
    );
    Ok(quads)
}

/// Parse a mapping document (RML Turtle or YARRRML) into an executable mapping
pub fn load_mapping(text: &str, format: MappingFormat) -> Result<RmlMapping> {
    Ok(load_document(text, format)?.compile()?)
}

/// Execute `mapping` as written over `table`
///
/// `table` is bound to every logical source the mapping names and is
/// shape-validated first.
pub fn execute_rml(mapping: &RmlMapping, table: &RowTable) -> Result<Vec<Quad>> {
    if mapping.is_empty() {
        return Err(ApiError::InvalidMapping(
            "mapping document has no TriplesMap".to_string(),
        ));
    }
    table.validate()?;

    let mut sources = InputSources::new();
    for name in mapping.sources() {
        sources.bind(name, table);
    }
    let quads = execute(mapping, &sources)?;
    tracing::debug!(
        maps = mapping.len(),
        rows = table.num_rows(),
        quads = quads.len(),
        "executed mapping document"
    );
    Ok(quads)
}

/// Serialize quads as Turtle
pub fn to_turtle(quads: Vec<Quad>, prefixes: &PrefixMap) -> Result<String> {
    let graph: Graph = quads.into_iter().collect();
    Ok(format_turtle(&graph, prefixes)?)
}
