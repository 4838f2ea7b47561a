//! Mapping generation
//!
//! Builds the single-TriplesMap RML mapping that describes a
//! [`TransformationConfig`]. Nested maps are written as labelled blank
//! nodes; abbreviated, the result reads:
//!
//! ```turtle
//! <https://w3id.org/ldwizard/mapping#TriplesMap> a rr:TriplesMap ;
//!     rml:logicalSource [ rml:source "people.csv" ; rml:referenceFormulation ql:CSV ] ;
//!     rr:subjectMap [ rr:template "http://ex.org/{id}" ] ;
//!     rr:predicateObjectMap [
//!         rr:predicate rdf:type ;
//!         rr:objectMap [ rr:constant schema:Person ]
//!     ] , [
//!         rr:predicate schema:name ;
//!         rr:objectMap [ rml:reference "name" ]
//!     ] .
//! ```
//!
//! Without a key column the subject map is `[ rr:termType rr:BlankNode ]`
//! and the executor mints one blank node per row.

use ldwizard_graph_format::{format_turtle, PrefixMap};
use ldwizard_rml::template;
use ldwizard_rml::{
    LogicalSource, ObjectMap, PredicateMap, PredicateObjectMap, RmlMapping, SubjectMap,
    TermType, TriplesMap, QL, R2RML, RML,
};
use ldwizard_vocab::rdf;

use crate::config::TransformationConfig;
use crate::error::Result;

/// IRI of the generated TriplesMap
pub const TRIPLES_MAP_IRI: &str = "https://w3id.org/ldwizard/mapping#TriplesMap";

/// Build the in-memory mapping for `config`
///
/// The configuration is validated first.
pub fn generate_mapping(config: &TransformationConfig) -> Result<RmlMapping> {
    config.validate()?;

    let subject_map = match config.key_column() {
        Some(key) => SubjectMap::template(template::render(&config.base_iri, &key.column_name)),
        None => SubjectMap::blank_node(),
    };

    let mut tm = TriplesMap::new(
        TRIPLES_MAP_IRI,
        LogicalSource::csv(&config.source_file_name),
        subject_map,
    );

    if let Some(class) = &config.resource_class {
        tm.predicate_object_maps.push(PredicateObjectMap::new(
            PredicateMap::constant(rdf::TYPE),
            ObjectMap::constant_iri(class),
        ));
    }

    for column in &config.column_configuration {
        let Some(property) = &column.property_iri else {
            continue;
        };
        let object_map = match column.iri_prefix() {
            Some(prefix) => ObjectMap::Template {
                template: template::render(prefix, &column.column_name),
                term_type: TermType::Iri,
                datatype: None,
                language: None,
            },
            None => ObjectMap::reference(&column.column_name),
        };
        tm.predicate_object_maps.push(PredicateObjectMap::new(
            PredicateMap::constant(property),
            object_map,
        ));
    }

    tracing::debug!(
        key = ?config.key,
        rules = tm.predicate_object_maps.len(),
        source = %config.source_file_name,
        "generated mapping"
    );

    let mut mapping = RmlMapping::new(vec![tm]);
    mapping.prefixes = vec![
        ("rr".to_string(), R2RML::NS.to_string()),
        ("rml".to_string(), RML::NS.to_string()),
        ("ql".to_string(), QL::NS.to_string()),
    ];
    Ok(mapping)
}

/// Render the mapping for `config` as Turtle
pub fn generate_rml(config: &TransformationConfig) -> Result<String> {
    let mapping = generate_mapping(config)?;
    let graph = mapping.to_graph();

    let mut prefixes = PrefixMap::well_known(&config.base_iri);
    prefixes.merge_discovered(mapping.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str())));

    Ok(format_turtle(&graph, &prefixes)?)
}
