//! RML loader module
//!
//! The loader parses a mapping document into the graph IR, then extracts
//! TriplesMap definitions from it. Turtle goes through
//! `ldwizard-graph-turtle`; YARRRML is converted by [`crate::yarrrml`].
//!
//! For pre-parsed input use `RmlLoader::from_graph()` directly.

mod extractor;

pub use extractor::MappingExtractor;

use ldwizard_graph_ir::{Graph, QuadStore};
use ldwizard_graph_turtle::parse_graph;

use crate::error::{RmlError, RmlResult};
use crate::mapping::RmlMapping;
use crate::yarrrml;

/// RML mapping loader
pub struct RmlLoader {
    /// The parsed graph IR
    graph: Graph,
}

impl RmlLoader {
    /// Load RML from a Graph IR
    pub fn from_graph(graph: Graph) -> Self {
        Self { graph }
    }

    /// Load RML from a Turtle document
    pub fn from_turtle(content: &str) -> RmlResult<Self> {
        let graph = parse_graph(content).map_err(|e| RmlError::Parse(e.to_string()))?;
        tracing::debug!(
            triples = graph.len(),
            prefixes = graph.prefixes.len(),
            "loaded turtle mapping document"
        );
        Ok(Self { graph })
    }

    /// Load RML from a YARRRML (YAML) document
    pub fn from_yarrrml(content: &str) -> RmlResult<Self> {
        let graph = yarrrml::to_graph(content)?;
        Ok(Self { graph })
    }

    /// Get a reference to the underlying graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Prefixes declared by the document, sorted by name
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph
            .prefixes
            .iter()
            .map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Build the indexed quad store over the document
    pub fn store(&self) -> QuadStore {
        QuadStore::from_graph(&self.graph)
    }

    /// Extract every TriplesMap into an [`RmlMapping`]
    pub fn compile(self) -> RmlResult<RmlMapping> {
        let store = self.store();
        let triples_maps = MappingExtractor::new(&store).extract_all()?;
        let prefixes = self.graph.prefixes.into_iter().collect();
        Ok(RmlMapping {
            triples_maps,
            prefixes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_MAPPING: &str = r#"
        @prefix rr: <http://www.w3.org/ns/r2rml#> .
        @prefix rml: <http://semweb.mmlab.be/ns/rml#> .
        @prefix ql: <http://semweb.mmlab.be/ns/ql#> .
        @prefix ex: <http://example.org/> .

        <http://example.org/mapping#PersonMapping> a rr:TriplesMap ;
            rml:logicalSource [ rml:source "people.csv" ; rml:referenceFormulation ql:CSV ] ;
            rr:subjectMap [
                rr:template "http://example.org/person/{id}" ;
                rr:class ex:Person
            ] ;
            rr:predicateObjectMap [
                rr:predicate ex:name ;
                rr:objectMap [ rml:reference "name" ]
            ] .
    "#;

    #[test]
    fn test_from_turtle() {
        let loader = RmlLoader::from_turtle(SIMPLE_MAPPING).unwrap();
        assert!(!loader.graph().is_empty());
        assert!(loader.prefixes().any(|(p, _)| p == "ex"));
    }

    #[test]
    fn test_compile() {
        let mapping = RmlLoader::from_turtle(SIMPLE_MAPPING)
            .unwrap()
            .compile()
            .unwrap();

        assert_eq!(mapping.len(), 1);
        assert!(mapping
            .get("http://example.org/mapping#PersonMapping")
            .is_some());
        assert!(mapping
            .prefixes
            .iter()
            .any(|(p, ns)| p == "ex" && ns == "http://example.org/"));
    }

    #[test]
    fn test_parse_error() {
        let err = RmlLoader::from_turtle("this is not turtle").err().unwrap();
        assert!(matches!(err, RmlError::Parse(_)));
    }

    #[test]
    fn test_generated_graph_compiles_back() {
        let mapping = RmlLoader::from_turtle(SIMPLE_MAPPING)
            .unwrap()
            .compile()
            .unwrap();
        let again = RmlLoader::from_graph(mapping.to_graph()).compile().unwrap();
        assert_eq!(again.triples_maps, mapping.triples_maps);
    }
}
