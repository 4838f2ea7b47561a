//! Configuration extraction
//!
//! Rebuilds a [`TransformationConfig`] from an RML mapping document by
//! pattern-matching its graph. Extraction starts from the caller's current
//! configuration (usually one unmapped column per CSV header) and only
//! rewrites what the mapping describes:
//!
//! - the subject template's prefix becomes `baseIri` and its variable, if it
//!   names a column, becomes `key`
//! - an `rdf:type` rule becomes `resourceClass`
//! - every other rule maps its predicate onto the column it references,
//!   with a `to-iri` refinement when the object is a template
//!
//! Rules that cannot be resolved are dropped and reported as warnings, or
//! fail the call under [`ExtractMode::Strict`].

use std::path::Path;

use ldwizard_graph_ir::{Graph, QuadStore, Term};
use ldwizard_rml::{template, RmlError, RmlLoader, R2RML, RML};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ColumnConfig, ColumnRefinement, TransformationConfig};
use crate::error::{ApiError, Result};

/// Syntax of a mapping document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingFormat {
    /// RML in Turtle
    #[default]
    Turtle,
    /// YARRRML (YAML)
    Yarrrml,
}

impl MappingFormat {
    /// Pick the format from a file extension; anything but `.yml`/`.yaml`
    /// is read as Turtle
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yml") | Some("yaml") => MappingFormat::Yarrrml,
            _ => MappingFormat::Turtle,
        }
    }
}

/// How unresolvable rules are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractMode {
    /// Drop the rule and record a warning
    #[default]
    BestEffort,
    /// Fail the extraction
    Strict,
}

/// A tolerated problem found during extraction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractWarning {
    #[error("Only a single TriplesMap is supported, found {count}; using the first one")]
    MultipleTriplesMapFound { count: usize },

    #[error("Subject template '{template}' has no {{column}} group")]
    UnparsableTemplate { template: String },

    #[error("Predicate-object rule without a predicate was skipped")]
    UnresolvedPredicate,

    #[error("Rule for <{predicate}> has no constant, reference or template object")]
    UnresolvedObject { predicate: String },

    #[error("Rule for <{predicate}> references unknown column '{column}'")]
    UnresolvedColumn { column: String, predicate: String },

    #[error("Rule for <{predicate}> references column '{column}', which names {count} columns")]
    AmbiguousColumn {
        column: String,
        predicate: String,
        count: usize,
    },
}

/// Result of an extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub config: TransformationConfig,
    pub warnings: Vec<ExtractWarning>,
    /// Prefixes declared by the mapping document, sorted by name
    pub prefixes: Vec<(String, String)>,
}

/// Parse `text` and extract a configuration from it
///
/// Parse failures are reported as [`ApiError::MappingDocumentParse`].
pub fn extract_config(
    text: &str,
    format: MappingFormat,
    current: &TransformationConfig,
    mode: ExtractMode,
) -> Result<Extraction> {
    let loader = load_document(text, format)?;
    extract_from_graph(loader.graph(), current, mode)
}

/// Parse a mapping document into its RML graph
///
/// Syntax errors in either format become [`ApiError::MappingDocumentParse`].
pub(crate) fn load_document(text: &str, format: MappingFormat) -> Result<RmlLoader> {
    let loaded = match format {
        MappingFormat::Turtle => RmlLoader::from_turtle(text),
        MappingFormat::Yarrrml => RmlLoader::from_yarrrml(text),
    };
    loaded.map_err(|e| match e {
        RmlError::Yarrrml(message) | RmlError::Parse(message) => {
            ApiError::MappingDocumentParse(message)
        }
        other => ApiError::Rml(other),
    })
}

/// Extract a configuration from an already parsed mapping graph
pub fn extract_from_graph(
    graph: &Graph,
    current: &TransformationConfig,
    mode: ExtractMode,
) -> Result<Extraction> {
    let store = QuadStore::from_graph(graph);
    let mut extractor = ConfigExtractor {
        store: &store,
        config: current.clone(),
        warnings: Vec::new(),
        mode,
    };
    extractor.run()?;

    Ok(Extraction {
        config: extractor.config,
        warnings: extractor.warnings,
        prefixes: graph
            .prefixes
            .iter()
            .map(|(p, ns)| (p.clone(), ns.clone()))
            .collect(),
    })
}

/// Resolved object of a predicate-object rule
enum RuleObject {
    /// `rr:constant` or `rml:reference` value
    Value(String),
    /// `rr:template` text
    Template(String),
}

struct ConfigExtractor<'a> {
    store: &'a QuadStore,
    config: TransformationConfig,
    warnings: Vec<ExtractWarning>,
    mode: ExtractMode,
}

impl ConfigExtractor<'_> {
    fn run(&mut self) -> Result<()> {
        let store = self.store;
        let rdf_type = Term::iri(R2RML::RDF_TYPE);
        let nodes: Vec<&Term> = store
            .subjects(&rdf_type, &Term::iri(R2RML::TRIPLES_MAP))
            .collect();

        let Some(&triples_map) = nodes.first() else {
            tracing::debug!("mapping document has no TriplesMap");
            return Ok(());
        };
        if nodes.len() > 1 {
            let count = nodes.len();
            self.tolerate(
                ExtractWarning::MultipleTriplesMapFound { count },
                ApiError::MultipleTriplesMapFound { count },
            )?;
        }

        let subject_map = store.object(triples_map, &iri(R2RML::SUBJECT_MAP));
        if let Some(sm) = subject_map {
            self.subject(sm)?;
        }

        let mut has_type_rule = false;
        let poms: Vec<&Term> = store
            .objects(triples_map, &iri(R2RML::PREDICATE_OBJECT_MAP))
            .collect();
        for pom in poms {
            has_type_rule |= self.rule(pom)?;
        }

        if !has_type_rule {
            if let Some(class) = subject_map.and_then(|sm| store.object(sm, &iri(R2RML::CLASS))) {
                self.config.resource_class = Some(class.value().to_string());
            }
        }

        tracing::debug!(
            base_iri = %self.config.base_iri,
            key = ?self.config.key,
            warnings = self.warnings.len(),
            "extracted configuration"
        );
        Ok(())
    }

    fn subject(&mut self, sm: &Term) -> Result<()> {
        let store = self.store;
        let Some(text) = store.object(sm, &iri(R2RML::TEMPLATE)) else {
            return Ok(());
        };
        match template::parse(text.value()) {
            Some(t) => {
                self.config.key = self.config.unique_column_index(&t.variable).ok();
                if self.config.key.is_none() {
                    tracing::debug!(column = %t.variable, "subject column does not name exactly one column");
                }
                self.config.base_iri = t.prefix;
                Ok(())
            }
            None => self.tolerate(
                ExtractWarning::UnparsableTemplate {
                    template: text.value().to_string(),
                },
                ApiError::InvalidMapping(format!(
                    "subject template '{}' has no {{column}} group",
                    text.value()
                )),
            ),
        }
    }

    /// Apply one predicate-object rule; returns whether it was an `rdf:type` rule
    fn rule(&mut self, pom: &Term) -> Result<bool> {
        let Some(predicate) = self.predicate(pom) else {
            self.tolerate(
                ExtractWarning::UnresolvedPredicate,
                ApiError::InvalidMapping("predicate-object rule without a predicate".to_string()),
            )?;
            return Ok(false);
        };

        let Some(object) = self.object(pom) else {
            let message = format!("rule for <{predicate}> has no usable object map");
            self.tolerate(
                ExtractWarning::UnresolvedObject { predicate },
                ApiError::InvalidMapping(message),
            )?;
            return Ok(false);
        };

        if predicate == R2RML::RDF_TYPE {
            let class = match object {
                RuleObject::Value(v) | RuleObject::Template(v) => v,
            };
            self.config.resource_class = Some(class);
            return Ok(true);
        }

        let (column, refinement) = match object {
            RuleObject::Value(column) => (column, None),
            RuleObject::Template(text) => match template::parse(&text) {
                Some(t) => (t.variable, Some(ColumnRefinement::to_iri(t.prefix))),
                None => {
                    let message = format!("object template '{text}' has no {{column}} group");
                    self.tolerate(
                        ExtractWarning::UnresolvedObject { predicate },
                        ApiError::InvalidMapping(message),
                    )?;
                    return Ok(false);
                }
            },
        };

        match self.config.unique_column_index(&column) {
            Ok(idx) => {
                let mut entry = ColumnConfig::new(column).with_property(predicate);
                entry.column_refinement = refinement;
                self.config.column_configuration[idx] = entry;
            }
            Err(count) => {
                let error = ApiError::UnresolvedColumnReference {
                    column: column.clone(),
                    predicate: predicate.clone(),
                };
                let warning = if count == 0 {
                    ExtractWarning::UnresolvedColumn { column, predicate }
                } else {
                    ExtractWarning::AmbiguousColumn {
                        column,
                        predicate,
                        count,
                    }
                };
                self.tolerate(warning, error)?;
            }
        }
        Ok(false)
    }

    /// `rr:predicate`, else `rr:predicateMap/rr:constant`
    fn predicate(&self, pom: &Term) -> Option<String> {
        if let Some(p) = self.store.object(pom, &iri(R2RML::PREDICATE)) {
            return Some(p.value().to_string());
        }
        self.store
            .objects(pom, &iri(R2RML::PREDICATE_MAP))
            .find_map(|pm| self.store.object(pm, &iri(R2RML::CONSTANT)))
            .map(|c| c.value().to_string())
    }

    /// `rr:objectMap` with `rr:constant`, else `rml:reference`, else `rr:template`
    fn object(&self, pom: &Term) -> Option<RuleObject> {
        let om = self.store.object(pom, &iri(R2RML::OBJECT_MAP))?;
        let value = |property: &str| {
            self.store
                .object(om, &iri(property))
                .map(|t| t.value().to_string())
        };
        value(R2RML::CONSTANT)
            .or_else(|| value(RML::REFERENCE))
            .map(RuleObject::Value)
            .or_else(|| value(R2RML::TEMPLATE).map(RuleObject::Template))
    }

    /// Record a warning, or fail in strict mode
    fn tolerate(&mut self, warning: ExtractWarning, strict_error: ApiError) -> Result<()> {
        match self.mode {
            ExtractMode::Strict => Err(strict_error),
            ExtractMode::BestEffort => {
                tracing::warn!(%warning, "tolerated mapping problem");
                self.warnings.push(warning);
                Ok(())
            }
        }
    }
}

fn iri(value: &str) -> Term {
    Term::iri(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVERSE: &str = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
@prefix rml: <http://semweb.mmlab.be/ns/rml#> .
@prefix ex: <http://ex.org/> .

<http://ex.org/Map> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://ex.org/{id}" ] ;
    rr:predicateObjectMap [
        rr:predicate ex:name ;
        rr:objectMap [ rml:reference "name" ]
    ] .
"#;

    fn columns(names: &[&str]) -> TransformationConfig {
        TransformationConfig::from_headers(names, "input.csv")
    }

    fn extract(text: &str, current: &TransformationConfig) -> Extraction {
        extract_config(text, MappingFormat::Turtle, current, ExtractMode::BestEffort).unwrap()
    }

    #[test]
    fn test_reverse_example() {
        let result = extract(REVERSE, &columns(&["id", "name"]));
        let config = result.config;
        assert_eq!(config.base_iri, "http://ex.org/");
        assert_eq!(config.key, Some(0));
        assert_eq!(config.column_configuration[0], ColumnConfig::new("id"));
        assert_eq!(
            config.column_configuration[1],
            ColumnConfig::new("name").with_property("http://ex.org/name")
        );
        assert!(result.warnings.is_empty());
        assert!(result
            .prefixes
            .contains(&("ex".to_string(), "http://ex.org/".to_string())));
    }

    #[test]
    fn test_unmatched_subject_variable_sets_base_only() {
        let result = extract(REVERSE, &columns(&["identifier", "name"]));
        assert_eq!(result.config.base_iri, "http://ex.org/");
        assert_eq!(result.config.key, None);
    }

    #[test]
    fn test_no_triples_map_keeps_config() {
        let current = columns(&["id"]);
        let result = extract("<http://ex.org/a> <http://ex.org/b> \"c\" .", &current);
        assert_eq!(result.config, current);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_type_template_and_constant_rules() {
        let doc = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
@prefix rml: <http://semweb.mmlab.be/ns/rml#> .
@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .

<http://ex.org/Map> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://ex.org/p/{id}" ] ;
    rr:predicateObjectMap [
        rr:predicateMap [ rr:constant rdf:type ] ;
        rr:objectMap [ rr:constant <https://schema.org/Person> ]
    ] , [
        rr:predicate <http://ex.org/city> ;
        rr:objectMap [ rr:template "http://ex.org/city/{city}" ; rr:termType rr:IRI ]
    ] , [
        rr:predicate <http://ex.org/label> ;
        rr:objectMap [ rr:constant "name" ]
    ] .
"#;
        let result = extract(doc, &columns(&["id", "name", "city"]));
        let config = result.config;
        assert_eq!(config.base_iri, "http://ex.org/p/");
        assert_eq!(config.resource_class.as_deref(), Some("https://schema.org/Person"));
        assert_eq!(
            config.column_configuration[2],
            ColumnConfig::new("city")
                .with_property("http://ex.org/city")
                .with_refinement(ColumnRefinement::to_iri("http://ex.org/city/"))
        );
        assert_eq!(
            config.column_configuration[1].property_iri.as_deref(),
            Some("http://ex.org/label")
        );
    }

    #[test]
    fn test_class_fallback() {
        let doc = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
<http://ex.org/Map> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://ex.org/{id}" ; rr:class <http://ex.org/Thing> ] .
"#;
        let result = extract(doc, &columns(&["id"]));
        assert_eq!(
            result.config.resource_class.as_deref(),
            Some("http://ex.org/Thing")
        );
    }

    #[test]
    fn test_multiple_triples_maps_warns_and_uses_first() {
        let doc = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
<http://ex.org/A> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://first.org/{id}" ] .
<http://ex.org/B> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://second.org/{id}" ] .
"#;
        let result = extract(doc, &columns(&["id"]));
        assert_eq!(
            result.warnings,
            vec![ExtractWarning::MultipleTriplesMapFound { count: 2 }]
        );
        assert_eq!(result.config.base_iri, "http://first.org/");
        assert_eq!(result.config.key, Some(0));
    }

    #[test]
    fn test_unresolved_column_best_effort_and_strict() {
        let current = columns(&["id"]);
        let result = extract(REVERSE, &current);
        assert_eq!(
            result.warnings,
            vec![ExtractWarning::UnresolvedColumn {
                column: "name".into(),
                predicate: "http://ex.org/name".into(),
            }]
        );
        assert_eq!(result.config.column_configuration, current.column_configuration);

        let err = extract_config(REVERSE, MappingFormat::Turtle, &current, ExtractMode::Strict)
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::UnresolvedColumnReference { ref column, .. } if column == "name"
        ));
    }

    #[test]
    fn test_duplicate_column_name_is_not_matched() {
        let current = columns(&["id", "name", "name"]);
        let result = extract(REVERSE, &current);
        assert_eq!(
            result.warnings,
            vec![ExtractWarning::AmbiguousColumn {
                column: "name".into(),
                predicate: "http://ex.org/name".into(),
                count: 2,
            }]
        );
        assert!(result.config.column_configuration[1].property_iri.is_none());
        assert!(result.config.column_configuration[2].property_iri.is_none());
        assert_eq!(result.config.key, Some(0));

        let err = extract_config(REVERSE, MappingFormat::Turtle, &current, ExtractMode::Strict)
            .unwrap_err();
        assert!(matches!(err, ApiError::UnresolvedColumnReference { .. }));
    }

    #[test]
    fn test_duplicate_key_column_leaves_key_unset() {
        let result = extract(REVERSE, &columns(&["id", "id", "name"]));
        assert_eq!(result.config.key, None);
        assert_eq!(result.config.base_iri, "http://ex.org/");
    }

    #[test]
    fn test_multiple_triples_maps_strict() {
        let doc = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
<http://ex.org/A> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://first.org/{id}" ] .
<http://ex.org/B> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://second.org/{id}" ] .
"#;
        let err = extract_config(doc, MappingFormat::Turtle, &columns(&["id"]), ExtractMode::Strict)
            .unwrap_err();
        assert!(matches!(err, ApiError::MultipleTriplesMapFound { count: 2 }));
    }

    #[test]
    fn test_rule_without_predicate_is_skipped() {
        let doc = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
@prefix rml: <http://semweb.mmlab.be/ns/rml#> .
<http://ex.org/Map> a rr:TriplesMap ;
    rr:predicateObjectMap [ rr:objectMap [ rml:reference "id" ] ] .
"#;
        let result = extract(doc, &columns(&["id"]));
        assert_eq!(result.warnings, vec![ExtractWarning::UnresolvedPredicate]);
        assert!(result.config.column_configuration[0].property_iri.is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = extract_config(
            "@prefix rr: <broken",
            MappingFormat::Turtle,
            &columns(&["id"]),
            ExtractMode::BestEffort,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::MappingDocumentParse(_)));

        let err = extract_config(
            "mappings: [unclosed",
            MappingFormat::Yarrrml,
            &columns(&["id"]),
            ExtractMode::BestEffort,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::MappingDocumentParse(_)));
    }

    #[test]
    fn test_yarrrml_input() {
        let doc = r#"
prefixes:
  ex: http://ex.org/
mappings:
  person:
    sources:
      - [people.csv~csv]
    s: ex:$(id)
    po:
      - [a, ex:Person]
      - [ex:name, $(name)]
"#;
        let result = extract_config(
            doc,
            MappingFormat::Yarrrml,
            &columns(&["id", "name"]),
            ExtractMode::BestEffort,
        )
        .unwrap();
        assert_eq!(result.config.base_iri, "http://ex.org/");
        assert_eq!(result.config.key, Some(0));
        assert_eq!(result.config.resource_class.as_deref(), Some("http://ex.org/Person"));
        assert_eq!(
            result.config.column_configuration[1].property_iri.as_deref(),
            Some("http://ex.org/name")
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(MappingFormat::from_path(Path::new("m.yml")), MappingFormat::Yarrrml);
        assert_eq!(MappingFormat::from_path(Path::new("m.YAML")), MappingFormat::Yarrrml);
        assert_eq!(MappingFormat::from_path(Path::new("m.ttl")), MappingFormat::Turtle);
        assert_eq!(MappingFormat::from_path(Path::new("mapping")), MappingFormat::Turtle);
    }
}
