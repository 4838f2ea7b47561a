//! TriplesMap, logical source and subject map structures

use serde::{Deserialize, Serialize};

use super::term_map::{PredicateObjectMap, TermType};
use crate::template;
use crate::vocab::QL;

/// A complete TriplesMap: one logical source, one subject map and any
/// number of predicate-object maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplesMap {
    /// IRI of the TriplesMap node
    pub iri: String,
    pub logical_source: LogicalSource,
    pub subject_map: SubjectMap,
    pub predicate_object_maps: Vec<PredicateObjectMap>,
}

impl TriplesMap {
    pub fn new(iri: impl Into<String>, logical_source: LogicalSource, subject_map: SubjectMap) -> Self {
        Self {
            iri: iri.into(),
            logical_source,
            subject_map,
            predicate_object_maps: Vec::new(),
        }
    }

    /// Name of the input this map reads from
    pub fn source(&self) -> &str {
        &self.logical_source.source
    }

    /// Every column referenced anywhere in this map, deduplicated, in order
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        let all = self.subject_map.referenced_columns().into_iter().chain(
            self.predicate_object_maps
                .iter()
                .flat_map(|pom| pom.referenced_columns()),
        );
        for column in all {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
        columns
    }
}

/// `rml:logicalSource`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSource {
    /// `rml:source`; for CSV input this is the file name
    pub source: String,
    /// `rml:referenceFormulation` IRI
    pub reference_formulation: Option<String>,
}

impl LogicalSource {
    /// A CSV source (`rml:referenceFormulation ql:CSV`)
    pub fn csv(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            reference_formulation: Some(QL::CSV.to_string()),
        }
    }

    pub fn is_csv(&self) -> bool {
        self.reference_formulation
            .as_deref()
            .map_or(true, |rf| rf == QL::CSV)
    }
}

/// `rr:subjectMap`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectMap {
    /// `rr:template` with `{column}` placeholders
    pub template: Option<String>,
    /// `rml:reference` (or `rr:column`)
    pub reference: Option<String>,
    /// `rr:constant` or the `rr:subject` shortcut
    pub constant: Option<String>,
    /// `rr:class` values, in document order
    pub classes: Vec<String>,
    pub term_type: TermType,
}

impl SubjectMap {
    /// Subject built from an IRI template
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            template: Some(template.into()),
            ..Default::default()
        }
    }

    /// One fresh blank node per row
    pub fn blank_node() -> Self {
        Self {
            term_type: TermType::BlankNode,
            ..Default::default()
        }
    }

    pub fn constant(iri: impl Into<String>) -> Self {
        Self {
            constant: Some(iri.into()),
            ..Default::default()
        }
    }

    /// Add an `rr:class`
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn referenced_columns(&self) -> Vec<&str> {
        if let Some(t) = &self.template {
            template::placeholders(t)
        } else if let Some(col) = &self.reference {
            vec![col.as_str()]
        } else {
            vec![]
        }
    }
}
