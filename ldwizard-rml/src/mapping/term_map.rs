//! RML term map structures
//!
//! Term maps define how RDF terms are generated from row data.

use serde::{Deserialize, Serialize};

use crate::template;
use crate::vocab::R2RML;

/// RML term type
///
/// Specifies whether a term map generates IRIs, blank nodes, or literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TermType {
    /// Generate an IRI (default for subject and predicate maps)
    #[default]
    Iri,
    /// Generate a blank node
    BlankNode,
    /// Generate a literal (default for reference object maps)
    Literal,
}

impl TermType {
    /// Parse term type from its R2RML IRI
    pub fn from_iri(iri: &str) -> Option<Self> {
        match iri {
            R2RML::IRI => Some(TermType::Iri),
            R2RML::BLANK_NODE => Some(TermType::BlankNode),
            R2RML::LITERAL => Some(TermType::Literal),
            _ => None,
        }
    }

    /// The R2RML IRI of this term type
    pub fn as_iri(&self) -> &'static str {
        match self {
            TermType::Iri => R2RML::IRI,
            TermType::BlankNode => R2RML::BLANK_NODE,
            TermType::Literal => R2RML::LITERAL,
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, TermType::Iri)
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, TermType::BlankNode)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TermType::Literal)
    }
}

/// Predicate-object map pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateObjectMap {
    /// The predicate map (usually a constant IRI)
    pub predicate_map: PredicateMap,
    /// The object map (reference, constant or template)
    pub object_map: ObjectMap,
}

impl PredicateObjectMap {
    pub fn new(predicate_map: PredicateMap, object_map: ObjectMap) -> Self {
        Self {
            predicate_map,
            object_map,
        }
    }

    /// Columns referenced by either side
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = self.predicate_map.referenced_columns();
        columns.extend(self.object_map.referenced_columns());
        columns
    }
}

/// Predicate map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateMap {
    /// `rr:predicate` or `rr:predicateMap [ rr:constant ]`
    Constant(String),
    /// `rr:predicateMap [ rr:template ]`
    Template(String),
    /// `rr:predicateMap [ rml:reference ]`, the cell holds the predicate IRI
    Reference(String),
}

impl PredicateMap {
    pub fn constant(iri: impl Into<String>) -> Self {
        PredicateMap::Constant(iri.into())
    }

    /// Get the constant IRI if this is a constant predicate
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            PredicateMap::Constant(iri) => Some(iri),
            _ => None,
        }
    }

    /// Get all columns referenced by this predicate map
    pub fn referenced_columns(&self) -> Vec<&str> {
        match self {
            PredicateMap::Constant(_) => vec![],
            PredicateMap::Template(t) => template::placeholders(t),
            PredicateMap::Reference(col) => vec![col.as_str()],
        }
    }
}

/// Object map
///
/// Defines how objects are generated:
/// - a reference (value from a column of the current row)
/// - a constant value (fixed IRI or literal)
/// - a template (interpolated IRI or literal)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectMap {
    /// `rml:reference` (or `rr:column`) - object from a cell value
    Reference {
        column: String,
        datatype: Option<String>,
        language: Option<String>,
        /// Default: Literal
        term_type: TermType,
    },

    /// `rr:constant` - a constant object
    Constant { value: ConstantValue },

    /// `rr:template` - object from a template
    Template {
        template: String,
        /// Default: IRI
        term_type: TermType,
        datatype: Option<String>,
        language: Option<String>,
    },
}

/// Constant value in an object map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstantValue {
    Iri(String),
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl ConstantValue {
    /// The IRI or lexical form
    pub fn value(&self) -> &str {
        match self {
            ConstantValue::Iri(iri) => iri,
            ConstantValue::Literal { value, .. } => value,
        }
    }
}

impl ObjectMap {
    /// Create a reference object map producing plain literals
    pub fn reference(column: impl Into<String>) -> Self {
        ObjectMap::Reference {
            column: column.into(),
            datatype: None,
            language: None,
            term_type: TermType::Literal,
        }
    }

    /// Create a reference object map with datatype
    pub fn reference_typed(column: impl Into<String>, datatype: impl Into<String>) -> Self {
        ObjectMap::Reference {
            column: column.into(),
            datatype: Some(datatype.into()),
            language: None,
            term_type: TermType::Literal,
        }
    }

    /// Create a constant IRI object map
    pub fn constant_iri(iri: impl Into<String>) -> Self {
        ObjectMap::Constant {
            value: ConstantValue::Iri(iri.into()),
        }
    }

    /// Create a constant literal object map
    pub fn constant_literal(value: impl Into<String>) -> Self {
        ObjectMap::Constant {
            value: ConstantValue::Literal {
                value: value.into(),
                datatype: None,
                language: None,
            },
        }
    }

    /// Create an IRI template object map
    pub fn template(template: impl Into<String>) -> Self {
        ObjectMap::Template {
            template: template.into(),
            term_type: TermType::Iri,
            datatype: None,
            language: None,
        }
    }

    /// Get all columns referenced by this object map
    pub fn referenced_columns(&self) -> Vec<&str> {
        match self {
            ObjectMap::Reference { column, .. } => vec![column.as_str()],
            ObjectMap::Constant { .. } => vec![],
            ObjectMap::Template { template, .. } => template::placeholders(template),
        }
    }
}
