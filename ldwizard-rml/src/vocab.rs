//! RML vocabulary constants
//!
//! RML extends the W3C R2RML vocabulary (`rr:`) with logical sources
//! (`rml:`) and reference formulations (`ql:`).
//!
//! # Usage
//!
//! ```
//! use ldwizard_rml::{R2RML, RML};
//!
//! assert_eq!(R2RML::TRIPLES_MAP, "http://www.w3.org/ns/r2rml#TriplesMap");
//! assert!(RML::REFERENCE.starts_with(RML::NS));
//! ```

/// R2RML vocabulary namespace and constants
pub struct R2RML;

impl R2RML {
    /// R2RML namespace IRI
    pub const NS: &'static str = "http://www.w3.org/ns/r2rml#";

    // ==========================================================================
    // Classes
    // ==========================================================================

    /// rr:TriplesMap - A mapping that generates RDF triples per input row
    pub const TRIPLES_MAP: &'static str = "http://www.w3.org/ns/r2rml#TriplesMap";

    // ==========================================================================
    // Properties - Logical Table (plain R2RML documents)
    // ==========================================================================

    /// rr:logicalTable - Links a TriplesMap to its logical table
    pub const LOGICAL_TABLE: &'static str = "http://www.w3.org/ns/r2rml#logicalTable";

    /// rr:tableName - Specifies the name of a base table or view
    pub const TABLE_NAME: &'static str = "http://www.w3.org/ns/r2rml#tableName";

    // ==========================================================================
    // Properties - Subject Map
    // ==========================================================================

    /// rr:subjectMap - Links a TriplesMap to its subject map
    pub const SUBJECT_MAP: &'static str = "http://www.w3.org/ns/r2rml#subjectMap";

    /// rr:subject - Shortcut for constant-valued subject map
    pub const SUBJECT: &'static str = "http://www.w3.org/ns/r2rml#subject";

    /// rr:class - Specifies the RDF class for generated subjects
    pub const CLASS: &'static str = "http://www.w3.org/ns/r2rml#class";

    /// rr:graphMap - Links to a graph map (not supported)
    pub const GRAPH_MAP: &'static str = "http://www.w3.org/ns/r2rml#graphMap";

    /// rr:graph - Shortcut for constant-valued graph map (not supported)
    pub const GRAPH: &'static str = "http://www.w3.org/ns/r2rml#graph";

    // ==========================================================================
    // Properties - Predicate-Object Map
    // ==========================================================================

    /// rr:predicateObjectMap - Links a TriplesMap to a predicate-object map
    pub const PREDICATE_OBJECT_MAP: &'static str =
        "http://www.w3.org/ns/r2rml#predicateObjectMap";

    /// rr:predicateMap - Links a predicate-object map to its predicate map
    pub const PREDICATE_MAP: &'static str = "http://www.w3.org/ns/r2rml#predicateMap";

    /// rr:predicate - Shortcut for constant-valued predicate map
    pub const PREDICATE: &'static str = "http://www.w3.org/ns/r2rml#predicate";

    /// rr:objectMap - Links a predicate-object map to its object map
    pub const OBJECT_MAP: &'static str = "http://www.w3.org/ns/r2rml#objectMap";

    /// rr:object - Shortcut for constant-valued object map
    pub const OBJECT: &'static str = "http://www.w3.org/ns/r2rml#object";

    // ==========================================================================
    // Properties - Term Maps (common)
    // ==========================================================================

    /// rr:template - Specifies a string template for generating terms
    pub const TEMPLATE: &'static str = "http://www.w3.org/ns/r2rml#template";

    /// rr:column - Specifies a column name for generating terms
    pub const COLUMN: &'static str = "http://www.w3.org/ns/r2rml#column";

    /// rr:constant - Specifies a constant value for generating terms
    pub const CONSTANT: &'static str = "http://www.w3.org/ns/r2rml#constant";

    /// rr:termType - Specifies the type of generated RDF term
    pub const TERM_TYPE: &'static str = "http://www.w3.org/ns/r2rml#termType";

    /// rr:datatype - Specifies the datatype for generated literals
    pub const DATATYPE: &'static str = "http://www.w3.org/ns/r2rml#datatype";

    /// rr:language - Specifies the language tag for generated literals
    pub const LANGUAGE: &'static str = "http://www.w3.org/ns/r2rml#language";

    /// rr:parentTriplesMap - Links a RefObjectMap to its parent (not supported)
    pub const PARENT_TRIPLES_MAP: &'static str = "http://www.w3.org/ns/r2rml#parentTriplesMap";

    // ==========================================================================
    // Term Type Values
    // ==========================================================================

    /// rr:IRI - Term type for IRIs
    pub const IRI: &'static str = "http://www.w3.org/ns/r2rml#IRI";

    /// rr:BlankNode - Term type for blank nodes
    pub const BLANK_NODE: &'static str = "http://www.w3.org/ns/r2rml#BlankNode";

    /// rr:Literal - Term type for literals
    pub const LITERAL: &'static str = "http://www.w3.org/ns/r2rml#Literal";

    /// rdf:type
    pub const RDF_TYPE: &'static str = ldwizard_vocab::rdf::TYPE;
}

/// RML vocabulary namespace and constants
pub struct RML;

impl RML {
    /// RML namespace IRI
    pub const NS: &'static str = "http://semweb.mmlab.be/ns/rml#";

    /// rml:logicalSource - Links a TriplesMap to its logical source
    pub const LOGICAL_SOURCE: &'static str = "http://semweb.mmlab.be/ns/rml#logicalSource";

    /// rml:source - Identifies the input (a file name for CSV)
    pub const SOURCE: &'static str = "http://semweb.mmlab.be/ns/rml#source";

    /// rml:referenceFormulation - How references are resolved (ql:CSV)
    pub const REFERENCE_FORMULATION: &'static str =
        "http://semweb.mmlab.be/ns/rml#referenceFormulation";

    /// rml:iterator - Iteration pattern (unused for CSV)
    pub const ITERATOR: &'static str = "http://semweb.mmlab.be/ns/rml#iterator";

    /// rml:reference - Column reference, the RML counterpart of rr:column
    pub const REFERENCE: &'static str = "http://semweb.mmlab.be/ns/rml#reference";
}

/// Query language (reference formulation) constants
pub struct QL;

impl QL {
    /// QL namespace IRI
    pub const NS: &'static str = "http://semweb.mmlab.be/ns/ql#";

    /// ql:CSV
    pub const CSV: &'static str = "http://semweb.mmlab.be/ns/ql#CSV";

    /// ql:JSONPath
    pub const JSON_PATH: &'static str = "http://semweb.mmlab.be/ns/ql#JSONPath";

    /// ql:XPath
    pub const XPATH: &'static str = "http://semweb.mmlab.be/ns/ql#XPath";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace() {
        assert!(R2RML::TRIPLES_MAP.starts_with(R2RML::NS));
        assert!(R2RML::PREDICATE_OBJECT_MAP.starts_with(R2RML::NS));
        assert!(RML::LOGICAL_SOURCE.starts_with(RML::NS));
        assert!(RML::REFERENCE_FORMULATION.starts_with(RML::NS));
        assert!(QL::CSV.starts_with(QL::NS));
    }

    #[test]
    fn test_term_types() {
        assert_eq!(R2RML::IRI, "http://www.w3.org/ns/r2rml#IRI");
        assert_eq!(R2RML::BLANK_NODE, "http://www.w3.org/ns/r2rml#BlankNode");
        assert_eq!(R2RML::LITERAL, "http://www.w3.org/ns/r2rml#Literal");
    }
}
