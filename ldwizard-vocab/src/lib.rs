//! RDF vocabulary constants for LD Wizard
//!
//! This crate provides a centralized location for the vocabulary IRIs shared
//! by the mapping, execution and serialization crates.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `namespaces` - Well-known namespace IRIs and the default prefix table
//!   used when writing Turtle output

/// RDF vocabulary constants
pub mod rdf {
    /// RDF namespace IRI
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// RDFS namespace IRI
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

/// XSD vocabulary constants
pub mod xsd {
    /// XSD namespace IRI
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// Well-known namespaces
pub mod namespaces {
    pub const XSD: &str = super::xsd::NS;
    pub const RDF: &str = super::rdf::NS;
    pub const RDFS: &str = super::rdfs::NS;
    pub const SCHEMA: &str = "https://schema.org/";
    pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const DCTERMS: &str = "http://purl.org/dc/terms/";
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    pub const DCAT: &str = "http://www.w3.org/ns/dcat#";
    pub const PAV: &str = "http://purl.org/pav/";
    pub const PROV: &str = "http://www.w3.org/ns/prov#";

    /// Prefixes every Turtle output starts from, in declaration order.
    ///
    /// The empty prefix is not listed here because it is bound to the
    /// configuration's base IRI at serialization time.
    pub const WELL_KNOWN: &[(&str, &str)] = &[
        ("xsd", XSD),
        ("rdf", RDF),
        ("rdfs", RDFS),
        ("schema", SCHEMA),
        ("foaf", FOAF),
        ("dc", DC),
        ("dcterms", DCTERMS),
        ("owl", OWL),
        ("dcat", DCAT),
        ("pav", PAV),
        ("prov", PROV),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_live_in_their_namespace() {
        assert!(rdf::TYPE.starts_with(rdf::NS));
        assert!(rdf::LANG_STRING.starts_with(rdf::NS));
        assert!(xsd::STRING.starts_with(xsd::NS));
        assert!(rdfs::LABEL.starts_with(rdfs::NS));
    }

    #[test]
    fn test_well_known_prefixes_are_unique() {
        let mut names: Vec<_> = namespaces::WELL_KNOWN.iter().map(|(p, _)| *p).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), namespaces::WELL_KNOWN.len());
        assert!(namespaces::WELL_KNOWN.iter().all(|(p, _)| !p.is_empty()));
    }
}
