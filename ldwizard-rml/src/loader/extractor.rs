//! RML mapping extractor
//!
//! Extracts TriplesMap definitions from an indexed quad store.

use ldwizard_graph_ir::{QuadStore, Term};

use crate::error::{RmlError, RmlResult};
use crate::mapping::{
    ConstantValue, LogicalSource, ObjectMap, PredicateMap, PredicateObjectMap, SubjectMap,
    TermType, TriplesMap,
};
use crate::vocab::{R2RML, RML};

/// Extracts RML mappings from a quad store
pub struct MappingExtractor<'a> {
    store: &'a QuadStore,
}

impl<'a> MappingExtractor<'a> {
    pub fn new(store: &'a QuadStore) -> Self {
        Self { store }
    }

    /// Subjects typed `rr:TriplesMap`, in store order
    pub fn triples_map_nodes(&self) -> Vec<&'a Term> {
        self.store
            .subjects(&Term::iri(R2RML::RDF_TYPE), &Term::iri(R2RML::TRIPLES_MAP))
            .collect()
    }

    /// Extract all TriplesMap definitions
    pub fn extract_all(&self) -> RmlResult<Vec<TriplesMap>> {
        self.triples_map_nodes()
            .into_iter()
            .map(|node| self.extract_triples_map(node))
            .collect()
    }

    /// Extract a single TriplesMap rooted at `node`
    pub fn extract_triples_map(&self, node: &Term) -> RmlResult<TriplesMap> {
        let iri = match node {
            Term::Iri(iri) => iri.to_string(),
            Term::BlankNode(id) => id.to_string(),
            Term::Literal { .. } => {
                return Err(RmlError::invalid("rr:TriplesMap", "literal subject"))
            }
        };

        let logical_source = self.extract_logical_source(node)?;
        let subject_map = self.extract_subject_map(node)?;

        let mut predicate_object_maps = Vec::new();
        for pom in self.find_objects(node, R2RML::PREDICATE_OBJECT_MAP) {
            predicate_object_maps.extend(self.extract_predicate_object_maps(pom)?);
        }

        tracing::debug!(
            triples_map = %iri,
            source = %logical_source.source,
            poms = predicate_object_maps.len(),
            "extracted triples map"
        );

        Ok(TriplesMap {
            iri,
            logical_source,
            subject_map,
            predicate_object_maps,
        })
    }

    fn extract_logical_source(&self, node: &Term) -> RmlResult<LogicalSource> {
        if let Some(ls) = self.find_object(node, RML::LOGICAL_SOURCE) {
            let source = self
                .find_object(ls, RML::SOURCE)
                .and_then(term_to_string)
                .ok_or_else(|| RmlError::MissingProperty("rml:source".to_string()))?;
            let reference_formulation = self
                .find_object(ls, RML::REFERENCE_FORMULATION)
                .and_then(|t| t.as_iri())
                .map(str::to_string);
            return Ok(LogicalSource {
                source,
                reference_formulation,
            });
        }

        // Plain R2RML: the table name plays the role of the source
        if let Some(lt) = self.find_object(node, R2RML::LOGICAL_TABLE) {
            let table = self
                .find_object(lt, R2RML::TABLE_NAME)
                .and_then(term_to_string)
                .ok_or_else(|| RmlError::MissingProperty("rr:tableName".to_string()))?;
            return Ok(LogicalSource {
                source: table,
                reference_formulation: None,
            });
        }

        Err(RmlError::MissingProperty("rml:logicalSource".to_string()))
    }

    fn extract_subject_map(&self, node: &Term) -> RmlResult<SubjectMap> {
        // Shorthand rr:subject
        if let Some(subject) = self.find_object(node, R2RML::SUBJECT) {
            let iri = subject
                .as_iri()
                .ok_or_else(|| RmlError::invalid("rr:subject", "expected IRI"))?;
            return Ok(SubjectMap::constant(iri));
        }

        let sm = self
            .find_object(node, R2RML::SUBJECT_MAP)
            .ok_or_else(|| RmlError::MissingProperty("rr:subjectMap".to_string()))?;

        if self.find_object(sm, R2RML::GRAPH_MAP).is_some()
            || self.find_object(sm, R2RML::GRAPH).is_some()
        {
            return Err(RmlError::Unsupported("graph maps".to_string()));
        }

        let mut subject_map = SubjectMap {
            template: self.find_object(sm, R2RML::TEMPLATE).and_then(term_to_string),
            reference: self.find_reference(sm),
            constant: self
                .find_object(sm, R2RML::CONSTANT)
                .and_then(|t| t.as_iri())
                .map(str::to_string),
            ..Default::default()
        };

        for class in self.find_objects(sm, R2RML::CLASS) {
            if let Some(class_iri) = class.as_iri() {
                subject_map.classes.push(class_iri.to_string());
            }
        }

        let term_type = self.find_term_type(sm)?;
        match term_type {
            Some(TermType::Literal) => {
                return Err(RmlError::invalid(
                    "rr:termType",
                    "subject cannot be a literal",
                ))
            }
            Some(tt) => subject_map.term_type = tt,
            None => {}
        }

        if subject_map.template.is_none()
            && subject_map.reference.is_none()
            && subject_map.constant.is_none()
            && !subject_map.term_type.is_blank_node()
        {
            return Err(RmlError::MissingProperty(
                "rr:template, rml:reference or rr:constant in subject map".to_string(),
            ));
        }

        Ok(subject_map)
    }

    /// One predicate-object map node can carry several predicates and
    /// several object maps; each combination becomes one entry
    fn extract_predicate_object_maps(&self, pom: &Term) -> RmlResult<Vec<PredicateObjectMap>> {
        let mut predicates: Vec<PredicateMap> = Vec::new();
        for p in self.find_objects(pom, R2RML::PREDICATE) {
            let iri = p
                .as_iri()
                .ok_or_else(|| RmlError::invalid("rr:predicate", "expected IRI"))?;
            predicates.push(PredicateMap::constant(iri));
        }
        for pm in self.find_objects(pom, R2RML::PREDICATE_MAP) {
            predicates.push(self.extract_predicate_map(pm)?);
        }
        if predicates.is_empty() {
            return Err(RmlError::MissingProperty(
                "rr:predicate or rr:predicateMap".to_string(),
            ));
        }

        let mut objects: Vec<ObjectMap> = Vec::new();
        for o in self.find_objects(pom, R2RML::OBJECT) {
            objects.push(ObjectMap::Constant {
                value: constant_from_term(o, "rr:object")?,
            });
        }
        for om in self.find_objects(pom, R2RML::OBJECT_MAP) {
            objects.push(self.extract_object_map(om)?);
        }
        if objects.is_empty() {
            return Err(RmlError::MissingProperty(
                "rr:object or rr:objectMap".to_string(),
            ));
        }

        let mut out = Vec::with_capacity(predicates.len() * objects.len());
        for p in &predicates {
            for o in &objects {
                out.push(PredicateObjectMap::new(p.clone(), o.clone()));
            }
        }
        Ok(out)
    }

    fn extract_predicate_map(&self, pm: &Term) -> RmlResult<PredicateMap> {
        if let Some(c) = self.find_object(pm, R2RML::CONSTANT) {
            let iri = c
                .as_iri()
                .ok_or_else(|| RmlError::invalid("rr:predicateMap", "constant must be an IRI"))?;
            return Ok(PredicateMap::constant(iri));
        }
        if let Some(t) = self.find_object(pm, R2RML::TEMPLATE).and_then(term_to_string) {
            return Ok(PredicateMap::Template(t));
        }
        if let Some(col) = self.find_reference(pm) {
            return Ok(PredicateMap::Reference(col));
        }
        Err(RmlError::MissingProperty(
            "rr:constant, rr:template or rml:reference in predicate map".to_string(),
        ))
    }

    fn extract_object_map(&self, om: &Term) -> RmlResult<ObjectMap> {
        if self.find_object(om, R2RML::PARENT_TRIPLES_MAP).is_some() {
            return Err(RmlError::Unsupported(
                "rr:parentTriplesMap (joins)".to_string(),
            ));
        }

        let datatype = self
            .find_object(om, R2RML::DATATYPE)
            .and_then(|t| t.as_iri())
            .map(str::to_string);
        let language = self.find_object(om, R2RML::LANGUAGE).and_then(term_to_string);
        let term_type = self.find_term_type(om)?;

        if let Some(column) = self.find_reference(om) {
            return Ok(ObjectMap::Reference {
                column,
                datatype,
                language,
                term_type: term_type.unwrap_or(TermType::Literal),
            });
        }

        if let Some(c) = self.find_object(om, R2RML::CONSTANT) {
            return Ok(ObjectMap::Constant {
                value: constant_from_term(c, "rr:constant")?,
            });
        }

        if let Some(template) = self.find_object(om, R2RML::TEMPLATE).and_then(term_to_string) {
            // A datatype or language tag implies a literal
            let default = if datatype.is_some() || language.is_some() {
                TermType::Literal
            } else {
                TermType::Iri
            };
            return Ok(ObjectMap::Template {
                template,
                term_type: term_type.unwrap_or(default),
                datatype,
                language,
            });
        }

        Err(RmlError::MissingProperty(
            "rml:reference, rr:constant or rr:template in object map".to_string(),
        ))
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// First object of `(node, predicate, ?)`
    fn find_object(&self, node: &Term, predicate: &str) -> Option<&'a Term> {
        self.store.object(node, &Term::iri(predicate))
    }

    /// All objects of `(node, predicate, ?)`, in store order
    fn find_objects(&self, node: &Term, predicate: &str) -> Vec<&'a Term> {
        self.store.objects(node, &Term::iri(predicate)).collect()
    }

    /// `rml:reference`, falling back to `rr:column`
    fn find_reference(&self, node: &Term) -> Option<String> {
        self.find_object(node, RML::REFERENCE)
            .or_else(|| self.find_object(node, R2RML::COLUMN))
            .and_then(term_to_string)
    }

    fn find_term_type(&self, node: &Term) -> RmlResult<Option<TermType>> {
        match self.find_object(node, R2RML::TERM_TYPE) {
            None => Ok(None),
            Some(t) => t
                .as_iri()
                .and_then(TermType::from_iri)
                .map(Some)
                .ok_or_else(|| RmlError::invalid("rr:termType", format!("unknown term type {t}"))),
        }
    }
}

/// Literal lexical form or IRI as a string
fn term_to_string(term: &Term) -> Option<String> {
    match term {
        Term::Literal { value, .. } => Some(value.to_string()),
        Term::Iri(iri) => Some(iri.to_string()),
        Term::BlankNode(_) => None,
    }
}

fn constant_from_term(term: &Term, property: &str) -> RmlResult<ConstantValue> {
    match term {
        Term::Iri(iri) => Ok(ConstantValue::Iri(iri.to_string())),
        Term::Literal {
            value,
            datatype,
            language,
        } => Ok(ConstantValue::Literal {
            value: value.to_string(),
            datatype: (!datatype.is_xsd_string() && language.is_none())
                .then(|| datatype.as_iri().to_string()),
            language: language.as_ref().map(|l| l.to_string()),
        }),
        Term::BlankNode(_) => Err(RmlError::invalid(property, "blank node constant")),
    }
}
