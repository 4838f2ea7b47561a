//! A whole mapping document and its RDF rendering

use ldwizard_graph_ir::{Datatype, Graph, Term};
use serde::{Deserialize, Serialize};

use super::term_map::{ConstantValue, ObjectMap, PredicateMap, TermType};
use super::triples_map::TriplesMap;
use crate::vocab::{QL, R2RML, RML};

/// All TriplesMaps of one mapping document, in document order, plus the
/// prefixes the document declared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RmlMapping {
    pub triples_maps: Vec<TriplesMap>,
    /// Prefix declarations carried over from the source document
    pub prefixes: Vec<(String, String)>,
}

impl RmlMapping {
    pub fn new(triples_maps: Vec<TriplesMap>) -> Self {
        Self {
            triples_maps,
            prefixes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.triples_maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples_maps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriplesMap> {
        self.triples_maps.iter()
    }

    /// Get a TriplesMap by IRI
    pub fn get(&self, iri: &str) -> Option<&TriplesMap> {
        self.triples_maps.iter().find(|tm| tm.iri == iri)
    }

    /// Distinct logical source names, in document order
    pub fn sources(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for tm in &self.triples_maps {
            if !out.contains(&tm.source()) {
                out.push(tm.source());
            }
        }
        out
    }

    /// Render this mapping as an RDF graph in the RML vocabulary
    ///
    /// Nested maps become blank nodes labelled after their role (`sm0`,
    /// `pom0_1`, ...). Triples are emitted TriplesMap first, then each
    /// nested node in the order it is referenced.
    pub fn to_graph(&self) -> Graph {
        let mut g = Graph::new();
        g.add_prefix("rr", R2RML::NS);
        g.add_prefix("rml", RML::NS);
        g.add_prefix("ql", QL::NS);
        for (prefix, namespace) in &self.prefixes {
            g.add_prefix(prefix.as_str(), namespace.as_str());
        }

        let rdf_type = iri(R2RML::RDF_TYPE);

        for (k, tm) in self.triples_maps.iter().enumerate() {
            let node = iri(&tm.iri);
            let ls = Term::blank(format!("ls{k}"));
            let sm = Term::blank(format!("sm{k}"));

            g.add_triple(node.clone(), rdf_type.clone(), iri(R2RML::TRIPLES_MAP));
            g.add_triple(node.clone(), iri(RML::LOGICAL_SOURCE), ls.clone());
            g.add_triple(node.clone(), iri(R2RML::SUBJECT_MAP), sm.clone());
            let poms: Vec<Term> = (0..tm.predicate_object_maps.len())
                .map(|i| Term::blank(format!("pom{k}_{i}")))
                .collect();
            for pom in &poms {
                g.add_triple(node.clone(), iri(R2RML::PREDICATE_OBJECT_MAP), pom.clone());
            }

            // Logical source
            g.add_triple(
                ls.clone(),
                iri(RML::SOURCE),
                Term::string(&tm.logical_source.source),
            );
            if let Some(rf) = &tm.logical_source.reference_formulation {
                g.add_triple(ls, iri(RML::REFERENCE_FORMULATION), iri(rf));
            }

            // Subject map
            let subject = &tm.subject_map;
            if let Some(t) = &subject.template {
                g.add_triple(sm.clone(), iri(R2RML::TEMPLATE), Term::string(t));
            } else if let Some(col) = &subject.reference {
                g.add_triple(sm.clone(), iri(RML::REFERENCE), Term::string(col));
            } else if let Some(c) = &subject.constant {
                g.add_triple(sm.clone(), iri(R2RML::CONSTANT), iri(c));
            }
            if subject.term_type != TermType::Iri {
                g.add_triple(
                    sm.clone(),
                    iri(R2RML::TERM_TYPE),
                    iri(subject.term_type.as_iri()),
                );
            }
            for class in &subject.classes {
                g.add_triple(sm.clone(), iri(R2RML::CLASS), iri(class));
            }

            // Predicate-object maps
            for (i, (pom, pom_node)) in tm.predicate_object_maps.iter().zip(&poms).enumerate() {
                let om = Term::blank(format!("om{k}_{i}"));
                match &pom.predicate_map {
                    PredicateMap::Constant(p) => {
                        g.add_triple(pom_node.clone(), iri(R2RML::PREDICATE), iri(p));
                    }
                    PredicateMap::Template(t) => {
                        let pm = Term::blank(format!("pm{k}_{i}"));
                        g.add_triple(pom_node.clone(), iri(R2RML::PREDICATE_MAP), pm.clone());
                        g.add_triple(pm, iri(R2RML::TEMPLATE), Term::string(t));
                    }
                    PredicateMap::Reference(col) => {
                        let pm = Term::blank(format!("pm{k}_{i}"));
                        g.add_triple(pom_node.clone(), iri(R2RML::PREDICATE_MAP), pm.clone());
                        g.add_triple(pm, iri(RML::REFERENCE), Term::string(col));
                    }
                }
                g.add_triple(pom_node.clone(), iri(R2RML::OBJECT_MAP), om.clone());
                add_object_map(&mut g, om, &pom.object_map);
            }
        }

        g
    }
}

fn iri(value: &str) -> Term {
    Term::iri(value)
}

fn add_object_map(g: &mut Graph, om: Term, object_map: &ObjectMap) {
    let (term_type, default_type, datatype, language) = match object_map {
        ObjectMap::Reference {
            column,
            datatype,
            language,
            term_type,
        } => {
            g.add_triple(om.clone(), iri(RML::REFERENCE), Term::string(column));
            (*term_type, Some(TermType::Literal), datatype, language)
        }
        ObjectMap::Template {
            template,
            term_type,
            datatype,
            language,
        } => {
            g.add_triple(om.clone(), iri(R2RML::TEMPLATE), Term::string(template));
            // IRI templates always state their term type explicitly
            (*term_type, None, datatype, language)
        }
        ObjectMap::Constant { value } => {
            let term = match value {
                ConstantValue::Iri(i) => iri(i),
                ConstantValue::Literal {
                    value,
                    datatype,
                    language,
                } => match (datatype, language) {
                    (_, Some(lang)) => Term::lang_string(value, lang),
                    (Some(dt), None) => Term::typed(value, Datatype::from_iri(dt)),
                    (None, None) => Term::string(value),
                },
            };
            g.add_triple(om, iri(R2RML::CONSTANT), term);
            return;
        }
    };

    if default_type != Some(term_type) {
        g.add_triple(om.clone(), iri(R2RML::TERM_TYPE), iri(term_type.as_iri()));
    }
    if let Some(dt) = datatype {
        g.add_triple(om.clone(), iri(R2RML::DATATYPE), iri(dt));
    }
    if let Some(lang) = language {
        g.add_triple(om, iri(R2RML::LANGUAGE), Term::string(lang));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{LogicalSource, PredicateObjectMap, SubjectMap};
    use ldwizard_graph_ir::QuadStore;

    fn sample() -> RmlMapping {
        let mut tm = TriplesMap::new(
            "http://ex.org/map#TM",
            LogicalSource::csv("people.csv"),
            SubjectMap::template("http://ex.org/{id}"),
        );
        tm.predicate_object_maps.push(PredicateObjectMap::new(
            PredicateMap::constant(R2RML::RDF_TYPE),
            ObjectMap::constant_iri("https://schema.org/Person"),
        ));
        tm.predicate_object_maps.push(PredicateObjectMap::new(
            PredicateMap::constant("http://ex.org/name"),
            ObjectMap::reference("name"),
        ));
        tm.predicate_object_maps.push(PredicateObjectMap::new(
            PredicateMap::constant("http://ex.org/city"),
            ObjectMap::template("http://cities.org/{city}"),
        ));
        RmlMapping::new(vec![tm])
    }

    #[test]
    fn test_to_graph_shape() {
        let graph = sample().to_graph();
        let store = QuadStore::from_graph(&graph);
        let tm = Term::iri("http://ex.org/map#TM");

        assert_eq!(
            store.object(&tm, &Term::iri(R2RML::RDF_TYPE)),
            Some(&Term::iri(R2RML::TRIPLES_MAP))
        );
        let poms: Vec<_> = store
            .objects(&tm, &Term::iri(R2RML::PREDICATE_OBJECT_MAP))
            .collect();
        assert_eq!(poms.len(), 3);

        let om = Term::blank("om0_2");
        assert_eq!(
            store.object(&om, &Term::iri(R2RML::TERM_TYPE)),
            Some(&Term::iri(R2RML::IRI))
        );
        let om_ref = Term::blank("om0_1");
        assert_eq!(
            store.object(&om_ref, &Term::iri(RML::REFERENCE)),
            Some(&Term::string("name"))
        );
        assert!(store
            .object(&om_ref, &Term::iri(R2RML::TERM_TYPE))
            .is_none());

        let ls = Term::blank("ls0");
        assert_eq!(
            store.object(&ls, &Term::iri(RML::REFERENCE_FORMULATION)),
            Some(&Term::iri(QL::CSV))
        );
        assert!(graph.prefixes.contains_key("rml"));
    }

    #[test]
    fn test_blank_subject_term_type() {
        let tm = TriplesMap::new(
            "http://ex.org/map#TM",
            LogicalSource::csv("x.csv"),
            SubjectMap::blank_node(),
        );
        let graph = RmlMapping::new(vec![tm]).to_graph();
        let store = QuadStore::from_graph(&graph);
        assert_eq!(
            store.object(&Term::blank("sm0"), &Term::iri(R2RML::TERM_TYPE)),
            Some(&Term::iri(R2RML::BLANK_NODE))
        );
        assert!(store
            .object(&Term::blank("sm0"), &Term::iri(R2RML::TEMPLATE))
            .is_none());
    }

    #[test]
    fn test_sources() {
        let mapping = sample();
        assert_eq!(mapping.sources(), vec!["people.csv"]);
        assert!(mapping.get("http://ex.org/map#TM").is_some());
    }
}
