//! GraphSink trait for event-driven graph construction
//!
//! Parsers call methods like `term_iri()` and `emit_triple()` on a sink
//! without knowing what the sink does with them. `GraphCollectorSink`
//! collects the events into a `Graph`.

use crate::{Datatype, Graph, Quad, Term};
use std::collections::HashMap;

/// Opaque term identifier, valid only within a single sink session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermId(pub(crate) u32);

impl TermId {
    /// Create a new TermId from a raw index.
    ///
    /// Intended for `GraphSink` implementations outside this crate.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Event-driven interface for RDF graph construction
///
/// # Example
///
/// ```
/// use ldwizard_graph_ir::{Datatype, GraphCollectorSink, GraphSink};
///
/// let mut sink = GraphCollectorSink::new();
/// sink.on_prefix("foaf", "http://xmlns.com/foaf/0.1/");
///
/// let alice = sink.term_iri("http://example.org/alice");
/// let name = sink.term_iri("http://xmlns.com/foaf/0.1/name");
/// let value = sink.term_literal("Alice", Datatype::xsd_string(), None);
/// sink.emit_triple(alice, name, value);
///
/// let graph = sink.finish();
/// assert_eq!(graph.len(), 1);
/// assert!(graph.prefixes.contains_key("foaf"));
/// ```
pub trait GraphSink {
    /// Called when a base IRI is declared (`@base <...> .`)
    fn on_base(&mut self, base_iri: &str);

    /// Called when a prefix is declared (`@prefix foaf: <...> .`)
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str);

    /// Create an IRI term and return its ID
    ///
    /// The IRI should be fully expanded (not prefixed).
    fn term_iri(&mut self, iri: &str) -> TermId;

    /// Create a blank node term and return its ID
    ///
    /// A labelled blank node keeps its identity across references. `None`
    /// generates a fresh node.
    fn term_blank(&mut self, label: Option<&str>) -> TermId;

    /// Create a literal term from its lexical form
    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId;

    /// Emit a triple using previously created term IDs
    fn emit_triple(&mut self, subject: TermId, predicate: TermId, object: TermId);
}

/// A sink that collects triples into a Graph
#[derive(Debug, Default)]
pub struct GraphCollectorSink {
    graph: Graph,
    /// Terms indexed by TermId
    terms: Vec<Term>,
    blank_counter: u32,
    blank_labels: HashMap<String, TermId>,
}

impl GraphCollectorSink {
    /// Create a new collector sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish building and return the graph
    pub fn finish(self) -> Graph {
        self.graph
    }

    /// Get the current graph (non-consuming)
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn get_term(&self, id: TermId) -> &Term {
        &self.terms[id.0 as usize]
    }

    fn add_term(&mut self, term: Term) -> TermId {
        let id = TermId(self.terms.len() as u32);
        self.terms.push(term);
        id
    }
}

impl GraphSink for GraphCollectorSink {
    fn on_base(&mut self, base_iri: &str) {
        self.graph.set_base(base_iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.graph.add_prefix(prefix, namespace_iri);
    }

    fn term_iri(&mut self, iri: &str) -> TermId {
        self.add_term(Term::iri(iri))
    }

    fn term_blank(&mut self, label: Option<&str>) -> TermId {
        match label {
            Some(l) => {
                if let Some(&id) = self.blank_labels.get(l) {
                    return id;
                }
                let id = self.add_term(Term::blank(l));
                self.blank_labels.insert(l.to_string(), id);
                id
            }
            None => {
                self.blank_counter += 1;
                let label = format!("b{}", self.blank_counter);
                self.add_term(Term::blank(label))
            }
        }
    }

    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId {
        let term = match language {
            Some(lang) => Term::lang_string(value, lang),
            None if datatype.is_xsd_string() => Term::string(value),
            None => Term::typed(value, datatype),
        };
        self.add_term(term)
    }

    fn emit_triple(&mut self, subject: TermId, predicate: TermId, object: TermId) {
        let s = self.get_term(subject).clone();
        let p = self.get_term(predicate).clone();
        let o = self.get_term(object).clone();
        self.graph.add(Quad::new(s, p, o));
    }
}
