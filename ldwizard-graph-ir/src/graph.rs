//! RDF graph - an ordered collection of quads
//!
//! The `Graph` type uses `Vec<Quad>` to preserve insertion order and
//! duplicates (bag semantics). Call `dedupe()` explicitly for set semantics.

use crate::{Quad, Term};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A collection of RDF quads plus the directives of the document they came from
///
/// # Design Decisions
///
/// - **Vec storage**: preserves row order from the transformation executor so
///   that Turtle output follows input row order.
/// - **Explicit deduplication**: `dedupe()` keeps the first occurrence of
///   each quad and does not reorder.
///
/// # Example
///
/// ```
/// use ldwizard_graph_ir::{Graph, Term};
///
/// let mut graph = Graph::new();
/// graph.add_prefix("foaf", "http://xmlns.com/foaf/0.1/");
/// graph.add_triple(
///     Term::iri("http://example.org/alice"),
///     Term::iri("http://xmlns.com/foaf/0.1/name"),
///     Term::string("Alice"),
/// );
/// assert_eq!(graph.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The quads in this graph
    quads: Vec<Quad>,
    /// Base IRI from parsing
    pub base: Option<String>,
    /// Prefix mappings from parsing (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
}

/// Quads sharing one subject, in first-appearance order
#[derive(Debug)]
pub struct SubjectGroup<'a> {
    pub subject: &'a Term,
    pub quads: Vec<&'a Quad>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base IRI
    pub fn set_base(&mut self, base: impl Into<String>) {
        self.base = Some(base.into());
    }

    /// Add a prefix mapping
    pub fn add_prefix(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Add a quad to the graph
    pub fn add(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    /// Add a default-graph triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Quad::new(s, p, o));
    }

    /// Get the number of quads
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Iterate over quads in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Get a reference to the quads
    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Get all quads (consuming the graph)
    pub fn into_quads(self) -> Vec<Quad> {
        self.quads
    }

    /// Sort quads by (g, s, p, o)
    pub fn sort(&mut self) {
        self.quads.sort();
    }

    /// Remove duplicate quads, keeping the first occurrence in place
    pub fn dedupe(&mut self) {
        let mut seen = HashSet::with_capacity(self.quads.len());
        self.quads.retain(|q| seen.insert(q.clone()));
    }

    /// Group quads by subject, subjects in first-appearance order
    ///
    /// Quads of a subject keep their relative insertion order.
    pub fn group_by_subject(&self) -> Vec<SubjectGroup<'_>> {
        let mut index: HashMap<&Term, usize> = HashMap::new();
        let mut groups: Vec<SubjectGroup<'_>> = Vec::new();

        for quad in &self.quads {
            match index.get(&quad.s) {
                Some(&i) => groups[i].quads.push(quad),
                None => {
                    index.insert(&quad.s, groups.len());
                    groups.push(SubjectGroup {
                        subject: &quad.s,
                        quads: vec![quad],
                    });
                }
            }
        }

        groups
    }
}

impl IntoIterator for Graph {
    type Item = Quad;
    type IntoIter = std::vec::IntoIter<Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Quad;
    type IntoIter = std::slice::Iter<'a, Quad>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads.iter()
    }
}

impl FromIterator<Quad> for Graph {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Graph {
            quads: iter.into_iter().collect(),
            base: None,
            prefixes: BTreeMap::new(),
        }
    }
}

impl Extend<Quad> for Graph {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        self.quads.extend(iter);
    }
}
