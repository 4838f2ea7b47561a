//! Indexed, read-only view over a set of quads
//!
//! `QuadStore` answers triple-pattern queries where any of subject,
//! predicate or object may be left unbound. Results come back in insertion
//! order so that walks over a mapping document are reproducible.

use crate::{Graph, Quad, Term};
use std::collections::HashMap;

/// Quads plus per-position indexes
#[derive(Debug, Default, Clone)]
pub struct QuadStore {
    quads: Vec<Quad>,
    by_subject: HashMap<Term, Vec<usize>>,
    by_predicate: HashMap<Term, Vec<usize>>,
    by_object: HashMap<Term, Vec<usize>>,
}

impl QuadStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding every quad of `graph`
    pub fn from_graph(graph: &Graph) -> Self {
        let mut store = Self::new();
        for quad in graph.iter() {
            store.insert(quad.clone());
        }
        store
    }

    /// Add a quad
    ///
    /// Duplicates are ignored so that the store has set semantics.
    pub fn insert(&mut self, quad: Quad) {
        let exists = self
            .by_subject
            .get(&quad.s)
            .is_some_and(|ids| ids.iter().any(|&i| self.quads[i] == quad));
        if exists {
            return;
        }

        let idx = self.quads.len();
        self.by_subject.entry(quad.s.clone()).or_default().push(idx);
        self.by_predicate.entry(quad.p.clone()).or_default().push(idx);
        self.by_object.entry(quad.o.clone()).or_default().push(idx);
        self.quads.push(quad);
    }

    /// Number of quads
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// All quads in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Match a triple pattern; `None` positions are wildcards
    ///
    /// The returned quads borrow from the store only, so the pattern terms
    /// may be temporaries.
    pub fn match_pattern<'s>(
        &'s self,
        s: Option<&Term>,
        p: Option<&Term>,
        o: Option<&Term>,
    ) -> Box<dyn Iterator<Item = &'s Quad> + 's> {
        // Narrow to the smallest index among the bound positions
        let mut candidates: Option<&'s [usize]> = None;
        for (term, index) in [
            (s, &self.by_subject),
            (p, &self.by_predicate),
            (o, &self.by_object),
        ] {
            if let Some(term) = term {
                let ids = index.get(term).map(Vec::as_slice).unwrap_or(&[]);
                if candidates.map_or(true, |c| ids.len() < c.len()) {
                    candidates = Some(ids);
                }
            }
        }

        let Some(ids) = candidates else {
            return Box::new(self.quads.iter());
        };

        let (s, p, o) = (s.cloned(), p.cloned(), o.cloned());
        Box::new(
            ids.iter()
                .map(move |&i| &self.quads[i])
                .filter(move |q| {
                    s.as_ref().map_or(true, |t| &q.s == t)
                        && p.as_ref().map_or(true, |t| &q.p == t)
                        && o.as_ref().map_or(true, |t| &q.o == t)
                }),
        )
    }

    /// Objects of `(subject, predicate, ?)` in insertion order
    pub fn objects<'s>(
        &'s self,
        subject: &Term,
        predicate: &Term,
    ) -> impl Iterator<Item = &'s Term> + 's {
        self.match_pattern(Some(subject), Some(predicate), None)
            .map(|q| &q.o)
    }

    /// First object of `(subject, predicate, ?)`, if any
    pub fn object<'s>(&'s self, subject: &Term, predicate: &Term) -> Option<&'s Term> {
        self.objects(subject, predicate).next()
    }

    /// Subjects of `(?, predicate, object)` in insertion order
    pub fn subjects<'s>(
        &'s self,
        predicate: &Term,
        object: &Term,
    ) -> impl Iterator<Item = &'s Term> + 's {
        self.match_pattern(None, Some(predicate), Some(object))
            .map(|q| &q.s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> QuadStore {
        let mut graph = Graph::new();
        let alice = Term::iri("http://ex.org/alice");
        let bob = Term::iri("http://ex.org/bob");
        let name = Term::iri("http://ex.org/name");
        let knows = Term::iri("http://ex.org/knows");

        graph.add_triple(alice.clone(), name.clone(), Term::string("Alice"));
        graph.add_triple(bob.clone(), name.clone(), Term::string("Bob"));
        graph.add_triple(alice.clone(), knows.clone(), bob.clone());
        graph.add_triple(alice, name, Term::string("Alice"));
        QuadStore::from_graph(&graph)
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(store().len(), 3);
    }

    #[test]
    fn test_match_by_predicate_keeps_order() {
        let store = store();
        let name = Term::iri("http://ex.org/name");
        let subjects: Vec<_> = store
            .match_pattern(None, Some(&name), None)
            .map(|q| q.s.value().to_string())
            .collect();
        assert_eq!(subjects, vec!["http://ex.org/alice", "http://ex.org/bob"]);
    }

    #[test]
    fn test_match_fully_bound_and_unbound() {
        let store = store();
        let alice = Term::iri("http://ex.org/alice");
        let knows = Term::iri("http://ex.org/knows");
        let bob = Term::iri("http://ex.org/bob");

        assert_eq!(
            store
                .match_pattern(Some(&alice), Some(&knows), Some(&bob))
                .count(),
            1
        );
        assert_eq!(store.match_pattern(None, None, None).count(), 3);
        assert_eq!(
            store.match_pattern(Some(&bob), Some(&knows), None).count(),
            0
        );
    }

    #[test]
    fn test_helpers() {
        let store = store();
        let alice = Term::iri("http://ex.org/alice");
        let bob = Term::iri("http://ex.org/bob");
        let knows = Term::iri("http://ex.org/knows");

        assert_eq!(store.object(&alice, &knows), Some(&bob));
        let who: Vec<_> = store.subjects(&knows, &bob).collect();
        assert_eq!(who, vec![&alice]);
        assert!(store.object(&Term::iri("http://ex.org/none"), &knows).is_none());
    }
}
