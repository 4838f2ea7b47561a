//! RDF quad: a triple plus an optional graph name

use crate::Term;
use serde::{Deserialize, Serialize};

/// A subject-predicate-object statement, optionally in a named graph
///
/// `g == None` means the default graph. Ordering is lexicographic on
/// (g, s, p, o) with the default graph first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    /// Graph name (None for the default graph)
    pub g: Option<Term>,
    /// Subject (IRI or blank node)
    pub s: Term,
    /// Predicate (IRI)
    pub p: Term,
    /// Object (any term)
    pub o: Term,
}

impl Quad {
    /// Create a quad in the default graph
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { g: None, s, p, o }
    }

    /// Create a quad in a named graph
    pub fn in_graph(s: Term, p: Term, o: Term, g: Term) -> Self {
        Self {
            g: Some(g),
            s,
            p,
            o,
        }
    }

    /// Whether this quad belongs to the default graph
    pub fn is_default_graph(&self) -> bool {
        self.g.is_none()
    }
}

impl std::fmt::Display for Quad {
    /// N-Quads rendering (without trailing newline)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.g {
            Some(g) => write!(f, "{} {} {} {} .", self.s, self.p, self.o, g),
            None => write!(f, "{} {} {} .", self.s, self.p, self.o),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_display() {
        let q = Quad::new(
            Term::iri("http://ex.org/1"),
            Term::iri("http://ex.org/name"),
            Term::string("Alice"),
        );
        assert!(q.is_default_graph());
        assert_eq!(
            q.to_string(),
            "<http://ex.org/1> <http://ex.org/name> \"Alice\" ."
        );

        let named = Quad::in_graph(
            Term::iri("http://ex.org/1"),
            Term::iri("http://ex.org/name"),
            Term::string("Alice"),
            Term::iri("http://ex.org/g"),
        );
        assert!(named.to_string().ends_with("<http://ex.org/g> ."));
    }
}
