//! Turtle serialization
//!
//! Output layout: one `@prefix` line per binding, a blank line, then one
//! block per subject in first-appearance order:
//!
//! ```text
//! :1 a schema:Person ;
//!     schema:name "Alice", "Ally" .
//! ```

use crate::error::{FormatError, Result};
use crate::prefix::PrefixMap;
use ldwizard_graph_ir::{Datatype, Graph, Quad, Term};
use ldwizard_vocab::rdf;
use std::fmt::Write as FmtWrite;

/// Serialize `graph` as Turtle, compacting IRIs with `prefixes`
///
/// Fails with [`FormatError::NamedGraph`] if any quad is outside the
/// default graph.
pub fn format_turtle(graph: &Graph, prefixes: &PrefixMap) -> Result<String> {
    if let Some(graph_name) = graph.iter().find_map(|q| q.g.as_ref()) {
        return Err(FormatError::NamedGraph {
            graph: graph_name.to_string(),
        });
    }

    let mut out = String::with_capacity(64 * graph.len() + 512);

    for (prefix, namespace) in prefixes.iter() {
        if namespace.is_empty() {
            continue;
        }
        writeln!(out, "@prefix {prefix}: <{namespace}> .")?;
    }

    for group in graph.group_by_subject() {
        out.push('\n');
        write!(out, "{}", term_to_turtle(group.subject, prefixes))?;

        let predicates = group_by_predicate(&group.quads);
        for (i, (predicate, objects)) in predicates.iter().enumerate() {
            if i > 0 {
                out.push_str(" ;\n   ");
            }
            write!(out, " {}", predicate_to_turtle(predicate, prefixes))?;
            for (j, object) in objects.iter().enumerate() {
                if j > 0 {
                    out.push(',');
                }
                write!(out, " {}", term_to_turtle(object, prefixes))?;
            }
        }
        out.push_str(" .\n");
    }

    tracing::debug!(
        quads = graph.len(),
        bytes = out.len(),
        "formatted turtle output"
    );
    Ok(out)
}

/// Predicates of one subject in first-appearance order, each with its objects
fn group_by_predicate<'a>(quads: &[&'a Quad]) -> Vec<(&'a Term, Vec<&'a Term>)> {
    let mut groups: Vec<(&Term, Vec<&Term>)> = Vec::new();
    for quad in quads {
        match groups.iter_mut().find(|(p, _)| *p == &quad.p) {
            Some((_, objects)) => objects.push(&quad.o),
            None => groups.push((&quad.p, vec![&quad.o])),
        }
    }
    groups
}

fn predicate_to_turtle(term: &Term, prefixes: &PrefixMap) -> String {
    if term.as_iri() == Some(rdf::TYPE) {
        return "a".to_string();
    }
    term_to_turtle(term, prefixes)
}

fn iri_to_turtle(iri: &str, prefixes: &PrefixMap) -> String {
    prefixes
        .compact(iri)
        .unwrap_or_else(|| format!("<{}>", escape_iri(iri)))
}

fn term_to_turtle(term: &Term, prefixes: &PrefixMap) -> String {
    match term {
        Term::Iri(iri) => iri_to_turtle(iri, prefixes),
        Term::BlankNode(id) => id.to_string(),
        Term::Literal {
            value,
            datatype,
            language,
        } => {
            if let Some(lang) = language {
                format!("\"{}\"@{}", escape_turtle_string(value), lang)
            } else if datatype.is_xsd_string() {
                format!("\"{}\"", escape_turtle_string(value))
            } else if is_bare_literal(value, datatype) {
                value.to_string()
            } else {
                format!(
                    "\"{}\"^^{}",
                    escape_turtle_string(value),
                    iri_to_turtle(datatype.as_iri(), prefixes)
                )
            }
        }
    }
}

/// Whether a typed literal can be written without quotes and datatype
fn is_bare_literal(value: &str, datatype: &Datatype) -> bool {
    if !datatype.has_turtle_shorthand() {
        return false;
    }
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);

    match datatype.as_iri() {
        ldwizard_vocab::xsd::BOOLEAN => value == "true" || value == "false",
        ldwizard_vocab::xsd::INTEGER => digits(unsigned),
        ldwizard_vocab::xsd::DECIMAL => match unsigned.split_once('.') {
            Some((int, frac)) => (int.is_empty() || digits(int)) && digits(frac),
            None => false,
        },
        _ => false,
    }
}

/// Escape characters that may not appear inside `<...>`
fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' | ' ' => {
                write!(out, "\\u{:04X}", c as u32).ok();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Escape a string for use inside a double-quoted Turtle literal.
pub fn escape_turtle_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Graph {
        let mut graph = Graph::new();
        let alice = Term::iri("http://ex.org/1");
        graph.add_triple(
            alice.clone(),
            Term::iri(rdf::TYPE),
            Term::iri("https://schema.org/Person"),
        );
        graph.add_triple(
            alice.clone(),
            Term::iri("https://schema.org/name"),
            Term::string("Alice"),
        );
        graph.add_triple(
            Term::iri("http://ex.org/2"),
            Term::iri("https://schema.org/name"),
            Term::string("Bob"),
        );
        graph.add_triple(
            alice,
            Term::iri("https://schema.org/name"),
            Term::lang_string("Ali", "nl"),
        );
        graph
    }

    #[test]
    fn test_subject_blocks() {
        let prefixes = PrefixMap::well_known("http://ex.org/");
        let ttl = format_turtle(&people(), &prefixes).unwrap();

        assert!(ttl.starts_with("@prefix : <http://ex.org/> .\n@prefix xsd:"));
        assert!(ttl.contains(":1 a schema:Person ;\n    schema:name \"Alice\", \"Ali\"@nl .\n"));
        assert!(ttl.contains(":2 schema:name \"Bob\" .\n"));
        assert!(ttl.find(":1 a").unwrap() < ttl.find(":2 schema").unwrap());
    }

    #[test]
    fn test_uncompactable_iri_and_typed_literals() {
        let mut graph = Graph::new();
        graph.add_triple(
            Term::iri("http://other.org/a/b"),
            Term::iri("http://ex.org/count"),
            Term::typed("42", Datatype::xsd_integer()),
        );
        graph.add_triple(
            Term::iri("http://other.org/a/b"),
            Term::iri("http://ex.org/born"),
            Term::typed("2000-01-01", Datatype::xsd_date()),
        );
        graph.add_triple(
            Term::blank("row1"),
            Term::iri("http://ex.org/note"),
            Term::string("line1\n\"quoted\""),
        );

        let prefixes = PrefixMap::well_known("http://ex.org/");
        let ttl = format_turtle(&graph, &prefixes).unwrap();

        assert!(ttl.contains("<http://other.org/a/b> :count 42 ;"));
        assert!(ttl.contains(":born \"2000-01-01\"^^xsd:date ."));
        assert!(ttl.contains("_:row1 :note \"line1\\n\\\"quoted\\\"\" ."));
    }

    #[test]
    fn test_named_graph_rejected() {
        let mut graph = Graph::new();
        graph.add(Quad::in_graph(
            Term::iri("http://ex.org/s"),
            Term::iri("http://ex.org/p"),
            Term::string("o"),
            Term::iri("http://ex.org/g"),
        ));

        let err = format_turtle(&graph, &PrefixMap::new()).unwrap_err();
        assert!(matches!(err, FormatError::NamedGraph { .. }));
    }

    #[test]
    fn test_bare_literal_rules() {
        assert!(is_bare_literal("-12", &Datatype::xsd_integer()));
        assert!(!is_bare_literal("12a", &Datatype::xsd_integer()));
        assert!(is_bare_literal("1.5", &Datatype::xsd_decimal()));
        assert!(!is_bare_literal("15", &Datatype::xsd_decimal()));
        assert!(is_bare_literal("true", &Datatype::xsd_boolean()));
        assert!(!is_bare_literal("1.0e3", &Datatype::xsd_double()));
    }

    #[test]
    fn test_empty_graph_prints_only_prefixes() {
        let ttl = format_turtle(&Graph::new(), &PrefixMap::well_known("http://ex.org/")).unwrap();
        assert_eq!(ttl.lines().count(), 12);
        assert!(ttl.lines().all(|l| l.starts_with("@prefix")));
    }
}
