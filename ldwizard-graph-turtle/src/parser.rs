//! Turtle parser that emits to GraphSink.
//!
//! Tokenizing and grammar handling are delegated to `oxttl`; this module maps
//! its output onto `GraphSink` events. Prefix declarations are forwarded
//! after the last triple since a prefix can be declared anywhere in a
//! document.

use ldwizard_graph_ir::{Datatype, GraphSink, TermId};
use oxrdf::{Subject, Term as OxTerm};
use oxttl::{TurtleParser, TurtleSyntaxError};

use crate::error::{Result, TurtleError};

/// Parse a Turtle document, emitting events to `sink`.
pub fn parse<S: GraphSink>(input: &str, sink: &mut S) -> Result<()> {
    run(TurtleParser::new(), input, sink)
}

/// Parse a Turtle document, resolving relative IRIs against `base`.
pub fn parse_with_base<S: GraphSink>(input: &str, base: &str, sink: &mut S) -> Result<()> {
    let parser = TurtleParser::new()
        .with_base_iri(base)
        .map_err(|e| TurtleError::IriResolution(e.to_string()))?;
    sink.on_base(base);
    run(parser, input, sink)
}

fn run<S: GraphSink>(parser: TurtleParser, input: &str, sink: &mut S) -> Result<()> {
    let mut reader = parser.for_slice(input.as_bytes());
    let mut count = 0usize;

    for result in &mut reader {
        let triple = result.map_err(syntax_error)?;

        let s = subject_id(sink, &triple.subject)?;
        let p = sink.term_iri(triple.predicate.as_str());
        let o = object_id(sink, &triple.object)?;
        sink.emit_triple(s, p, o);
        count += 1;
    }

    if let Some(base) = reader.base_iri() {
        sink.on_base(base);
    }
    for (prefix, namespace) in reader.prefixes() {
        sink.on_prefix(prefix, namespace);
    }

    tracing::debug!(triples = count, "parsed turtle document");
    Ok(())
}

fn syntax_error(e: TurtleSyntaxError) -> TurtleError {
    let start = e.location().start;
    TurtleError::parse(start.line + 1, start.column + 1, e.message())
}

#[allow(unreachable_patterns)]
fn subject_id<S: GraphSink>(sink: &mut S, subject: &Subject) -> Result<TermId> {
    match subject {
        Subject::NamedNode(n) => Ok(sink.term_iri(n.as_str())),
        Subject::BlankNode(b) => Ok(sink.term_blank(Some(b.as_str()))),
        _ => Err(TurtleError::Unsupported("quoted triple subject".into())),
    }
}

#[allow(unreachable_patterns)]
fn object_id<S: GraphSink>(sink: &mut S, object: &OxTerm) -> Result<TermId> {
    match object {
        OxTerm::NamedNode(n) => Ok(sink.term_iri(n.as_str())),
        OxTerm::BlankNode(b) => Ok(sink.term_blank(Some(b.as_str()))),
        OxTerm::Literal(lit) => {
            let datatype = Datatype::from_iri(lit.datatype().as_str());
            Ok(sink.term_literal(lit.value(), datatype, lit.language()))
        }
        _ => Err(TurtleError::Unsupported("quoted triple object".into())),
    }
}
