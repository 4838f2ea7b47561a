//! RDF term materialization
//!
//! Functions for generating graph IR terms from one table row according to
//! a term map. Every function returns `Ok(None)` when a cell it needs is
//! empty: empty cells behave like SQL NULL and produce no term.

use ldwizard_graph_ir::{Datatype, Term};
use ldwizard_tabular::Row;

use crate::error::{RmlError, RmlResult};
use crate::mapping::{ConstantValue, ObjectMap, PredicateMap, SubjectMap, TermType};
use crate::template::{self, Segment};

/// A template split into text and resolved column indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompiledTemplate {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Column(usize),
}

impl CompiledTemplate {
    /// Resolve every placeholder against `headers`
    ///
    /// Returns the first unknown column name as the error.
    pub(crate) fn compile(text: &str, headers: &[String]) -> Result<Self, String> {
        let parts = template::segments(text)
            .into_iter()
            .map(|segment| match segment {
                Segment::Text(t) => Ok(Part::Text(t)),
                Segment::Column(name) => headers
                    .iter()
                    .position(|h| *h == name)
                    .map(Part::Column)
                    .ok_or(name),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }

    /// Substitute the row's cells, escaping them when `escape` is set
    pub(crate) fn expand(&self, row: &Row<'_>, escape: bool) -> Option<String> {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Text(t) => out.push_str(t),
                Part::Column(idx) => {
                    let value = row.get(*idx)?;
                    if escape {
                        out.push_str(&iri_escape(value));
                    } else {
                        out.push_str(value);
                    }
                }
            }
        }
        Some(out)
    }
}

/// Expand a template by substituting `{column}` placeholders with row values
///
/// Values are IRI-escaped. Returns `None` if any referenced cell is empty or
/// any referenced column is missing from `headers`.
///
/// ```
/// use ldwizard_rml::materialize::expand_template;
/// use ldwizard_tabular::RowTable;
///
/// let table = RowTable::from_matrix(vec![
///     vec!["id".into(), "name".into()],
///     vec!["a b".into(), "Alice".into()],
/// ])
/// .unwrap();
/// let row = table.row(0).unwrap();
/// assert_eq!(
///     expand_template("http://ex.org/{id}", table.headers(), &row).as_deref(),
///     Some("http://ex.org/a%20b")
/// );
/// ```
pub fn expand_template(text: &str, headers: &[String], row: &Row<'_>) -> Option<String> {
    CompiledTemplate::compile(text, headers)
        .ok()?
        .expand(row, true)
}

/// IRI-safe encoding of a cell value
///
/// ASCII unreserved characters and non-ASCII characters are kept; every
/// other byte is percent-encoded.
pub fn iri_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' | '_' | '~' => out.push(c),
            c if !c.is_ascii() => out.push(c),
            c => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
        }
    }
    out
}

/// A term map with its columns resolved against one table's headers
#[derive(Debug, Clone)]
pub(crate) enum Compiled {
    Constant(Term),
    Column { index: usize, kind: TermKind },
    Template { template: CompiledTemplate, kind: TermKind },
}

/// What to build from a string value
#[derive(Debug, Clone)]
pub(crate) enum TermKind {
    Iri,
    Blank,
    Literal {
        datatype: Option<Datatype>,
        language: Option<String>,
    },
}

impl TermKind {
    fn new(term_type: TermType, datatype: &Option<String>, language: &Option<String>) -> Self {
        match term_type {
            TermType::Iri => TermKind::Iri,
            TermType::BlankNode => TermKind::Blank,
            TermType::Literal => TermKind::Literal {
                datatype: datatype.as_deref().map(Datatype::from_iri),
                language: language.clone(),
            },
        }
    }

    fn build(&self, value: &str) -> Term {
        match self {
            TermKind::Iri => Term::iri(value),
            TermKind::Blank => Term::blank(value),
            TermKind::Literal {
                language: Some(lang),
                ..
            } => Term::lang_string(value, lang),
            TermKind::Literal {
                datatype: Some(dt), ..
            } => Term::typed(value, dt.clone()),
            TermKind::Literal { .. } => Term::string(value),
        }
    }
}

impl Compiled {
    /// Materialize for one row; `None` when a referenced cell is empty
    pub(crate) fn materialize(&self, row: &Row<'_>) -> Option<Term> {
        match self {
            Compiled::Constant(term) => Some(term.clone()),
            Compiled::Column { index, kind } => row.get(*index).map(|v| kind.build(v)),
            Compiled::Template { template, kind } => {
                let escape = matches!(kind, TermKind::Iri);
                template.expand(row, escape).map(|v| kind.build(&v))
            }
        }
    }
}

fn column_index(column: &str, headers: &[String], source: &str) -> RmlResult<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| RmlError::ColumnNotFound {
            column: column.to_string(),
            source_name: source.to_string(),
        })
}

fn compile_template(text: &str, headers: &[String], source: &str) -> RmlResult<CompiledTemplate> {
    CompiledTemplate::compile(text, headers).map_err(|column| RmlError::ColumnNotFound {
        column,
        source_name: source.to_string(),
    })
}

/// Resolve a subject map; `None` for per-row blank nodes
pub(crate) fn compile_subject(
    subject_map: &SubjectMap,
    headers: &[String],
    source: &str,
) -> RmlResult<Option<Compiled>> {
    let kind = match subject_map.term_type {
        TermType::Iri => TermKind::Iri,
        TermType::BlankNode => TermKind::Blank,
        TermType::Literal => {
            return Err(RmlError::invalid("rr:termType", "subject cannot be a literal"))
        }
    };

    if let Some(constant) = &subject_map.constant {
        let term = match kind {
            TermKind::Blank => Term::blank(constant),
            _ => Term::iri(constant),
        };
        return Ok(Some(Compiled::Constant(term)));
    }
    if let Some(column) = &subject_map.reference {
        let index = column_index(column, headers, source)?;
        return Ok(Some(Compiled::Column { index, kind }));
    }
    if let Some(text) = &subject_map.template {
        let template = compile_template(text, headers, source)?;
        return Ok(Some(Compiled::Template { template, kind }));
    }
    if subject_map.term_type.is_blank_node() {
        return Ok(None);
    }

    Err(RmlError::MissingProperty(
        "subject map must have rr:template, rml:reference, or rr:constant".to_string(),
    ))
}

/// Resolve a predicate map
pub(crate) fn compile_predicate(
    predicate_map: &PredicateMap,
    headers: &[String],
    source: &str,
) -> RmlResult<Compiled> {
    Ok(match predicate_map {
        PredicateMap::Constant(iri) => Compiled::Constant(Term::iri(iri)),
        PredicateMap::Reference(column) => Compiled::Column {
            index: column_index(column, headers, source)?,
            kind: TermKind::Iri,
        },
        PredicateMap::Template(text) => Compiled::Template {
            template: compile_template(text, headers, source)?,
            kind: TermKind::Iri,
        },
    })
}

/// Resolve an object map
pub(crate) fn compile_object(
    object_map: &ObjectMap,
    headers: &[String],
    source: &str,
) -> RmlResult<Compiled> {
    Ok(match object_map {
        ObjectMap::Constant { value } => Compiled::Constant(constant_term(value)),
        ObjectMap::Reference {
            column,
            datatype,
            language,
            term_type,
        } => Compiled::Column {
            index: column_index(column, headers, source)?,
            kind: TermKind::new(*term_type, datatype, language),
        },
        ObjectMap::Template {
            template,
            term_type,
            datatype,
            language,
        } => Compiled::Template {
            template: compile_template(template, headers, source)?,
            kind: TermKind::new(*term_type, datatype, language),
        },
    })
}

fn constant_term(value: &ConstantValue) -> Term {
    match value {
        ConstantValue::Iri(iri) => Term::iri(iri),
        ConstantValue::Literal {
            value,
            language: Some(lang),
            ..
        } => Term::lang_string(value, lang),
        ConstantValue::Literal {
            value,
            datatype: Some(dt),
            ..
        } => Term::typed(value, Datatype::from_iri(dt)),
        ConstantValue::Literal { value, .. } => Term::string(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldwizard_tabular::RowTable;

    fn table() -> RowTable {
        RowTable::from_matrix(vec![
            vec!["id".into(), "name".into(), "city".into()],
            vec!["1".into(), "Alice".into(), "New York".into()],
            vec!["2".into(), "Bob".into(), "".into()],
        ])
        .unwrap()
    }

    #[test]
    fn test_iri_escape() {
        assert_eq!(iri_escape("simple"), "simple");
        assert_eq!(iri_escape("with space"), "with%20space");
        assert_eq!(iri_escape("test/path"), "test%2Fpath");
        assert_eq!(iri_escape("a~b_c.d-e"), "a~b_c.d-e");
        assert_eq!(iri_escape("café"), "café");
        assert_eq!(iri_escape("50%"), "50%25");
    }

    #[test]
    fn test_expand_template() {
        let t = table();
        let row = t.row(0).unwrap();
        assert_eq!(
            expand_template("http://ex.org/{id}/{city}", t.headers(), &row).as_deref(),
            Some("http://ex.org/1/New%20York")
        );
        assert_eq!(
            expand_template("http://ex.org/{missing}", t.headers(), &row),
            None
        );
    }

    #[test]
    fn test_expand_template_empty_cell() {
        let t = table();
        let row = t.row(1).unwrap();
        assert_eq!(expand_template("http://ex.org/{city}", t.headers(), &row), None);
    }

    #[test]
    fn test_object_reference_literal() {
        let t = table();
        let compiled = compile_object(&ObjectMap::reference("name"), t.headers(), "t.csv").unwrap();
        assert_eq!(
            compiled.materialize(&t.row(0).unwrap()),
            Some(Term::string("Alice"))
        );
    }

    #[test]
    fn test_object_typed_and_lang() {
        let t = table();
        let typed = compile_object(
            &ObjectMap::reference_typed("id", ldwizard_vocab::xsd::INTEGER),
            t.headers(),
            "t.csv",
        )
        .unwrap();
        assert_eq!(
            typed.materialize(&t.row(1).unwrap()),
            Some(Term::typed("2", Datatype::xsd_integer()))
        );

        let lang = compile_object(
            &ObjectMap::Reference {
                column: "name".into(),
                datatype: None,
                language: Some("en".into()),
                term_type: TermType::Literal,
            },
            t.headers(),
            "t.csv",
        )
        .unwrap();
        assert_eq!(
            lang.materialize(&t.row(0).unwrap()),
            Some(Term::lang_string("Alice", "en"))
        );
    }

    #[test]
    fn test_object_template_iri_escapes() {
        let t = table();
        let compiled = compile_object(
            &ObjectMap::template("http://ex.org/city/{city}"),
            t.headers(),
            "t.csv",
        )
        .unwrap();
        assert_eq!(
            compiled.materialize(&t.row(0).unwrap()),
            Some(Term::iri("http://ex.org/city/New%20York"))
        );
        assert_eq!(compiled.materialize(&t.row(1).unwrap()), None);
    }

    #[test]
    fn test_literal_template_not_escaped() {
        let t = table();
        let compiled = compile_object(
            &ObjectMap::Template {
                template: "{name} from {city}".into(),
                term_type: TermType::Literal,
                datatype: None,
                language: None,
            },
            t.headers(),
            "t.csv",
        )
        .unwrap();
        assert_eq!(
            compiled.materialize(&t.row(0).unwrap()),
            Some(Term::string("Alice from New York"))
        );
    }

    #[test]
    fn test_unknown_column() {
        let t = table();
        let err = compile_object(&ObjectMap::reference("age"), t.headers(), "t.csv").unwrap_err();
        assert!(matches!(
            err,
            RmlError::ColumnNotFound { ref column, ref source_name }
                if column == "age" && source_name == "t.csv"
        ));
    }

    #[test]
    fn test_subject_variants() {
        let t = table();
        let headers = t.headers();
        assert!(compile_subject(&SubjectMap::blank_node(), headers, "t.csv")
            .unwrap()
            .is_none());

        let constant = compile_subject(&SubjectMap::constant("http://ex.org/x"), headers, "t.csv")
            .unwrap()
            .unwrap();
        assert_eq!(
            constant.materialize(&t.row(0).unwrap()),
            Some(Term::iri("http://ex.org/x"))
        );

        let literal = SubjectMap {
            template: Some("{id}".into()),
            term_type: TermType::Literal,
            ..Default::default()
        };
        assert!(compile_subject(&literal, headers, "t.csv").is_err());
        assert!(matches!(
            compile_subject(&SubjectMap::default(), headers, "t.csv"),
            Err(RmlError::MissingProperty(_))
        ));
    }
}
