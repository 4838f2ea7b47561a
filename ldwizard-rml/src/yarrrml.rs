//! YARRRML to RML conversion
//!
//! YARRRML is a YAML syntax for RML. This module reads the subset that maps
//! onto [`RmlMapping`]: prefixes, sources, one subject per mapping and
//! predicate-object pairs with constant, reference or template objects.
//!
//! ```yaml
//! prefixes:
//!   ex: http://example.org/
//! mappings:
//!   person:
//!     sources:
//!       - [people.csv~csv]
//!     s: ex:$(id)
//!     po:
//!       - [a, ex:Person]
//!       - [ex:name, $(name)]
//!       - [ex:age, $(age), xsd:integer]
//!       - [ex:city, ex:city/$(city)~iri]
//! ```
//!
//! `$(column)` placeholders become `{column}`; a value that is exactly one
//! placeholder becomes an `rml:reference`. Prefixed names are expanded with
//! the declared prefixes plus the well-known ones.

use ldwizard_graph_ir::Graph;
use ldwizard_vocab::namespaces;
use serde_yaml::{Mapping, Value};

use crate::error::{RmlError, RmlResult};
use crate::mapping::{
    ConstantValue, LogicalSource, ObjectMap, PredicateMap, PredicateObjectMap, RmlMapping,
    SubjectMap, TermType, TriplesMap,
};
use crate::vocab::{QL, R2RML};

/// Base for generated TriplesMap IRIs
pub const MAPPING_BASE: &str = "http://mapping.example.com/";

/// Convert a YARRRML document into the RML graph shape
pub fn to_graph(content: &str) -> RmlResult<Graph> {
    Ok(to_mapping(content)?.to_graph())
}

/// Convert a YARRRML document into an [`RmlMapping`]
pub fn to_mapping(content: &str) -> RmlResult<RmlMapping> {
    let doc: Value =
        serde_yaml::from_str(content).map_err(|e| RmlError::Yarrrml(e.to_string()))?;
    let root = doc
        .as_mapping()
        .ok_or_else(|| RmlError::Yarrrml("document root must be a mapping".to_string()))?;

    let declared = read_prefixes(root)?;
    let ctx = Context {
        declared: &declared,
        sources: get(root, &["sources"]).and_then(Value::as_mapping),
    };

    let mappings = get(root, &["mappings", "mapping", "m"])
        .and_then(Value::as_mapping)
        .ok_or_else(|| RmlError::Yarrrml("no mappings found".to_string()))?;

    let mut triples_maps = Vec::with_capacity(mappings.len());
    for (name, def) in mappings {
        let name = scalar(name)
            .ok_or_else(|| RmlError::Yarrrml("mapping names must be strings".to_string()))?;
        let def = def
            .as_mapping()
            .ok_or_else(|| RmlError::Yarrrml(format!("mapping '{name}' must be a mapping")))?;
        triples_maps.push(ctx.triples_map(&name, def)?);
    }

    tracing::debug!(
        mappings = triples_maps.len(),
        prefixes = declared.len(),
        "converted yarrrml document"
    );

    Ok(RmlMapping {
        triples_maps,
        prefixes: declared,
    })
}

struct Context<'a> {
    /// Prefixes declared in the document, in document order
    declared: &'a [(String, String)],
    /// Top-level named sources
    sources: Option<&'a Mapping>,
}

impl Context<'_> {
    fn triples_map(&self, name: &str, def: &Mapping) -> RmlResult<TriplesMap> {
        if get(def, &["graphs", "graph", "g"]).is_some() {
            return Err(RmlError::Unsupported("named graph maps".to_string()));
        }

        let source = get(def, &["sources", "source"])
            .ok_or_else(|| RmlError::Yarrrml(format!("mapping '{name}' has no sources")))?;
        let logical_source = self.logical_source(source)?;

        let subject_map = match get(def, &["subjects", "subject", "s"]) {
            None | Some(Value::Null) => SubjectMap::blank_node(),
            Some(Value::Sequence(items)) => match items.first() {
                Some(first) => self.subject_map(first)?,
                None => SubjectMap::blank_node(),
            },
            Some(v) => self.subject_map(v)?,
        };

        let mut tm = TriplesMap::new(
            format!("{MAPPING_BASE}map_{name}_000"),
            logical_source,
            subject_map,
        );

        if let Some(po) = get(def, &["predicateobjects", "po"]) {
            let items = po.as_sequence().ok_or_else(|| {
                RmlError::Yarrrml(format!("po of mapping '{name}' must be a list"))
            })?;
            for item in items {
                tm.predicate_object_maps.extend(self.predicate_objects(item)?);
            }
        }

        Ok(tm)
    }

    fn logical_source(&self, value: &Value) -> RmlResult<LogicalSource> {
        match value {
            Value::String(s) => match self.sources.and_then(|m| get(m, &[s.as_str()])) {
                Some(named) => self.logical_source(named),
                None => Ok(source_from_access(s)),
            },
            // Either a list of sources or a single [access, iterator] pair
            Value::Sequence(items) => match items.first() {
                Some(Value::String(first)) if items.len() <= 2 && first.contains('~') => {
                    Ok(source_from_access(first))
                }
                Some(first) => self.logical_source(first),
                None => Err(RmlError::Yarrrml("empty source list".to_string())),
            },
            Value::Mapping(m) => {
                let access = get(m, &["access"])
                    .and_then(scalar)
                    .ok_or_else(|| RmlError::Yarrrml("source without access".to_string()))?;
                let formulation = get(m, &["referenceFormulation"]).and_then(scalar);
                Ok(LogicalSource {
                    source: access,
                    reference_formulation: Some(reference_formulation(
                        formulation.as_deref().unwrap_or("csv"),
                    )),
                })
            }
            _ => Err(RmlError::Yarrrml("unrecognised source".to_string())),
        }
    }

    fn subject_map(&self, value: &Value) -> RmlResult<SubjectMap> {
        let raw = scalar(value)
            .ok_or_else(|| RmlError::Yarrrml("subject must be a string".to_string()))?;
        let (text, _) = split_suffix(&raw);
        let expanded = self.expand(text);
        Ok(match classify(&expanded) {
            Classified::Reference(col) => SubjectMap {
                reference: Some(col),
                ..Default::default()
            },
            Classified::Template(t) => SubjectMap::template(t),
            Classified::Constant(c) => SubjectMap::constant(c),
        })
    }

    fn predicate_objects(&self, item: &Value) -> RmlResult<Vec<PredicateObjectMap>> {
        let (predicates, objects, extra): (Vec<String>, Vec<&Value>, Option<String>) = match item
        {
            Value::Sequence(parts) => {
                let p = parts
                    .first()
                    .ok_or_else(|| RmlError::Yarrrml("empty po entry".to_string()))?;
                let o = parts
                    .get(1)
                    .ok_or_else(|| RmlError::Yarrrml("po entry without object".to_string()))?;
                (
                    strings(p)?,
                    values(o),
                    parts.get(2).and_then(scalar),
                )
            }
            Value::Mapping(m) => {
                let p = get(m, &["predicates", "predicate", "p"]).ok_or_else(|| {
                    RmlError::Yarrrml("po entry without predicate".to_string())
                })?;
                let o = get(m, &["objects", "object", "o"])
                    .ok_or_else(|| RmlError::Yarrrml("po entry without object".to_string()))?;
                (strings(p)?, values(o), None)
            }
            _ => return Err(RmlError::Yarrrml("unrecognised po entry".to_string())),
        };

        let mut out = Vec::new();
        for predicate in &predicates {
            let is_type = predicate == "a";
            let predicate_iri = if is_type {
                R2RML::RDF_TYPE.to_string()
            } else {
                self.expand(predicate)
            };
            for object in &objects {
                let object_map = self.object_map(object, extra.as_deref(), is_type)?;
                out.push(PredicateObjectMap::new(
                    PredicateMap::constant(predicate_iri.clone()),
                    object_map,
                ));
            }
        }
        Ok(out)
    }

    fn object_map(&self, value: &Value, extra: Option<&str>, is_type: bool) -> RmlResult<ObjectMap> {
        // Long form: { value, datatype | type, language }
        if let Value::Mapping(m) = value {
            if get(m, &["mapping"]).is_some() {
                return Err(RmlError::Unsupported("joins between mappings".to_string()));
            }
            let raw = get(m, &["value"])
                .and_then(scalar)
                .ok_or_else(|| RmlError::Yarrrml("object without value".to_string()))?;
            let kind = get(m, &["type"]).and_then(scalar);
            let datatype = get(m, &["datatype"]).and_then(scalar);
            let language = get(m, &["language"]).and_then(scalar);
            let force_iri = kind.as_deref() == Some("iri");
            return Ok(self.build_object(
                &raw,
                force_iri || is_type,
                datatype.as_deref(),
                language.as_deref(),
            ));
        }

        let raw = scalar(value)
            .ok_or_else(|| RmlError::Yarrrml("object must be a string".to_string()))?;
        let (text, suffix) = split_suffix(&raw);
        let (datatype, language) = match extra.map(split_suffix) {
            Some((lang, Some("lang"))) => (None, Some(lang)),
            Some((dt, _)) => (Some(dt), None),
            None => (None, None),
        };

        Ok(self.build_object(text, suffix == Some("iri") || is_type, datatype, language))
    }

    fn build_object(
        &self,
        text: &str,
        as_iri: bool,
        datatype: Option<&str>,
        language: Option<&str>,
    ) -> ObjectMap {
        let datatype = datatype.map(|dt| self.expand(dt));
        let language = language.map(str::to_string);
        let term_type = if as_iri {
            TermType::Iri
        } else {
            TermType::Literal
        };

        let value = if as_iri {
            self.expand(text)
        } else {
            text.to_string()
        };
        match classify(&value) {
            Classified::Reference(column) => ObjectMap::Reference {
                column,
                datatype,
                language,
                term_type,
            },
            Classified::Template(template) => ObjectMap::Template {
                template,
                term_type,
                datatype,
                language,
            },
            Classified::Constant(c) if as_iri => ObjectMap::Constant {
                value: ConstantValue::Iri(c),
            },
            Classified::Constant(c) => ObjectMap::Constant {
                value: ConstantValue::Literal {
                    value: c,
                    datatype,
                    language,
                },
            },
        }
    }

    /// Expand `prefix:local` against declared, then well-known prefixes
    fn expand(&self, text: &str) -> String {
        let Some((prefix, local)) = text.split_once(':') else {
            return text.to_string();
        };
        if local.starts_with("//") {
            return text.to_string();
        }
        let declared = self
            .declared
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, ns)| ns.as_str());
        let known = || {
            namespaces::WELL_KNOWN
                .iter()
                .find(|(p, _)| *p == prefix)
                .map(|(_, ns)| *ns)
        };
        match declared.or_else(known) {
            Some(ns) => format!("{ns}{local}"),
            None => text.to_string(),
        }
    }
}

enum Classified {
    Reference(String),
    Template(String),
    Constant(String),
}

/// Classify a value by its `$(...)` placeholders and convert them to `{...}`
fn classify(text: &str) -> Classified {
    if let Some(inner) = text.strip_prefix("$(").and_then(|t| t.strip_suffix(')')) {
        if !inner.contains("$(") && !inner.contains(')') {
            return Classified::Reference(inner.to_string());
        }
    }
    if !text.contains("$(") {
        return Classified::Constant(text.to_string());
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("$(") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find(')') {
            Some(end) => {
                out.push('{');
                out.push_str(&after[..end]);
                out.push('}');
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Classified::Template(out)
}

/// Split a trailing `~suffix` (`~iri`, `~lang`, `~csv`, ...)
fn split_suffix(text: &str) -> (&str, Option<&str>) {
    match text.rsplit_once('~') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphabetic()) => {
            (head, Some(tail))
        }
        _ => (text, None),
    }
}

fn source_from_access(access: &str) -> LogicalSource {
    let (file, formulation) = split_suffix(access);
    LogicalSource {
        source: file.to_string(),
        reference_formulation: Some(reference_formulation(formulation.unwrap_or("csv"))),
    }
}

fn reference_formulation(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "csv" => QL::CSV.to_string(),
        "json" | "jsonpath" => QL::JSON_PATH.to_string(),
        "xml" | "xpath" => QL::XPATH.to_string(),
        other => format!("{}{other}", QL::NS),
    }
}

fn read_prefixes(root: &Mapping) -> RmlResult<Vec<(String, String)>> {
    let Some(value) = get(root, &["prefixes"]) else {
        return Ok(Vec::new());
    };
    let map = value
        .as_mapping()
        .ok_or_else(|| RmlError::Yarrrml("prefixes must be a mapping".to_string()))?;
    map.iter()
        .map(|(k, v)| match (scalar(k), scalar(v)) {
            (Some(prefix), Some(ns)) => Ok((prefix, ns)),
            _ => Err(RmlError::Yarrrml("prefix entries must be strings".to_string())),
        })
        .collect()
}

/// First present key among `keys`
fn get<'v>(map: &'v Mapping, keys: &[&str]) -> Option<&'v Value> {
    keys.iter().find_map(|k| map.get(*k))
}

/// Scalar value as text
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One string or a list of strings
fn strings(value: &Value) -> RmlResult<Vec<String>> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(|v| {
                scalar(v).ok_or_else(|| RmlError::Yarrrml("expected a string".to_string()))
            })
            .collect(),
        v => scalar(v)
            .map(|s| vec![s])
            .ok_or_else(|| RmlError::Yarrrml("expected a string".to_string())),
    }
}

/// One value or each element of a list
fn values(value: &Value) -> Vec<&Value> {
    match value {
        Value::Sequence(items) => items.iter().collect(),
        v => vec![v],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = r#"
prefixes:
  ex: http://example.org/
  schema: http://schema.org/
mappings:
  person:
    sources:
      - [people.csv~csv]
    s: ex:person/$(id)
    po:
      - [a, schema:Person]
      - [schema:name, $(name)]
      - [ex:age, $(age), xsd:integer]
      - [ex:label, $(label), en~lang]
      - [ex:city, ex:city/$(city)~iri]
      - p: ex:note
        o: fixed text
"#;

    #[test]
    fn test_people_mapping() {
        let mapping = to_mapping(PEOPLE).unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(
            mapping.prefixes,
            vec![
                ("ex".to_string(), "http://example.org/".to_string()),
                ("schema".to_string(), "http://schema.org/".to_string()),
            ]
        );

        let tm = &mapping.triples_maps[0];
        assert_eq!(tm.iri, "http://mapping.example.com/map_person_000");
        assert_eq!(tm.source(), "people.csv");
        assert!(tm.logical_source.is_csv());
        assert_eq!(
            tm.subject_map.template.as_deref(),
            Some("http://example.org/person/{id}")
        );

        let poms = &tm.predicate_object_maps;
        assert_eq!(poms.len(), 6);
        assert_eq!(poms[0].predicate_map.as_constant(), Some(R2RML::RDF_TYPE));
        assert_eq!(
            poms[0].object_map,
            ObjectMap::constant_iri("http://schema.org/Person")
        );
        assert_eq!(poms[1].object_map, ObjectMap::reference("name"));
        assert_eq!(
            poms[2].object_map,
            ObjectMap::reference_typed("age", "http://www.w3.org/2001/XMLSchema#integer")
        );
        assert_eq!(
            poms[3].object_map,
            ObjectMap::Reference {
                column: "label".into(),
                datatype: None,
                language: Some("en".into()),
                term_type: TermType::Literal,
            }
        );
        assert_eq!(
            poms[4].object_map,
            ObjectMap::template("http://example.org/city/{city}")
        );
        assert_eq!(poms[5].object_map, ObjectMap::constant_literal("fixed text"));
    }

    #[test]
    fn test_named_sources_and_missing_subject() {
        let doc = r#"
sources:
  people-source: [data/people.csv~csv]
mappings:
  p:
    sources: people-source
    po:
      - [http://example.org/name, $(name)]
"#;
        let mapping = to_mapping(doc).unwrap();
        let tm = &mapping.triples_maps[0];
        assert_eq!(tm.source(), "data/people.csv");
        assert!(tm.subject_map.term_type.is_blank_node());
        assert_eq!(
            tm.predicate_object_maps[0].predicate_map.as_constant(),
            Some("http://example.org/name")
        );
    }

    #[test]
    fn test_access_form_and_lists() {
        let doc = r#"
prefixes:
  ex: http://example.org/
mappings:
  p:
    sources:
      - access: people.csv
        referenceFormulation: csv
    s: $(iri)
    po:
      - [[ex:a, ex:b], $(x)]
"#;
        let mapping = to_mapping(doc).unwrap();
        let tm = &mapping.triples_maps[0];
        assert_eq!(tm.source(), "people.csv");
        assert_eq!(tm.subject_map.reference.as_deref(), Some("iri"));
        assert_eq!(tm.predicate_object_maps.len(), 2);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(to_mapping("- just\n- a list\n"), Err(RmlError::Yarrrml(_))));
        assert!(matches!(to_mapping("prefixes: {}\n"), Err(RmlError::Yarrrml(_))));
        assert!(matches!(
            to_mapping("mappings:\n  p:\n    s: x\n"),
            Err(RmlError::Yarrrml(_))
        ));
        assert!(matches!(to_mapping("a: [unclosed"), Err(RmlError::Yarrrml(_))));
    }

    #[test]
    fn test_classify() {
        assert!(matches!(classify("$(id)"), Classified::Reference(c) if c == "id"));
        assert!(
            matches!(classify("http://ex.org/$(a)-$(b)"), Classified::Template(t) if t == "http://ex.org/{a}-{b}")
        );
        assert!(matches!(classify("plain"), Classified::Constant(c) if c == "plain"));
    }

    #[test]
    fn test_split_suffix() {
        assert_eq!(split_suffix("ex:$(x)~iri"), ("ex:$(x)", Some("iri")));
        assert_eq!(split_suffix("file.csv~csv"), ("file.csv", Some("csv")));
        assert_eq!(split_suffix("no suffix"), ("no suffix", None));
        assert_eq!(split_suffix("http://ex.org/~user/x"), ("http://ex.org/~user/x", None));
    }
}
