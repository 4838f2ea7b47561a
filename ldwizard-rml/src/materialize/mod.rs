//! Row materialization
//!
//! [`execute`] runs every TriplesMap of an [`RmlMapping`] over the table
//! bound to its logical source and returns the generated quads.
//!
//! All term maps are resolved against the table headers before the first
//! row is touched, so an unbound source or an unknown column fails the
//! whole call without partial output. Rows are then materialized in
//! parallel; the result keeps TriplesMap order, then row order.

mod term;

pub use term::{expand_template, iri_escape};

use std::collections::HashMap;

use ldwizard_graph_ir::{Quad, Term};
use ldwizard_tabular::{Row, RowTable};
use rayon::prelude::*;

use crate::error::{RmlError, RmlResult};
use crate::mapping::{RmlMapping, TriplesMap};
use crate::vocab::R2RML;
use term::{compile_object, compile_predicate, compile_subject, Compiled};

/// Tables bound to logical source names
#[derive(Debug, Default, Clone)]
pub struct InputSources<'a> {
    tables: HashMap<String, &'a RowTable>,
}

impl<'a> InputSources<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single table bound to `source`
    pub fn single(source: impl Into<String>, table: &'a RowTable) -> Self {
        let mut sources = Self::new();
        sources.bind(source, table);
        sources
    }

    /// Bind a table to a logical source name, replacing any previous binding
    pub fn bind(&mut self, source: impl Into<String>, table: &'a RowTable) -> &mut Self {
        self.tables.insert(source.into(), table);
        self
    }

    pub fn get(&self, source: &str) -> Option<&'a RowTable> {
        self.tables.get(source).copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// One TriplesMap resolved against its table
struct Plan<'a> {
    table: &'a RowTable,
    /// `None` mints one blank node per row
    subject: Option<Compiled>,
    classes: Vec<Term>,
    predicate_objects: Vec<(Compiled, Compiled)>,
    blank_prefix: String,
}

impl Plan<'_> {
    fn materialize_row(&self, row: Row<'_>) -> Vec<Quad> {
        let subject = match &self.subject {
            Some(compiled) => match compiled.materialize(&row) {
                Some(s) => s,
                None => return Vec::new(),
            },
            None => Term::blank(format!("{}row{}", self.blank_prefix, row.number())),
        };

        let rdf_type = Term::iri(R2RML::RDF_TYPE);
        let mut quads = Vec::with_capacity(self.classes.len() + self.predicate_objects.len());
        for class in &self.classes {
            quads.push(Quad::new(subject.clone(), rdf_type.clone(), class.clone()));
        }
        for (predicate, object) in &self.predicate_objects {
            let (Some(p), Some(o)) = (predicate.materialize(&row), object.materialize(&row)) else {
                continue;
            };
            quads.push(Quad::new(subject.clone(), p, o));
        }
        quads
    }
}

fn plan<'a>(
    tm: &TriplesMap,
    sources: &InputSources<'a>,
    blank_prefix: String,
) -> RmlResult<Plan<'a>> {
    let source = tm.source();
    let table = sources
        .get(source)
        .ok_or_else(|| RmlError::UnboundSource(source.to_string()))?;
    if !tm.logical_source.is_csv() {
        return Err(RmlError::Unsupported(format!(
            "reference formulation {} for source '{source}'",
            tm.logical_source
                .reference_formulation
                .as_deref()
                .unwrap_or_default()
        )));
    }

    let headers = table.headers();
    let subject = compile_subject(&tm.subject_map, headers, source)?;
    let classes = tm.subject_map.classes.iter().map(Term::iri).collect();
    let predicate_objects = tm
        .predicate_object_maps
        .iter()
        .map(|pom| {
            Ok((
                compile_predicate(&pom.predicate_map, headers, source)?,
                compile_object(&pom.object_map, headers, source)?,
            ))
        })
        .collect::<RmlResult<Vec<_>>>()?;

    Ok(Plan {
        table,
        subject,
        classes,
        predicate_objects,
        blank_prefix,
    })
}

/// Execute `mapping` over the bound tables
///
/// Fails with [`RmlError::UnboundSource`] when a TriplesMap's source has no
/// table, and with [`RmlError::ColumnNotFound`] when a term map references
/// a column missing from the header. Both are checked before any row is
/// processed. Rows whose subject cannot be built (an empty key cell) produce
/// no quads.
pub fn execute(mapping: &RmlMapping, sources: &InputSources<'_>) -> RmlResult<Vec<Quad>> {
    let several = mapping.len() > 1;
    let plans = mapping
        .iter()
        .enumerate()
        .map(|(k, tm)| {
            let prefix = if several { format!("m{k}_") } else { String::new() };
            plan(tm, sources, prefix)
        })
        .collect::<RmlResult<Vec<_>>>()?;

    let mut quads = Vec::new();
    for (tm, plan) in mapping.iter().zip(&plans) {
        let rows: Vec<Row<'_>> = plan.table.rows().collect();
        let per_row: Vec<Vec<Quad>> = rows
            .into_par_iter()
            .map(|row| plan.materialize_row(row))
            .collect();

        let before = quads.len();
        quads.extend(per_row.into_iter().flatten());
        tracing::debug!(
            triples_map = %tm.iri,
            rows = plan.table.num_rows(),
            quads = quads.len() - before,
            "materialized triples map"
        );
    }

    Ok(quads)
}
