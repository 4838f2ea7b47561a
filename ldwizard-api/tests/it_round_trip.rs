//! Integration tests for the forward and reverse paths.
//!
//! Generation → extraction must reproduce the mapped parts of a
//! configuration, and a generated mapping must transform CSV input into the
//! expected Turtle.

use std::fs;

use ldwizard_api::{
    apply_transformation, execute_rml, extract_config, generate_rml, load_mapping, read_csv,
    transform_table, ColumnConfig, ColumnRefinement, CsvProps, ExtractMode, ExtractWarning,
    MappingFormat, TransformationConfig, TransformationKind, TransformationSource,
};
use ldwizard_graph_ir::Term;

const PEOPLE_CSV: &str = "\
id;name;city;notes
1;Alice;New York;likes tea
2;Bob;Paris;likes coffee
";

fn people_config() -> TransformationConfig {
    TransformationConfig {
        base_iri: "http://ex.org/person/".into(),
        key: Some(0),
        resource_class: Some("https://schema.org/Person".into()),
        column_configuration: vec![
            ColumnConfig::new("id"),
            ColumnConfig::new("name").with_property("https://schema.org/name"),
            ColumnConfig::new("city")
                .with_property("http://ex.org/livesIn")
                .with_refinement(ColumnRefinement::to_iri("http://ex.org/city/")),
            ColumnConfig::new("notes"),
        ],
        csv_props: CsvProps::with_delimiter(';'),
        source_file_name: "people.csv".into(),
    }
}

/// Fresh configuration as built right after reading the CSV headers
fn blank_config() -> TransformationConfig {
    TransformationConfig::from_headers(&["id", "name", "city", "notes"], "people.csv")
}

#[test]
fn generate_then_extract_round_trip() {
    let original = people_config();
    let rml = generate_rml(&original).expect("generate");

    let extraction = extract_config(
        &rml,
        MappingFormat::Turtle,
        &blank_config(),
        ExtractMode::Strict,
    )
    .expect("extract");
    assert!(extraction.warnings.is_empty());

    let config = extraction.config;
    assert_eq!(config.base_iri, original.base_iri);
    assert_eq!(config.key, original.key);
    assert_eq!(config.resource_class, original.resource_class);
    for (got, want) in config
        .column_configuration
        .iter()
        .zip(&original.column_configuration)
    {
        assert_eq!(got.column_name, want.column_name);
        assert_eq!(got.property_iri, want.property_iri);
        assert_eq!(got.column_refinement, want.column_refinement);
    }
}

#[test]
fn round_trip_through_mapping_file() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("mapping.ttl");
    fs::write(&path, generate_rml(&people_config()).expect("generate")).expect("write mapping");

    let text = fs::read_to_string(&path).expect("read mapping");
    let extraction = extract_config(
        &text,
        MappingFormat::from_path(&path),
        &blank_config(),
        ExtractMode::BestEffort,
    )
    .expect("extract");
    assert_eq!(extraction.config.key, Some(0));
    assert!(extraction
        .prefixes
        .iter()
        .any(|(p, ns)| p == "rr" && ns == "http://www.w3.org/ns/r2rml#"));
}

#[test]
fn keyless_config_round_trips_without_key() {
    let mut original = people_config();
    original.key = None;
    let rml = generate_rml(&original).expect("generate");

    let extraction = extract_config(
        &rml,
        MappingFormat::Turtle,
        &blank_config(),
        ExtractMode::BestEffort,
    )
    .expect("extract");
    assert_eq!(extraction.config.key, None);
    assert_eq!(
        extraction.config.column_configuration[1].property_iri.as_deref(),
        Some("https://schema.org/name")
    );
}

#[test]
fn csv_to_turtle() {
    let (table, props) = read_csv(PEOPLE_CSV, &CsvProps::default()).expect("read csv");
    assert_eq!(props.delimiter, Some(';'));

    let ttl = apply_transformation(
        TransformationKind::Rml,
        TransformationSource::Matrix(table.into_matrix()),
        &people_config(),
    )
    .expect("transform");

    assert!(ttl.starts_with("@prefix : <http://ex.org/person/> ."));
    assert!(ttl.contains(":1 a schema:Person ;"), "{ttl}");
    assert!(ttl.contains("schema:name \"Alice\""));
    assert!(ttl.contains("<http://ex.org/livesIn> <http://ex.org/city/New%20York>"));
    assert!(!ttl.contains("likes tea"));

    // Subjects follow row order
    let alice = ttl.find(":1 a").expect("alice");
    let bob = ttl.find(":2 a").expect("bob");
    assert!(alice < bob);
}

#[test]
fn blank_node_subjects_without_key() {
    let (table, _) = read_csv(PEOPLE_CSV, &CsvProps::default()).expect("read csv");
    let mut config = people_config();
    config.key = None;

    let quads = transform_table(&config, &table).expect("transform");
    assert_eq!(quads[0].s, Term::blank("row1"));
    assert_eq!(quads.last().map(|q| &q.s), Some(&Term::blank("row2")));
}

#[test]
fn trailing_empty_cell_is_rejected() {
    let matrix = vec![
        vec!["id".to_string(), "name".to_string()],
        vec!["1".to_string(), String::new()],
    ];
    let mut config = people_config();
    config.column_configuration.truncate(2);

    let err = apply_transformation(
        TransformationKind::Rml,
        TransformationSource::Matrix(matrix),
        &config,
    )
    .unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn multiple_triples_maps_use_first() {
    let doc = r#"
@prefix rr: <http://www.w3.org/ns/r2rml#> .
@prefix rml: <http://semweb.mmlab.be/ns/rml#> .

<http://ex.org/mapping#First> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://first.org/{id}" ] ;
    rr:predicateObjectMap [
        rr:predicate <http://ex.org/name> ;
        rr:objectMap [ rml:reference "name" ]
    ] .

<http://ex.org/mapping#Second> a rr:TriplesMap ;
    rr:subjectMap [ rr:template "http://second.org/{name}" ] .
"#;
    let extraction = extract_config(
        doc,
        MappingFormat::Turtle,
        &blank_config(),
        ExtractMode::BestEffort,
    )
    .expect("extract");

    assert_eq!(
        extraction.warnings,
        vec![ExtractWarning::MultipleTriplesMapFound { count: 2 }]
    );
    assert_eq!(extraction.config.base_iri, "http://first.org/");
    assert_eq!(extraction.config.key, Some(0));
    assert_eq!(
        extraction.config.column_configuration[1].property_iri.as_deref(),
        Some("http://ex.org/name")
    );
}

#[test]
fn trailing_blank_header_column_is_ignored() {
    let (table, _) = read_csv("id,name,\n1,Alice\n", &CsvProps::default()).expect("read csv");
    let mut config = TransformationConfig::from_headers(table.headers(), "people.csv");
    assert_eq!(config.column_configuration.len(), 2);
    config.base_iri = "http://ex.org/".into();
    config.key = Some(0);
    config.column_configuration[1].property_iri = Some("http://ex.org/name".into());

    let ttl = apply_transformation(
        TransformationKind::Rml,
        TransformationSource::Matrix(table.into_matrix()),
        &config,
    )
    .expect("transform");
    assert!(ttl.contains(":1 :name \"Alice\" ."), "{ttl}");
}

#[test]
fn mapping_document_runs_as_written() {
    let (table, _) = read_csv(PEOPLE_CSV, &CsvProps::default()).expect("read csv");
    let rml = generate_rml(&people_config()).expect("generate");

    let mapping = load_mapping(&rml, MappingFormat::Turtle).expect("load");
    let from_document = execute_rml(&mapping, &table).expect("execute");
    let from_config = transform_table(&people_config(), &table).expect("transform");
    assert_eq!(from_document, from_config);
}
