//! Transformation configuration
//!
//! [`TransformationConfig`] is the value both directions work on: the
//! generator turns it into a mapping, the extractor rebuilds it from one.
//! It serializes to JSON with camelCase field names:
//!
//! ```json
//! {
//!   "baseIri": "http://ex.org/",
//!   "key": 0,
//!   "resourceClass": "https://schema.org/Person",
//!   "columnConfiguration": [
//!     { "columnName": "id" },
//!     { "columnName": "name", "propertyIri": "https://schema.org/name" },
//!     {
//!       "columnName": "city",
//!       "propertyIri": "http://ex.org/city",
//!       "columnRefinement": {
//!         "type": "to-iri", "label": "to-iri",
//!         "data": { "iriPrefix": "http://ex.org/city/" }
//!       }
//!     }
//!   ],
//!   "csvProps": { "delimiter": "," },
//!   "sourceFileName": "people.csv"
//! }
//! ```

use std::collections::HashSet;

use ldwizard_tabular::CsvProps;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, Result};

/// Base IRI used when nothing else is configured
pub const DEFAULT_BASE_IRI: &str = "https://w3id.org/my-ldwizard/";

/// Logical source name used when the input has no file name
pub const DEFAULT_SOURCE_FILE_NAME: &str = "input.csv";

/// Tag of the IRI-prefix refinement
pub const TO_IRI: &str = "to-iri";

/// How one CSV column maps into RDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    pub column_name: String,
    /// Predicate the column maps to; unmapped columns are not projected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_iri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_refinement: Option<ColumnRefinement>,
}

impl ColumnConfig {
    /// An unmapped column
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            property_iri: None,
            column_refinement: None,
        }
    }

    /// Map the column to a predicate
    pub fn with_property(mut self, property_iri: impl Into<String>) -> Self {
        self.property_iri = Some(property_iri.into());
        self
    }

    pub fn with_refinement(mut self, refinement: ColumnRefinement) -> Self {
        self.column_refinement = Some(refinement);
        self
    }

    /// IRI prefix when the column carries a `to-iri` refinement
    pub fn iri_prefix(&self) -> Option<&str> {
        match &self.column_refinement {
            Some(ColumnRefinement::ToIri { iri_prefix }) => Some(iri_prefix),
            _ => None,
        }
    }
}

/// Value transform applied to a column
///
/// Only `to-iri` is understood. Any other refinement object is kept as-is
/// so it survives a load/save cycle, and is treated as "no transform".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ColumnRefinement {
    /// Build an IRI as `iri_prefix + cell value`
    ToIri { iri_prefix: String },
    Unsupported(Value),
}

impl ColumnRefinement {
    pub fn to_iri(iri_prefix: impl Into<String>) -> Self {
        ColumnRefinement::ToIri {
            iri_prefix: iri_prefix.into(),
        }
    }

    /// The refinement's `type` tag
    pub fn kind(&self) -> Option<&str> {
        match self {
            ColumnRefinement::ToIri { .. } => Some(TO_IRI),
            ColumnRefinement::Unsupported(v) => v.get("type").and_then(Value::as_str),
        }
    }
}

impl From<Value> for ColumnRefinement {
    fn from(value: Value) -> Self {
        if value.get("type").and_then(Value::as_str) == Some(TO_IRI) {
            // Accept both the nested `data.iriPrefix` and a flat `iriPrefix`
            let prefix = value
                .pointer("/data/iriPrefix")
                .or_else(|| value.get("iriPrefix"))
                .and_then(Value::as_str);
            if let Some(prefix) = prefix {
                return ColumnRefinement::to_iri(prefix);
            }
        }
        ColumnRefinement::Unsupported(value)
    }
}

impl From<ColumnRefinement> for Value {
    fn from(refinement: ColumnRefinement) -> Self {
        match refinement {
            ColumnRefinement::ToIri { iri_prefix } => json!({
                "type": TO_IRI,
                "label": TO_IRI,
                "data": { "iriPrefix": iri_prefix },
            }),
            ColumnRefinement::Unsupported(value) => value,
        }
    }
}

/// Complete description of one CSV to RDF transformation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationConfig {
    pub base_iri: String,
    /// Index into `column_configuration` of the column that identifies a row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<usize>,
    /// Class every generated subject is an instance of
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_class: Option<String>,
    #[serde(default)]
    pub column_configuration: Vec<ColumnConfig>,
    #[serde(default)]
    pub csv_props: CsvProps,
    #[serde(default = "default_source_file_name")]
    pub source_file_name: String,
}

fn default_source_file_name() -> String {
    DEFAULT_SOURCE_FILE_NAME.to_string()
}

impl Default for TransformationConfig {
    fn default() -> Self {
        Self {
            base_iri: DEFAULT_BASE_IRI.to_string(),
            key: None,
            resource_class: None,
            column_configuration: Vec::new(),
            csv_props: CsvProps::default(),
            source_file_name: default_source_file_name(),
        }
    }
}

impl TransformationConfig {
    /// One unmapped column per non-blank header, no key
    pub fn from_headers<S: AsRef<str>>(headers: &[S], source_file_name: impl Into<String>) -> Self {
        Self {
            column_configuration: headers
                .iter()
                .map(|h| h.as_ref())
                .filter(|h: &&str| !h.trim().is_empty())
                .map(ColumnConfig::new)
                .collect(),
            source_file_name: source_file_name.into(),
            ..Default::default()
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Index of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_configuration
            .iter()
            .position(|c| c.column_name == name)
    }

    /// Index of the column called `name` when exactly one column has that name
    ///
    /// Returns the number of matches otherwise.
    pub fn unique_column_index(&self, name: &str) -> std::result::Result<usize, usize> {
        let mut matches = self
            .column_configuration
            .iter()
            .enumerate()
            .filter(|(_, c)| c.column_name == name)
            .map(|(i, _)| i);
        match (matches.next(), matches.next()) {
            (Some(index), None) => Ok(index),
            (None, _) => Err(0),
            (Some(_), Some(_)) => Err(2 + matches.count()),
        }
    }

    /// The key column, if `key` is set and in range
    pub fn key_column(&self) -> Option<&ColumnConfig> {
        self.key.and_then(|k| self.column_configuration.get(k))
    }

    /// Check the configuration invariants
    ///
    /// `key` must index an existing column, column names must be unique and
    /// non-empty, and `source_file_name` must be set.
    pub fn validate(&self) -> Result<()> {
        if let Some(key) = self.key {
            if key >= self.column_configuration.len() {
                return Err(ApiError::invalid_config(format!(
                    "key {key} is out of range for {} columns",
                    self.column_configuration.len()
                )));
            }
        }

        let mut seen = HashSet::with_capacity(self.column_configuration.len());
        for column in &self.column_configuration {
            if column.column_name.is_empty() {
                return Err(ApiError::invalid_config("column names must not be empty"));
            }
            if !seen.insert(column.column_name.as_str()) {
                return Err(ApiError::invalid_config(format!(
                    "duplicate column name '{}'",
                    column.column_name
                )));
            }
            if column.property_iri.as_deref() == Some("") {
                return Err(ApiError::invalid_config(format!(
                    "empty property IRI for column '{}'",
                    column.column_name
                )));
            }
        }

        if self.source_file_name.is_empty() {
            return Err(ApiError::invalid_config("source file name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let config = TransformationConfig {
            base_iri: "http://ex.org/".into(),
            key: Some(0),
            resource_class: Some("https://schema.org/Person".into()),
            column_configuration: vec![
                ColumnConfig::new("id"),
                ColumnConfig::new("city")
                    .with_property("http://ex.org/city")
                    .with_refinement(ColumnRefinement::to_iri("http://ex.org/city/")),
            ],
            csv_props: CsvProps::with_delimiter(';'),
            source_file_name: "people.csv".into(),
        };

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["baseIri"], "http://ex.org/");
        assert_eq!(value["key"], 0);
        assert_eq!(value["csvProps"]["delimiter"], ";");
        assert_eq!(value["columnConfiguration"][0], json!({ "columnName": "id" }));
        assert_eq!(
            value["columnConfiguration"][1]["columnRefinement"]["data"]["iriPrefix"],
            "http://ex.org/city/"
        );

        let back: TransformationConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_refinement_forms() {
        let flat: ColumnRefinement =
            serde_json::from_value(json!({ "type": "to-iri", "iriPrefix": "http://p/" })).unwrap();
        assert_eq!(flat, ColumnRefinement::to_iri("http://p/"));

        let other = json!({ "type": "to-uppercase", "data": { "x": 1 } });
        let parsed: ColumnRefinement = serde_json::from_value(other.clone()).unwrap();
        assert_eq!(parsed.kind(), Some("to-uppercase"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), other);

        // to-iri without a prefix cannot be applied
        let broken: ColumnRefinement = serde_json::from_value(json!({ "type": "to-iri" })).unwrap();
        assert!(matches!(broken, ColumnRefinement::Unsupported(_)));
    }

    #[test]
    fn test_minimal_json_defaults() {
        let config = TransformationConfig::from_json(r#"{ "baseIri": "http://ex.org/" }"#).unwrap();
        assert_eq!(config.source_file_name, DEFAULT_SOURCE_FILE_NAME);
        assert!(config.column_configuration.is_empty());
        assert_eq!(config.key, None);
    }

    #[test]
    fn test_from_headers() {
        let config = TransformationConfig::from_headers(&["id", "name"], "p.csv");
        assert_eq!(config.base_iri, DEFAULT_BASE_IRI);
        assert_eq!(config.column_index("name"), Some(1));
        assert!(config.key_column().is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_from_headers_skips_blank_headers() {
        let config = TransformationConfig::from_headers(&["id", "name", ""], "p.csv");
        assert_eq!(config.column_configuration.len(), 2);
        config.validate().unwrap();
    }

    #[test]
    fn test_unique_column_index() {
        let mut config = TransformationConfig::from_headers(&["id", "name"], "p.csv");
        assert_eq!(config.unique_column_index("name"), Ok(1));
        assert_eq!(config.unique_column_index("age"), Err(0));

        config.column_configuration.push(ColumnConfig::new("name"));
        assert_eq!(config.unique_column_index("name"), Err(2));
    }

    #[test]
    fn test_validate() {
        let mut config = TransformationConfig::from_headers(&["id", "name"], "p.csv");
        config.key = Some(2);
        assert!(matches!(config.validate(), Err(ApiError::InvalidConfig(_))));

        config.key = Some(1);
        config.validate().unwrap();
        assert_eq!(config.key_column().unwrap().column_name, "name");

        config.column_configuration.push(ColumnConfig::new("id"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column name 'id'"));
    }
}
