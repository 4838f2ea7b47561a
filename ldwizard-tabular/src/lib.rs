//! Tabular input for LD Wizard transformations.
//!
//! This crate provides the row matrix the transformation executor consumes
//! (row 0 holds the headers), a CSV reader that produces it, and the shape
//! validation that must pass before any row is transformed.
//!
//! # Example
//!
//! ```
//! use ldwizard_tabular::{read_csv, CsvProps};
//!
//! let (table, props) = read_csv("id;name\n1;Alice\n", &CsvProps::default()).unwrap();
//! assert_eq!(props.delimiter, Some(';'));
//! assert_eq!(table.headers(), &["id", "name"]);
//!
//! table.validate().unwrap();
//! let row = table.row(0).unwrap();
//! assert_eq!(row.get(1), Some("Alice"));
//! ```

pub mod csv_reader;
pub mod error;
pub mod table;

pub use csv_reader::{read_csv, sniff_delimiter, CsvProps, CANDIDATE_DELIMITERS};
pub use error::{Result, TabularError};
pub use table::{Row, RowTable};
