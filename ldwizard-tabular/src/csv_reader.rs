//! CSV reading with delimiter detection.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TabularError};
use crate::table::RowTable;

/// Delimiters tried by [`sniff_delimiter`], in preference order.
pub const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Lines inspected when sniffing.
const SNIFF_LINES: usize = 10;

/// CSV dialect settings carried in a transformation configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvProps {
    /// Field delimiter; detected from the input when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
}

impl CsvProps {
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }
}

/// Read CSV text into a [`RowTable`].
///
/// The first record is the header row. Records whose cells are all blank are
/// skipped. Returns the table plus the props actually used, so a detected
/// delimiter can be stored in the configuration.
pub fn read_csv(input: &str, props: &CsvProps) -> Result<(RowTable, CsvProps)> {
    let delimiter = props
        .delimiter
        .unwrap_or_else(|| sniff_delimiter(input));

    let mut reader = builder(delimiter).from_reader(input.as_bytes());
    let mut matrix = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        matrix.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if matrix.is_empty() {
        return Err(TabularError::EmptyInput);
    }

    tracing::debug!(
        delimiter = %delimiter.escape_default(),
        rows = matrix.len(),
        "read csv input"
    );
    let table = RowTable::from_matrix(matrix)?;
    Ok((table, CsvProps::with_delimiter(delimiter)))
}

/// Guess the delimiter of `input` from its first lines.
///
/// A candidate qualifies when every sampled line splits into the same number
/// (more than one) of fields. The qualifying candidate with the most fields
/// wins; ties go to the earlier candidate. Falls back to `,`.
pub fn sniff_delimiter(input: &str) -> char {
    let sample: String = input
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut best: Option<(char, usize)> = None;
    for candidate in CANDIDATE_DELIMITERS {
        let Some(width) = consistent_width(&sample, candidate) else {
            continue;
        };
        if width > 1 && best.map_or(true, |(_, w)| width > w) {
            best = Some((candidate, width));
        }
    }

    best.map_or(',', |(d, _)| d)
}

fn consistent_width(sample: &str, delimiter: char) -> Option<usize> {
    let mut reader = builder(delimiter).from_reader(sample.as_bytes());
    let mut width = None;
    for record in reader.records() {
        let len = record.ok()?.len();
        match width {
            None => width = Some(len),
            Some(w) if w != len => return None,
            Some(_) => {}
        }
    }
    width
}

fn builder(delimiter: char) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter_byte(delimiter));
    builder
}

fn delimiter_byte(delimiter: char) -> u8 {
    u8::try_from(delimiter).unwrap_or(b',')
}
