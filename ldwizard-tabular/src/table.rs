//! Row matrix with a header row.
//!
//! `RowTable` stores cells row by row, which is the shape the executor walks
//! (one subject per data row). Columns are looked up by exact header name.

use std::collections::HashMap;

use crate::error::{Result, TabularError};

/// A header row plus data rows of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    /// Header name -> column index (first occurrence wins)
    name_to_index: HashMap<String, usize>,
}

impl RowTable {
    /// Build a table from a matrix whose first row is the header row.
    ///
    /// Blank cells at the end of the header row are dropped (a trailing
    /// delimiter). No other shape checks happen here; call
    /// [`RowTable::validate`] before transforming.
    pub fn from_matrix(mut matrix: Vec<Vec<String>>) -> Result<Self> {
        if matrix.is_empty() {
            return Err(TabularError::EmptyInput);
        }
        let mut headers = matrix.remove(0);
        while headers.last().is_some_and(|h| h.trim().is_empty()) {
            headers.pop();
        }

        let mut name_to_index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            name_to_index.entry(name.clone()).or_insert(i);
        }

        Ok(Self {
            headers,
            rows: matrix,
            name_to_index,
        })
    }

    /// Header cells in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Column index for an exact header name.
    #[inline]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Number of data rows (header excluded).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data row by 0-based index.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            number: index + 1,
            cells,
        })
    }

    /// Iterate over data rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.rows.iter().enumerate().map(|(i, cells)| Row {
            number: i + 1,
            cells,
        })
    }

    /// Check the row shape against the header.
    ///
    /// The expected width is the number of header cells that are not blank.
    /// Every data row must have exactly that many cells and none of them may
    /// be blank.
    pub fn validate(&self) -> Result<()> {
        let expected = self
            .headers
            .iter()
            .filter(|h| !h.trim().is_empty())
            .count();

        for row in self.rows() {
            let found = row.cells.len();
            if let Some(column) = row.cells.iter().position(|c| c.trim().is_empty()) {
                return Err(TabularError::EmptyCell {
                    row: row.number,
                    column,
                });
            }
            if found > expected {
                return Err(TabularError::ExtraColumns {
                    row: row.number,
                    found,
                    expected,
                });
            }
            if found < expected {
                return Err(TabularError::MissingCells {
                    row: row.number,
                    found,
                    expected,
                });
            }
        }

        tracing::debug!(
            rows = self.num_rows(),
            columns = expected,
            "tabular input validated"
        );
        Ok(())
    }

    /// Return the matrix form (header row first).
    pub fn into_matrix(self) -> Vec<Vec<String>> {
        let mut matrix = Vec::with_capacity(self.rows.len() + 1);
        matrix.push(self.headers);
        matrix.extend(self.rows);
        matrix
    }
}

/// One data row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    number: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Row number in the matrix (the header is row 0).
    pub fn number(&self) -> usize {
        self.number
    }

    /// Cell value at `column`.
    ///
    /// Returns `None` for a missing cell and for an empty cell, which is
    /// treated like SQL NULL.
    pub fn get(&self, column: usize) -> Option<&'a str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_lookup_and_rows() {
        let table = RowTable::from_matrix(matrix(&[
            &["id", "name"],
            &["1", "Alice"],
            &["2", "Bob"],
        ]))
        .unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.column_index("name"), Some(1));
        assert_eq!(table.column_index("Name"), None);

        let numbers: Vec<_> = table.rows().map(|r| r.number()).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(table.row(1).unwrap().get(1), Some("Bob"));
        assert!(table.row(2).is_none());
    }

    #[test]
    fn test_empty_cell_is_null() {
        let table = RowTable::from_matrix(matrix(&[&["id", "name"], &["1", ""]])).unwrap();
        let row = table.row(0).unwrap();
        assert_eq!(row.get(0), Some("1"));
        assert_eq!(row.get(1), None);
        assert_eq!(row.get(5), None);
    }

    #[test]
    fn test_validate_trailing_empty_cell() {
        let table = RowTable::from_matrix(matrix(&[&["id", "name"], &["1", "Alice"], &["2", ""]]))
            .unwrap();
        match table.validate().unwrap_err() {
            TabularError::EmptyCell { row, column } => {
                assert_eq!(row, 2);
                assert_eq!(column, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_widths() {
        let wide =
            RowTable::from_matrix(matrix(&[&["id", "name", ""], &["1", "Alice", "x"]])).unwrap();
        assert!(matches!(
            wide.validate(),
            Err(TabularError::ExtraColumns {
                found: 3,
                expected: 2,
                ..
            })
        ));

        let narrow = RowTable::from_matrix(matrix(&[&["id", "name"], &["1"]])).unwrap();
        assert!(matches!(
            narrow.validate(),
            Err(TabularError::MissingCells {
                found: 1,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_ok_and_round_trip() {
        let m = matrix(&[&["id", "name"], &["1", "Alice"]]);
        let table = RowTable::from_matrix(m.clone()).unwrap();
        table.validate().unwrap();
        assert_eq!(table.into_matrix(), m);
    }

    #[test]
    fn test_trailing_blank_headers_dropped() {
        let table =
            RowTable::from_matrix(matrix(&[&["id", "name", "", " "], &["1", "Alice"]])).unwrap();
        assert_eq!(table.headers(), &["id", "name"]);
        table.validate().unwrap();
    }

    #[test]
    fn test_empty_matrix() {
        assert!(matches!(
            RowTable::from_matrix(Vec::new()),
            Err(TabularError::EmptyInput)
        ));
    }
}
