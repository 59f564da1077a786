//! Decoded table types

use std::ops::Index;

/// A decoded row of cell strings
pub type Row = Vec<String>;

/// Rows decoded from the spreadsheet region of an ODS document.
///
/// Every row holds at least one cell. Rows are kept in document order and
/// the table is not modified after decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub(crate) fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// All rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get a row by index (0-based)
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Get a cell value by row and column index (0-based)
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows were decoded
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if all rows have the same number of cells
    pub fn is_rectangular(&self) -> bool {
        match self.rows.first() {
            Some(first) => self.rows.iter().all(|row| row.len() == first.len()),
            None => true,
        }
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Consume the table, returning its rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl Index<usize> for Table {
    type Output = Row;

    fn index(&self, index: usize) -> &Row {
        &self.rows[index]
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl PartialEq<Vec<Vec<&str>>> for Table {
    fn eq(&self, other: &Vec<Vec<&str>>) -> bool {
        self.rows.len() == other.len()
            && self
                .rows
                .iter()
                .zip(other)
                .all(|(row, expected)| row == expected)
    }
}
