//! Spreadsheet grid editor
//!
//! A sparse cell grid with letter column labels, plus CSV and HTML-table
//! (`.xls`) round trips. Cell addressing helpers are shared with the xlsx
//! reader and writer.

use crate::export::{ExportFormat, ExportResult, file_name};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 6;
pub const MAX_ROWS: usize = 100;
pub const MAX_COLS: usize = 26;

/// Column label for a zero-based index: 0 → `A`, 25 → `Z`, 26 → `AA`
pub fn column_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Widest column reference a workbook can hold (`XFD`)
const MAX_REFERENCE_LETTERS: usize = 3;

/// Zero-based column index from a cell reference such as `C7` or `AB12`.
///
/// References with no letters, or with more letters than a workbook allows,
/// give `None`.
pub fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if letters.is_empty() || letters.len() > MAX_REFERENCE_LETTERS {
        return None;
    }
    let value = letters.iter().try_fold(0usize, |acc, b| {
        acc.checked_mul(26)?.checked_add((b - b'A' + 1) as usize)
    })?;
    value.checked_sub(1)
}

/// Cell reference for zero-based coordinates: (0, 0) → `A1`
pub fn cell_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_label(col), row + 1)
}

/// Escape text for HTML table cells
pub(crate) fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render rows as an HTML table that spreadsheet applications open as `.xls`
pub(crate) fn html_table<R, C>(rows: R) -> String
where
    R: IntoIterator<Item = C>,
    C: IntoIterator<Item = String>,
{
    let mut html = String::from("<html><head><meta charset=\"utf-8\"/></head><body><table>");
    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>");
            html.push_str(&escape_html(&cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></body></html>");
    html
}

/// Editable grid of text cells
#[derive(Debug, Clone, PartialEq)]
pub struct Spreadsheet {
    rows: usize,
    cols: usize,
    cells: BTreeMap<(usize, usize), String>,
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Spreadsheet {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.clamp(1, MAX_ROWS),
            cols: cols.clamp(1, MAX_COLS),
            cells: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Resize the row count (1..=100); cells outside the grid are dropped
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows.clamp(1, MAX_ROWS);
        let limit = self.rows;
        self.cells.retain(|(r, _), _| *r < limit);
    }

    /// Resize the column count (1..=26); cells outside the grid are dropped
    pub fn set_cols(&mut self, cols: usize) {
        self.cols = cols.clamp(1, MAX_COLS);
        let limit = self.cols;
        self.cells.retain(|(_, c), _| *c < limit);
    }

    pub fn column_labels(&self) -> Vec<String> {
        (0..self.cols).map(column_label).collect()
    }

    /// Cell value, empty when unset or out of range
    pub fn get(&self, row: usize, col: usize) -> &str {
        self.cells.get(&(row, col)).map(String::as_str).unwrap_or("")
    }

    /// Set a cell; writes outside the grid are ignored
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
    }

    fn grid_rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        (0..self.rows).map(move |r| (0..self.cols).map(|c| self.get(r, c).to_string()).collect())
    }

    /// Every row, comma-joined, newline-separated
    pub fn to_csv(&self) -> String {
        self.grid_rows()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_html(&self) -> String {
        html_table(self.grid_rows())
    }

    /// Load CSV text, growing the grid to at least the default size
    pub fn from_csv(text: &str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let first_width = lines.first().map(|l| l.split(',').count()).unwrap_or(0);
        let mut sheet = Self::new(
            lines.len().max(DEFAULT_ROWS),
            first_width.max(DEFAULT_COLS),
        );
        for (r, line) in lines.iter().enumerate() {
            for (c, value) in line.split(',').enumerate() {
                sheet.set(r, c, value.trim());
            }
        }
        sheet
    }

    pub fn export_csv(&self, at: DateTime<Utc>) -> ExportResult {
        ExportResult::text(
            self.to_csv(),
            ExportFormat::Csv,
            file_name("spreadsheet", ExportFormat::Csv, at),
        )
    }

    pub fn export_html(&self, at: DateTime<Utc>) -> ExportResult {
        ExportResult::text(
            self.to_html(),
            ExportFormat::HtmlTable,
            file_name("spreadsheet", ExportFormat::HtmlTable, at),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_labels() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("z9"), Some(25));
        assert_eq!(column_index("AB12"), Some(27));
        assert_eq!(column_index("12"), None);
        assert_eq!(cell_reference(4, 2), "C5");
    }

    #[test]
    fn test_oversized_reference_has_no_index() {
        assert_eq!(column_index("XFD1"), Some(16383));
        assert_eq!(column_index("ZZZZZZZZZZZZZZZZ1"), None);
        assert_eq!(column_index("AAAA1"), None);
    }

    #[test]
    fn test_resize_is_clamped() {
        let mut sheet = Spreadsheet::default();
        sheet.set(9, 5, "x");
        sheet.set_cols(40);
        assert_eq!(sheet.cols(), MAX_COLS);
        sheet.set_rows(0);
        assert_eq!(sheet.rows(), 1);
        assert_eq!(sheet.get(9, 5), "");
    }

    #[test]
    fn test_csv_import_grows_to_minimum() {
        let sheet = Spreadsheet::from_csv("a, b\nc,d");
        assert_eq!(sheet.rows(), DEFAULT_ROWS);
        assert_eq!(sheet.cols(), DEFAULT_COLS);
        assert_eq!(sheet.get(0, 1), "b");
        assert_eq!(sheet.get(1, 0), "c");
        assert!(sheet.to_csv().starts_with("a,b,,,,\nc,d,,,,"));
    }

    #[test]
    fn test_html_escapes_cells() {
        let mut sheet = Spreadsheet::new(1, 1);
        sheet.set(0, 0, "<b>&");
        assert!(sheet.to_html().contains("<td>&lt;b&gt;&amp;</td>"));
    }
}
