//! Minimal .xlsx reader
//!
//! Reads the first sheet of an Office Open XML workbook into header-keyed
//! rows. Only cell text is extracted: shared strings, inline strings, numbers
//! and booleans. Formulas yield their cached value; styles are ignored.

use super::{ImportError, SheetRow};
use crate::grid::column_index;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

const DEFAULT_SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

fn workbook_err(e: impl std::fmt::Display) -> ImportError {
    ImportError::Workbook(e.to_string())
}

fn attribute(element: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local_name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<String>, ImportError> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(workbook_err(format!("Failed to open {}: {}", name, e))),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| workbook_err(format!("Failed to read {}: {}", name, e)))?;
    Ok(Some(content))
}

/// Resolve the archive path of the first sheet via workbook relationships
fn first_sheet_path(archive: &mut ZipArchive<Cursor<&[u8]>>) -> Result<String, ImportError> {
    let Some(workbook) = read_entry(archive, "xl/workbook.xml")? else {
        return Ok(DEFAULT_SHEET_PATH.to_string());
    };

    let mut reader = Reader::from_str(&workbook);
    let mut relationship_id = None;
    loop {
        match reader.read_event().map_err(workbook_err)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                relationship_id = attribute(&e, b"id");
                break;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let (Some(relationship_id), Some(rels)) = (
        relationship_id,
        read_entry(archive, "xl/_rels/workbook.xml.rels")?,
    ) else {
        return Ok(DEFAULT_SHEET_PATH.to_string());
    };

    let mut reader = Reader::from_str(&rels);
    loop {
        match reader.read_event().map_err(workbook_err)? {
            Event::Start(e) | Event::Empty(e)
                if e.local_name().as_ref() == b"Relationship"
                    && attribute(&e, b"Id").as_deref() == Some(relationship_id.as_str()) =>
            {
                let Some(target) = attribute(&e, b"Target") else {
                    break;
                };
                return Ok(match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("xl/{}", target),
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(DEFAULT_SHEET_PATH.to_string())
}

fn shared_strings(xml: &str) -> Result<Vec<String>, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(workbook_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(text) if in_text => {
                if let Some(current) = current.as_mut() {
                    current.push_str(&text.unescape().map_err(workbook_err)?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"si" => strings.extend(current.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(strings)
}

/// Cells of one sheet row as (column index, text)
type RawRow = Vec<(usize, String)>;

/// 1-based row number from the `r` attribute, or the row after `previous`
fn row_number(element: &BytesStart<'_>, previous: usize) -> usize {
    attribute(element, b"r")
        .and_then(|r| r.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(previous + 1)
}

/// Sheet rows as (1-based row number, cells)
fn sheet_rows(xml: &str, shared: &[String]) -> Result<Vec<(usize, RawRow)>, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut current_row: Option<RawRow> = None;
    let mut row_num = 0usize;
    let mut next_col = 0usize;
    let mut cell_col = 0usize;
    let mut cell_type: Option<String> = None;
    let mut cell_value = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event().map_err(workbook_err)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    row_num = row_number(&e, row_num);
                    current_row = Some(Vec::new());
                    next_col = 0;
                }
                b"c" => {
                    cell_col = attribute(&e, b"r")
                        .and_then(|r| column_index(&r))
                        .unwrap_or(next_col);
                    cell_type = attribute(&e, b"t");
                    cell_value.clear();
                }
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => {
                    row_num = row_number(&e, row_num);
                    rows.push((row_num, Vec::new()));
                }
                b"c" => {
                    next_col = attribute(&e, b"r")
                        .and_then(|r| column_index(&r))
                        .unwrap_or(next_col)
                        + 1;
                }
                _ => {}
            },
            Event::Text(text) if in_value => {
                cell_value.push_str(&text.unescape().map_err(workbook_err)?);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    let value = match cell_type.as_deref() {
                        Some("s") => cell_value
                            .trim()
                            .parse::<usize>()
                            .ok()
                            .and_then(|i| shared.get(i).cloned())
                            .unwrap_or_default(),
                        Some("b") => (if cell_value.trim() == "1" { "true" } else { "false" })
                            .to_string(),
                        _ => cell_value.clone(),
                    };
                    if let Some(row) = current_row.as_mut()
                        && !value.is_empty()
                    {
                        row.push((cell_col, value));
                    }
                    next_col = cell_col + 1;
                }
                b"row" => rows.extend(current_row.take().map(|cells| (row_num, cells))),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rows)
}

/// Read the first sheet into rows keyed by the header row.
///
/// Cells under a blank header are dropped, as are data rows with no values.
pub fn read_first_sheet(bytes: &[u8]) -> Result<Vec<SheetRow>, ImportError> {
    Ok(read_first_sheet_numbered(bytes)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

/// Like [`read_first_sheet`], keeping each row's 1-based sheet row number
pub fn read_first_sheet_numbered(bytes: &[u8]) -> Result<Vec<(usize, SheetRow)>, ImportError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| workbook_err(format!("Not a valid .xlsx workbook: {}", e)))?;

    let shared = match read_entry(&mut archive, "xl/sharedStrings.xml")? {
        Some(xml) => shared_strings(&xml)?,
        None => Vec::new(),
    };
    let sheet_path = first_sheet_path(&mut archive)?;
    let sheet_xml = read_entry(&mut archive, &sheet_path)?
        .ok_or_else(|| workbook_err(format!("Sheet {} missing from workbook", sheet_path)))?;

    let mut raw_rows = sheet_rows(&sheet_xml, &shared)?.into_iter();
    let Some((_, header_row)) = raw_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: HashMap<usize, String> = header_row
        .into_iter()
        .filter(|(_, name)| !name.trim().is_empty())
        .collect();

    let rows: Vec<(usize, SheetRow)> = raw_rows
        .map(|(number, cells)| {
            let row = cells
                .into_iter()
                .filter_map(|(col, value)| headers.get(&col).map(|h| (h.clone(), value)))
                .collect::<SheetRow>();
            (number, row)
        })
        .filter(|(_, row)| !row.is_empty())
        .collect();

    debug!(sheet = %sheet_path, rows = rows.len(), "Read workbook sheet");
    Ok(rows)
}
