//! Workbook reader.
//!
//! Decoding is all-or-nothing: the container, the first sheet, and the
//! header row are validated before any record is produced, and any failure
//! along the way aborts the whole decode. The reader accepts more than the
//! writer emits — shared strings, namespace prefixes, reordered or extra
//! columns — because import files come back from Excel, not only from this
//! tool.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use zip::ZipArchive;
use zip::result::ZipError;

use sds_model::{Substance, split_codes};

use crate::cellref::column_index;
use crate::error::{Result, XlsxError};

/// Conventional location of the first worksheet part, used when the
/// workbook carries no resolvable sheet relationship.
const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// One parsed sheet row: `(column index, cell text)` pairs for every
/// non-empty cell.
type SheetRow = Vec<(usize, String)>;

/// Decode workbook bytes into substance records.
///
/// Takes the first sheet only; matches columns by exact header text; the
/// `name` column is the minimum viable schema. Unknown columns are
/// ignored, missing optional columns default to empty, and rows with no
/// cell content at all are skipped.
pub fn decode_workbook(bytes: &[u8]) -> Result<Vec<Substance>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let sheet_part = first_sheet_part(&mut archive)?;
    let sheet_xml = read_part(&mut archive, &sheet_part)?.ok_or(XlsxError::MissingSheet)?;
    let shared = shared_strings(&mut archive)?;
    let rows = parse_sheet(&sheet_xml, &shared)?;
    records_from_rows(rows)
}

/// Read and decode a register workbook from `path`.
pub fn read_register(path: &Path) -> Result<Vec<Substance>> {
    let bytes = fs::read(path)?;
    decode_workbook(&bytes)
}

/// Resolve the ZIP part holding the first sheet.
///
/// The honest route is workbook.xml's first `<sheet>` r:id followed
/// through workbook.xml.rels; files missing either indirection fall back
/// to the conventional part name.
fn first_sheet_part(archive: &mut Archive) -> Result<String> {
    let Some(workbook_xml) = read_part(archive, "xl/workbook.xml")? else {
        return Ok(DEFAULT_SHEET_PART.to_string());
    };
    let Some(rid) = first_sheet_rid(&workbook_xml)? else {
        return Ok(DEFAULT_SHEET_PART.to_string());
    };
    let Some(rels_xml) = read_part(archive, "xl/_rels/workbook.xml.rels")? else {
        return Ok(DEFAULT_SHEET_PART.to_string());
    };
    match relationship_target(&rels_xml, &rid)? {
        // Targets are relative to xl/ unless they name an absolute part.
        Some(target) => Ok(match target.strip_prefix('/') {
            Some(absolute) => absolute.to_string(),
            None => format!("xl/{target}"),
        }),
        None => Ok(DEFAULT_SHEET_PART.to_string()),
    }
}

/// Relationship id of the first `<sheet>` element, if any.
fn first_sheet_rid(workbook_xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(workbook_xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                return attribute_value(&e, b"r:id");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Target of the relationship with the given id, if any.
fn relationship_target(rels_xml: &str, rid: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(rels_xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if attribute_value(&e, b"Id")?.as_deref() == Some(rid) {
                    return attribute_value(&e, b"Target");
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Shared string table, empty when the workbook has none.
///
/// Rich-text runs inside one `<si>` are concatenated, which matches how
/// Excel displays them.
fn shared_strings(archive: &mut Archive) -> Result<Vec<String>> {
    let Some(xml) = read_part(archive, "xl/sharedStrings.xml")? else {
        return Ok(Vec::new());
    };
    let mut reader = Reader::from_str(&xml);
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = current.is_some(),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(text) = current.take() {
                        strings.push(text);
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(current) = current.as_mut() {
                    current.push_str(&t.decode().map_err(|e| XlsxError::invalid_xml(e.to_string()))?);
                }
            }
            Event::GeneralRef(e) if in_text => {
                if let Some(current) = current.as_mut() {
                    push_entity(current, &e)?;
                }
            }
            Event::Eof => return Ok(strings),
            _ => {}
        }
    }
}

/// How a cell's stored value maps to its text.
#[derive(Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// `t="s"`: `<v>` holds an index into the shared string table.
    Shared,
    /// Everything else, inline strings included: the accumulated text is
    /// the cell text. A numeric cell contributes its raw `<v>` digits.
    Literal,
}

/// Parse the sheet grid into rows of `(column, text)` cells.
fn parse_sheet(sheet_xml: &str, shared: &[String]) -> Result<Vec<SheetRow>> {
    let mut reader = Reader::from_str(sheet_xml);
    let mut rows: Vec<SheetRow> = Vec::new();
    let mut current_row: Option<SheetRow> = None;
    let mut next_column = 0usize;
    let mut cell: Option<(usize, CellKind)> = None;
    let mut value = String::new();
    let mut in_value = false;
    loop {
        let event = reader.read_event()?;
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.local_name().as_ref() {
                    b"row" if !is_empty => {
                        current_row = Some(Vec::new());
                        next_column = 0;
                    }
                    b"row" => rows.push(Vec::new()),
                    b"c" if current_row.is_some() => {
                        let column = match attribute_value(e, b"r")? {
                            Some(reference) => column_index(&reference)?,
                            None => next_column,
                        };
                        let kind = match attribute_value(e, b"t")?.as_deref() {
                            Some("s") => CellKind::Shared,
                            _ => CellKind::Literal,
                        };
                        next_column = column + 1;
                        if is_empty {
                            // Self-closing cell: no value, nothing to keep.
                        } else {
                            cell = Some((column, kind));
                            value.clear();
                        }
                    }
                    b"v" | b"t" if cell.is_some() && !is_empty => in_value = true,
                    _ => {}
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                b"c" => {
                    if let Some((column, kind)) = cell.take() {
                        let text = resolve_cell_text(kind, &value, shared)?;
                        if !text.is_empty() {
                            if let Some(row) = current_row.as_mut() {
                                row.push((column, text));
                            }
                        }
                    }
                    in_value = false;
                }
                b"v" | b"t" => in_value = false,
                _ => {}
            },
            Event::Text(t) if in_value => {
                value.push_str(&t.decode().map_err(|e| XlsxError::invalid_xml(e.to_string()))?)
            }
            Event::GeneralRef(e) if in_value => push_entity(&mut value, &e)?,
            Event::Eof => return Ok(rows),
            _ => {}
        }
    }
}

fn resolve_cell_text(kind: CellKind, value: &str, shared: &[String]) -> Result<String> {
    match kind {
        CellKind::Shared => {
            let index: usize = value
                .trim()
                .parse()
                .map_err(|_| XlsxError::invalid_xml(format!("bad shared string index: {value:?}")))?;
            shared
                .get(index)
                .cloned()
                .ok_or_else(|| XlsxError::invalid_xml(format!("shared string {index} out of range")))
        }
        CellKind::Literal => Ok(value.to_string()),
    }
}

/// Build records from the parsed grid.
///
/// The first row with any cell content is the header row; everything after
/// it is data. Rows with no content are skipped, the way spreadsheet tools
/// skip blank lines.
fn records_from_rows(rows: Vec<SheetRow>) -> Result<Vec<Substance>> {
    let Some(header_index) = rows.iter().position(|row| !row.is_empty()) else {
        return Err(XlsxError::EmptySheet);
    };
    let headers = &rows[header_index];
    let header_names: Vec<String> = headers.iter().map(|(_, text)| text.clone()).collect();
    let column_of = |name: &str| -> Option<usize> {
        headers
            .iter()
            .find(|(_, text)| text == name)
            .map(|(column, _)| *column)
    };
    let Some(name_column) = column_of("name") else {
        return Err(XlsxError::missing_name_column(&header_names));
    };
    let producer_column = column_of("producer");
    let date_column = column_of("sdsDate");
    let link_column = column_of("link");
    let notes_column = column_of("notes");
    let ghs_column = column_of("ghs");

    let mut records = Vec::new();
    for row in rows.into_iter().skip(header_index + 1) {
        if row.is_empty() {
            continue;
        }
        let text_at = |column: Option<usize>| -> String {
            column
                .and_then(|wanted| row.iter().find(|(column, _)| *column == wanted))
                .map(|(_, text)| text.clone())
                .unwrap_or_default()
        };
        let date_text = text_at(date_column);
        records.push(Substance {
            name: text_at(Some(name_column)),
            producer: text_at(producer_column),
            sds_date: if date_text.trim().is_empty() {
                None
            } else {
                Some(date_text)
            },
            link: text_at(link_column),
            notes: text_at(notes_column),
            ghs: split_codes(&text_at(ghs_column)),
        });
    }
    Ok(records)
}

/// Unescaped value of the attribute with the given key, if present.
fn attribute_value(element: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| XlsxError::invalid_xml(e.to_string()))?;
        if attribute.key.as_ref() == key {
            let value = attribute
                .unescape_value()
                .map_err(|e| XlsxError::invalid_xml(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Append one resolved entity reference to `text`.
fn push_entity(text: &mut String, entity: &BytesRef) -> Result<()> {
    if let Some(ch) = entity
        .resolve_char_ref()
        .map_err(|e| XlsxError::invalid_xml(e.to_string()))?
    {
        text.push(ch);
        return Ok(());
    }
    let name = entity
        .decode()
        .map_err(|e| XlsxError::invalid_xml(e.to_string()))?;
    match name.as_ref() {
        "amp" => text.push('&'),
        "lt" => text.push('<'),
        "gt" => text.push('>'),
        "quot" => text.push('"'),
        "apos" => text.push('\''),
        other => {
            return Err(XlsxError::invalid_xml(format!(
                "unresolved entity reference: &{other};"
            )));
        }
    }
    Ok(())
}

/// Read one ZIP part as text, `None` when the part does not exist.
fn read_part(archive: &mut Archive, name: &str) -> Result<Option<String>> {
    match archive.by_name(name) {
        Ok(mut part) => {
            let mut text = String::new();
            part.read_to_string(&mut text)?;
            Ok(Some(text))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(other) => Err(other.into()),
    }
}
