//! Workbook writer.
//!
//! Emits a minimal single-sheet workbook: the four structural parts plus
//! the sheet grid. Every cell is an inline string, so no shared-string
//! table is written and cell text never changes type under round trip.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use sds_model::{Substance, join_codes};

use crate::cellref::cell_reference;
use crate::error::Result;
use crate::{COLUMNS, SHEET_NAME};

const CONTENT_TYPES_NS: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const DOC_RELS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Encode `records` as workbook bytes, one row per record in order.
pub fn encode_workbook(records: &[Substance]) -> Result<Vec<u8>> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(&content_types_part()?)?;
    archive.start_file("_rels/.rels", options)?;
    archive.write_all(&package_rels_part()?)?;
    archive.start_file("xl/workbook.xml", options)?;
    archive.write_all(&workbook_part()?)?;
    archive.start_file("xl/_rels/workbook.xml.rels", options)?;
    archive.write_all(&workbook_rels_part()?)?;
    archive.start_file("xl/worksheets/sheet1.xml", options)?;
    archive.write_all(&sheet_part(records)?)?;

    let cursor = archive.finish()?;
    Ok(cursor.into_inner())
}

/// Encode `records` and write the workbook to `path`.
pub fn write_register(path: &Path, records: &[Substance]) -> Result<()> {
    let bytes = encode_workbook(records)?;
    fs::write(path, bytes)?;
    Ok(())
}

fn xml_writer() -> Writer<Cursor<Vec<u8>>> {
    Writer::new(Cursor::new(Vec::new()))
}

fn finish(writer: Writer<Cursor<Vec<u8>>>) -> Vec<u8> {
    writer.into_inner().into_inner()
}

fn declaration() -> Event<'static> {
    Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes")))
}

fn content_types_part() -> Result<Vec<u8>> {
    let mut xml = xml_writer();
    xml.write_event(declaration())?;
    let mut types = BytesStart::new("Types");
    types.push_attribute(("xmlns", CONTENT_TYPES_NS));
    xml.write_event(Event::Start(types))?;

    let mut rels_default = BytesStart::new("Default");
    rels_default.push_attribute(("Extension", "rels"));
    rels_default.push_attribute((
        "ContentType",
        "application/vnd.openxmlformats-package.relationships+xml",
    ));
    xml.write_event(Event::Empty(rels_default))?;

    let mut xml_default = BytesStart::new("Default");
    xml_default.push_attribute(("Extension", "xml"));
    xml_default.push_attribute(("ContentType", "application/xml"));
    xml.write_event(Event::Empty(xml_default))?;

    let mut workbook = BytesStart::new("Override");
    workbook.push_attribute(("PartName", "/xl/workbook.xml"));
    workbook.push_attribute((
        "ContentType",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
    ));
    xml.write_event(Event::Empty(workbook))?;

    let mut sheet = BytesStart::new("Override");
    sheet.push_attribute(("PartName", "/xl/worksheets/sheet1.xml"));
    sheet.push_attribute((
        "ContentType",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
    ));
    xml.write_event(Event::Empty(sheet))?;

    xml.write_event(Event::End(BytesEnd::new("Types")))?;
    Ok(finish(xml))
}

fn package_rels_part() -> Result<Vec<u8>> {
    let mut xml = xml_writer();
    xml.write_event(declaration())?;
    let mut relationships = BytesStart::new("Relationships");
    relationships.push_attribute(("xmlns", RELATIONSHIPS_NS));
    xml.write_event(Event::Start(relationships))?;

    let mut workbook = BytesStart::new("Relationship");
    workbook.push_attribute(("Id", "rId1"));
    workbook.push_attribute((
        "Type",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
    ));
    workbook.push_attribute(("Target", "xl/workbook.xml"));
    xml.write_event(Event::Empty(workbook))?;

    xml.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(finish(xml))
}

fn workbook_part() -> Result<Vec<u8>> {
    let mut xml = xml_writer();
    xml.write_event(declaration())?;
    let mut workbook = BytesStart::new("workbook");
    workbook.push_attribute(("xmlns", SPREADSHEET_NS));
    workbook.push_attribute(("xmlns:r", DOC_RELS_NS));
    xml.write_event(Event::Start(workbook))?;
    xml.write_event(Event::Start(BytesStart::new("sheets")))?;

    let mut sheet = BytesStart::new("sheet");
    sheet.push_attribute(("name", SHEET_NAME));
    sheet.push_attribute(("sheetId", "1"));
    sheet.push_attribute(("r:id", "rId1"));
    xml.write_event(Event::Empty(sheet))?;

    xml.write_event(Event::End(BytesEnd::new("sheets")))?;
    xml.write_event(Event::End(BytesEnd::new("workbook")))?;
    Ok(finish(xml))
}

fn workbook_rels_part() -> Result<Vec<u8>> {
    let mut xml = xml_writer();
    xml.write_event(declaration())?;
    let mut relationships = BytesStart::new("Relationships");
    relationships.push_attribute(("xmlns", RELATIONSHIPS_NS));
    xml.write_event(Event::Start(relationships))?;

    let mut sheet = BytesStart::new("Relationship");
    sheet.push_attribute(("Id", "rId1"));
    sheet.push_attribute((
        "Type",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet",
    ));
    sheet.push_attribute(("Target", "worksheets/sheet1.xml"));
    xml.write_event(Event::Empty(sheet))?;

    xml.write_event(Event::End(BytesEnd::new("Relationships")))?;
    Ok(finish(xml))
}

fn sheet_part(records: &[Substance]) -> Result<Vec<u8>> {
    let mut xml = xml_writer();
    xml.write_event(declaration())?;
    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute(("xmlns", SPREADSHEET_NS));
    xml.write_event(Event::Start(worksheet))?;
    xml.write_event(Event::Start(BytesStart::new("sheetData")))?;

    let header: Vec<String> = COLUMNS.iter().map(|column| (*column).to_string()).collect();
    write_row(&mut xml, 1, &header)?;
    for (index, record) in records.iter().enumerate() {
        write_row(&mut xml, index + 2, &record_cells(record))?;
    }

    xml.write_event(Event::End(BytesEnd::new("sheetData")))?;
    xml.write_event(Event::End(BytesEnd::new("worksheet")))?;
    Ok(finish(xml))
}

/// Cell texts for one record, in [`COLUMNS`] order.
fn record_cells(record: &Substance) -> Vec<String> {
    vec![
        record.name.clone(),
        record.producer.clone(),
        record.sds_date.clone().unwrap_or_default(),
        record.link.clone(),
        record.notes.clone(),
        join_codes(&record.ghs),
    ]
}

/// Write one sheet row. Empty cells are skipped, Excel-style: the cell
/// reference carries the position, so gaps survive.
fn write_row(xml: &mut Writer<Cursor<Vec<u8>>>, row_number: usize, cells: &[String]) -> Result<()> {
    let mut row = BytesStart::new("row");
    row.push_attribute(("r", row_number.to_string().as_str()));
    xml.write_event(Event::Start(row))?;
    for (column, text) in cells.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        let mut cell = BytesStart::new("c");
        cell.push_attribute(("r", cell_reference(row_number, column).as_str()));
        cell.push_attribute(("t", "inlineStr"));
        xml.write_event(Event::Start(cell))?;
        xml.write_event(Event::Start(BytesStart::new("is")))?;

        let mut t = BytesStart::new("t");
        if text.trim() != text {
            t.push_attribute(("xml:space", "preserve"));
        }
        xml.write_event(Event::Start(t))?;
        xml.write_event(Event::Text(BytesText::new(text)))?;
        xml.write_event(Event::End(BytesEnd::new("t")))?;

        xml.write_event(Event::End(BytesEnd::new("is")))?;
        xml.write_event(Event::End(BytesEnd::new("c")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("row")))?;
    Ok(())
}
