//! Round-trip and decode-failure tests for the workbook codec.

use sds_model::{Substance, SubstanceDraft};
use sds_xlsx::{COLUMNS, XlsxError, decode_workbook, encode_workbook};

fn sample_register() -> Vec<Substance> {
    vec![
        SubstanceDraft::new()
            .name("MOBIL DTE OIL HEAVY")
            .producer("ExxonMobil")
            .sds_date("2022-12-18")
            .link("https://www.msds.exxonmobil.com")
            .notes("Zgodna z (UE) 2020/878")
            .ghs_codes("GHS07,GHS08")
            .build(),
        SubstanceDraft::new()
            .name("Hydraulic Oil Premium 32")
            .producer("Statoil")
            .sds_date("2009-09-24")
            .notes("Nieaktualna, wymaga aktualizacji")
            .build(),
        SubstanceDraft::new()
            .name("MYE 643")
            .producer("Brak danych")
            .notes("Brak karty – należy pozyskać")
            .build(),
    ]
}

#[test]
fn full_register_roundtrip() {
    let records = sample_register();
    let bytes = encode_workbook(&records).expect("encode");
    let decoded = decode_workbook(&bytes).expect("decode");
    assert_eq!(decoded, records);
}

#[test]
fn empty_register_roundtrips_to_empty() {
    let bytes = encode_workbook(&[]).expect("encode");
    let decoded = decode_workbook(&bytes).expect("decode");
    assert!(decoded.is_empty());
}

#[test]
fn xml_special_characters_survive() {
    let records = vec![
        SubstanceDraft::new()
            .name("Salt <NaCl> & friends")
            .producer("\"Quote\" GmbH")
            .notes("line one\nline two")
            .link("https://example.com/?a=1&b=2")
            .build(),
    ];
    let bytes = encode_workbook(&records).expect("encode");
    assert_eq!(decode_workbook(&bytes).expect("decode"), records);
}

#[test]
fn surrounding_whitespace_survives() {
    let records = vec![
        SubstanceDraft::new()
            .name("  padded name  ")
            .notes("trailing tab\t")
            .build(),
    ];
    let bytes = encode_workbook(&records).expect("encode");
    assert_eq!(decode_workbook(&bytes).expect("decode"), records);
}

#[test]
fn ghs_cell_is_comma_joined_scalar() {
    let records = vec![
        SubstanceDraft::new()
            .name("Acetone")
            .ghs_codes("GHS02, GHS07 ,GHS99,")
            .build(),
    ];
    let bytes = encode_workbook(&records).expect("encode");
    let decoded = decode_workbook(&bytes).expect("decode");
    assert_eq!(decoded[0].ghs, vec!["GHS02", "GHS07", "GHS99"]);
}

#[test]
fn absent_date_stays_absent() {
    let records = vec![SubstanceDraft::new().name("MYE 643").build()];
    let bytes = encode_workbook(&records).expect("encode");
    let decoded = decode_workbook(&bytes).expect("decode");
    assert_eq!(decoded[0].sds_date, None);
}

#[test]
fn register_file_roundtrip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(sds_xlsx::EXPORT_FILE_NAME);
    let records = sample_register();
    sds_xlsx::write_register(&path, &records).expect("write register");
    assert_eq!(sds_xlsx::read_register(&path).expect("read register"), records);
}

#[test]
fn garbage_bytes_fail_as_invalid_archive() {
    let err = decode_workbook(b"this is not a zip container").unwrap_err();
    assert!(matches!(err, XlsxError::InvalidArchive { .. }), "{err}");
}

#[test]
fn truncated_archive_fails() {
    let bytes = encode_workbook(&sample_register()).expect("encode");
    let err = decode_workbook(&bytes[..bytes.len() / 2]).unwrap_err();
    assert!(
        matches!(
            err,
            XlsxError::InvalidArchive { .. } | XlsxError::Io(_) | XlsxError::MissingSheet
        ),
        "{err}"
    );
}

#[test]
fn header_without_name_column_fails() {
    let sheet = sheet_with_rows(&[vec![
        ("A1", "producer"),
        ("B1", "notes"),
    ]]);
    let err = decode_workbook(&sheet).unwrap_err();
    match err {
        XlsxError::MissingNameColumn { headers } => {
            assert!(headers.contains("producer"), "{headers}");
        }
        other => panic!("expected MissingNameColumn, got {other}"),
    }
}

#[test]
fn sheet_with_no_content_fails_as_empty() {
    let sheet = sheet_with_rows(&[]);
    let err = decode_workbook(&sheet).unwrap_err();
    assert!(matches!(err, XlsxError::EmptySheet), "{err}");
}

#[test]
fn archive_without_worksheet_fails_as_missing_sheet() {
    let bytes = archive_with_parts(&[("xl/workbook.xml", WORKBOOK_XML)]);
    let err = decode_workbook(&bytes).unwrap_err();
    assert!(matches!(err, XlsxError::MissingSheet), "{err}");
}

#[test]
fn unknown_columns_are_ignored_and_order_is_free() {
    // Column order differs from the export convention and an extra
    // column is present; matching is by header text.
    let sheet = sheet_with_rows(&[
        vec![("A1", "ghs"), ("B1", "name"), ("C1", "internal id")],
        vec![("A2", "GHS05"), ("B2", "Toluene"), ("C2", "X-100")],
    ]);
    let decoded = decode_workbook(&sheet).expect("decode");
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].name, "Toluene");
    assert_eq!(decoded[0].ghs, vec!["GHS05"]);
    assert_eq!(decoded[0].producer, "");
}

#[test]
fn blank_rows_are_skipped() {
    let sheet = sheet_with_rows(&[
        vec![("A1", "name")],
        vec![],
        vec![("A3", "Ethanol")],
        vec![],
    ]);
    let decoded = decode_workbook(&sheet).expect("decode");
    let names: Vec<&str> = decoded.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ethanol"]);
}

#[test]
fn shared_string_cells_decode() {
    let shared = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
<si><t>name</t></si>
<si><t>Methanol</t></si>
<si><r><t>Metanol </t></r><r><t>czysty</t></r></si>
</sst>"#;
    let sheet = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c></row>
<row r="2"><c r="A2" t="s"><v>1</v></c></row>
<row r="3"><c r="A3" t="s"><v>2</v></c></row>
</sheetData>
</worksheet>"#;
    let bytes = archive_with_parts(&[
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/sharedStrings.xml", shared),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);
    let decoded = decode_workbook(&bytes).expect("decode");
    let names: Vec<&str> = decoded.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Methanol", "Metanol czysty"]);
}

#[test]
fn shared_string_index_out_of_range_fails() {
    let shared = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><t>name</t></si></sst>"#;
    let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData><row r="1"><c r="A1" t="s"><v>7</v></c></row></sheetData>
</worksheet>"#;
    let bytes = archive_with_parts(&[
        ("xl/sharedStrings.xml", shared),
        ("xl/worksheets/sheet1.xml", sheet),
    ]);
    let err = decode_workbook(&bytes).unwrap_err();
    assert!(matches!(err, XlsxError::InvalidXml { .. }), "{err}");
}

#[test]
fn numeric_date_cell_is_kept_as_digits() {
    // An Excel serial date is not reinterpreted; it comes through as its
    // raw digits and later evaluates as an unparseable (missing) date.
    let sheet = sheet_xml(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t>name</t></is></c><c r="B1" t="inlineStr"><is><t>sdsDate</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>Old stock</t></is></c><c r="B2"><v>44910</v></c></row>"#,
    );
    let decoded = decode_workbook(&sheet).expect("decode");
    assert_eq!(decoded[0].sds_date.as_deref(), Some("44910"));
}

#[test]
fn malformed_sheet_xml_fails() {
    let sheet = sheet_xml("<row r=\"1\"><c r=\"A1\"");
    let err = decode_workbook(&sheet).unwrap_err();
    assert!(matches!(err, XlsxError::InvalidXml { .. }), "{err}");
}

#[test]
fn header_row_and_columns_match_export_convention() {
    assert_eq!(COLUMNS, ["name", "producer", "sdsDate", "link", "notes", "ghs"]);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn field() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[ -~]{0,24}").unwrap()
    }

    fn substance() -> impl Strategy<Value = Substance> {
        (
            // A non-empty name keeps the row from being skipped as blank.
            proptest::string::string_regex("[ -~]{1,24}").unwrap(),
            field(),
            proptest::option::of(
                proptest::string::string_regex("[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap(),
            ),
            field(),
            field(),
            proptest::collection::vec(
                proptest::string::string_regex("[A-Z0-9]{1,6}").unwrap(),
                0..4,
            ),
        )
            .prop_map(|(name, producer, sds_date, link, notes, ghs)| Substance {
                name,
                producer,
                sds_date,
                link,
                notes,
                ghs,
            })
    }

    proptest! {
        #[test]
        fn any_register_roundtrips(records in proptest::collection::vec(substance(), 0..8)) {
            let bytes = encode_workbook(&records).unwrap();
            let decoded = decode_workbook(&bytes).unwrap();
            prop_assert_eq!(decoded, records);
        }
    }
}

// --- helpers -------------------------------------------------------------

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="SDS" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// A ZIP container holding exactly the given parts.
fn archive_with_parts(parts: &[(&str, &str)]) -> Vec<u8> {
    use std::io::Write;
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(*name, zip::write::SimpleFileOptions::default())
            .expect("start part");
        zip.write_all(content.as_bytes()).expect("write part");
    }
    zip.finish().expect("finish archive").into_inner()
}

/// A workbook whose sheet grid is the given inline-string rows, addressed
/// by cell reference.
fn sheet_with_rows(rows: &[Vec<(&str, &str)>]) -> Vec<u8> {
    let mut grid = String::new();
    for (index, cells) in rows.iter().enumerate() {
        grid.push_str(&format!("<row r=\"{}\">", index + 1));
        for (reference, text) in cells {
            grid.push_str(&format!(
                "<c r=\"{reference}\" t=\"inlineStr\"><is><t>{text}</t></is></c>"
            ));
        }
        grid.push_str("</row>");
    }
    sheet_xml(&grid)
}

/// A full workbook archive around the given `<sheetData>` body.
fn sheet_xml(grid: &str) -> Vec<u8> {
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>{grid}</sheetData>
</worksheet>"#
    );
    archive_with_parts(&[
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}
