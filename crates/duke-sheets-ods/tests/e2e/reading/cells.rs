//! Tests for decoding rows and cells through a full package.

use pretty_assertions::assert_eq;

use crate::{cell, content_xml, ods_bytes, row};
use duke_sheets_ods::{EmptyCells, ErrorKind, OdsReadOptions, OdsReader, Strictness, Table};

fn read(rows: &str, options: &OdsReadOptions) -> Result<Table, duke_sheets_ods::OdsError> {
    OdsReader::read(ods_bytes(&content_xml(rows)).as_slice(), options)
}

#[test]
fn test_repeat_count_expands_cells() {
    let rows = row(&[cell("T", Some("5")), cell("end", None)]);
    let table = read(&rows, &OdsReadOptions::default()).unwrap();
    assert_eq!(table, vec![vec!["T", "T", "T", "T", "T", "end"]]);
}

#[test]
fn test_multiple_paragraphs_joined() {
    let rows = r#"<table:table-row><table:table-cell office:value-type="string"><text:p>first line</text:p><text:p>second line</text:p></table:table-cell></table:table-row>"#;
    let table = read(rows, &OdsReadOptions::default()).unwrap();
    assert_eq!(table.cell(0, 0), Some("first line second line"));
}

#[test]
fn test_values_read_as_text() {
    let rows = r#"<table:table-row><table:table-cell office:value-type="float" office:value="1234.5"><text:p>1,234.50</text:p></table:table-cell><table:table-cell office:value-type="date" office:date-value="2024-01-31"><text:p>01/31/24</text:p></table:table-cell><table:table-cell table:formula="of:=[.A1]*2" office:value-type="float" office:value="2469"><text:p>2469</text:p></table:table-cell></table:table-row>"#;
    let table = read(rows, &OdsReadOptions::default()).unwrap();
    assert_eq!(table, vec![vec!["1,234.50", "01/31/24", "2469"]]);
}

#[test]
fn test_blank_rows_vanish() {
    let rows = [
        row(&[cell("header", None)]),
        r#"<table:table-row table:number-rows-repeated="3"><table:table-cell table:number-columns-repeated="3"/></table:table-row>"#.to_string(),
        row(&[cell("body", None)]),
    ]
    .concat();
    let table = read(&rows, &OdsReadOptions::default()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table, vec![vec!["header"], vec!["body"]]);
}

#[test]
fn test_sheets_read_into_one_table() {
    let xml = content_xml(&format!(
        "{}</table:table><table:table table:name=\"Sheet2\">{}",
        row(&[cell("one", None)]),
        row(&[cell("two", None)])
    ));
    let table = OdsReader::read(ods_bytes(&xml).as_slice(), &OdsReadOptions::default()).unwrap();
    assert_eq!(table, vec![vec!["one"], vec!["two"]]);
}

#[test]
fn test_padding_keeps_columns_aligned() {
    let rows = [
        row(&[cell("a", None), cell("b", None), cell("c", None)]),
        r#"<table:table-row><table:table-cell><text:p>d</text:p></table:table-cell><table:table-cell/><table:table-cell><text:p>f</text:p></table:table-cell><table:table-cell table:number-columns-repeated="1021"/></table:table-row>"#.to_string(),
        row(&[cell("g", None)]),
    ]
    .concat();

    let skipped = read(&rows, &OdsReadOptions::default()).unwrap();
    assert_eq!(skipped, vec![vec!["a", "b", "c"], vec!["d", "f"], vec!["g"]]);

    let options = OdsReadOptions::default().with_empty_cells(EmptyCells::Pad);
    let padded = read(&rows, &options).unwrap();
    assert_eq!(
        padded,
        vec![vec!["a", "b", "c"], vec!["d", "", "f"], vec!["g", "", ""]]
    );
    assert!(padded.is_rectangular());
    assert_eq!(padded.width(), 3);
}

#[test]
fn test_bad_repeat_returns_no_table() {
    let rows = [
        row(&[cell("fine", None)]),
        row(&[cell("A", Some("x"))]),
    ]
    .concat();
    let err = read(&rows, &OdsReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(err.to_string().contains("\"x\""));
}

#[test]
fn test_malformed_content_strictness() {
    let xml = format!(
        "{}<table:table-row><table:table-cell><text:p>cut",
        content_xml(&row(&[cell("kept", None)]))
            .split("</table:table>")
            .next()
            .unwrap()
    );
    let data = ods_bytes(&xml);

    let err = OdsReader::read(data.as_slice(), &OdsReadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let options = OdsReadOptions::default().with_strictness(Strictness::Lenient);
    let table = OdsReader::read(data.as_slice(), &options).unwrap();
    assert_eq!(table, vec![vec!["kept"]]);
}
