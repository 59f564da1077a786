//! Tests for package validation and content extraction.

use std::io::Read;

use crate::{content_xml, ods_bytes, temp_ods, zip_bytes};
use duke_sheets_ods::{ErrorKind, OdsError, OdsPackage, OdsReadOptions, OdsReader, MIMETYPE};

#[test]
fn test_open_path_and_decode() {
    let xml = content_xml(
        r#"<table:table-row><table:table-cell table:number-columns-repeated="2"><text:p>A</text:p></table:table-cell><table:table-cell><text:p>B</text:p></table:table-cell></table:table-row>"#,
    );
    let file = temp_ods(&ods_bytes(&xml));

    let content = OdsReader::open(file.path()).expect("open ods");
    let table = OdsReader::decode(content).expect("decode");

    assert_eq!(table, vec![vec!["A", "A", "B"]]);
}

#[test]
fn test_read_file_matches_open_then_decode() {
    let xml = content_xml(
        r#"<table:table-row><table:table-cell><text:p>x</text:p></table:table-cell></table:table-row>"#,
    );
    let file = temp_ods(&ods_bytes(&xml));

    let direct = OdsReader::read_file(file.path(), &OdsReadOptions::default()).unwrap();
    let stepwise = OdsReader::decode(OdsReader::open(file.path()).unwrap()).unwrap();
    assert_eq!(direct, stepwise);
}

#[test]
fn test_open_from_reader_and_bytes() {
    let data = ods_bytes(&content_xml(""));

    let mut from_reader = String::new();
    OdsReader::open_reader(data.as_slice())
        .unwrap()
        .read_to_string(&mut from_reader)
        .unwrap();

    let mut from_bytes = String::new();
    OdsReader::open_bytes(data.clone())
        .unwrap()
        .read_to_string(&mut from_bytes)
        .unwrap();

    assert_eq!(from_reader, from_bytes);
    assert!(from_reader.contains("office:spreadsheet"));
}

#[test]
fn test_wrong_mimetype_rejected() {
    let data = zip_bytes(&[
        ("mimetype", b"text/plain"),
        ("content.xml", content_xml("").as_bytes()),
    ]);

    let err = OdsReader::open_bytes(data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    let message = err.to_string();
    assert!(message.contains("text/plain"), "message: {message}");
    assert!(message.contains(MIMETYPE), "message: {message}");
}

#[test]
fn test_missing_mimetype_rejected() {
    let data = zip_bytes(&[("content.xml", content_xml("").as_bytes())]);

    let err = OdsReader::open_bytes(data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("mimetype"));
}

#[test]
fn test_missing_content_rejected() {
    let data = zip_bytes(&[("mimetype", MIMETYPE.as_bytes())]);

    let err = OdsReader::open_bytes(data).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.to_string().contains("content.xml"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = OdsReader::open(dir.path().join("absent.ods")).unwrap_err();
    assert!(matches!(err, OdsError::Io(_)));
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_not_an_archive() {
    let err = OdsReader::open_bytes(b"<html>not a spreadsheet</html>".to_vec()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_package_entries_listed() {
    let package = OdsPackage::from_bytes(ods_bytes(&content_xml(""))).unwrap();
    let mut names: Vec<&str> = package.entry_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec!["META-INF/manifest.xml", "content.xml", "mimetype", "styles.xml"]
    );
}

#[test]
fn test_read_other_entry() {
    let mut package = OdsPackage::from_bytes(ods_bytes(&content_xml(""))).unwrap();
    let styles = package.read_entry("styles.xml").unwrap();
    assert_eq!(styles, b"<office:document-styles/>");

    let err = package.read_entry("settings.xml").unwrap_err();
    assert!(matches!(err, OdsError::MissingPart(ref name) if name == "settings.xml"));
}
