//! File-level tests for `read_listings`.
//!
//! Each test writes its fixture under the system temp dir with a name unique
//! to the test and process, and removes it afterwards.

use std::path::PathBuf;

use pricematch_ingest::{read_listings, IngestError};
use rust_decimal::Decimal;

fn fixture(name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "pricematch-ingest-{}-{name}",
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("failed to write fixture");
    path
}

#[test]
fn reads_spider_jsonl_export() {
    let path = fixture(
        "laptopclinic.jsonl",
        concat!(
            r#"{"source": "laptopclinic", "title": "Dell Latitude 5420 16GB 512GB SSD 14 inch", "price": 80000, "url": "https://lc/5420"}"#,
            "\n",
            r#"{"source": "laptopclinic", "title": "HP EliteBook 840 G5", "price": "KSh 45,000", "url": "https://lc/840"}"#,
            "\n",
        ),
    );

    let batch = read_listings(&path, "laptopclinic").unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(batch.records.len(), 2);
    assert_eq!(batch.records[0].price, Decimal::from(80000));
    assert_eq!(batch.records[1].price, Decimal::from(45000));
}

#[test]
fn reads_magento_payload_with_default_source() {
    let path = fixture(
        "masoko.json",
        r#"[{"items": [{"name": "Lenovo ThinkPad T14 Core i5 16GB", "price": {"value": 98000}, "url_key": "t14"}]}]"#,
    );

    let batch = read_listings(&path, "masoko").unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(batch.records.len(), 1);
    let record = &batch.records[0];
    assert_eq!(record.source, "masoko");
    assert_eq!(record.title, "Lenovo ThinkPad T14 Core i5 16GB");
    assert_eq!(record.url, "t14");
    assert_eq!(record.price, Decimal::from(98000));
}

#[test]
fn missing_file_names_the_path() {
    let err = read_listings(
        std::path::Path::new("/nonexistent/pricematch/jumia.jsonl"),
        "jumia",
    )
    .unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/pricematch/jumia.jsonl"));
}

#[test]
fn malformed_array_names_the_path() {
    let path = fixture("broken.json", "[{\"title\": \"HP\", ");
    let err = read_listings(&path, "jumia").unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, IngestError::Malformed { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn invalid_utf8_line_is_skipped_not_fatal() {
    let mut contents = Vec::new();
    contents.extend_from_slice(br#"{"title": "HP 250 G8", "price": 35000}"#);
    contents.push(b'\n');
    contents.extend_from_slice(b"{\"title\": \"Dell \xff\xfe Vostro\", \"price\": 1}");
    contents.push(b'\n');
    contents.extend_from_slice(br#"{"title": "Lenovo IdeaPad 3", "price": 52000}"#);
    contents.push(b'\n');
    let path = fixture("latin1.jsonl", contents);

    let batch = read_listings(&path, "jumia").unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(batch.skipped_lines, 1);
    let titles: Vec<&str> = batch.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["HP 250 G8", "Lenovo IdeaPad 3"]);
}

#[test]
fn invalid_utf8_array_names_the_path() {
    let path = fixture("latin1.json", b"[{\"title\": \"HP \xff\"}]");
    let err = read_listings(&path, "jumia").unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, IngestError::Encoding { .. }));
    assert!(err.to_string().contains("latin1.json"));
}
