//! Tests for the raw-layer writer

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_envelope_shape() {
    let item = json!({"id": 7, "title": "Widget"});
    let wrapped = envelope(&item, "2024-01-01T00:00:00");

    assert_eq!(
        wrapped["metadata"]["extraction_timestamp"],
        "2024-01-01T00:00:00"
    );
    assert_eq!(wrapped["data"]["id"], 7);
    assert_eq!(wrapped["data"]["title"], "Widget");
}

#[test]
fn test_encode_ndjson_one_line_per_item() {
    let items = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
    let ndjson = encode_ndjson(&items, "2024-01-01T00:00:00").unwrap();

    let lines: Vec<&str> = ndjson.lines().collect();
    assert_eq!(lines.len(), 3);
    for (i, line) in lines.iter().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["data"]["id"], (i + 1) as u64);
        // Every line carries the same run timestamp
        assert_eq!(
            parsed["metadata"]["extraction_timestamp"],
            "2024-01-01T00:00:00"
        );
    }
}

#[test]
fn test_encode_ndjson_empty() {
    let ndjson = encode_ndjson(&[], "2024-01-01T00:00:00").unwrap();
    assert!(ndjson.is_empty());
}

#[test]
fn test_extraction_timestamp_is_iso8601() {
    let ts = extraction_timestamp();
    assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
}

#[tokio::test]
async fn test_raw_writer_overwrites_blob() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = crate::storage::BlobStore::parse(temp_dir.path().to_str().unwrap()).unwrap();
    let writer = RawWriter::new(store.clone());

    writer
        .write(crate::types::EntityKind::Users, &[json!({"id": 1})])
        .await
        .unwrap();
    writer
        .write(crate::types::EntityKind::Users, &[json!({"id": 2})])
        .await
        .unwrap();

    let text = store.get_text("raw/users.json").await.unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(parsed["data"]["id"], 2);
}
