//! Tests for the blob store

use super::*;
use bytes::Bytes;

#[test]
fn test_parse_local_path() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().to_str().unwrap();
    let store = BlobStore::parse(path).unwrap();
    assert_eq!(store.scheme(), "file");
    assert!(!store.is_cloud());
}

#[test]
fn test_split_bucket() {
    assert_eq!(
        store::split_bucket("analytics/layers/raw"),
        ("analytics", "layers/raw".to_string())
    );
    assert_eq!(store::split_bucket("analytics"), ("analytics", String::new()));
}

#[tokio::test]
async fn test_put_and_get_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = BlobStore::parse(temp_dir.path().to_str().unwrap()).unwrap();

    store
        .put_bytes("raw/users.json", Bytes::from_static(b"{\"id\":1}\n"))
        .await
        .unwrap();

    let text = store.get_text("raw/users.json").await.unwrap();
    assert_eq!(text, "{\"id\":1}\n");
}

#[tokio::test]
async fn test_put_overwrites_existing_blob() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = BlobStore::parse(temp_dir.path().to_str().unwrap()).unwrap();

    store
        .put_bytes("cleanse/products.csv", Bytes::from_static(b"old"))
        .await
        .unwrap();
    store
        .put_bytes("cleanse/products.csv", Bytes::from_static(b"new"))
        .await
        .unwrap();

    let text = store.get_text("cleanse/products.csv").await.unwrap();
    assert_eq!(text, "new");
}

#[tokio::test]
async fn test_get_missing_blob() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = BlobStore::parse(temp_dir.path().to_str().unwrap()).unwrap();

    let err = store.get_text("raw/absent.json").await.unwrap_err();
    assert!(matches!(err, crate::error::Error::BlobNotFound { .. }));
}

#[tokio::test]
async fn test_parse_blob_url_local() {
    let temp_dir = tempfile::tempdir().unwrap();
    let base = temp_dir.path().join("cleanse");
    std::fs::create_dir_all(&base).unwrap();
    std::fs::write(base.join("users.csv"), "a,b\n").unwrap();

    let url = base.join("users.csv");
    let (store, blob) = BlobStore::parse_blob_url(url.to_str().unwrap()).unwrap();
    assert_eq!(blob, "users.csv");
    assert_eq!(store.get_text(&blob).await.unwrap(), "a,b\n");
}

#[test]
fn test_parse_blob_url_cloud_requires_object_path() {
    let err = BlobStore::parse_blob_url("gs://bucket-only").unwrap_err();
    assert!(err.to_string().contains("no object path"));
}
