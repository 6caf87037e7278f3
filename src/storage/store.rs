//! Blob store over object_store (S3, GCS, Azure, local)

use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::sync::Arc;
use tracing::info;

/// Blob store parsed from a bucket URL
#[derive(Debug, Clone)]
pub struct BlobStore {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Base path prefix within the bucket/container
    prefix: String,
    /// Original URL scheme for logging
    scheme: String,
}

impl BlobStore {
    /// Parse a bucket URL and create the appropriate object store
    ///
    /// Supported formats:
    /// - `s3://bucket/path/` - AWS S3
    /// - `gs://bucket/path/` - Google Cloud Storage
    /// - `az://container/path/` - Azure Blob Storage
    /// - `/local/path/` or `./path/` - Local filesystem
    pub fn parse(url: &str) -> Result<Self> {
        if url.starts_with("s3://") {
            Self::parse_s3(url)
        } else if url.starts_with("gs://") {
            Self::parse_gcs(url)
        } else if url.starts_with("az://") {
            Self::parse_azure(url)
        } else {
            Self::parse_local(url)
        }
    }

    /// Split a full blob URL (`gs://bucket/cleanse/users.csv`) into a
    /// store for the bucket and the blob path within it
    pub fn parse_blob_url(url: &str) -> Result<(Self, String)> {
        for scheme in ["s3", "gs", "az"] {
            let scheme_prefix = format!("{scheme}://");
            if let Some(rest) = url.strip_prefix(&scheme_prefix) {
                let (bucket, blob) = rest.split_once('/').ok_or_else(|| {
                    Error::storage(format!("Blob URL has no object path: {url}"))
                })?;
                let store = Self::parse(&format!("{scheme_prefix}{bucket}"))?;
                return Ok((store, blob.to_string()));
            }
        }

        // Local path: treat the parent directory as the store
        let path = std::path::Path::new(url);
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::storage(format!("Cannot derive store from path: {url}")))?;
        let file = path
            .file_name()
            .ok_or_else(|| Error::storage(format!("Blob URL has no file name: {url}")))?;
        let store = Self::parse(&parent.to_string_lossy())?;
        Ok((store, file.to_string_lossy().to_string()))
    }

    /// Parse S3 URL
    fn parse_s3(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("s3://")
            .ok_or_else(|| Error::config(format!("Invalid s3 URL: {url}")))?;

        let (bucket, prefix) = split_bucket(without_scheme);

        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create s3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "s3".to_string(),
        })
    }

    /// Parse GCS URL
    fn parse_gcs(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("gs://")
            .ok_or_else(|| Error::config(format!("Invalid GCS URL: {url}")))?;

        let (bucket, prefix) = split_bucket(without_scheme);

        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| Error::config(format!("Failed to create GCS client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "gs".to_string(),
        })
    }

    /// Parse Azure Blob URL
    fn parse_azure(url: &str) -> Result<Self> {
        let without_scheme = url
            .strip_prefix("az://")
            .ok_or_else(|| Error::config(format!("Invalid Azure URL: {url}")))?;

        let (container, prefix) = split_bucket(without_scheme);

        let store = MicrosoftAzureBuilder::from_env()
            .with_container_name(container)
            .build()
            .map_err(|e| Error::config(format!("Failed to create Azure client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix,
            scheme: "az".to_string(),
        })
    }

    /// Parse local filesystem path
    fn parse_local(path: &str) -> Result<Self> {
        let path = path.strip_prefix("file://").unwrap_or(path);

        std::fs::create_dir_all(path)
            .map_err(|e| Error::config(format!("Failed to create directory {path}: {e}")))?;

        let store = LocalFileSystem::new_with_prefix(path)
            .map_err(|e| Error::config(format!("Failed to create local store: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            prefix: String::new(),
            scheme: "file".to_string(),
        })
    }

    /// Check if this is a cloud destination (not local)
    pub fn is_cloud(&self) -> bool {
        self.scheme != "file"
    }

    /// Get the scheme (s3, gs, az, file)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Write bytes to a blob, overwriting any existing object at the path
    pub async fn put_bytes(&self, path: &str, data: Bytes) -> Result<String> {
        let object_path = self.object_path(path);

        self.store
            .put(&object_path, data.into())
            .await
            .map_err(|e| Error::storage(format!("Failed to write {object_path}: {e}")))?;

        let full_path = format!("{}://{object_path}", self.scheme);
        info!("Wrote blob {full_path}");
        Ok(full_path)
    }

    /// Read a blob as UTF-8 text
    pub async fn get_text(&self, path: &str) -> Result<String> {
        let object_path = self.object_path(path);

        let result = self
            .store
            .get(&object_path)
            .await
            .map_err(|e| match e {
                object_store::Error::NotFound { .. } => Error::BlobNotFound {
                    path: object_path.to_string(),
                },
                other => Error::storage(format!("Failed to read {object_path}: {other}")),
            })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| Error::storage(format!("Failed to read {object_path}: {e}")))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|e| Error::storage(format!("Blob {object_path} is not UTF-8: {e}")))
    }

    /// Resolve a relative blob path against the store prefix
    fn object_path(&self, path: &str) -> ObjectPath {
        if self.prefix.is_empty() {
            ObjectPath::from(path)
        } else {
            ObjectPath::from(format!("{}/{path}", self.prefix.trim_end_matches('/')))
        }
    }
}

/// Split `bucket/prefix` into its two parts
pub(super) fn split_bucket(without_scheme: &str) -> (&str, String) {
    match without_scheme.find('/') {
        Some(idx) => (
            &without_scheme[..idx],
            without_scheme[idx + 1..].to_string(),
        ),
        None => (without_scheme, String::new()),
    }
}
