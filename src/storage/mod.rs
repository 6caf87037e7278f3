//! Object storage blob layer
//!
//! One `BlobStore` per bucket/container; the pipeline keeps two
//! namespaces inside it: `raw/` (NDJSON) and `cleanse/` (CSV).

mod store;

pub use store::BlobStore;

#[cfg(test)]
mod tests;
