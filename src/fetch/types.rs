//! Fetch result types

use crate::types::JsonValue;

/// Collection keys a page body may carry, checked in order
const COLLECTION_KEYS: [&str; 3] = ["products", "users", "carts"];

/// Pull the item array out of a page body.
///
/// The source API nests each page's items under its entity name
/// (`products`, `users`, or `carts`); the first key present wins.
/// Returns an empty slice-equivalent when none match.
pub fn extract_page_items(body: &JsonValue) -> Vec<JsonValue> {
    for key in COLLECTION_KEYS {
        if let Some(items) = body.get(key).and_then(JsonValue::as_array) {
            return items.clone();
        }
    }
    Vec::new()
}

/// Outcome of a paginated fetch.
///
/// A fetch that hits an HTTP failure after per-page retries keeps the
/// pages accumulated so far and records the reason here instead of
/// discarding them; the caller decides whether partial data is usable.
#[derive(Debug)]
pub struct FetchOutcome {
    /// All items, in API response order, pages concatenated
    pub items: Vec<JsonValue>,
    /// Number of pages fetched
    pub pages: u32,
    /// The `total` count the API reported (0 if absent)
    pub total_reported: u64,
    /// Reason the fetch stopped early, if it did
    pub interrupted: Option<String>,
}

impl FetchOutcome {
    /// True when the fetch ran to a natural stop
    pub fn is_complete(&self) -> bool {
        self.interrupted.is_none()
    }
}
