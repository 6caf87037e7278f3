//! Paginated API fetcher
//!
//! Issues repeated limit/skip GET requests against one entity collection
//! endpoint until the reported total is reached or a page comes back
//! empty. Pages are concatenated in increasing-skip order.

mod fetcher;
mod types;

pub use fetcher::PaginationFetcher;
pub use types::{extract_page_items, FetchOutcome};
