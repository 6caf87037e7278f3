//! The limit/skip pagination loop

use super::types::{extract_page_items, FetchOutcome};
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::JsonValue;
use std::time::Duration;
use tracing::{info, warn};

/// Fetches a whole collection through limit/skip pagination.
///
/// Each page request goes through the client's bounded retry; a failure
/// that survives the retries ends the fetch, and the pages already
/// accumulated are returned rather than discarded.
pub struct PaginationFetcher {
    client: HttpClient,
    page_size: u32,
    page_delay: Duration,
}

impl PaginationFetcher {
    /// Create a fetcher with the default page size (30) and delay (500ms)
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            page_size: 30,
            page_delay: Duration::from_millis(500),
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the inter-page delay
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Fetch every page of `base_url`, concatenated in skip order.
    ///
    /// Stops when a page yields zero items, when the accumulated count
    /// reaches the API's reported `total`, or when a page request fails
    /// after retries (partial results kept, reason recorded).
    pub async fn fetch_all(&self, base_url: &str) -> Result<FetchOutcome> {
        let mut items: Vec<JsonValue> = Vec::new();
        let mut skip: u64 = 0;
        let mut pages: u32 = 0;
        let mut total_reported: u64 = 0;
        let mut interrupted = None;

        loop {
            let request = RequestConfig::new()
                .query("limit", self.page_size.to_string())
                .query("skip", skip.to_string());

            let body: JsonValue = match self.client.get_json_with_config(base_url, request).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        "Fetch from {base_url} stopped at skip={skip} after retries: {e}"
                    );
                    interrupted = Some(e.to_string());
                    break;
                }
            };

            pages += 1;
            let page_items = extract_page_items(&body);
            if page_items.is_empty() {
                break;
            }

            items.extend(page_items);
            total_reported = body.get("total").and_then(JsonValue::as_u64).unwrap_or(0);
            if items.len() as u64 >= total_reported {
                break;
            }

            skip += u64::from(self.page_size);
            info!("Fetched {} items so far from {base_url}", items.len());
            tokio::time::sleep(self.page_delay).await;
        }

        info!(
            "Total items fetched from {base_url}: {} ({pages} pages)",
            items.len()
        );

        Ok(FetchOutcome {
            items,
            pages,
            total_reported,
            interrupted,
        })
    }
}
