//! Lazy paged retrieval of raw records.

use crate::error::Result;
use crate::record::Record;
use crate::store::{StoreConnection, StoreQuery};
use async_stream::try_stream;
use futures::Stream;

/// Returns a lazy, finite sequence of raw records for `query`, fetching
/// `page_size` records per store round trip and requesting the next page
/// transparently once the current one is exhausted.
///
/// The total size is bounded but unknown in advance. A store failure
/// terminates the stream with the error; a zero-result query yields an
/// empty stream.
pub fn records<'a>(
    connection: &'a dyn StoreConnection,
    query: &'a StoreQuery,
    page_size: u64,
) -> impl Stream<Item = Result<Record>> + 'a {
    try_stream! {
        let page_size = page_size.max(1);
        let mut offset = 0u64;
        loop {
            tracing::debug!(offset, page_size, "fetching record page");
            let page = connection.fetch_page(query, offset, page_size).await?;
            let fetched = page.len() as u64;
            for record in page {
                yield record;
            }
            if fetched < page_size {
                break;
            }
            offset += fetched;
        }
    }
}
