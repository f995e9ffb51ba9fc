//! Store connection seam.
//!
//! The document store, its query language, timeouts, and retries all live
//! behind [`StoreConnection`]; this core only drives paged fetches and batch
//! submissions against it.

use crate::error::Result;
use crate::record::Record;
use async_trait::async_trait;

/// An opaque store query. The engine never interprets the expression; it is
/// owned by the connection implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreQuery {
    pub expression: String,
}

impl StoreQuery {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }
}

/// Connection to the external document store.
///
/// Each `fetch_page` call is one blocking round trip; the engine awaits pages
/// strictly sequentially and never retries a failed call.
#[async_trait]
pub trait StoreConnection: Send + Sync {
    /// Fetches up to `limit` records matching `query`, starting at `offset`
    /// in store-defined order. A short or empty page marks the end of the
    /// result set.
    async fn fetch_page(&self, query: &StoreQuery, offset: u64, limit: u64)
        -> Result<Vec<Record>>;

    /// Submits one batch of encoded records. An error rejects the whole
    /// batch; previously accepted batches stay committed.
    async fn add_batch(&self, records: Vec<Record>) -> Result<()>;
}
