//! Common test fixtures: an in-memory store connection and series builders.

#![allow(dead_code)]

use async_trait::async_trait;
use chunkstream_core::{
    schema, Error, Point, Record, Result, Series, SeriesCodec, StoreConnection, StoreQuery,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory store with page-serving reads, failure injection, and batch
/// accounting.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<Record>,
    fail_fetch: bool,
    reject_batch: Option<usize>,
    fetch_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    accepted: Mutex<Vec<Vec<Record>>>,
}

impl MemoryStore {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A store whose every fetch fails.
    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    /// A store that rejects the n-th submitted batch (1-based).
    pub fn rejecting_batch(index: usize) -> Self {
        Self {
            reject_batch: Some(index),
            ..Self::default()
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of batch submissions the store observed, accepted or not.
    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn accepted_batches(&self) -> Vec<Vec<Record>> {
        self.accepted.lock().unwrap().clone()
    }
}

#[async_trait]
impl StoreConnection for MemoryStore {
    async fn fetch_page(
        &self,
        _query: &StoreQuery,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Record>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(Error::Store("injected fetch failure".to_string()));
        }
        let start = (offset as usize).min(self.records.len());
        let end = (start + limit as usize).min(self.records.len());
        Ok(self.records[start..end].to_vec())
    }

    async fn add_batch(&self, records: Vec<Record>) -> Result<()> {
        let submitted = self.submit_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.reject_batch == Some(submitted) {
            return Err(Error::Store("injected batch rejection".to_string()));
        }
        self.accepted.lock().unwrap().push(records);
        Ok(())
    }
}

/// Builds a series with a `metric` attribute and the given points.
pub fn series(metric: &str, points: &[(i64, f64)]) -> Series {
    let mut series = Series::new();
    series.set_attribute(schema::METRIC, metric);
    for (timestamp, value) in points {
        series.push_point(Point::new(*timestamp, *value));
    }
    series
}

/// Encodes the fragments into store records, in order.
pub fn encode_all(codec: &dyn SeriesCodec, fragments: &[Series]) -> Vec<Record> {
    fragments
        .iter()
        .map(|s| codec.encode(s).expect("fixture encode"))
        .collect()
}
