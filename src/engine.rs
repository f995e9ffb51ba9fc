//! Engine façade wiring retrieval, grouping, merging, analysis, and writes.
//!
//! [`SeriesStorage`] is stateless across queries: every call takes the codec
//! and the store connection as collaborators and leaves all persistence to
//! the store. Grouping forces full materialization of one query's fragment
//! set before any merge begins, which bounds query size by available memory.

use crate::analysis::AnalysisRequest;
use crate::assemble;
use crate::codec::SeriesCodec;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::group::{self, KeyFn};
use crate::merge::{self, MergeFn};
use crate::record::Record;
use crate::series::Series;
use crate::store::{StoreConnection, StoreQuery};
use crate::stream;
use futures::StreamExt;
use std::sync::Arc;

/// Reconstructs logical time series from chunked records and evaluates
/// analyses over them.
pub struct SeriesStorage {
    page_size: u64,
    batch_size: usize,
    group_by: KeyFn,
    reduce: MergeFn,
}

impl SeriesStorage {
    /// Creates a storage engine with explicit grouping and merge strategies.
    pub fn new(config: &EngineConfig, group_by: KeyFn, reduce: MergeFn) -> Self {
        Self {
            page_size: config.page_size,
            batch_size: config.batch_size,
            group_by,
            reduce,
        }
    }

    /// Creates a storage engine with the default strategies: metric-attribute
    /// grouping and point-append merging.
    pub fn with_defaults(config: &EngineConfig) -> Self {
        Self::new(config, group::metric_key(), merge::append())
    }

    /// Plain read path: one merged series per group, decoded without a
    /// window bound. Merging happens lazily as the iterator is consumed.
    pub async fn stream(
        &self,
        codec: &dyn SeriesCodec,
        connection: &dyn StoreConnection,
        query: &StoreQuery,
    ) -> Result<impl Iterator<Item = Series>> {
        let fragments = self
            .fetch_fragments(codec, connection, query, i64::MIN, i64::MAX)
            .await?;
        let groups = group::collect(fragments, &self.group_by);
        let reduce = Arc::clone(&self.reduce);
        Ok(groups
            .into_values()
            .filter_map(move |fragments| merge::reduce(fragments, &reduce)))
    }

    /// Analysis read path: zero-or-one result record per group, subject to
    /// the high-level suppression rule. The request is validated before any
    /// record is fetched.
    pub async fn analyze(
        &self,
        codec: &dyn SeriesCodec,
        connection: &dyn StoreConnection,
        query: &StoreQuery,
        request: &AnalysisRequest,
        query_start: i64,
        query_end: i64,
    ) -> Result<Vec<Record>> {
        request.validate()?;

        let fragments = self
            .fetch_fragments(codec, connection, query, query_start, query_end)
            .await?;
        let groups = group::collect(fragments, &self.group_by);

        let mut results = Vec::with_capacity(groups.len());
        for (key, group_fragments) in groups {
            let Some(series) = merge::reduce(group_fragments, &self.reduce) else {
                continue;
            };
            let outcome = request.evaluate(&series, query_start, query_end)?;
            if let Some(record) =
                assemble::build_result(codec, &series, &key, Some((request, outcome)))?
            {
                results.push(record);
            }
        }
        Ok(results)
    }

    /// Write path: encodes the series and submits them in batches of at most
    /// the configured batch size. See [`crate::writer::add`] for the
    /// fail-fast contract.
    pub async fn add(
        &self,
        codec: &dyn SeriesCodec,
        connection: &dyn StoreConnection,
        series: &[Series],
    ) -> Result<bool> {
        crate::writer::add(codec, connection, series, self.batch_size).await
    }

    async fn fetch_fragments(
        &self,
        codec: &dyn SeriesCodec,
        connection: &dyn StoreConnection,
        query: &StoreQuery,
        start: i64,
        end: i64,
    ) -> Result<Vec<Series>> {
        tracing::debug!(query = %query.expression, "streaming records from store");
        let records = stream::records(connection, query, self.page_size);
        futures::pin_mut!(records);

        let mut fragments = Vec::new();
        while let Some(record) = records.next().await {
            fragments.push(codec.decode(&record?, start, end)?);
        }
        Ok(fragments)
    }
}
