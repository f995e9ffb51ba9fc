//! Batched, fail-fast write path.

use crate::codec::SeriesCodec;
use crate::error::Result;
use crate::series::Series;
use crate::store::StoreConnection;

/// Encodes the series and submits them to the store in sequential batches
/// of at most `batch_size` records.
///
/// The first batch the store rejects aborts submission of the remaining
/// batches and the call resolves to `Ok(false)`; batches accepted before the
/// failure stay committed. `Ok(true)` means every batch was accepted. An
/// encode failure is an `Err` — nothing is submitted for a collection that
/// cannot be fully encoded.
pub async fn add(
    codec: &dyn SeriesCodec,
    connection: &dyn StoreConnection,
    series: &[Series],
    batch_size: usize,
) -> Result<bool> {
    let mut encoded = Vec::with_capacity(series.len());
    for s in series {
        encoded.push(codec.encode(s)?);
    }

    let batch_size = batch_size.max(1);
    let mut submitted = 0usize;
    for batch in encoded.chunks(batch_size) {
        if let Err(err) = connection.add_batch(batch.to_vec()).await {
            tracing::warn!(
                submitted,
                remaining = encoded.len() - submitted,
                "write batch rejected, aborting remaining batches: {}",
                err
            );
            return Ok(false);
        }
        submitted += batch.len();
    }
    tracing::debug!(submitted, "all write batches accepted");
    Ok(true)
}
