//! Write path: batching and the fail-fast contract.

mod common;

use chunkstream_core::{writer, BinaryCodec, EngineConfig, SeriesStorage};
use common::{series, MemoryStore};

fn fragments(count: usize) -> Vec<chunkstream_core::Series> {
    (0..count)
        .map(|i| series(&format!("metric-{}", i), &[(i as i64, i as f64)]))
        .collect()
}

#[tokio::test]
async fn a_rejected_batch_aborts_the_remaining_ones() {
    let codec = BinaryCodec;
    let store = MemoryStore::rejecting_batch(2);

    let ok = writer::add(&codec, &store, &fragments(4), 2).await.unwrap();

    assert!(!ok);
    // The second rejection aborts batches three and four.
    assert_eq!(store.submit_calls(), 2);
    assert_eq!(store.accepted_batches().len(), 1);
}

#[tokio::test]
async fn all_batches_accepted_reports_success() {
    let codec = BinaryCodec;
    let store = MemoryStore::new(Vec::new());

    let ok = writer::add(&codec, &store, &fragments(5), 2).await.unwrap();

    assert!(ok);
    let sizes: Vec<usize> = store.accepted_batches().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![2, 2, 1]);
}

#[tokio::test]
async fn an_empty_collection_is_a_successful_no_op() {
    let codec = BinaryCodec;
    let store = MemoryStore::new(Vec::new());

    let ok = writer::add(&codec, &store, &[], 2).await.unwrap();

    assert!(ok);
    assert_eq!(store.submit_calls(), 0);
}

#[tokio::test]
async fn the_engine_uses_the_configured_batch_size() {
    let codec = BinaryCodec;
    let store = MemoryStore::new(Vec::new());
    let storage = SeriesStorage::with_defaults(&EngineConfig {
        page_size: 10,
        batch_size: 3,
    });

    let ok = storage.add(&codec, &store, &fragments(7)).await.unwrap();

    assert!(ok);
    let sizes: Vec<usize> = store.accepted_batches().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![3, 3, 1]);
}
