//! Fold of one group's fragments into a single logical series.

use crate::series::Series;
use std::sync::Arc;

/// Associative binary operator combining two fragments of the same key.
pub type MergeFn = Arc<dyn Fn(Series, Series) -> Series + Send + Sync>;

/// Default merge operator: appends the right fragment's points onto the
/// left's and keeps the left's attributes.
///
/// This is a point-set append, not a sorted merge. The result is
/// chronological only when the retrieval order already yields
/// non-overlapping fragments per key; nothing here validates that.
pub fn append() -> MergeFn {
    Arc::new(|mut left, right| {
        left.append(right);
        left
    })
}

/// Left-folds the fragment list into a single series with the given
/// operator. Returns `None` only for an empty list; group lists are
/// non-empty by construction.
pub fn reduce(fragments: Vec<Series>, merge_op: &MergeFn) -> Option<Series> {
    let mut fragments = fragments.into_iter();
    let first = fragments.next()?;
    Some(fragments.fold(first, |merged, next| merge_op(merged, next)))
}
