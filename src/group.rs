//! Partitioning of decoded series fragments by join key.

use crate::record::FieldValue;
use crate::schema;
use crate::series::Series;
use std::collections::HashMap;
use std::sync::Arc;

/// Derives the grouping key of a series from its attributes.
pub type KeyFn = Arc<dyn Fn(&Series) -> String + Send + Sync>;

/// Default key function: the value of the `metric` attribute, empty when
/// the attribute is missing.
pub fn metric_key() -> KeyFn {
    Arc::new(|series| {
        series
            .attribute(schema::METRIC)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
            .to_string()
    })
}

/// Partitions the fragments by their key-function result.
///
/// Every input fragment lands in exactly one group; within a group the
/// first-encountered order is preserved. This fully materializes its input.
pub fn collect(fragments: Vec<Series>, key_fn: &KeyFn) -> HashMap<String, Vec<Series>> {
    let mut groups: HashMap<String, Vec<Series>> = HashMap::new();
    for fragment in fragments {
        groups.entry(key_fn(&fragment)).or_default().push(fragment);
    }
    groups
}
