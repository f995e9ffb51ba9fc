//! Outward result-record construction.

use crate::analysis::{AnalysisOutcome, AnalysisRequest};
use crate::codec::SeriesCodec;
use crate::error::Result;
use crate::record::Record;
use crate::schema;
use crate::series::Series;

/// Builds the response record for one merged group.
///
/// Returns `Ok(None)` when a high-level analysis found nothing — the group
/// is suppressed entirely, which is a valid outcome and not an error. On the
/// analysis path the raw `data` payload is omitted (the series has already
/// been reduced to a scalar); on the plain path the full encoded record is
/// returned. `joinKey` is attached in every emitted record.
pub fn build_result(
    codec: &dyn SeriesCodec,
    series: &Series,
    key: &str,
    analysis: Option<(&AnalysisRequest, AnalysisOutcome)>,
) -> Result<Option<Record>> {
    let mut record = match analysis {
        None => codec.encode(series)?,
        Some((_, AnalysisOutcome::NotDetected)) => return Ok(None),
        Some((request, outcome)) => {
            let mut record = Record::new();
            for (name, value) in series.attributes() {
                if name != schema::DATA {
                    record.set(name.clone(), value.clone());
                }
            }
            if let AnalysisOutcome::Aggregate(value) = outcome {
                record.set(schema::VALUE, value);
            }
            record.set(schema::ANALYSIS, request.analysis.name());
            record.set(
                schema::ANALYSIS_PARAM,
                request.params.join(schema::PARAM_DELIMITER),
            );
            record
        }
    };
    record.set(schema::JOIN_KEY, key);
    Ok(Some(record))
}
