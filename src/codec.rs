//! Pluggable codecs between [`Series`] and store [`Record`]s.
//!
//! The engine has no opinion on the binary payload layout; it only requires
//! the `encode`/`decode` contract below. Each payload format is an
//! independent strategy type implementing [`SeriesCodec`].

use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema;
use crate::series::{Point, Series};

/// Codec between a logical series and its stored chunk representation.
pub trait SeriesCodec: Send + Sync {
    /// Encodes a series into a storable record, including its point payload.
    fn encode(&self, series: &Series) -> Result<Record>;

    /// Decodes a record back into a series, keeping only the points whose
    /// timestamps fall into `[start, end)`.
    fn decode(&self, record: &Record, start: i64, end: i64) -> Result<Series>;
}

/// Default codec: points serialized with `bincode` into the `data` payload.
///
/// On encode the series's first and last timestamps are stamped into the
/// `start`/`end` attributes so the store has something to range-filter on.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl SeriesCodec for BinaryCodec {
    fn encode(&self, series: &Series) -> Result<Record> {
        let payload = bincode::serialize(series.points())
            .map_err(|e| Error::Encode(format!("point payload serialization failed: {}", e)))?;
        Ok(build_record(series, payload))
    }

    fn decode(&self, record: &Record, start: i64, end: i64) -> Result<Series> {
        let payload = payload_bytes(record)?;
        let points: Vec<Point> = bincode::deserialize(payload)
            .map_err(|e| Error::Decode(format!("malformed point payload: {}", e)))?;
        Ok(build_series(record, points, start, end))
    }
}

/// Alternative codec storing the point payload as JSON bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SeriesCodec for JsonCodec {
    fn encode(&self, series: &Series) -> Result<Record> {
        let payload = serde_json::to_vec(series.points())
            .map_err(|e| Error::Encode(format!("point payload serialization failed: {}", e)))?;
        Ok(build_record(series, payload))
    }

    fn decode(&self, record: &Record, start: i64, end: i64) -> Result<Series> {
        let payload = payload_bytes(record)?;
        let points: Vec<Point> = serde_json::from_slice(payload)
            .map_err(|e| Error::Decode(format!("malformed point payload: {}", e)))?;
        Ok(build_series(record, points, start, end))
    }
}

fn build_record(series: &Series, payload: Vec<u8>) -> Record {
    let mut record = Record::new();
    for (name, value) in series.attributes() {
        record.set(name.clone(), value.clone());
    }
    if let Some(first) = series.first_timestamp() {
        record.set(schema::START, first);
    }
    if let Some(last) = series.last_timestamp() {
        record.set(schema::END, last);
    }
    record.set(schema::DATA, payload);
    record
}

fn payload_bytes(record: &Record) -> Result<&[u8]> {
    record
        .get(schema::DATA)
        .ok_or_else(|| Error::Decode(format!("record has no '{}' payload", schema::DATA)))?
        .as_bytes()
        .ok_or_else(|| Error::Decode(format!("'{}' attribute is not binary", schema::DATA)))
}

fn build_series(record: &Record, points: Vec<Point>, start: i64, end: i64) -> Series {
    let mut series = Series::new();
    for (name, value) in record.fields() {
        if name != schema::DATA {
            series.set_attribute(name.clone(), value.clone());
        }
    }
    for point in points {
        if point.timestamp >= start && point.timestamp < end {
            series.push_point(point);
        }
    }
    series
}
