//! Codec strategies: round trips, window bounding, and malformed payloads.

mod common;

use chunkstream_core::{schema, BinaryCodec, Error, FieldValue, JsonCodec, Record, SeriesCodec};
use common::series;

fn round_trip(codec: &dyn SeriesCodec) {
    let mut original = series("cpu", &[(1, 0.5), (2, 1.5), (3, 2.5)]);
    original.set_attribute("host", "web-1");

    let record = codec.encode(&original).unwrap();
    assert!(record.get(schema::DATA).and_then(FieldValue::as_bytes).is_some());
    assert_eq!(record.get(schema::START).and_then(FieldValue::as_i64), Some(1));
    assert_eq!(record.get(schema::END).and_then(FieldValue::as_i64), Some(3));

    let decoded = codec.decode(&record, 0, 10).unwrap();
    assert_eq!(decoded.points(), original.points());
    assert_eq!(
        decoded.attribute("metric").and_then(FieldValue::as_str),
        Some("cpu")
    );
    assert_eq!(
        decoded.attribute("host").and_then(FieldValue::as_str),
        Some("web-1")
    );
    assert!(decoded.attribute(schema::DATA).is_none());
}

#[test]
fn binary_codec_round_trips() {
    round_trip(&BinaryCodec);
}

#[test]
fn json_codec_round_trips() {
    round_trip(&JsonCodec);
}

#[test]
fn decode_keeps_only_points_inside_the_window() {
    let codec = BinaryCodec;
    let record = codec
        .encode(&series("cpu", &[(1, 1.0), (2, 2.0), (3, 3.0)]))
        .unwrap();

    // [2, 3) is half-open: point 3 stays out.
    let decoded = codec.decode(&record, 2, 3).unwrap();
    let timestamps: Vec<i64> = decoded.points().iter().map(|p| p.timestamp).collect();
    assert_eq!(timestamps, vec![2]);
}

#[test]
fn decode_fails_without_a_payload() {
    let err = BinaryCodec.decode(&Record::new(), 0, 10).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn decode_fails_on_a_non_binary_payload() {
    let mut record = Record::new();
    record.set(schema::DATA, "not bytes");
    let err = BinaryCodec.decode(&record, 0, 10).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn reserved_attribute_names_are_stable() {
    // Wire names: store documents and response consumers depend on these.
    assert_eq!(schema::DATA, "data");
    assert_eq!(schema::START, "start");
    assert_eq!(schema::END, "end");
    assert_eq!(schema::METRIC, "metric");
    assert_eq!(schema::VALUE, "value");
    assert_eq!(schema::ANALYSIS, "analysis");
    assert_eq!(schema::ANALYSIS_PARAM, "analysisParam");
    assert_eq!(schema::JOIN_KEY, "joinKey");
    assert_eq!(schema::PARAM_DELIMITER, "-");
}

#[test]
fn decode_fails_on_a_malformed_payload() {
    let mut record = Record::new();
    record.set(schema::DATA, vec![0xff, 0x01, 0x02]);
    let err = JsonCodec.decode(&record, 0, 10).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}
