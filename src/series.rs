//! Time-series model: chronological points plus descriptive attributes.

use crate::record::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single observation of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Epoch timestamp
    pub timestamp: i64,
    /// Observed value
    pub value: f64,
}

impl Point {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A logical time series: an attribute mapping plus an ordered point
/// sequence.
///
/// Point order is significant and assumed chronological by every consumer.
/// Fragments of one series are appended in encounter order; the engine never
/// validates ordering across fragments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    attributes: HashMap<String, FieldValue>,
    points: Vec<Point>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&FieldValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &HashMap<String, FieldValue> {
        &self.attributes
    }

    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Appends the other fragment's points onto this one, in encounter order.
    pub fn append(&mut self, mut other: Series) {
        self.points.append(&mut other.points);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterates the points whose timestamps fall into `[start, end)`.
    pub fn window(&self, start: i64, end: i64) -> impl Iterator<Item = &Point> {
        self.points
            .iter()
            .filter(move |p| p.timestamp >= start && p.timestamp < end)
    }

    pub fn first_timestamp(&self) -> Option<i64> {
        self.points.first().map(|p| p.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.points.last().map(|p| p.timestamp)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
