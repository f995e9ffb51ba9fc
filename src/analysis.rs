//! Analysis dispatch over a merged series window.
//!
//! Two disjoint classes of analyses exist:
//! - low-level aggregates (`MIN`, `MAX`, `AVG`, `COUNT`, `DEV`, `P`) always
//!   produce a meaningful scalar over the window values;
//! - high-level detectors (`TREND`, `OUTLIER`, `FREQUENCY`) either fire with
//!   an analysis-specific value or report nothing, in which case the whole
//!   group is suppressed from the response.
//!
//! Parameters are validated before any point is scanned; an unknown analysis
//! name or malformed parameters fail with [`Error::InvalidRequest`].

use crate::error::{Error, Result};
use crate::series::{Point, Series};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed enumeration of supported analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisType {
    Min,
    Max,
    Avg,
    Count,
    Dev,
    Percentile,
    Trend,
    Outlier,
    Frequency,
}

impl AnalysisType {
    /// High-level analyses are detectors whose output may be suppressed.
    pub fn is_high_level(self) -> bool {
        matches!(
            self,
            AnalysisType::Trend | AnalysisType::Outlier | AnalysisType::Frequency
        )
    }

    /// Wire name of the analysis, as used in requests and result records.
    pub fn name(self) -> &'static str {
        match self {
            AnalysisType::Min => "MIN",
            AnalysisType::Max => "MAX",
            AnalysisType::Avg => "AVG",
            AnalysisType::Count => "COUNT",
            AnalysisType::Dev => "DEV",
            AnalysisType::Percentile => "P",
            AnalysisType::Trend => "TREND",
            AnalysisType::Outlier => "OUTLIER",
            AnalysisType::Frequency => "FREQUENCY",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnalysisType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MIN" => Ok(AnalysisType::Min),
            "MAX" => Ok(AnalysisType::Max),
            "AVG" => Ok(AnalysisType::Avg),
            "COUNT" => Ok(AnalysisType::Count),
            "DEV" => Ok(AnalysisType::Dev),
            "P" => Ok(AnalysisType::Percentile),
            "TREND" => Ok(AnalysisType::Trend),
            "OUTLIER" => Ok(AnalysisType::Outlier),
            "FREQUENCY" => Ok(AnalysisType::Frequency),
            other => Err(Error::InvalidRequest(format!(
                "unknown analysis type '{}'",
                other
            ))),
        }
    }
}

/// Outcome of one analysis evaluation.
///
/// Absence of a finding is explicit rather than encoded in the sign of a
/// scalar, so an analysis whose legitimate output is negative stays
/// unambiguous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisOutcome {
    /// Low-level aggregate, always attached to the output.
    Aggregate(f64),
    /// High-level detector fired; the value carries analysis-specific
    /// meaning (a slope, a count), not a generic statistic.
    Detected(f64),
    /// High-level detector found nothing; the group is suppressed.
    NotDetected,
}

impl AnalysisOutcome {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, AnalysisOutcome::NotDetected)
    }
}

/// A requested analysis: type plus raw string parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub analysis: AnalysisType,
    pub params: Vec<String>,
}

impl AnalysisRequest {
    pub fn new(analysis: AnalysisType, params: Vec<String>) -> Self {
        Self { analysis, params }
    }

    /// Parses an analysis name and parameter list into a validated request.
    pub fn parse(name: &str, params: &[String]) -> Result<Self> {
        let request = Self::new(name.parse()?, params.to_vec());
        request.validate()?;
        Ok(request)
    }

    /// Validates the parameters for the requested type without scanning any
    /// points.
    pub fn validate(&self) -> Result<()> {
        self.evaluator().map(|_| ())
    }

    /// Evaluates the analysis over the series points restricted to
    /// `[query_start, query_end)`.
    pub fn evaluate(&self, series: &Series, query_start: i64, query_end: i64)
        -> Result<AnalysisOutcome>
    {
        let evaluator = self.evaluator()?;
        let points: Vec<Point> = series.window(query_start, query_end).copied().collect();
        Ok(evaluator.run(&points))
    }

    fn evaluator(&self) -> Result<Evaluator> {
        match self.analysis {
            AnalysisType::Min => Ok(Evaluator::Min),
            AnalysisType::Max => Ok(Evaluator::Max),
            AnalysisType::Avg => Ok(Evaluator::Avg),
            AnalysisType::Count => Ok(Evaluator::Count),
            AnalysisType::Dev => Ok(Evaluator::Dev),
            AnalysisType::Percentile => {
                let fraction = self.required_param::<f64>(0, "percentile fraction")?;
                if !(fraction > 0.0 && fraction <= 1.0) {
                    return Err(Error::InvalidRequest(format!(
                        "P: percentile fraction must be in (0, 1], got {}",
                        fraction
                    )));
                }
                Ok(Evaluator::Percentile(fraction))
            }
            AnalysisType::Trend => Ok(Evaluator::Trend),
            AnalysisType::Outlier => Ok(Evaluator::Outlier),
            AnalysisType::Frequency => {
                let window_secs = self.required_param::<i64>(0, "window length in seconds")?;
                let threshold = self.required_param::<i64>(1, "count delta threshold")?;
                if window_secs <= 0 {
                    return Err(Error::InvalidRequest(format!(
                        "FREQUENCY: window length must be positive, got {}",
                        window_secs
                    )));
                }
                if threshold < 0 {
                    return Err(Error::InvalidRequest(format!(
                        "FREQUENCY: threshold must not be negative, got {}",
                        threshold
                    )));
                }
                Ok(Evaluator::Frequency {
                    window_secs,
                    threshold,
                })
            }
        }
    }

    fn required_param<T: FromStr>(&self, index: usize, what: &str) -> Result<T> {
        let raw = self.params.get(index).ok_or_else(|| {
            Error::InvalidRequest(format!(
                "{}: missing parameter {} ({})",
                self.analysis, index, what
            ))
        })?;
        raw.parse().map_err(|_| {
            Error::InvalidRequest(format!(
                "{}: parameter {} ('{}') is not a valid {}",
                self.analysis, index, raw, what
            ))
        })
    }
}

/// Validated, typed form of a request, ready to scan points.
enum Evaluator {
    Min,
    Max,
    Avg,
    Count,
    Dev,
    Percentile(f64),
    Trend,
    Outlier,
    Frequency { window_secs: i64, threshold: i64 },
}

impl Evaluator {
    fn run(&self, points: &[Point]) -> AnalysisOutcome {
        match self {
            Evaluator::Min => AnalysisOutcome::Aggregate(fold_values(points, f64::min)),
            Evaluator::Max => AnalysisOutcome::Aggregate(fold_values(points, f64::max)),
            Evaluator::Avg => AnalysisOutcome::Aggregate(average(points)),
            Evaluator::Count => AnalysisOutcome::Aggregate(points.len() as f64),
            Evaluator::Dev => AnalysisOutcome::Aggregate(sample_deviation(points)),
            Evaluator::Percentile(fraction) => {
                let mut values: Vec<f64> = points.iter().map(|p| p.value).collect();
                AnalysisOutcome::Aggregate(percentile(&mut values, *fraction))
            }
            Evaluator::Trend => trend(points),
            Evaluator::Outlier => outlier(points),
            Evaluator::Frequency {
                window_secs,
                threshold,
            } => frequency(points, *window_secs, *threshold),
        }
    }
}

fn fold_values(points: &[Point], combine: fn(f64, f64) -> f64) -> f64 {
    points
        .iter()
        .map(|p| p.value)
        .fold(f64::NAN, |acc, v| if acc.is_nan() { v } else { combine(acc, v) })
}

fn average(points: &[Point]) -> f64 {
    let sum: f64 = points.iter().map(|p| p.value).sum();
    sum / points.len() as f64
}

/// Sample standard deviation; NaN below two points.
fn sample_deviation(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = average(points);
    let variance: f64 = points
        .iter()
        .map(|p| {
            let d = p.value - mean;
            d * d
        })
        .sum::<f64>()
        / (n - 1) as f64;
    variance.sqrt()
}

/// Nearest-rank percentile over the (sorted in place) values; NaN when
/// empty.
fn percentile(values: &mut [f64], fraction: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let rank = (fraction * values.len() as f64).ceil() as usize;
    values[rank.clamp(1, values.len()) - 1]
}

/// Detects a rising trend via the least-squares slope of value over time.
fn trend(points: &[Point]) -> AnalysisOutcome {
    if points.len() < 2 {
        return AnalysisOutcome::NotDetected;
    }
    let n = points.len() as f64;
    let sum_t: f64 = points.iter().map(|p| p.timestamp as f64).sum();
    let sum_v: f64 = points.iter().map(|p| p.value).sum();
    let sum_tv: f64 = points.iter().map(|p| p.timestamp as f64 * p.value).sum();
    let sum_tt: f64 = points
        .iter()
        .map(|p| {
            let t = p.timestamp as f64;
            t * t
        })
        .sum();
    let denominator = n * sum_tt - sum_t * sum_t;
    if denominator == 0.0 {
        return AnalysisOutcome::NotDetected;
    }
    let slope = (n * sum_tv - sum_t * sum_v) / denominator;
    if slope > 0.0 {
        AnalysisOutcome::Detected(slope)
    } else {
        AnalysisOutcome::NotDetected
    }
}

/// Detects points above `Q3 + 1.5 * IQR`; the detection value is the number
/// of such points.
fn outlier(points: &[Point]) -> AnalysisOutcome {
    if points.is_empty() {
        return AnalysisOutcome::NotDetected;
    }
    let mut values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let q1 = percentile(&mut values, 0.25);
    let q3 = percentile(&mut values, 0.75);
    let fence = q3 + 1.5 * (q3 - q1);
    let count = values.iter().filter(|v| **v > fence).count();
    if count > 0 {
        AnalysisOutcome::Detected(count as f64)
    } else {
        AnalysisOutcome::NotDetected
    }
}

/// Splits the window into fixed buckets of `window_secs` from the first
/// timestamp and detects a later bucket exceeding the first bucket's point
/// count by more than `threshold`. The detection value is the largest such
/// excess.
fn frequency(points: &[Point], window_secs: i64, threshold: i64) -> AnalysisOutcome {
    let Some(first) = points.first() else {
        return AnalysisOutcome::NotDetected;
    };
    let origin = first.timestamp;
    let mut counts: Vec<i64> = Vec::new();
    for point in points {
        let bucket = ((point.timestamp - origin) / window_secs).max(0) as usize;
        if counts.len() <= bucket {
            counts.resize(bucket + 1, 0);
        }
        counts[bucket] += 1;
    }
    let base = counts[0];
    let excess = counts
        .iter()
        .skip(1)
        .map(|count| count - base)
        .max()
        .unwrap_or(0);
    if excess > threshold {
        AnalysisOutcome::Detected(excess as f64)
    } else {
        AnalysisOutcome::NotDetected
    }
}
