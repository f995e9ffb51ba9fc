//! Reserved attribute names shared by the codec, the result assembler, and
//! store-facing documents.

/// Binary point payload of a stored chunk.
pub const DATA: &str = "data";
/// First timestamp covered by a stored chunk.
pub const START: &str = "start";
/// Last timestamp covered by a stored chunk.
pub const END: &str = "end";
/// Metric name attribute, used by the default join-key function.
pub const METRIC: &str = "metric";

/// Aggregated scalar attached to low-level analysis results.
pub const VALUE: &str = "value";
/// Name of the analysis that produced a result record.
pub const ANALYSIS: &str = "analysis";
/// Joined parameter list of the analysis that produced a result record.
pub const ANALYSIS_PARAM: &str = "analysisParam";
/// Grouping key of the series a result record was built from.
pub const JOIN_KEY: &str = "joinKey";

/// Delimiter used to join analysis parameters into `analysisParam`.
pub const PARAM_DELIMITER: &str = "-";
