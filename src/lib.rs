//! Core library for reconstructing logical time series from chunked records
//! held in an external, paginated document store.
//!
//! This crate provides the read and write pipeline around an opaque store
//! connection:
//! - Lazy, paged retrieval of raw records
//! - Pluggable series/record codecs
//! - Key-function grouping of decoded fragments
//! - Associative fold of each group into one logical series
//! - Two-class analysis dispatch (aggregates and detectors) with the
//!   detector suppression rule
//! - Batched, fail-fast writes
//!
//! The store connection, its query language, and the payload layout are
//! external collaborators; the engine itself is stateless per query.

pub mod analysis;
pub mod assemble;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod merge;
pub mod record;
pub mod schema;
pub mod series;
pub mod store;
pub mod stream;
pub mod writer;

pub use analysis::{AnalysisOutcome, AnalysisRequest, AnalysisType};
pub use codec::{BinaryCodec, JsonCodec, SeriesCodec};
pub use config::EngineConfig;
pub use engine::SeriesStorage;
pub use error::{Error, Result};
pub use record::{FieldValue, Record};
pub use series::{Point, Series};
pub use store::{StoreConnection, StoreQuery};
