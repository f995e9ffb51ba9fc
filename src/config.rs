//! Configuration management for the chunkstream engine.
//!
//! Options are loaded in order of precedence, later sources overriding
//! earlier ones:
//! 1. Built-in defaults
//! 2. An optional TOML configuration file
//! 3. Environment variables (prefixed with `CHUNKSTREAM_`)

use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Records fetched per store round trip
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Encoded records submitted per write batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_page_size() -> u64 {
    200
}

fn default_batch_size() -> usize {
    500
}

impl EngineConfig {
    /// Loads the configuration from an optional TOML file and the
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("page_size", default_page_size())?
            .set_default("batch_size", default_batch_size() as u64)?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(Environment::with_prefix("CHUNKSTREAM"))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
