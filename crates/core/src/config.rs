//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline constants (memory size, predictor size, cycle cap).
//! 2. **Structures:** Hierarchical config for general, memory and predictor settings.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle cap applied by the run-to-completion loop.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Data memory size in 32-bit words.
    pub const DATA_WORDS: usize = 16;

    /// Branch target buffer entry count.
    ///
    /// Indexing is `(pc >> 2) % size`, so any non-zero size is valid.
    pub const BTB_SIZE: usize = 10;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use mipsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.data_words, 16);
/// assert_eq!(config.predictor.btb_size, 10);
/// ```
///
/// Deserializing from JSON; omitted fields fall back to their defaults:
///
/// ```
/// use mipsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "predictor": { "btb_size": 32 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 500);
/// assert!(config.general.trace_pipeline);
/// assert_eq!(config.memory.data_words, 16);
/// assert_eq!(config.predictor.btb_size, 32);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Data memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Branch predictor configuration
    #[serde(default)]
    pub predictor: PredictorConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Cycle cap for `Simulator::run`; reaching it is advisory, not a fault.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Record the per-cycle execution trace.
    #[serde(default = "GeneralConfig::default_trace_pipeline")]
    pub trace_pipeline: bool,
}

impl GeneralConfig {
    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    fn default_trace_pipeline() -> bool {
        true
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            trace_pipeline: true,
        }
    }
}

/// Data memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Number of 32-bit words of data memory.
    #[serde(default = "MemoryConfig::default_data_words")]
    pub data_words: usize,
}

impl MemoryConfig {
    fn default_data_words() -> usize {
        defaults::DATA_WORDS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            data_words: defaults::DATA_WORDS,
        }
    }
}

/// Branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Number of direct-mapped branch target buffer entries.
    #[serde(default = "PredictorConfig::default_btb_size")]
    pub btb_size: usize,
}

impl PredictorConfig {
    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            btb_size: defaults::BTB_SIZE,
        }
    }
}
