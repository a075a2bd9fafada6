//! Execution units shared by the pipeline stages.

/// Branch prediction unit (branch target buffer).
pub mod bru;
