//! Branch prediction unit (BRU).
//!
//! The simulated core predicts only conditional branches (`ble`). Prediction
//! comes from a small direct-mapped branch target buffer that also stores a
//! one-bit taken/not-taken outcome.

pub use self::btb::{Btb, Prediction};

/// Branch Target Buffer with one-bit outcome history.
pub mod btb;
