//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks shared across all components:
//! 1. **Constants:** Register file geometry, word size and address masks.
//! 2. **Error Handling:** Access faults raised by storage, and simulator-level errors.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for storage access and simulation runs.
pub mod error;

pub use constants::{LINK_REGISTER, NUM_REGISTERS, WORD_BYTES};
pub use error::{AccessFault, SimError};
