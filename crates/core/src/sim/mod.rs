//! Simulation utilities and program loading.
//!
//! Provides the program loader (text or file to static instructions) and the
//! top-level [`Simulator`] that owns the CPU, the pipeline and the program.

/// Program loading from source text or files.
pub mod loader;

/// Top-level simulator and run loop.
pub mod simulator;

pub use loader::{LoadError, load_program, load_program_file};
pub use simulator::{RunOutcome, Simulator};
