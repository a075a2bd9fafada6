//! CPU core implementation.
//!
//! This module groups everything that runs inside a simulated clock:
//! 1. **Architecture:** Register file, data memory, return stack and program counter.
//! 2. **CPU:** The owned container of that state plus predictor and statistics.
//! 3. **Pipeline:** The in-order scheduler, stages, hazards and trace.
//! 4. **Units:** Functional units (branch target buffer).

/// Architectural state (GPRs, data memory, return stack, PC).
pub mod arch;

/// CPU state container and inspection surface.
pub mod cpu;

/// Five-stage pipeline.
pub mod pipeline;

/// Functional units.
pub mod units;

pub use self::cpu::Cpu;
