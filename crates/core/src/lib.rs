//! Five-stage pipelined MIPS-subset simulator library.
//!
//! This crate implements a cycle-accurate in-order pipeline with the following:
//! 1. **Core:** Fetch, decode, execute, memory and writeback over an ordered in-flight window,
//!    with data-hazard stalling, forwarding and branch prediction.
//! 2. **Storage:** Register file, word-addressed data memory, return-address stack and PC.
//! 3. **ISA:** A closed opcode set, its assembler front end and trace renderers.
//! 4. **Simulation:** Program loading, the run loop, the per-cycle trace and statistics.

/// Common types (access faults, simulator errors, constants).
pub mod common;
/// Simulator configuration (defaults and serde structures).
pub mod config;
/// CPU core (architectural state, branch predictor, pipeline engine).
pub mod core;
/// Instruction set (static instructions, assembler, disassembly).
pub mod isa;
/// Program loader and the top-level simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Architectural state of the processor.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
