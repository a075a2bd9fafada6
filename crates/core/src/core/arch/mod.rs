//! Architectural state of the processor.
//!
//! This module contains the storage primitives the pipeline reads and writes:
//! 1. **GPR:** The general-purpose register file with its hardwired zero register.
//! 2. **Data Memory:** Word-addressed storage indexed by byte address.
//! 3. **Return Stack:** The LIFO used by procedure call and return.
//! 4. **Program Counter:** Byte address with a derived instruction-index view.

/// Word-addressed data memory.
pub mod dmem;

/// General-purpose register file.
pub mod gpr;

/// Program counter.
pub mod pc;

/// Procedure return-address stack.
pub mod stack;

pub use dmem::DataMemory;
pub use gpr::Gpr;
pub use pc::ProgramCounter;
pub use stack::ReturnStack;
