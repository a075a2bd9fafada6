//! Instruction set definitions.
//!
//! This module contains the static side of the simulated ISA:
//! 1. **Instruction:** The closed opcode set and the immutable decoded record.
//! 2. **Assembler:** Text to instruction decoding with labels and batched errors.
//! 3. **Disassembly:** Canonical text and decode-field renderings used by the trace.

/// Assembler front end (source text to static instructions).
pub mod asm;

/// Canonical text and trace field rendering.
pub mod disasm;

/// Opcode variants and the static instruction record.
pub mod instruction;

pub use asm::{ParseError, assemble, parse_instruction};
pub use instruction::{InstClass, Instruction, Opcode};
