//! Global Simulator Constants.
//!
//! This module defines fixed properties of the instruction set. It includes:
//! 1. **Register Constants:** Register count and the link register used by `jal`.
//! 2. **Address Constants:** Word size and the region mask used by absolute jumps.

/// Number of general-purpose registers (register fields are 4 bits wide).
pub const NUM_REGISTERS: usize = 16;

/// Register written by `jal` with the return address.
pub const LINK_REGISTER: usize = NUM_REGISTERS - 1;

/// Size of an instruction and of a data word in bytes.
pub const WORD_BYTES: u32 = 4;

/// Shift converting between byte addresses and word indices.
pub const WORD_SHIFT: u32 = 2;

/// Upper PC bits preserved by region (`j`, `jal`, `jp`) jumps.
pub const REGION_MASK: u32 = 0xF000_0000;
