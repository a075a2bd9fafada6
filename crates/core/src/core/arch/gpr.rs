//! General-Purpose Register File.
//!
//! This module implements the register file for the simulated MIPS subset.
//! It performs the following:
//! 1. **Storage:** Maintains 16 signed 32-bit registers (`$0`-`$15`).
//! 2. **Invariant Enforcement:** `$0` always reads as zero and writes to it fault.
//! 3. **Debugging:** Provides a formatted dump of the complete register state.

use std::fmt;

use crate::common::constants::NUM_REGISTERS;
use crate::common::error::AccessFault;

/// General-Purpose Register file.
///
/// Unlike RISC-V's silently-discarding `x0`, a write to `$0` here is an access
/// fault: it can only come from a malformed instruction or a bad external edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15).
    ///
    /// # Returns
    ///
    /// The stored value; `$0` always returns 0.
    pub fn read(&self, idx: usize) -> Result<i32, AccessFault> {
        match idx {
            0 => Ok(0),
            _ => self
                .regs
                .get(idx)
                .copied()
                .ok_or(AccessFault::RegisterOutOfRange { index: idx }),
        }
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (1-15).
    /// * `val` - The value to write.
    ///
    /// # Errors
    ///
    /// `ZeroRegisterWrite` for `$0`, `RegisterOutOfRange` past the file.
    pub fn write(&mut self, idx: usize, val: i32) -> Result<(), AccessFault> {
        if idx == 0 {
            return Err(AccessFault::ZeroRegisterWrite);
        }
        let slot = self
            .regs
            .get_mut(idx)
            .ok_or(AccessFault::RegisterOutOfRange { index: idx })?;
        *slot = val;
        Ok(())
    }

    /// Returns a snapshot of every register, `$0` included.
    pub fn snapshot(&self) -> [i32; NUM_REGISTERS] {
        self.regs
    }
}

impl fmt::Display for Gpr {
    /// Dumps registers four to a line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.regs.chunks(4).enumerate() {
            for (col, val) in chunk.iter().enumerate() {
                let idx = row * 4 + col;
                if col > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "${idx:<2}={val:>11}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
