//! Program Counter.
//!
//! Holds the fetch byte address. The pipeline indexes the static program by
//! instruction, so the counter also exposes `index()` (`address >> 2`).

use crate::common::constants::{REGION_MASK, WORD_BYTES, WORD_SHIFT};
use crate::core::pipeline::signals::{JumpIntent, JumpKind};

/// Fetch program counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgramCounter {
    counter: u32,
}

impl ProgramCounter {
    /// Creates a counter at address 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw byte address.
    pub fn value(self) -> u32 {
        self.counter
    }

    /// Instruction index derived from the byte address.
    pub fn index(self) -> usize {
        (self.counter >> WORD_SHIFT) as usize
    }

    /// Overwrites the byte address.
    pub fn set(&mut self, address: u32) {
        self.counter = address;
    }

    /// Moves to the next sequential instruction.
    pub fn advance(&mut self) {
        self.counter = self.counter.wrapping_add(WORD_BYTES);
    }

    /// Redirects fetch according to a taken jump.
    ///
    /// Region jumps keep the upper four PC bits and replace the rest with the
    /// instruction index; direct jumps load the byte address as-is.
    pub fn jump(&mut self, intent: &JumpIntent) {
        self.counter = match intent.kind {
            JumpKind::Region => (self.counter & REGION_MASK) | (intent.target << WORD_SHIFT),
            JumpKind::Direct => intent.target,
        };
    }
}
