//! Pipeline control signals.
//!
//! This module defines the values stage functions hand back to the scheduler:
//! 1. **Jump Intent:** A pending redirect of the fetch program counter.
//! 2. **Stage Status:** Whether a stage completed or must be retried next cycle.

use serde::Serialize;

/// How a jump target is applied to the program counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum JumpKind {
    /// Keep the upper four PC bits and splice in an instruction index (`j`, `jal`, `jp`).
    Region,
    /// Load an absolute byte address (`jr`, `rp`, `ble`).
    Direct,
}

/// A control transfer requested by an in-flight instruction.
///
/// The scheduler honors at most one taken intent per cycle and clears
/// `taken` once it has redirected fetch, so an intent is applied only once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct JumpIntent {
    /// Target interpretation.
    pub kind: JumpKind,
    /// Instruction index (`Region`) or byte address (`Direct`).
    pub target: u32,
    /// Set while the redirect is pending.
    pub taken: bool,
}

impl JumpIntent {
    /// A taken region jump to instruction index `target`.
    pub fn region(target: u32) -> Self {
        Self {
            kind: JumpKind::Region,
            target,
            taken: true,
        }
    }

    /// A taken jump to byte address `target`.
    pub fn direct(target: u32) -> Self {
        Self {
            kind: JumpKind::Direct,
            target,
            taken: true,
        }
    }
}

/// Outcome of running one stage function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageStatus {
    /// The stage completed; the instance moves on.
    Ready,
    /// An operand is unavailable; retry the same stage next cycle.
    NotReady,
}
