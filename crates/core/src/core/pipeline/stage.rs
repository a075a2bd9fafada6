//! Pipeline stage identifiers.

use std::fmt;

use serde::Serialize;

/// One of the five pipeline stages, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Stage {
    /// Instruction fetch (IF).
    Fetch,
    /// Instruction decode and register read (ID).
    Decode,
    /// Execute and branch resolution (EX).
    Execute,
    /// Data memory access (MEM).
    Memory,
    /// Register writeback (WB).
    Writeback,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::Memory,
        Self::Writeback,
    ];

    /// The stage following `self`, or `None` after writeback.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Fetch => Some(Self::Decode),
            Self::Decode => Some(Self::Execute),
            Self::Execute => Some(Self::Memory),
            Self::Memory => Some(Self::Writeback),
            Self::Writeback => None,
        }
    }

    /// Display name used by the trace.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fetch => "Fetch",
            Self::Decode => "Decode",
            Self::Execute => "Execute",
            Self::Memory => "Memory",
            Self::Writeback => "Writeback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
