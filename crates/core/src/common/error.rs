//! Access Fault and Simulation Error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Access Faults:** Invariant violations raised by the storage primitives.
//! 2. **Simulation Errors:** Faults annotated with the in-flight instruction that raised them.
//!
//! Hazard stalls are not errors; they never leave the pipeline engine.

use thiserror::Error;

use crate::core::pipeline::stage::Stage;

/// Fatal storage access violation.
///
/// These indicate a malformed instruction stream (or a bad edit through the
/// inspection surface) and abort the run; they are never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AccessFault {
    /// Attempted write to the hardwired zero register `$0`.
    #[error("write to hardwired zero register $0")]
    ZeroRegisterWrite,

    /// Register index beyond the register file.
    #[error("register ${index} out of range")]
    RegisterOutOfRange {
        /// Offending register index.
        index: usize,
    },

    /// Data memory access beyond the configured memory size.
    #[error("memory address {address:#x} out of range")]
    MemoryOutOfRange {
        /// Offending byte address.
        address: u32,
    },

    /// Return on an empty return-address stack.
    #[error("return-address stack is empty")]
    ReturnStackEmpty,
}

/// Error returned by the simulator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// A stage function raised an access fault.
    #[error("instruction #{seq} `{text}` (index {index}) faulted during {stage}: {source}")]
    Fault {
        /// Execution-order number of the faulting instance.
        seq: u64,
        /// Static program index of the faulting instruction.
        index: usize,
        /// Source text of the faulting instruction.
        text: String,
        /// Stage that raised the fault.
        stage: Stage,
        /// Underlying access fault.
        source: AccessFault,
    },

    /// An access fault raised through the inspection surface.
    #[error(transparent)]
    Access(#[from] AccessFault),
}
