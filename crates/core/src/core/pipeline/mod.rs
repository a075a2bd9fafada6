//! Instruction pipeline implementation.
//!
//! This module contains the five-stage in-order pipeline. It includes the
//! following components:
//! 1. **Engine:** The per-cycle scheduler owning the in-flight window.
//! 2. **Hazards:** Cycle-local awaiting set and forwarding map.
//! 3. **In-flight:** Dynamic instances and their inter-stage latch values.
//! 4. **Signals:** Jump intents and stage readiness.
//! 5. **Stages:** Per-opcode Fetch, Decode, Execute, Memory and Writeback behavior.
//! 6. **Trace:** The append-only per-cycle record of completed stages.

/// Per-cycle scheduler.
pub mod engine;

/// Data hazard bookkeeping and operand forwarding.
pub mod hazards;

/// Dynamic (in-flight) instruction instances.
pub mod inflight;

/// Control signals exchanged between stages and the scheduler.
pub mod signals;

/// Pipeline stage identifiers.
pub mod stage;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Execution trace model.
pub mod trace;

/// Traits for pipeline stage components.
pub mod traits;

pub use engine::Pipeline;
pub use hazards::HazardUnit;
pub use inflight::InFlight;
pub use signals::{JumpIntent, JumpKind, StageStatus};
pub use stage::Stage;
pub use trace::{CycleRecord, Trace, TraceEvent};
