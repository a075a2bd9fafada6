//! Pipeline stage implementations.
//!
//! This module contains the per-opcode behavior of each of the five stages:
//! 1. **Fetch:** Snapshots the PC and consults the branch predictor.
//! 2. **Decode:** Validates operands and resolves statically known jump targets.
//! 3. **Execute:** Computes results, addresses and branch outcomes.
//! 4. **Memory:** Performs loads and stores.
//! 5. **Writeback:** Commits results and releases hazard state.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

pub use decode::DecodeStage;
pub use execute::ExecuteStage;
pub use fetch::FetchStage;
pub use memory::MemoryStage;
pub use writeback::WritebackStage;

use tracing::trace;

use crate::common::error::AccessFault;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::StageStatus;
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext};

/// Runs `stage` for `inst` and renders its trace description.
///
/// The description is only produced when the stage completes.
pub fn dispatch(
    stage: Stage,
    inst: &mut InFlight,
    ctx: &mut StageContext<'_>,
) -> Result<Option<String>, AccessFault> {
    match stage {
        Stage::Fetch => step::<FetchStage>(inst, ctx),
        Stage::Decode => step::<DecodeStage>(inst, ctx),
        Stage::Execute => step::<ExecuteStage>(inst, ctx),
        Stage::Memory => step::<MemoryStage>(inst, ctx),
        Stage::Writeback => step::<WritebackStage>(inst, ctx),
    }
}

fn step<S: PipelineStage>(
    inst: &mut InFlight,
    ctx: &mut StageContext<'_>,
) -> Result<Option<String>, AccessFault> {
    match S::run(inst, ctx)? {
        StageStatus::Ready => Ok(Some(S::describe(inst))),
        StageStatus::NotReady => {
            trace!(seq = inst.seq, stage = %S::STAGE, "operand not ready");
            Ok(None)
        }
    }
}
