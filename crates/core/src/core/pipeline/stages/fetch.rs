//! Instruction Fetch Stage.
//!
//! Records the instance's PC snapshot. Branches also consult the BTB here: a
//! predicted-taken hit arms a direct jump intent so the scheduler redirects
//! fetch in this same cycle.

use tracing::trace;

use crate::common::error::AccessFault;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::{JumpIntent, StageStatus};
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext};
use crate::isa::instruction::Opcode;

/// Fetch stage (IF).
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchStage;

impl PipelineStage for FetchStage {
    const STAGE: Stage = Stage::Fetch;

    fn run(inst: &mut InFlight, ctx: &mut StageContext<'_>) -> Result<StageStatus, AccessFault> {
        inst.pc = ctx.cpu.pc.value();

        if matches!(inst.inst.op, Opcode::Ble { .. }) {
            if let Some(target) = ctx.cpu.btb.predict_taken(inst.pc) {
                trace!(pc = inst.pc, target, "btb predicts taken");
                inst.latch.predicted_taken = true;
                inst.jump = Some(JumpIntent::direct(target));
            }
        }

        Ok(StageStatus::Ready)
    }

    fn describe(inst: &InFlight) -> String {
        inst.inst.text.clone()
    }
}
