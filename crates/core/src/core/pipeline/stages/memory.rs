//! Memory Access Stage.
//!
//! Loads and stores touch data memory here. ALU results become forwardable in
//! this stage, one cycle after they were computed.

use crate::common::error::AccessFault;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::StageStatus;
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext};
use crate::isa::instruction::Opcode;

/// Memory stage (MEM).
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryStage;

impl PipelineStage for MemoryStage {
    const STAGE: Stage = Stage::Memory;

    fn run(inst: &mut InFlight, ctx: &mut StageContext<'_>) -> Result<StageStatus, AccessFault> {
        match inst.inst.op {
            Opcode::Add { .. } | Opcode::Addi { .. } | Opcode::Slt { .. } | Opcode::Xor { .. } => {
                inst.forwarded = Some(inst.latch.result);
            }
            Opcode::Lw { .. } => {
                inst.latch.result = ctx.cpu.dmem.load(inst.latch.address)?;
            }
            Opcode::Sw { .. } => {
                ctx.cpu.dmem.store(inst.latch.address, inst.latch.rhs)?;
            }
            _ => {}
        }
        Ok(StageStatus::Ready)
    }

    fn describe(inst: &InFlight) -> String {
        match inst.inst.op {
            Opcode::Lw { .. } => format!("Memory access result = {}", inst.latch.result),
            Opcode::Sw { .. } => format!("Value written in memory = {}", inst.latch.rhs),
            _ => "None".to_string(),
        }
    }
}
