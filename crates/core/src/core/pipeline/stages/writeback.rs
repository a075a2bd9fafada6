//! Writeback Stage.
//!
//! Commits destination registers and asks the scheduler to release them from
//! the hazard state in the same cycle, so younger consumers read the register
//! file directly. Load results are published as forwarded values here.

use crate::common::constants::LINK_REGISTER;
use crate::common::error::AccessFault;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::StageStatus;
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext};
use crate::isa::instruction::Opcode;

/// Writeback stage (WB).
#[derive(Clone, Copy, Debug, Default)]
pub struct WritebackStage;

impl PipelineStage for WritebackStage {
    const STAGE: Stage = Stage::Writeback;

    fn run(inst: &mut InFlight, ctx: &mut StageContext<'_>) -> Result<StageStatus, AccessFault> {
        match inst.inst.op {
            Opcode::Add { rd, .. } | Opcode::Slt { rd, .. } | Opcode::Xor { rd, .. } => {
                ctx.cpu.regs.write(rd, inst.latch.result)?;
            }
            Opcode::Addi { rt, .. } => {
                ctx.cpu.regs.write(rt, inst.latch.result)?;
            }
            Opcode::Lw { rt, .. } => {
                ctx.cpu.regs.write(rt, inst.latch.result)?;
                inst.forwarded = Some(inst.latch.result);
            }
            Opcode::Jal { .. } => {
                ctx.cpu.regs.write(LINK_REGISTER, inst.latch.link as i32)?;
            }
            _ => {}
        }
        inst.clear_awaiting = true;
        Ok(StageStatus::Ready)
    }

    fn describe(inst: &InFlight) -> String {
        match inst.inst.op {
            Opcode::Add { rd, .. } | Opcode::Slt { rd, .. } | Opcode::Xor { rd, .. } => {
                format!("Register ${rd} <= {}", inst.latch.result)
            }
            Opcode::Addi { rt, .. } | Opcode::Lw { rt, .. } => {
                format!("Register ${rt} <= {}", inst.latch.result)
            }
            Opcode::Jal { .. } => format!("Register ${LINK_REGISTER} <= {}", inst.latch.link),
            _ => "None".to_string(),
        }
    }
}
