//! Instruction Execute Stage.
//!
//! Source operands are resolved again here through the hazard state, since a
//! producer may have committed or forwarded its value after this instance was
//! decoded. An unavailable operand stalls the pipeline.
//!
//! Branches are resolved against the prediction made at fetch. On a mismatch a
//! corrective direct jump is armed: to the computed target when the branch is
//! taken, or back to the fall-through address when it is not.

use tracing::debug;

use crate::common::constants::{LINK_REGISTER, WORD_BYTES};
use crate::common::error::AccessFault;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::{JumpIntent, StageStatus};
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext};
use crate::isa::instruction::Opcode;

/// Execute stage (EX).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecuteStage;

/// Resolves both operands or returns `NotReady` from the enclosing function.
macro_rules! operands {
    ($ctx:expr, $a:expr, $b:expr) => {
        match ($ctx.operand($a)?, $ctx.operand($b)?) {
            (Some(a), Some(b)) => (a, b),
            _ => return Ok(StageStatus::NotReady),
        }
    };
}

fn effective_address(base: i32, offset: i32) -> u32 {
    base.wrapping_add(offset) as u32
}

impl PipelineStage for ExecuteStage {
    const STAGE: Stage = Stage::Execute;

    fn run(inst: &mut InFlight, ctx: &mut StageContext<'_>) -> Result<StageStatus, AccessFault> {
        match inst.inst.op {
            Opcode::Add { rd, rs, rt } => {
                let (a, b) = operands!(ctx, rs, rt);
                inst.latch.lhs = a;
                inst.latch.rhs = b;
                inst.latch.result = a.wrapping_add(b);
                inst.dest = Some(rd);
            }
            Opcode::Addi { rt, rs, imm } => {
                let Some(a) = ctx.operand(rs)? else {
                    return Ok(StageStatus::NotReady);
                };
                inst.latch.lhs = a;
                inst.latch.rhs = imm;
                inst.latch.result = a.wrapping_add(imm);
                inst.dest = Some(rt);
            }
            Opcode::Slt { rd, rs, rt } => {
                let (a, b) = operands!(ctx, rs, rt);
                inst.latch.lhs = a;
                inst.latch.rhs = b;
                inst.latch.result = i32::from(a < b);
                inst.dest = Some(rd);
            }
            Opcode::Xor { rd, rs, rt } => {
                let (a, b) = operands!(ctx, rs, rt);
                inst.latch.lhs = a;
                inst.latch.rhs = b;
                inst.latch.result = a ^ b;
                inst.dest = Some(rd);
            }
            Opcode::Lw { rt, rs, offset } => {
                let Some(base) = ctx.operand(rs)? else {
                    return Ok(StageStatus::NotReady);
                };
                inst.latch.lhs = base;
                inst.latch.address = effective_address(base, offset);
                inst.dest = Some(rt);
            }
            Opcode::Sw { rt, rs, offset } => {
                let (base, data) = operands!(ctx, rs, rt);
                inst.latch.lhs = base;
                inst.latch.rhs = data;
                inst.latch.address = effective_address(base, offset);
            }
            Opcode::Jal { .. } => {
                inst.dest = Some(LINK_REGISTER);
                inst.forwarded = Some(inst.latch.link as i32);
            }
            Opcode::Ble { rs, rt, .. } => {
                let (a, b) = operands!(ctx, rs, rt);
                inst.latch.lhs = a;
                inst.latch.rhs = b;

                let taken = a <= b;
                let target = inst.latch.target;
                inst.latch.taken = taken;
                ctx.cpu.btb.update(inst.pc, target, taken);

                let mispredicted = taken != inst.latch.predicted_taken;
                ctx.cpu.stats.record_branch(mispredicted);
                if mispredicted {
                    let redirect = if taken {
                        target
                    } else {
                        inst.pc.wrapping_add(WORD_BYTES)
                    };
                    debug!(pc = inst.pc, taken, redirect, "branch mispredicted");
                    inst.jump = Some(JumpIntent::direct(redirect));
                }
            }
            Opcode::J { .. } | Opcode::Jr { .. } | Opcode::Jp { .. } | Opcode::Rp | Opcode::Nop => {}
        }

        Ok(StageStatus::Ready)
    }

    fn describe(inst: &InFlight) -> String {
        let l = &inst.latch;
        match inst.inst.op {
            Opcode::Add { .. } => format!("Add {} + {} = {}", l.lhs, l.rhs, l.result),
            Opcode::Addi { .. } => format!("Add {} + {} = {}", l.lhs, l.rhs, l.result),
            Opcode::Slt { .. } => format!("Slt {} < {} = {}", l.lhs, l.rhs, l.result),
            Opcode::Xor { .. } => format!("Xor {} ^ {} = {}", l.lhs, l.rhs, l.result),
            Opcode::Lw { offset, .. } => {
                format!("LW Address = {} + {} = {}", l.lhs, offset, l.address)
            }
            Opcode::Sw { offset, .. } => {
                format!("SW Address = {} + {} = {}", l.lhs, offset, l.address)
            }
            Opcode::Ble { .. } => format!("Ble {} <= {} = {}", l.lhs, l.rhs, l.taken),
            _ => "None".to_string(),
        }
    }
}
