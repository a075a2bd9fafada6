//! Instruction Decode Stage.
//!
//! Checks register operands against the register file and resolves every jump
//! whose target is known without executing:
//! 1. **Region jumps:** `j`, `jal` and `jp` arm their intent directly.
//! 2. **Stack and register jumps:** `rp` pops the return stack; `jr` reads its
//!    target through the hazard state and may stall.
//! 3. **Branches:** `ble` computes its taken target.

use crate::common::constants::WORD_BYTES;
use crate::common::error::AccessFault;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::{JumpIntent, StageStatus};
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::traits::{PipelineStage, StageContext};
use crate::isa::disasm;
use crate::isa::instruction::Opcode;

/// Decode stage (ID).
#[derive(Clone, Copy, Debug, Default)]
pub struct DecodeStage;

/// Taken target of a `ble` at `pc`: `pc + ((offset + 1) << 2)`.
///
/// The offset counts instructions from the one after the branch, biased by
/// one, so an offset of `-1` targets the branch itself.
pub fn branch_target(pc: u32, offset: i32) -> u32 {
    pc.wrapping_add((offset.wrapping_add(1) << 2) as u32)
}

impl PipelineStage for DecodeStage {
    const STAGE: Stage = Stage::Decode;

    fn run(inst: &mut InFlight, ctx: &mut StageContext<'_>) -> Result<StageStatus, AccessFault> {
        let link = inst.pc.wrapping_add(WORD_BYTES);

        match inst.inst.op {
            Opcode::Add { rs, rt, .. }
            | Opcode::Slt { rs, rt, .. }
            | Opcode::Xor { rs, rt, .. }
            | Opcode::Sw { rs, rt, .. } => {
                inst.latch.lhs = ctx.cpu.regs.read(rs)?;
                inst.latch.rhs = ctx.cpu.regs.read(rt)?;
            }
            Opcode::Addi { rs, imm, .. } => {
                inst.latch.lhs = ctx.cpu.regs.read(rs)?;
                inst.latch.rhs = imm;
            }
            Opcode::Lw { rs, .. } => {
                inst.latch.lhs = ctx.cpu.regs.read(rs)?;
            }
            Opcode::Ble { rs, rt, offset } => {
                inst.latch.lhs = ctx.cpu.regs.read(rs)?;
                inst.latch.rhs = ctx.cpu.regs.read(rt)?;
                inst.latch.target = branch_target(inst.pc, offset);
            }
            Opcode::J { target } => {
                inst.jump = Some(JumpIntent::region(target));
            }
            Opcode::Jal { target } => {
                inst.latch.link = link;
                inst.jump = Some(JumpIntent::region(target));
            }
            Opcode::Jp { target } => {
                inst.latch.link = link;
                ctx.cpu.stack.push(link);
                inst.jump = Some(JumpIntent::region(target));
            }
            Opcode::Jr { rs } => {
                let Some(value) = ctx.operand(rs)? else {
                    return Ok(StageStatus::NotReady);
                };
                inst.latch.target = value as u32;
                inst.jump = Some(JumpIntent::direct(value as u32));
            }
            Opcode::Rp => {
                let target = ctx.cpu.stack.pop()?;
                inst.latch.target = target;
                inst.jump = Some(JumpIntent::direct(target));
            }
            Opcode::Nop => {}
        }

        Ok(StageStatus::Ready)
    }

    fn describe(inst: &InFlight) -> String {
        disasm::decode_line(&inst.inst.op)
    }
}
