//! Opcode builders.
//!
//! Terse constructors so tests read like assembly listings.

use mipsim_core::isa::{Instruction, Opcode};

pub fn add(rd: usize, rs: usize, rt: usize) -> Opcode {
    Opcode::Add { rd, rs, rt }
}

pub fn addi(rt: usize, rs: usize, imm: i32) -> Opcode {
    Opcode::Addi { rt, rs, imm }
}

pub fn slt(rd: usize, rs: usize, rt: usize) -> Opcode {
    Opcode::Slt { rd, rs, rt }
}

pub fn xor(rd: usize, rs: usize, rt: usize) -> Opcode {
    Opcode::Xor { rd, rs, rt }
}

pub fn lw(rt: usize, offset: i32, rs: usize) -> Opcode {
    Opcode::Lw { rt, rs, offset }
}

pub fn sw(rt: usize, offset: i32, rs: usize) -> Opcode {
    Opcode::Sw { rt, rs, offset }
}

pub fn j(target: u32) -> Opcode {
    Opcode::J { target }
}

pub fn jal(target: u32) -> Opcode {
    Opcode::Jal { target }
}

pub fn jr(rs: usize) -> Opcode {
    Opcode::Jr { rs }
}

pub fn jp(target: u32) -> Opcode {
    Opcode::Jp { target }
}

pub fn rp() -> Opcode {
    Opcode::Rp
}

pub fn ble(rs: usize, rt: usize, offset: i32) -> Opcode {
    Opcode::Ble { rs, rt, offset }
}

pub fn nop() -> Opcode {
    Opcode::Nop
}

/// Builds a program from opcodes, using canonical disassembly as source text.
pub fn program(ops: &[Opcode]) -> Vec<Instruction> {
    ops.iter()
        .enumerate()
        .map(|(i, op)| Instruction::from_op(*op, i))
        .collect()
}
