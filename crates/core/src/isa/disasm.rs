//! Instruction Disassembler.
//!
//! Produces the canonical assembly text of an opcode and the field listing the
//! trace shows for decode events (`"Add: rd = $1, rs = $2, rt = $3"`).

use crate::isa::instruction::Opcode;

/// Canonical assembly text, e.g. `lw $5, 4($6)`.
pub fn disassemble(op: &Opcode) -> String {
    match *op {
        Opcode::Add { rd, rs, rt } | Opcode::Slt { rd, rs, rt } | Opcode::Xor { rd, rs, rt } => {
            format!("{} ${rd}, ${rs}, ${rt}", op.mnemonic())
        }
        Opcode::Addi { rt, rs, imm } => format!("addi ${rt}, ${rs}, {imm}"),
        Opcode::Lw { rt, rs, offset } | Opcode::Sw { rt, rs, offset } => {
            format!("{} ${rt}, {offset}(${rs})", op.mnemonic())
        }
        Opcode::J { target } | Opcode::Jal { target } | Opcode::Jp { target } => {
            format!("{} {target}", op.mnemonic())
        }
        Opcode::Jr { rs } => format!("jr ${rs}"),
        Opcode::Ble { rs, rt, offset } => format!("ble ${rs}, ${rt}, {offset}"),
        Opcode::Rp | Opcode::Nop => op.mnemonic().to_string(),
    }
}

/// Display name used as the decode-event prefix.
pub fn type_name(op: &Opcode) -> &'static str {
    match op {
        Opcode::Add { .. } => "Add",
        Opcode::Addi { .. } => "Addi",
        Opcode::Slt { .. } => "Slt",
        Opcode::Xor { .. } => "Xor",
        Opcode::Lw { .. } => "LW",
        Opcode::Sw { .. } => "SW",
        Opcode::J { .. } => "J",
        Opcode::Jal { .. } => "Jal",
        Opcode::Jr { .. } => "JR",
        Opcode::Jp { .. } => "JP",
        Opcode::Rp => "RP",
        Opcode::Ble { .. } => "Ble",
        Opcode::Nop => "Nop",
    }
}

/// Operand field listing shown after the decode prefix.
pub fn decode_fields(op: &Opcode) -> String {
    match *op {
        Opcode::Add { rd, rs, rt } | Opcode::Slt { rd, rs, rt } | Opcode::Xor { rd, rs, rt } => {
            format!("rd = ${rd}, rs = ${rs}, rt = ${rt}")
        }
        Opcode::Addi { rt, rs, imm } => format!("rt = ${rt}, rs = ${rs}, imm = {imm}"),
        Opcode::Lw { rt, rs, offset } | Opcode::Sw { rt, rs, offset } => {
            format!("rs = ${rs}, rt = ${rt}, imm = {offset}")
        }
        Opcode::Ble { rs, rt, offset } => format!("rs = ${rs}, rt = ${rt}, imm = {offset}"),
        Opcode::J { target } | Opcode::Jal { target } | Opcode::Jp { target } => {
            format!("imm = {target}")
        }
        Opcode::Jr { rs } => format!("rs = ${rs}"),
        Opcode::Rp | Opcode::Nop => String::new(),
    }
}

/// Full decode-event description: `"<Type>: <fields>"`.
pub fn decode_line(op: &Opcode) -> String {
    format!("{}: {}", type_name(op), decode_fields(op))
}
