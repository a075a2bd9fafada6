//! Static Instruction Model.
//!
//! An [`Instruction`] is created once by the assembler and never mutated. The
//! pipeline copies it into a fresh in-flight instance on every fetch.

use std::fmt;

use crate::common::constants::LINK_REGISTER;

/// The closed set of supported opcodes with their operand fields.
///
/// Register operands are indices into the register file. Jump targets of
/// `j`/`jal`/`jp` are instruction indices; the `ble` offset is relative to the
/// branch using `target = pc + ((offset + 1) << 2)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `add $rd, $rs, $rt`
    Add {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs: usize,
        /// Second source register.
        rt: usize,
    },
    /// `addi $rt, $rs, imm`
    Addi {
        /// Destination register.
        rt: usize,
        /// Source register.
        rs: usize,
        /// Immediate addend.
        imm: i32,
    },
    /// `slt $rd, $rs, $rt` (signed less-than)
    Slt {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs: usize,
        /// Second source register.
        rt: usize,
    },
    /// `xor $rd, $rs, $rt`
    Xor {
        /// Destination register.
        rd: usize,
        /// First source register.
        rs: usize,
        /// Second source register.
        rt: usize,
    },
    /// `lw $rt, offset($rs)`
    Lw {
        /// Destination register.
        rt: usize,
        /// Base register.
        rs: usize,
        /// Byte offset added to the base.
        offset: i32,
    },
    /// `sw $rt, offset($rs)`
    Sw {
        /// Data register.
        rt: usize,
        /// Base register.
        rs: usize,
        /// Byte offset added to the base.
        offset: i32,
    },
    /// `j target`
    J {
        /// Instruction index.
        target: u32,
    },
    /// `jal target`, links into `$15`.
    Jal {
        /// Instruction index.
        target: u32,
    },
    /// `jr $rs`
    Jr {
        /// Register holding the byte target.
        rs: usize,
    },
    /// `jp target`, pushes the return address onto the return stack.
    Jp {
        /// Instruction index.
        target: u32,
    },
    /// `rp`, pops the return address off the return stack.
    Rp,
    /// `ble $rs, $rt, offset`
    Ble {
        /// Left operand register.
        rs: usize,
        /// Right operand register.
        rt: usize,
        /// Branch offset in instructions, biased by one.
        offset: i32,
    },
    /// `nop`
    Nop,
}

/// Coarse instruction category used for statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstClass {
    /// Register-register or register-immediate arithmetic/logic.
    Alu,
    /// Memory load.
    Load,
    /// Memory store.
    Store,
    /// Conditional branch.
    Branch,
    /// Unconditional control transfer.
    Jump,
    /// No operation.
    Nop,
}

impl Opcode {
    /// Assembly mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Addi { .. } => "addi",
            Self::Slt { .. } => "slt",
            Self::Xor { .. } => "xor",
            Self::Lw { .. } => "lw",
            Self::Sw { .. } => "sw",
            Self::J { .. } => "j",
            Self::Jal { .. } => "jal",
            Self::Jr { .. } => "jr",
            Self::Jp { .. } => "jp",
            Self::Rp => "rp",
            Self::Ble { .. } => "ble",
            Self::Nop => "nop",
        }
    }

    /// Instruction category.
    pub fn class(&self) -> InstClass {
        match self {
            Self::Add { .. } | Self::Addi { .. } | Self::Slt { .. } | Self::Xor { .. } => {
                InstClass::Alu
            }
            Self::Lw { .. } => InstClass::Load,
            Self::Sw { .. } => InstClass::Store,
            Self::Ble { .. } => InstClass::Branch,
            Self::J { .. } | Self::Jal { .. } | Self::Jr { .. } | Self::Jp { .. } | Self::Rp => {
                InstClass::Jump
            }
            Self::Nop => InstClass::Nop,
        }
    }

    /// Register written at writeback, if any.
    pub fn dest(&self) -> Option<usize> {
        match *self {
            Self::Add { rd, .. } | Self::Slt { rd, .. } | Self::Xor { rd, .. } => Some(rd),
            Self::Addi { rt, .. } | Self::Lw { rt, .. } => Some(rt),
            Self::Jal { .. } => Some(LINK_REGISTER),
            _ => None,
        }
    }

    /// Registers read as source operands.
    pub fn sources(&self) -> Vec<usize> {
        match *self {
            Self::Add { rs, rt, .. }
            | Self::Slt { rs, rt, .. }
            | Self::Xor { rs, rt, .. }
            | Self::Sw { rs, rt, .. }
            | Self::Ble { rs, rt, .. } => vec![rs, rt],
            Self::Addi { rs, .. } | Self::Lw { rs, .. } | Self::Jr { rs } => vec![rs],
            Self::J { .. } | Self::Jal { .. } | Self::Jp { .. } | Self::Rp | Self::Nop => {
                Vec::new()
            }
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::isa::disasm::disassemble(self))
    }
}

/// An immutable decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Opcode and operand fields.
    pub op: Opcode,
    /// Position in the static program.
    pub index: usize,
    /// Source text, shown by the trace's fetch events.
    pub text: String,
}

impl Instruction {
    /// Creates an instruction with explicit source text.
    pub fn new(op: Opcode, index: usize, text: impl Into<String>) -> Self {
        Self {
            op,
            index,
            text: text.into(),
        }
    }

    /// Creates an instruction whose text is the canonical disassembly of `op`.
    pub fn from_op(op: Opcode, index: usize) -> Self {
        Self::new(op, index, crate::isa::disasm::disassemble(&op))
    }

    /// Byte address of this instruction in the static program.
    pub fn address(&self) -> u32 {
        (self.index as u32) << 2
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
