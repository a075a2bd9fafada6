//! Assembler Front End.
//!
//! Turns assembly source into static [`Instruction`]s. It provides:
//! 1. **Line Syntax:** Case-insensitive mnemonics, `#` comments and `label:` prefixes.
//! 2. **Operand Checks:** Register range, `$0` destinations and immediate width.
//! 3. **Batch Errors:** Every malformed line is reported, not just the first.
//!
//! Accepted forms:
//!
//! ```text
//! add|xor|slt $rd, $rs, $rt      addi $rt, $rs, imm
//! lw|sw $rt, offset($rs)         ble $rs, $rt, offset|label
//! j|jal|jp index|label           jr $rs
//! rp                             nop
//! ```
//!
//! A `ble` label is converted to the biased offset the decode stage expects,
//! so `target = pc + ((offset + 1) << 2)` lands on the label.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::common::constants::NUM_REGISTERS;
use crate::isa::instruction::{Instruction, Opcode};

/// A malformed source line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// One-based source line number.
    pub line: usize,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

struct Patterns {
    label: Regex,
    r_type: Regex,
    addi: Regex,
    mem: Regex,
    jump: Regex,
    jr: Regex,
    ble: Regex,
}

const REG: &str = r"\$(\d+)";
const SEP: &str = r"\s*,\s*";
const IMM: &str = r"([+-]?\d+)";
const TARGET: &str = r"([a-z_][a-z0-9_]*|[+-]?\d+)";

#[allow(clippy::expect_used)]
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    let re = |p: String| Regex::new(&p).expect("assembler pattern is valid");
    Patterns {
        label: re(r"^([a-z_][a-z0-9_]*)\s*:\s*(.*)$".to_string()),
        r_type: re(format!(r"^(add|xor|slt)\s+{REG}{SEP}{REG}{SEP}{REG}$")),
        addi: re(format!(r"^addi\s+{REG}{SEP}{REG}{SEP}{IMM}$")),
        mem: re(format!(r"^(lw|sw)\s+{REG}{SEP}{IMM}\s*\(\s*{REG}\s*\)$")),
        jump: re(format!(r"^(jal|jp|j)\s+{TARGET}$")),
        jr: re(format!(r"^jr\s+{REG}$")),
        ble: re(format!(r"^ble\s+{REG}{SEP}{REG}{SEP}{TARGET}$")),
    }
});

/// Decodes a single instruction without label support.
///
/// # Arguments
///
/// * `text` - One line of assembly (comments allowed).
/// * `index` - Static program index; reported as line `index + 1` on error.
pub fn parse_instruction(text: &str, index: usize) -> Result<Instruction, ParseError> {
    let line = index + 1;
    let clean = normalize(text);
    if clean.is_empty() {
        return Err(ParseError::new(line, "empty instruction"));
    }
    let op = parse_op(&clean, index, line, &HashMap::new())?;
    Ok(Instruction::new(op, index, clean))
}

/// Assembles a complete source file.
///
/// Labels may be referenced before they are defined. Instruction indices
/// count decoded instructions only; blank, comment and label-only lines do
/// not consume an index.
///
/// # Returns
///
/// The program in order, or every [`ParseError`] found.
pub fn assemble(source: &str) -> Result<Vec<Instruction>, Vec<ParseError>> {
    let mut errors = Vec::new();
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (n, raw) in source.lines().enumerate() {
        let line = n + 1;
        let mut rest = normalize(raw);
        while let Some((name, tail)) = split_label(&rest) {
            if labels.insert(name.clone(), lines.len()).is_some() {
                errors.push(ParseError::new(line, format!("duplicate label `{name}`")));
            }
            rest = tail;
        }
        if !rest.is_empty() {
            lines.push((line, rest));
        }
    }

    let mut program = Vec::with_capacity(lines.len());
    for (index, (line, text)) in lines.into_iter().enumerate() {
        match parse_op(&text, index, line, &labels) {
            Ok(op) => program.push(Instruction::new(op, index, text)),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(program)
    } else {
        errors.sort_by_key(|e| e.line);
        Err(errors)
    }
}

fn split_label(text: &str) -> Option<(String, String)> {
    PATTERNS
        .label
        .captures(text)
        .map(|c| (c[1].to_string(), c[2].trim().to_string()))
}

fn normalize(raw: &str) -> String {
    let code = raw.split('#').next().unwrap_or_default();
    code.trim().to_lowercase()
}

fn parse_op(
    text: &str,
    index: usize,
    line: usize,
    labels: &HashMap<String, usize>,
) -> Result<Opcode, ParseError> {
    let p = &*PATTERNS;
    let reg = |caps: &Captures<'_>, i: usize| register(&caps[i], line);
    let dest = |caps: &Captures<'_>, i: usize| destination(&caps[i], line);
    let imm = |caps: &Captures<'_>, i: usize| immediate(&caps[i], line);

    if let Some(c) = p.r_type.captures(text) {
        let (rd, rs, rt) = (dest(&c, 2)?, reg(&c, 3)?, reg(&c, 4)?);
        return Ok(match &c[1] {
            "add" => Opcode::Add { rd, rs, rt },
            "xor" => Opcode::Xor { rd, rs, rt },
            _ => Opcode::Slt { rd, rs, rt },
        });
    }
    if let Some(c) = p.addi.captures(text) {
        return Ok(Opcode::Addi {
            rt: dest(&c, 1)?,
            rs: reg(&c, 2)?,
            imm: imm(&c, 3)?,
        });
    }
    if let Some(c) = p.mem.captures(text) {
        let (offset, rs) = (imm(&c, 3)?, reg(&c, 4)?);
        return Ok(if &c[1] == "lw" {
            Opcode::Lw {
                rt: dest(&c, 2)?,
                rs,
                offset,
            }
        } else {
            Opcode::Sw {
                rt: reg(&c, 2)?,
                rs,
                offset,
            }
        });
    }
    if let Some(c) = p.jump.captures(text) {
        let target = jump_target(&c[2], line, labels)?;
        return Ok(match &c[1] {
            "j" => Opcode::J { target },
            "jal" => Opcode::Jal { target },
            _ => Opcode::Jp { target },
        });
    }
    if let Some(c) = p.jr.captures(text) {
        return Ok(Opcode::Jr { rs: reg(&c, 1)? });
    }
    if let Some(c) = p.ble.captures(text) {
        return Ok(Opcode::Ble {
            rs: reg(&c, 1)?,
            rt: reg(&c, 2)?,
            offset: branch_offset(&c[3], index, line, labels)?,
        });
    }
    match text {
        "rp" => Ok(Opcode::Rp),
        "nop" => Ok(Opcode::Nop),
        _ => Err(ParseError::new(
            line,
            format!("unrecognized instruction `{text}`"),
        )),
    }
}

fn register(field: &str, line: usize) -> Result<usize, ParseError> {
    match field.parse::<usize>() {
        Ok(r) if r < NUM_REGISTERS => Ok(r),
        _ => Err(ParseError::new(
            line,
            format!("register ${field} out of range ($0-${})", NUM_REGISTERS - 1),
        )),
    }
}

fn destination(field: &str, line: usize) -> Result<usize, ParseError> {
    match register(field, line)? {
        0 => Err(ParseError::new(line, "$0 cannot be a destination register")),
        r => Ok(r),
    }
}

fn immediate(field: &str, line: usize) -> Result<i32, ParseError> {
    field
        .parse::<i32>()
        .map_err(|_| ParseError::new(line, format!("immediate `{field}` out of range")))
}

fn jump_target(
    field: &str,
    line: usize,
    labels: &HashMap<String, usize>,
) -> Result<u32, ParseError> {
    if let Some(&idx) = labels.get(field) {
        return Ok(idx as u32);
    }
    if field.starts_with(|c: char| c.is_ascii_digit() || c == '+') {
        return field
            .parse::<u32>()
            .map_err(|_| ParseError::new(line, format!("jump target `{field}` out of range")));
    }
    if field.starts_with('-') {
        return Err(ParseError::new(line, format!("negative jump target `{field}`")));
    }
    Err(ParseError::new(line, format!("undefined label `{field}`")))
}

fn branch_offset(
    field: &str,
    index: usize,
    line: usize,
    labels: &HashMap<String, usize>,
) -> Result<i32, ParseError> {
    if let Some(&idx) = labels.get(field) {
        return Ok(idx as i32 - index as i32 - 1);
    }
    if field.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-') {
        return immediate(field, line);
    }
    Err(ParseError::new(line, format!("undefined label `{field}`")))
}
