//! # Assembler Tests
//!
//! Accepted syntax, operand validation, labels and error batching.

use mipsim_core::isa::{Opcode, ParseError, assemble, parse_instruction};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::{add, addi, ble, j, jal, jp, jr, lw, nop, rp, slt, sw, xor};

// ══════════════════════════════════════════════════════════
// 1. Single instructions
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("add $1, $2, $3", add(1, 2, 3))]
#[case("ADD $1,$2,$3", add(1, 2, 3))]
#[case("xor $4, $5, $6", xor(4, 5, 6))]
#[case("slt $15, $0, $14", slt(15, 0, 14))]
#[case("addi $2, $1, -7", addi(2, 1, -7))]
#[case("addi $2, $1, +7", addi(2, 1, 7))]
#[case("lw $5, 4($6)", lw(5, 4, 6))]
#[case("sw $5, -8( $6 )", sw(5, -8, 6))]
#[case("sw $0, 0($0)", sw(0, 0, 0))]
#[case("j 12", j(12))]
#[case("jal 3", jal(3))]
#[case("jp 0", jp(0))]
#[case("jr $15", jr(15))]
#[case("rp", rp())]
#[case("nop", nop())]
#[case("ble $1, $2, -2", ble(1, 2, -2))]
#[case("  nop   # trailing comment", nop())]
fn parses(#[case] text: &str, #[case] expected: Opcode) {
    let inst = parse_instruction(text, 3).unwrap();
    assert_eq!(inst.op, expected);
    assert_eq!(inst.index, 3);
}

#[test]
fn source_text_is_kept_for_the_trace() {
    let inst = parse_instruction("  ADD $1, $2, $3   # sum", 0).unwrap();
    assert_eq!(inst.text, "add $1, $2, $3");
}

#[rstest]
#[case::zero_dest_add("add $0, $1, $2", "$0 cannot be a destination register")]
#[case::zero_dest_lw("lw $0, 0($1)", "$0 cannot be a destination register")]
#[case::register_range("add $1, $2, $16", "register $16 out of range ($0-$15)")]
#[case::immediate_range("addi $1, $1, 4294967296", "immediate `4294967296` out of range")]
#[case::unknown("sub $1, $2, $3", "unrecognized instruction `sub $1, $2, $3`")]
#[case::missing_operand("add $1, $2", "unrecognized instruction `add $1, $2`")]
#[case::undefined_label("j nowhere", "undefined label `nowhere`")]
#[case::negative_jump("j -1", "negative jump target `-1`")]
fn rejects(#[case] text: &str, #[case] message: &str) {
    let err = parse_instruction(text, 4).unwrap_err();
    assert_eq!(
        err,
        ParseError {
            line: 5,
            message: message.to_string(),
        }
    );
}

#[test]
fn blank_line_is_not_an_instruction() {
    assert!(parse_instruction("   # only a comment", 0).is_err());
}

// ══════════════════════════════════════════════════════════
// 2. Programs and labels
// ══════════════════════════════════════════════════════════

#[test]
fn labels_resolve_forward_and_backward() {
    let program = assemble(
        "
        # counts to three
start:  addi $1, $0, 0
loop:   addi $1, $1, 1
        ble $1, $2, loop
        jal done
        j start
done:
        nop
        ",
    )
    .unwrap();

    let ops: Vec<Opcode> = program.iter().map(|i| i.op).collect();
    assert_eq!(
        ops,
        vec![addi(1, 0, 0), addi(1, 1, 1), ble(1, 2, -2), jal(5), j(0), nop()]
    );
    let indices: Vec<usize> = program.iter().map(|i| i.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn ble_label_offset_lands_on_label() {
    let program = assemble("ble $1, $2, next\nnop\nnext: nop").unwrap();
    // target = pc + ((offset + 1) << 2) = 0 + 8
    assert_eq!(program[0].op, ble(1, 2, 1));
}

#[test]
fn stacked_labels_share_an_index() {
    let program = assemble("a: b: nop\nj b").unwrap();
    assert_eq!(program[1].op, j(0));
}

#[test]
fn all_errors_are_reported_together() {
    let errors = assemble("nop\nfoo $1\nadd $0, $1, $2\nnop\nj missing").unwrap_err();
    let lines: Vec<usize> = errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 3, 5]);
}

#[test]
fn duplicate_labels_are_rejected() {
    let errors = assemble("x: nop\nx: nop").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 2);
    assert!(errors[0].message.contains("duplicate label"));
}

#[test]
fn empty_source_is_an_empty_program() {
    assert!(assemble("\n  # nothing\n").unwrap().is_empty());
}
