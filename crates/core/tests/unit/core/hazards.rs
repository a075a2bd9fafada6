//! # Hazard and Forwarding Tests
//!
//! Load-use stalls, ALU forwarding, in-order freezing behind a stall and the
//! cycle-local hazard unit itself.

use mipsim_core::core::arch::Gpr;
use mipsim_core::core::pipeline::{HazardUnit, Stage};
use pretty_assertions::assert_eq;

use crate::common::builder::{add, addi, lw, nop, sw};
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Hazard unit
// ══════════════════════════════════════════════════════════

#[test]
fn resolve_reads_register_file_when_not_awaiting() {
    let mut regs = Gpr::new();
    regs.write(4, 77).unwrap();
    let hz = HazardUnit::new();
    assert_eq!(hz.resolve(4, &regs), Ok(Some(77)));
}

#[test]
fn resolve_prefers_forwarded_value() {
    let mut regs = Gpr::new();
    regs.write(4, 77).unwrap();
    let mut hz = HazardUnit::new();
    hz.publish(4, Some(5));
    assert_eq!(hz.resolve(4, &regs), Ok(Some(5)));
}

#[test]
fn resolve_stalls_on_unforwarded_write() {
    let regs = Gpr::new();
    let mut hz = HazardUnit::new();
    hz.publish(4, None);
    assert_eq!(hz.resolve(4, &regs), Ok(None));
}

#[test]
fn release_and_clear_forget_state() {
    let regs = Gpr::new();
    let mut hz = HazardUnit::new();
    hz.publish(4, None);
    hz.release(4);
    assert_eq!(hz.resolve(4, &regs), Ok(Some(0)));

    hz.publish(5, Some(1));
    hz.clear();
    assert!(!hz.is_awaiting(5));
    assert_eq!(hz.forwarded(5), None);
}

// ══════════════════════════════════════════════════════════
// 2. Load-use
// ══════════════════════════════════════════════════════════

#[test]
fn load_use_stalls_exactly_one_cycle() {
    let mut ctx = TestContext::new()
        .with_word(0, 100)
        .with_ops(&[lw(2, 0, 1), add(3, 2, 0)]);

    assert_eq!(ctx.run(), 7);
    assert_eq!(ctx.reg(3), 100);
    assert_eq!(ctx.sim.stats().stalls_data, 1);

    // Cycle 3: the add cannot execute, only the load advances.
    assert_eq!(
        ctx.events(3),
        vec![(Stage::Memory, "Memory access result = 100".to_string())]
    );
    assert!(ctx.cycle(3).stalled);

    // Cycle 4: the load commits first, then the add reads the fresh value.
    assert_eq!(
        ctx.events(4),
        vec![
            (Stage::Writeback, "Register $2 <= 100".to_string()),
            (Stage::Execute, "Add 100 + 0 = 100".to_string()),
        ]
    );
}

#[test]
fn load_with_one_gap_does_not_stall() {
    let mut ctx = TestContext::new()
        .with_word(4, 21)
        .with_ops(&[lw(2, 4, 0), nop(), add(3, 2, 2)]);
    assert_eq!(ctx.run(), 7);
    assert_eq!(ctx.reg(3), 42);
    assert_eq!(ctx.sim.stats().stalls_data, 0);
}

#[test]
fn stall_freezes_younger_instructions() {
    let mut ctx = TestContext::new()
        .with_word(0, 1)
        .with_ops(&[lw(2, 0, 0), add(3, 2, 2), nop(), nop()]);
    ctx.step(5);

    // Cycle 3: nothing younger than the stalled add moves.
    let stalled = ctx.cycle(3);
    assert!(stalled.stalled);
    assert!(stalled.events.iter().all(|e| e.seq == 0));
    // The fourth fetch waits for the stall to clear and keeps its PC.
    let fetches: Vec<u32> = ctx
        .trace()
        .cycles()
        .iter()
        .flat_map(|c| c.events_in(Stage::Fetch).map(|e| e.pc).collect::<Vec<_>>())
        .collect();
    assert_eq!(fetches, vec![0, 4, 8, 12]);
}

// ══════════════════════════════════════════════════════════
// 3. Forwarding
// ══════════════════════════════════════════════════════════

#[test]
fn back_to_back_alu_forwards_without_stall() {
    let mut ctx = TestContext::new().with_ops(&[addi(1, 0, 5), add(2, 1, 1), add(3, 2, 1)]);
    assert_eq!(ctx.run(), 7);
    assert_eq!(ctx.reg(2), 10);
    assert_eq!(ctx.reg(3), 15);
    assert_eq!(ctx.sim.stats().stalls_data, 0);
}

#[test]
fn youngest_producer_wins() {
    let mut ctx = TestContext::new().with_ops(&[addi(1, 0, 1), addi(1, 0, 2), add(2, 1, 0)]);
    let _ = ctx.run();
    assert_eq!(ctx.reg(2), 2);
    assert_eq!(ctx.reg(1), 2);
}

#[test]
fn store_forwards_data_and_base() {
    let mut ctx = TestContext::new().with_ops(&[
        addi(1, 0, 42),
        addi(4, 0, 8),
        sw(1, 0, 4),
        lw(2, 8, 0),
    ]);
    let _ = ctx.run();
    assert_eq!(ctx.word(8), 42);
    assert_eq!(ctx.reg(2), 42);
}

#[test]
fn decode_sees_stale_value_execute_sees_fresh() {
    // The add decodes while $1 is still zero in the register file but executes
    // with the forwarded value.
    let mut ctx = TestContext::new().with_ops(&[addi(1, 0, 7), add(2, 1, 0)]);
    let _ = ctx.run();
    assert_eq!(
        ctx.cycle(3).events_in(Stage::Execute).next().map(|e| e.description.as_str()),
        Some("Add 7 + 0 = 7")
    );
    assert_eq!(ctx.reg(2), 7);
}
