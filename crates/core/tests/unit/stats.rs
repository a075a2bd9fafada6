//! # Statistics Tests
//!
//! Counter bookkeeping, derived metrics and the text report, both directly and
//! as produced by a run.

use mipsim_core::isa::InstClass;
use mipsim_core::stats::{STATS_SECTIONS, SimStats};

use crate::common::builder::{add, addi, ble, lw, nop, sw};
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Direct bookkeeping
// ══════════════════════════════════════════════════════════

#[test]
fn retire_counts_by_class() {
    let mut stats = SimStats::default();
    for class in [
        InstClass::Alu,
        InstClass::Alu,
        InstClass::Load,
        InstClass::Store,
        InstClass::Branch,
        InstClass::Jump,
        InstClass::Nop,
    ] {
        stats.record_retire(class);
    }
    assert_eq!(stats.instructions_retired, 7);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_jump, 1);
    assert_eq!(stats.inst_nop, 1);
}

#[test]
fn accuracy_and_cpi() {
    let mut stats = SimStats::default();
    stats.record_branch(false);
    stats.record_branch(false);
    stats.record_branch(false);
    stats.record_branch(true);
    assert!((stats.branch_accuracy() - 75.0).abs() < 1e-9);

    stats.cycles = 12;
    stats.instructions_retired = 4;
    assert!((stats.cpi() - 3.0).abs() < 1e-9);
}

#[test]
fn report_contains_every_section() {
    let text = SimStats::default().report();
    for header in ["PIPELINE EVENTS", "INSTRUCTION MIX", "BRANCH PREDICTION"] {
        assert!(text.contains(header), "missing {header}");
    }
    assert_eq!(STATS_SECTIONS.len(), 4);
}

// ══════════════════════════════════════════════════════════
// 2. Counters produced by a run
// ══════════════════════════════════════════════════════════

#[test]
fn straight_line_run_counts() {
    let mut ctx = TestContext::new().with_ops(&[addi(1, 0, 4), sw(1, 0, 0), lw(2, 0, 0), add(3, 2, 2), nop()]);
    let cycles = ctx.run();

    let stats = ctx.sim.stats();
    assert_eq!(stats.cycles, cycles);
    assert_eq!(stats.instructions_fetched, 5);
    assert_eq!(stats.instructions_retired, 5);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_nop, 1);
    assert_eq!(stats.squashed, 0);
    // lw -> add is the only load-use pair.
    assert_eq!(stats.stalls_data, 1);
    assert_eq!(ctx.reg(3), 8);
}

#[test]
fn mispredicted_branch_counts_squash_and_jump() {
    let mut ctx = TestContext::new().with_ops(&[ble(0, 0, 1), nop(), nop(), nop()]);
    let _ = ctx.run();

    let stats = ctx.sim.stats();
    assert_eq!(stats.branch_mispredictions, 1);
    assert_eq!(stats.branch_correct, 0);
    assert_eq!(stats.jumps, 1);
    assert_eq!(stats.squashed, 2);
    assert_eq!(stats.inst_branch, 1);
}
