//! # Control Transfer Tests
//!
//! Jumps, jump-and-link, indirect jumps, call/return through the return
//! stack, branch prediction and misprediction recovery.

use mipsim_core::common::{AccessFault, SimError};
use mipsim_core::core::pipeline::Stage;
use pretty_assertions::assert_eq;

use crate::common::builder::{addi, ble, j, jal, jp, jr, lw, nop, rp};
use crate::common::harness::TestContext;

// ══════════════════════════════════════════════════════════
// 1. Unconditional jumps
// ══════════════════════════════════════════════════════════

#[test]
fn jal_squashes_fall_through_and_links() {
    let mut ctx = TestContext::new().with_ops(&[jal(4), nop(), nop(), nop(), nop()]);

    ctx.step(2);
    assert_eq!(
        ctx.events(1),
        vec![
            (Stage::Decode, "Jal: imm = 4".to_string()),
            (Stage::Fetch, "nop".to_string()),
        ]
    );
    assert_eq!(ctx.cycle(1).squash_at, Some(0));
    assert_eq!(ctx.cycle(1).squashed, 1);
    assert_eq!(ctx.sim.window().count(), 1);

    assert_eq!(ctx.run(), 7);
    assert_eq!(ctx.reg(15), 4);
    assert_eq!(
        ctx.events(4)[0],
        (Stage::Writeback, "Register $15 <= 4".to_string())
    );
    // Only the jump target was executed after the jal.
    let fetched: Vec<usize> = ctx
        .trace()
        .cycles()
        .iter()
        .flat_map(|c| c.events_in(Stage::Fetch).map(|e| e.index).collect::<Vec<_>>())
        .collect();
    assert_eq!(fetched, vec![0, 1, 4]);
}

#[test]
fn pc_is_redirected_in_the_decode_cycle() {
    let mut ctx = TestContext::new().with_ops(&[jal(4), nop(), nop(), nop(), nop()]);
    ctx.step(2);
    assert_eq!(ctx.sim.pc(), 16);
    assert_eq!(ctx.sim.pc_index(), 4);
}

#[test]
fn j_skips_instructions() {
    let mut ctx = TestContext::new().with_ops(&[j(3), addi(1, 0, 1), addi(2, 0, 2), addi(3, 0, 3)]);
    let _ = ctx.run();
    assert_eq!((ctx.reg(1), ctx.reg(2), ctx.reg(3)), (0, 0, 3));
    assert_eq!(ctx.sim.stats().jumps, 1);
}

#[test]
fn jr_waits_for_its_target_register() {
    let mut ctx = TestContext::new().with_ops(&[addi(5, 0, 12), jr(5), addi(6, 0, 1), nop()]);
    let _ = ctx.run();
    assert_eq!(ctx.reg(5), 12);
    assert_eq!(ctx.reg(6), 0, "fall-through was squashed");
    assert_eq!(ctx.sim.stats().stalls_data, 1);
    assert!(ctx.cycle(2).stalled);
}

#[test]
fn jal_and_jr_make_a_call() {
    let mut ctx = TestContext::new().with_source(
        "
        jal func
        addi $2, $0, 5
        j end
func:   addi $3, $0, 6
        jr $15
end:    nop
        ",
    );
    let _ = ctx.run();
    assert_eq!(ctx.reg(2), 5);
    assert_eq!(ctx.reg(3), 6);
    assert_eq!(ctx.reg(15), 4);
}

// ══════════════════════════════════════════════════════════
// 2. Call/return stack
// ══════════════════════════════════════════════════════════

#[test]
fn jp_and_rp_call_and_return() {
    let mut ctx = TestContext::new().with_source(
        "
        jp func          # push 4, go to func
        addi $3, $0, 7
        j end
func:   addi $4, $0, 9
        rp
end:    nop
        ",
    );
    let _ = ctx.run();
    assert_eq!(ctx.reg(3), 7);
    assert_eq!(ctx.reg(4), 9);
    assert_eq!(ctx.sim.peek_return(), None);
}

#[test]
fn jp_push_is_visible_after_decode() {
    let mut ctx = TestContext::new().with_ops(&[jp(3), nop(), nop(), nop()]);
    ctx.step(2);
    assert_eq!(ctx.sim.peek_return(), Some(4));
}

#[test]
fn squashed_push_is_rolled_back() {
    // The branch resolves taken in cycle 2 while the younger jp decodes.
    let mut ctx = TestContext::new().with_ops(&[ble(0, 0, 2), jp(5), nop(), nop(), nop(), nop()]);
    ctx.step(3);
    assert!(
        ctx.events(2)
            .contains(&(Stage::Decode, "JP: imm = 5".to_string()))
    );
    assert_eq!(ctx.cycle(2).squashed, 2);
    assert_eq!(ctx.sim.peek_return(), None);

    let _ = ctx.run();
    assert_eq!(ctx.sim.peek_return(), None);
}

#[test]
fn squashed_pop_is_rolled_back() {
    let mut ctx = TestContext::new().with_ops(&[ble(0, 0, 2), rp(), nop(), nop()]);
    ctx.sim.push_return(40);
    let _ = ctx.run();
    assert_eq!(ctx.sim.peek_return(), Some(40));
}

#[test]
fn wrong_path_fault_still_aborts() {
    // The rp decodes in the same cycle the older branch redirects.
    let mut ctx = TestContext::new().with_ops(&[ble(0, 0, 2), rp(), nop(), nop(), nop()]);
    match ctx.run_err() {
        SimError::Fault { seq, index, stage, source, .. } => {
            assert_eq!((seq, index), (1, 1));
            assert_eq!(stage, Stage::Decode);
            assert_eq!(source, AccessFault::ReturnStackEmpty);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn stall_behind_a_redirect_still_freezes_fetch() {
    // Cycle 3: lw in memory, ble resolves taken in execute, jr waits on $5.
    let mut ctx =
        TestContext::new().with_ops(&[lw(5, 0, 0), ble(0, 0, 2), jr(5), nop(), nop(), nop()]);
    ctx.step(4);

    let cycle = ctx.cycle(3);
    assert!(cycle.stalled);
    assert_eq!(cycle.squash_at, Some(1));
    assert_eq!(cycle.squashed, 2);
    assert!(ctx.sim.pipeline.is_stalled());
    assert_eq!(ctx.sim.pc_index(), 4);

    assert_eq!(
        ctx.events(4),
        vec![
            (Stage::Writeback, "Register $5 <= 0".to_string()),
            (Stage::Memory, "None".to_string()),
        ]
    );
    assert!(!ctx.sim.pipeline.is_stalled());

    assert_eq!(ctx.run(), 10);
    let stats = ctx.sim.stats();
    assert_eq!(stats.stalls_data, 1);
    assert_eq!(stats.squashed, 2);
    // Index 3 was appended but never fetched; the frozen slot was the target's.
    let fetched: Vec<usize> = ctx
        .trace()
        .cycles()
        .iter()
        .flat_map(|c| c.events_in(Stage::Fetch).map(|e| e.index).collect::<Vec<_>>())
        .collect();
    assert_eq!(fetched, vec![0, 1, 2, 5]);
}

// ══════════════════════════════════════════════════════════
// 3. Branches
// ══════════════════════════════════════════════════════════

fn branch_program() -> Vec<mipsim_core::isa::Opcode> {
    let mut ops = vec![ble(1, 2, 5)];
    ops.extend(std::iter::repeat_n(nop(), 7));
    ops
}

#[test]
fn unpredicted_taken_branch_redirects_after_execute() {
    let mut ctx = TestContext::new()
        .with_reg(1, 100)
        .with_reg(2, 200)
        .with_ops(&branch_program());
    ctx.step(3);

    assert_eq!(ctx.sim.pc(), 24);
    let cycle = ctx.cycle(2);
    assert_eq!(
        cycle.events_in(Stage::Execute).next().map(|e| e.description.as_str()),
        Some("Ble 100 <= 200 = true")
    );
    assert_eq!(cycle.squash_at, Some(0));
    assert_eq!(cycle.squashed, 2);
    assert_eq!(ctx.sim.window().count(), 1);
    assert_eq!(ctx.sim.stats().branch_mispredictions, 1);
}

#[test]
fn not_taken_branch_falls_through() {
    let mut ctx = TestContext::new()
        .with_reg(1, 300)
        .with_reg(2, 200)
        .with_ops(&branch_program());
    ctx.step(3);

    assert_eq!(ctx.sim.pc(), 12);
    assert_eq!(ctx.cycle(2).squash_at, None);
    assert_eq!(ctx.sim.stats().branch_correct, 1);
    // A not-taken outcome does not allocate a predictor entry.
    assert_eq!(ctx.sim.cpu.btb.lookup(0), None);
}

#[test]
fn taken_branch_trains_predictor() {
    let mut ctx = TestContext::new()
        .with_reg(1, 100)
        .with_reg(2, 200)
        .with_ops(&branch_program());
    ctx.step(3);
    assert_eq!(ctx.sim.cpu.btb.predict_taken(0), Some(24));
}

#[test]
fn loop_predicts_and_recovers() {
    let mut ctx = TestContext::new().with_source(
        "
        addi $1, $0, 0
        addi $2, $0, 3
loop:   addi $1, $1, 1
        ble $1, $2, loop
        nop
        ",
    );
    assert_eq!(ctx.run(), 19);
    assert_eq!(ctx.reg(1), 4);

    let stats = ctx.sim.stats();
    assert_eq!(stats.branch_correct, 2);
    assert_eq!(stats.branch_mispredictions, 2);
    assert_eq!(stats.squashed, 3);
    assert_eq!(stats.jumps, 5);
    assert_eq!(stats.stalls_data, 0);
}

#[test]
fn correct_prediction_costs_nothing() {
    let mut ctx = TestContext::new().with_source(
        "
        addi $1, $0, 0
        addi $2, $0, 3
loop:   addi $1, $1, 1
        ble $1, $2, loop
        nop
        ",
    );
    let _ = ctx.run();

    // Branch executions that agreed with a taken prediction squash nothing.
    let correct: Vec<_> = ctx
        .trace()
        .cycles()
        .iter()
        .filter(|c| {
            c.events_in(Stage::Execute)
                .any(|e| e.description.starts_with("Ble") && e.description.ends_with("true"))
        })
        .skip(1)
        .collect();
    assert_eq!(correct.len(), 2);
    assert!(correct.iter().all(|c| c.squashed == 0 && !c.stalled));
}
