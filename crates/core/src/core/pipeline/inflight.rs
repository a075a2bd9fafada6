//! Dynamic Instruction Instances.
//!
//! An [`InFlight`] is one occurrence of a static instruction moving through the
//! pipeline. It is built by value when the scheduler appends it to the window
//! and dropped on retirement or squash. Values computed in one stage and needed
//! in a later one travel in its [`Latch`].

use crate::core::pipeline::signals::JumpIntent;
use crate::core::pipeline::stage::Stage;
use crate::isa::instruction::Instruction;

/// Per-instance values passed between stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latch {
    /// First source operand.
    pub lhs: i32,
    /// Second source operand, immediate, or store data.
    pub rhs: i32,
    /// ALU result or loaded word.
    pub result: i32,
    /// Effective data address.
    pub address: u32,
    /// Return address (`jal`, `jp`).
    pub link: u32,
    /// Computed branch target.
    pub target: u32,
    /// The predictor redirected fetch for this branch.
    pub predicted_taken: bool,
    /// Resolved branch outcome.
    pub taken: bool,
}

/// A dynamic instruction instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InFlight {
    /// Copy of the static instruction.
    pub inst: Instruction,
    /// Execution-order number.
    pub seq: u64,
    /// Last completed stage; `None` before fetch.
    pub stage: Option<Stage>,
    /// Program counter snapshot taken at fetch.
    pub pc: u32,
    /// Destination register with a pending write.
    pub dest: Option<usize>,
    /// Value available for forwarding to younger consumers.
    pub forwarded: Option<i32>,
    /// Pending or consumed control transfer.
    pub jump: Option<JumpIntent>,
    /// Release `dest` from the hazard state after this stage.
    pub clear_awaiting: bool,
    /// Inter-stage values.
    pub latch: Latch,
}

impl InFlight {
    /// Creates a pre-fetch instance of `inst`.
    pub fn new(inst: Instruction, seq: u64) -> Self {
        Self {
            inst,
            seq,
            stage: None,
            pc: 0,
            dest: None,
            forwarded: None,
            jump: None,
            clear_awaiting: false,
            latch: Latch::default(),
        }
    }

    /// The stage this instance runs next, or `None` once writeback is done.
    pub fn upcoming(&self) -> Option<Stage> {
        match self.stage {
            None => Some(Stage::Fetch),
            Some(stage) => stage.next(),
        }
    }

    /// Consumes a taken jump intent, leaving it recorded but no longer pending.
    pub fn take_jump(&mut self) -> Option<JumpIntent> {
        let intent = self.jump.as_mut().filter(|j| j.taken)?;
        intent.taken = false;
        Some(*intent)
    }

    /// Returns `true` once writeback has completed.
    pub fn is_complete(&self) -> bool {
        self.stage == Some(Stage::Writeback)
    }
}
