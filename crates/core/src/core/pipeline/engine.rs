//! Pipeline Scheduler.
//!
//! The [`Pipeline`] owns the in-flight window and advances simulated time one
//! clock per [`Pipeline::tick`]. Each cycle it:
//! 1. **Fetches:** Appends an instance of the instruction at the PC unless the
//!    previous cycle stalled.
//! 2. **Sweeps:** Advances every instance by one stage, oldest first, stopping at
//!    the first stage that is not ready.
//! 3. **Reconciles:** Publishes hazard state, honors the oldest taken jump and
//!    squashes everything younger, then retires a completed oldest instance.
//! 4. **Advances:** Moves the PC to the next instruction when nothing redirected
//!    or froze fetch.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::common::error::SimError;
use crate::core::Cpu;
use crate::core::arch::stack::ReturnStack;
use crate::core::pipeline::hazards::HazardUnit;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::stage::Stage;
use crate::core::pipeline::stages;
use crate::core::pipeline::trace::{CycleRecord, Trace, TraceEvent};
use crate::core::pipeline::traits::StageContext;
use crate::isa::instruction::Instruction;

/// In-order five-stage pipeline scheduler.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    window: VecDeque<InFlight>,
    hazards: HazardUnit,
    next_seq: u64,
    stalled: bool,
    cycle: u64,
    trace: Trace,
    trace_enabled: bool,
}

/// What the sweep found, consumed by the reconcile step.
#[derive(Debug, Default)]
struct SweepResult {
    events: Vec<TraceEvent>,
    stalled: bool,
    jump_at: Option<usize>,
    checkpoint: Option<ReturnStack>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    ///
    /// # Arguments
    ///
    /// * `trace_enabled` - Record a [`CycleRecord`] for every cycle.
    pub fn new(trace_enabled: bool) -> Self {
        Self {
            trace_enabled,
            ..Self::default()
        }
    }

    /// Number of completed cycles.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// In-flight instances, oldest first.
    pub fn window(&self) -> &VecDeque<InFlight> {
        &self.window
    }

    /// The recorded execution trace.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Whether the last cycle stalled.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    /// Returns `true` if no instance is in flight.
    pub fn is_drained(&self) -> bool {
        self.window.is_empty()
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `cpu` - Architectural state the stages operate on.
    /// * `program` - The static program, indexed by `cpu.pc.index()`.
    ///
    /// # Returns
    ///
    /// `Ok(false)` without doing anything when there is no program, or when the
    /// PC is past its end and the window is empty. `Ok(true)` otherwise.
    ///
    /// # Errors
    ///
    /// An access fault raised by any stage aborts the cycle as
    /// [`SimError::Fault`], including one raised by an instance that the same
    /// cycle would have squashed.
    pub fn tick(&mut self, cpu: &mut Cpu, program: &[Instruction]) -> Result<bool, SimError> {
        let has_next = cpu.pc.index() < program.len();
        if program.is_empty() || (!has_next && self.window.is_empty()) {
            return Ok(false);
        }

        if has_next && !self.stalled {
            if let Some(inst) = program.get(cpu.pc.index()) {
                trace!(seq = self.next_seq, pc = cpu.pc.value(), "append {}", inst.text);
                self.window.push_back(InFlight::new(inst.clone(), self.next_seq));
                self.next_seq += 1;
            }
        }

        self.hazards.clear();
        let sweep = self.sweep(cpu)?;

        let mut record = CycleRecord {
            cycle: self.cycle,
            events: sweep.events,
            stalled: sweep.stalled,
            ..CycleRecord::default()
        };

        if let Some(at) = sweep.jump_at {
            let keep = at + 1;
            let squashed = self.window.len().saturating_sub(keep);
            self.window.truncate(keep);
            if let Some(stack) = sweep.checkpoint {
                cpu.stack = stack;
            }
            cpu.stats.squashed += squashed as u64;
            record.squash_at = Some(at);
            record.squashed = squashed;
            debug!(cycle = self.cycle, at, squashed, pc = cpu.pc.value(), "squash");
        }

        if self.window.front().is_some_and(InFlight::is_complete) {
            if let Some(done) = self.window.pop_front() {
                debug!(cycle = self.cycle, seq = done.seq, "retire {}", done.inst.text);
                cpu.stats.record_retire(done.inst.op.class());
                record.retired = Some(done.seq);
            }
        }

        self.stalled = sweep.stalled;
        if sweep.stalled {
            cpu.stats.stalls_data += 1;
        }

        if sweep.jump_at.is_none() && !sweep.stalled && cpu.pc.index() < program.len() {
            cpu.pc.advance();
        }

        if self.trace_enabled {
            self.trace.push(record);
        }
        self.cycle += 1;
        cpu.stats.cycles += 1;
        Ok(true)
    }

    /// Runs one stage of every instance, oldest first.
    fn sweep(&mut self, cpu: &mut Cpu) -> Result<SweepResult, SimError> {
        let mut out = SweepResult::default();

        for i in 0..self.window.len() {
            let Some(inst) = self.window.get_mut(i) else {
                break;
            };
            let Some(stage) = inst.upcoming() else {
                continue;
            };

            let mut ctx = StageContext {
                cpu: &mut *cpu,
                hazards: &self.hazards,
            };
            let description = match stages::dispatch(stage, inst, &mut ctx) {
                Ok(Some(text)) => text,
                Ok(None) => {
                    debug!(cycle = self.cycle, seq = inst.seq, %stage, "stall");
                    out.stalled = true;
                    break;
                }
                Err(source) => {
                    return Err(SimError::Fault {
                        seq: inst.seq,
                        index: inst.inst.index,
                        text: inst.inst.text.clone(),
                        stage,
                        source,
                    });
                }
            };

            inst.stage = Some(stage);
            trace!(seq = inst.seq, %stage, "{description}");
            out.events.push(TraceEvent::new(stage, description, inst));
            if stage == Stage::Fetch {
                cpu.stats.instructions_fetched += 1;
            }

            let seq = inst.seq;
            let dest = inst.dest;
            let forwarded = inst.forwarded;
            let release = inst.clear_awaiting;
            let jump = if out.jump_at.is_none() {
                inst.take_jump()
            } else {
                None
            };

            if let Some(reg) = dest {
                self.hazards.publish(reg, forwarded);
                if release {
                    self.hazards.release(reg);
                }
            }

            if let Some(intent) = jump {
                cpu.pc.jump(&intent);
                cpu.stats.jumps += 1;
                out.jump_at = Some(i);
                out.checkpoint = Some(cpu.stack.clone());
                debug!(cycle = self.cycle, seq, target = cpu.pc.value(), "jump honored");
            }
        }

        Ok(out)
    }
}
