//! Simulator: owns the CPU, the pipeline and the program side-by-side.
//!
//! Keeping the pipeline outside `Cpu` lets each tick borrow the architectural
//! state mutably while the scheduler mutates its own window.

use serde::Serialize;
use tracing::{info, warn};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::pipeline::{InFlight, Pipeline, Trace};
use crate::isa::instruction::Instruction;
use crate::stats::SimStats;

/// How a run-to-completion loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// The program drained; no further cycle had work.
    Completed {
        /// Cycles executed.
        cycles: u64,
    },
    /// The cycle cap was reached first. Advisory; the simulator stays usable.
    CycleLimit {
        /// Cycles executed.
        cycles: u64,
    },
}

impl RunOutcome {
    /// Cycles executed when the loop stopped.
    pub fn cycles(self) -> u64 {
        match self {
            Self::Completed { cycles } | Self::CycleLimit { cycles } => cycles,
        }
    }
}

/// Top-level simulator: CPU architectural state + pipeline + program.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, memory, stack, PC, BTB, stats).
    pub cpu: Cpu,
    /// Pipeline scheduler.
    pub pipeline: Pipeline,
    program: Vec<Instruction>,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator with no program loaded.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            pipeline: Pipeline::new(config.general.trace_pipeline),
            program: Vec::new(),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Replaces the program. Instruction indices are renumbered by position.
    pub fn load(&mut self, program: Vec<Instruction>) {
        self.program = program;
        for (index, inst) in self.program.iter_mut().enumerate() {
            inst.index = index;
        }
        info!(instructions = self.program.len(), "program loaded");
    }

    /// Appends one instruction and returns its static index.
    pub fn push_instruction(&mut self, mut inst: Instruction) -> usize {
        let index = self.program.len();
        inst.index = index;
        self.program.push(inst);
        index
    }

    /// The loaded program.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    /// Advances the simulator by one clock cycle.
    ///
    /// # Returns
    ///
    /// `Ok(false)` once there is nothing left to do.
    pub fn tick(&mut self) -> Result<bool, SimError> {
        self.pipeline.tick(&mut self.cpu, &self.program)
    }

    /// Ticks until the program drains or the configured cycle cap is reached.
    pub fn run(&mut self) -> Result<RunOutcome, SimError> {
        self.run_with_limit(self.max_cycles)
    }

    /// Ticks until the program drains or `limit` cycles have run in total.
    pub fn run_with_limit(&mut self, limit: u64) -> Result<RunOutcome, SimError> {
        while self.pipeline.cycle() < limit {
            if !self.tick()? {
                return Ok(RunOutcome::Completed {
                    cycles: self.pipeline.cycle(),
                });
            }
        }
        // A program that drains exactly at the cap still completed.
        if !self.has_work() {
            return Ok(RunOutcome::Completed {
                cycles: self.pipeline.cycle(),
            });
        }
        warn!(limit, pc = self.cpu.pc(), "cycle cap reached");
        Ok(RunOutcome::CycleLimit {
            cycles: self.pipeline.cycle(),
        })
    }

    /// Returns `true` if another tick would do work.
    pub fn has_work(&self) -> bool {
        !self.program.is_empty()
            && (self.cpu.pc_index() < self.program.len() || !self.pipeline.is_drained())
    }

    /// Completed cycles.
    pub fn cycle(&self) -> u64 {
        self.pipeline.cycle()
    }

    /// Execution trace recorded so far.
    pub fn trace(&self) -> &Trace {
        self.pipeline.trace()
    }

    /// Performance statistics.
    pub fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// In-flight instances, oldest first.
    pub fn window(&self) -> impl Iterator<Item = &InFlight> {
        self.pipeline.window().iter()
    }

    /// Reads register `index`.
    pub fn read_register(&self, index: usize) -> Result<i32, SimError> {
        Ok(self.cpu.read_register(index)?)
    }

    /// Writes register `index`; `$0` is rejected.
    pub fn write_register(&mut self, index: usize, value: i32) -> Result<(), SimError> {
        Ok(self.cpu.write_register(index, value)?)
    }

    /// Reads the data word containing byte `address`.
    pub fn load_word(&self, address: u32) -> Result<i32, SimError> {
        Ok(self.cpu.load_word(address)?)
    }

    /// Writes the data word containing byte `address`.
    pub fn store_word(&mut self, address: u32, value: i32) -> Result<(), SimError> {
        Ok(self.cpu.store_word(address, value)?)
    }

    /// Current fetch byte address.
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Current fetch instruction index.
    pub fn pc_index(&self) -> usize {
        self.cpu.pc_index()
    }

    /// Moves the fetch PC to byte `address`.
    pub fn set_pc(&mut self, address: u32) {
        self.cpu.set_pc(address);
    }

    /// Pushes a return address onto the return stack.
    pub fn push_return(&mut self, address: u32) {
        self.cpu.push_return(address);
    }

    /// Pops the most recent return address.
    pub fn pop_return(&mut self) -> Result<u32, SimError> {
        Ok(self.cpu.pop_return()?)
    }

    /// Peeks at the most recent return address.
    pub fn peek_return(&self) -> Option<u32> {
        self.cpu.peek_return()
    }
}
