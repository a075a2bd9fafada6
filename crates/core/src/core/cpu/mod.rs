//! CPU Core Definition and Initialization.
//!
//! `Cpu` is the single owned container for all architectural state the
//! pipeline reads and writes. It coordinates the following:
//! 1. **State Management:** Registers, data memory, return stack and PC.
//! 2. **Prediction:** The branch target buffer consulted at fetch and updated at execute.
//! 3. **Inspection:** Accessors used to seed state and to edit it between cycles.
//!
//! Inspection accessors enforce the same invariants as the stages: `$0`
//! rejects writes and out-of-range indices fault.

use crate::common::error::AccessFault;
use crate::config::Config;
use crate::core::arch::{DataMemory, Gpr, ProgramCounter, ReturnStack};
use crate::core::units::bru::Btb;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General purpose registers.
    pub regs: Gpr,
    /// Data memory.
    pub dmem: DataMemory,
    /// Return-address stack used by `jp`/`rp`.
    pub stack: ReturnStack,
    /// Fetch program counter.
    pub pc: ProgramCounter,
    /// Branch target buffer.
    pub btb: Btb,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU sized according to `config`, with all state zeroed.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            dmem: DataMemory::new(config.memory.data_words),
            stack: ReturnStack::new(),
            pc: ProgramCounter::new(),
            btb: Btb::new(config.predictor.btb_size),
            stats: SimStats::default(),
        }
    }

    /// Reads register `index`.
    pub fn read_register(&self, index: usize) -> Result<i32, AccessFault> {
        self.regs.read(index)
    }

    /// Writes register `index`; `$0` is rejected.
    pub fn write_register(&mut self, index: usize, value: i32) -> Result<(), AccessFault> {
        self.regs.write(index, value)
    }

    /// Reads the data word containing byte `address`.
    pub fn load_word(&self, address: u32) -> Result<i32, AccessFault> {
        self.dmem.load(address)
    }

    /// Writes the data word containing byte `address`.
    pub fn store_word(&mut self, address: u32, value: i32) -> Result<(), AccessFault> {
        self.dmem.store(address, value)
    }

    /// Current fetch byte address.
    pub fn pc(&self) -> u32 {
        self.pc.value()
    }

    /// Current fetch instruction index.
    pub fn pc_index(&self) -> usize {
        self.pc.index()
    }

    /// Moves the fetch PC to byte `address`.
    pub fn set_pc(&mut self, address: u32) {
        self.pc.set(address);
    }

    /// Pushes a return address.
    pub fn push_return(&mut self, address: u32) {
        self.stack.push(address);
    }

    /// Pops the most recent return address.
    pub fn pop_return(&mut self) -> Result<u32, AccessFault> {
        self.stack.pop()
    }

    /// Peeks at the most recent return address.
    pub fn peek_return(&self) -> Option<u32> {
        self.stack.peek()
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
