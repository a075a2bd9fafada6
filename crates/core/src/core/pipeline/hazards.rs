//! Data Hazard Detection and Forwarding.
//!
//! This module keeps the cycle-local view of pending register writes. It provides:
//! 1. **Awaiting Set:** Destination registers with an uncommitted write in flight.
//! 2. **Forwarding Map:** Values already computed for those registers this cycle.
//! 3. **Operand Resolution:** Register file, forwarded value, or stall.
//!
//! Both containers are emptied at the start of every cycle and repopulated by the
//! scheduler as instances advance, oldest first. A younger producer of the same
//! register therefore always overrides an older one.

use std::collections::{HashMap, HashSet};

use crate::common::error::AccessFault;
use crate::core::arch::gpr::Gpr;

/// Cycle-local hazard state.
#[derive(Clone, Debug, Default)]
pub struct HazardUnit {
    awaiting: HashSet<usize>,
    forwarded: HashMap<usize, i32>,
}

impl HazardUnit {
    /// Creates an empty hazard unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all state from the previous cycle.
    pub fn clear(&mut self) {
        self.awaiting.clear();
        self.forwarded.clear();
    }

    /// Marks `dest` as awaiting a write.
    ///
    /// A `Some` value becomes the forwarded value for `dest`. A `None` value
    /// removes any forwarded value left by an older producer, since consumers
    /// must wait for this newer write instead. Register 0 never awaits.
    pub fn publish(&mut self, dest: usize, value: Option<i32>) {
        if dest == 0 {
            return;
        }
        let _ = self.awaiting.insert(dest);
        match value {
            Some(v) => {
                let _ = self.forwarded.insert(dest, v);
            }
            None => {
                let _ = self.forwarded.remove(&dest);
            }
        }
    }

    /// Clears `dest` once its write has been committed.
    pub fn release(&mut self, dest: usize) {
        let _ = self.awaiting.remove(&dest);
        let _ = self.forwarded.remove(&dest);
    }

    /// Returns `true` if `reg` has a write pending this cycle.
    pub fn is_awaiting(&self, reg: usize) -> bool {
        self.awaiting.contains(&reg)
    }

    /// Forwarded value for `reg`, if one has been published this cycle.
    pub fn forwarded(&self, reg: usize) -> Option<i32> {
        self.forwarded.get(&reg).copied()
    }

    /// Resolves a source operand.
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` from the register file when `reg` is not awaiting,
    /// or from the forwarding map when it is; `Ok(None)` when the consumer
    /// must stall.
    pub fn resolve(&self, reg: usize, regs: &Gpr) -> Result<Option<i32>, AccessFault> {
        if self.is_awaiting(reg) {
            Ok(self.forwarded(reg))
        } else {
            regs.read(reg).map(Some)
        }
    }
}
