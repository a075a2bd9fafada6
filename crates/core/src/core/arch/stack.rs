//! Procedure Return-Address Stack.
//!
//! `jp` pushes its return address during decode and `rp` pops the target back
//! off. Unlike a predictor RAS this is architectural state: it is unbounded and
//! popping an empty stack is a fault rather than a misprediction.

use crate::common::error::AccessFault;

/// LIFO of byte return addresses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnStack {
    stack: Vec<u32>,
}

impl ReturnStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a return address.
    pub fn push(&mut self, addr: u32) {
        self.stack.push(addr);
    }

    /// Pops the most recent return address.
    pub fn pop(&mut self) -> Result<u32, AccessFault> {
        self.stack.pop().ok_or(AccessFault::ReturnStackEmpty)
    }

    /// Peeks at the most recent return address without removing it.
    pub fn peek(&self) -> Option<u32> {
        self.stack.last().copied()
    }

    /// Number of pending return addresses.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if no return address is pending.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pending return addresses, oldest first.
    pub fn entries(&self) -> &[u32] {
        &self.stack
    }
}
