//! Word-Addressed Data Memory.
//!
//! Loads and stores carry byte addresses; the memory drops the low two bits
//! (`address >> 2`) and indexes a flat array of words. There is no cache or
//! alignment check, matching the simulated machine.

use crate::common::constants::WORD_SHIFT;
use crate::common::error::AccessFault;

/// Flat data memory of signed 32-bit words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    words: Vec<i32>,
}

impl DataMemory {
    /// Creates a zero-filled memory of `words` words.
    pub fn new(words: usize) -> Self {
        Self {
            words: vec![0; words],
        }
    }

    /// Number of words in memory.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the memory has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn index(&self, address: u32) -> Result<usize, AccessFault> {
        let idx = (address >> WORD_SHIFT) as usize;
        if idx < self.words.len() {
            Ok(idx)
        } else {
            Err(AccessFault::MemoryOutOfRange { address })
        }
    }

    /// Loads the word containing byte `address`.
    pub fn load(&self, address: u32) -> Result<i32, AccessFault> {
        let idx = self.index(address)?;
        Ok(self.words[idx])
    }

    /// Stores `value` into the word containing byte `address`.
    pub fn store(&mut self, address: u32, value: i32) -> Result<(), AccessFault> {
        let idx = self.index(address)?;
        self.words[idx] = value;
        Ok(())
    }

    /// All words in address order.
    pub fn words(&self) -> &[i32] {
        &self.words
    }
}
