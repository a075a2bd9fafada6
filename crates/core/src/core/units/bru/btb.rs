//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table indexed by `(pc >> 2) % size`. Each entry
//! stores the tag (full branch PC), the target and a one-bit outcome. Entries
//! are allocated lazily and only ever overwritten in place.

use tracing::debug;

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct BtbEntry {
    /// Branch PC that last populated this entry.
    tag: u32,
    /// Predicted target address.
    target: u32,
    /// Last resolved outcome.
    taken: bool,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// A BTB hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted target address.
    pub target: u32,
    /// Predicted outcome.
    pub taken: bool,
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries. Zero is rounded up to one.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size.max(1)],
        }
    }

    /// Number of entries in the table.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Table index for a branch PC.
    pub fn index(&self, pc: u32) -> usize {
        (pc >> 2) as usize % self.table.len()
    }

    /// Looks up the prediction for the branch at `pc`.
    ///
    /// # Returns
    ///
    /// `Some` only if the indexed entry is valid and tagged with exactly `pc`.
    pub fn lookup(&self, pc: u32) -> Option<Prediction> {
        let e = self.table[self.index(pc)];
        if e.valid && e.tag == pc {
            Some(Prediction {
                target: e.target,
                taken: e.taken,
            })
        } else {
            None
        }
    }

    /// Convenience wrapper: the predicted target if the branch is predicted taken.
    pub fn predict_taken(&self, pc: u32) -> Option<u32> {
        self.lookup(pc).filter(|p| p.taken).map(|p| p.target)
    }

    /// Records the resolved outcome of the branch at `pc`.
    ///
    /// A not-taken outcome is dropped unless the branch already owns its entry,
    /// so never-taken branches do not evict useful entries. A taken outcome
    /// always allocates or overwrites.
    pub fn update(&mut self, pc: u32, target: u32, taken: bool) {
        let idx = self.index(pc);
        let entry = &mut self.table[idx];
        if !taken && !(entry.valid && entry.tag == pc) {
            return;
        }
        debug!(pc, target, taken, idx, "btb update");
        *entry = BtbEntry {
            tag: pc,
            target,
            taken,
            valid: true,
        };
    }
}
