//! Execution Trace.
//!
//! The trace is an append-only list of cycles, each holding the stage
//! completions of that cycle in the order they happened (oldest instance
//! first). Past records are never modified.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::stage::Stage;

/// One completed stage of one dynamic instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    /// Stage that completed.
    pub stage: Stage,
    /// Rendered description of the stage's work.
    pub description: String,
    /// Execution-order number of the instance.
    pub seq: u64,
    /// Static program index of the instance.
    pub index: usize,
    /// PC snapshot of the instance.
    pub pc: u32,
}

impl TraceEvent {
    /// Builds an event for `inst` completing `stage`.
    pub fn new(stage: Stage, description: String, inst: &InFlight) -> Self {
        Self {
            stage,
            description,
            seq: inst.seq,
            index: inst.inst.index,
            pc: inst.pc,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<9} #{:<3} {}", self.stage, self.seq, self.description)
    }
}

/// Everything that happened in one clock cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CycleRecord {
    /// Zero-based cycle number.
    pub cycle: u64,
    /// Stage completions in sweep order.
    pub events: Vec<TraceEvent>,
    /// An instance could not advance and froze the pipeline behind it.
    pub stalled: bool,
    /// Window position of the instance whose jump was honored; everything
    /// younger was squashed.
    pub squash_at: Option<usize>,
    /// Number of instances discarded by the squash.
    pub squashed: usize,
    /// Execution-order number of the instance retired this cycle.
    pub retired: Option<u64>,
}

impl CycleRecord {
    /// Events for `stage`, in sweep order.
    pub fn events_in(&self, stage: Stage) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(move |e| e.stage == stage)
    }

    /// `(stage, description)` pairs, convenient for comparisons.
    pub fn summary(&self) -> Vec<(Stage, &str)> {
        self.events
            .iter()
            .map(|e| (e.stage, e.description.as_str()))
            .collect()
    }
}

impl fmt::Display for CycleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle {}", self.cycle)?;
        if self.stalled {
            f.write_str(" [stall]")?;
        }
        if self.squashed > 0 {
            write!(f, " [squash {}]", self.squashed)?;
        }
        writeln!(f)?;
        for event in &self.events {
            writeln!(f, "  {event}")?;
        }
        Ok(())
    }
}

/// The per-cycle execution trace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Trace {
    cycles: Vec<CycleRecord>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a cycle record.
    pub fn push(&mut self, record: CycleRecord) {
        self.cycles.push(record);
    }

    /// All recorded cycles, oldest first.
    pub fn cycles(&self) -> &[CycleRecord] {
        &self.cycles
    }

    /// Record for cycle `n`.
    pub fn cycle(&self, n: usize) -> Option<&CycleRecord> {
        self.cycles.get(n)
    }

    /// Number of recorded cycles.
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Every event of the dynamic instance `seq`, with its cycle number.
    pub fn history(&self, seq: u64) -> Vec<(u64, &TraceEvent)> {
        self.cycles
            .iter()
            .flat_map(|c| c.events.iter().map(move |e| (c.cycle, e)))
            .filter(|(_, e)| e.seq == seq)
            .collect()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.cycles {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}
