//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycles and CPI:** Total cycles, fetched and retired instructions.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, branch, jump, nop).
//! 3. **Branch prediction:** Correct predictions, mispredictions and accuracy.
//! 4. **Pipeline events:** Data-hazard stall cycles, squashed instances and honored jumps.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::isa::instruction::InstClass;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles elapsed.
    pub cycles: u64,
    /// Dynamic instances that completed fetch (including later-squashed ones).
    pub instructions_fetched: u64,
    /// Number of instructions that completed writeback and retired.
    pub instructions_retired: u64,

    /// Count of ALU instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of conditional branches retired.
    pub inst_branch: u64,
    /// Count of unconditional jumps retired.
    pub inst_jump: u64,
    /// Count of no-ops retired.
    pub inst_nop: u64,

    /// Number of branch predictions that were correct.
    pub branch_correct: u64,
    /// Number of branch predictions that were wrong (mispredictions).
    pub branch_mispredictions: u64,

    /// Cycles in which the pipeline froze on an unavailable operand.
    pub stalls_data: u64,
    /// In-flight instances discarded by squashes.
    pub squashed: u64,
    /// Jump intents honored by the scheduler.
    pub jumps: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"pipeline"`, `"instruction_mix"`, `"branch"`.
/// Pass an empty slice to `report_sections` to render all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "pipeline", "instruction_mix", "branch"];

const RULE: &str = "----------------------------------------------------------";
const BANNER: &str = "==========================================================";

impl SimStats {
    /// Records a retired instruction of category `class`.
    pub fn record_retire(&mut self, class: InstClass) {
        self.instructions_retired += 1;
        let counter = match class {
            InstClass::Alu => &mut self.inst_alu,
            InstClass::Load => &mut self.inst_load,
            InstClass::Store => &mut self.inst_store,
            InstClass::Branch => &mut self.inst_branch,
            InstClass::Jump => &mut self.inst_jump,
            InstClass::Nop => &mut self.inst_nop,
        };
        *counter += 1;
    }

    /// Records a resolved branch.
    pub fn record_branch(&mut self, mispredicted: bool) {
        if mispredicted {
            self.branch_mispredictions += 1;
        } else {
            self.branch_correct += 1;
        }
    }

    /// Cycles per retired instruction, or `0.0` before anything retires.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Percentage of correctly predicted branches, or `0.0` with no branches.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_correct + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            100.0 * (self.branch_correct as f64 / total as f64)
        }
    }

    /// Renders only the requested sections.
    ///
    /// # Arguments
    ///
    /// * `sections` - Section names from [`STATS_SECTIONS`], or empty for all.
    pub fn report_sections(&self, sections: &[String]) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_sections(&mut out, sections);
        out
    }

    /// Renders every section.
    pub fn report(&self) -> String {
        self.report_sections(&[])
    }

    /// Prints the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.report_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    fn write_sections(&self, out: &mut String, sections: &[String]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;
        let pct = |n: u64, of: f64| (n as f64 / of) * 100.0;

        writeln!(out, "{BANNER}")?;
        writeln!(out, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "{BANNER}")?;
        if want("summary") {
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_insts_fetched        {}", self.instructions_fetched)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_cpi                  {:.4}", self.cpi())?;
            writeln!(out, "{RULE}")?;
        }
        if want("pipeline") {
            writeln!(out, "PIPELINE EVENTS")?;
            writeln!(
                out,
                "  stalls.data            {} ({:.2}%)",
                self.stalls_data,
                pct(self.stalls_data, cyc)
            )?;
            writeln!(out, "  squashed               {}", self.squashed)?;
            writeln!(out, "  jumps                  {}", self.jumps)?;
            writeln!(out, "{RULE}")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, n) in [
                ("op.alu", self.inst_alu),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.branch", self.inst_branch),
                ("op.jump", self.inst_jump),
                ("op.nop", self.inst_nop),
            ] {
                writeln!(out, "  {name:<22} {n} ({:.2}%)", pct(n, instr))?;
            }
            writeln!(out, "{RULE}")?;
        }
        if want("branch") {
            writeln!(out, "BRANCH PREDICTION")?;
            writeln!(
                out,
                "  bp.lookups             {}",
                self.branch_correct + self.branch_mispredictions
            )?;
            writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions)?;
            writeln!(out, "  bp.accuracy            {:.2}%", self.branch_accuracy())?;
        }
        writeln!(out, "{BANNER}")
    }
}
