//! Pipeline Stage Interface.
//!
//! Every stage is a zero-sized type implementing [`PipelineStage`]. The
//! scheduler dispatches on [`Stage`](crate::core::pipeline::stage::Stage) and
//! calls `run` followed by `describe` for the trace.

use crate::common::error::AccessFault;
use crate::core::Cpu;
use crate::core::pipeline::hazards::HazardUnit;
use crate::core::pipeline::inflight::InFlight;
use crate::core::pipeline::signals::StageStatus;
use crate::core::pipeline::stage::Stage;

/// State a stage function may touch.
///
/// Hazard state is read-only here; only the scheduler publishes into it.
#[derive(Debug)]
pub struct StageContext<'a> {
    /// Architectural state, predictor and statistics.
    pub cpu: &'a mut Cpu,
    /// This cycle's awaiting set and forwarding map.
    pub hazards: &'a HazardUnit,
}

impl StageContext<'_> {
    /// Resolves a source register through the hazard state.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the register is awaiting a write with no forwarded value.
    pub fn operand(&self, reg: usize) -> Result<Option<i32>, AccessFault> {
        self.hazards.resolve(reg, &self.cpu.regs)
    }
}

/// Represents a stage in the instruction pipeline.
pub trait PipelineStage {
    /// Which stage this is.
    const STAGE: Stage;

    /// Performs this stage's work for one instance.
    ///
    /// # Arguments
    ///
    /// * `inst` - The instance being advanced.
    /// * `ctx` - CPU state and the cycle's hazard view.
    ///
    /// # Returns
    ///
    /// `NotReady` to stall the pipeline behind `inst`, or an access fault that
    /// aborts the run.
    fn run(inst: &mut InFlight, ctx: &mut StageContext<'_>) -> Result<StageStatus, AccessFault>;

    /// Human-readable description of what `run` did, for the trace.
    fn describe(inst: &InFlight) -> String;
}
