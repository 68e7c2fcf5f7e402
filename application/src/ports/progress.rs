//! Progress notification port
//!
//! Defines the interface for reporting progress during a council run.

use council_domain::{AgentType, CouncilPhase, DebateResolution, Disagreement};

/// Callback for progress updates during a council run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: CouncilPhase, total_tasks: usize);

    /// Called when a specialist finishes (`success = false` means fallback)
    fn on_agent_complete(&self, agent: AgentType, success: bool);

    /// Called when a deliberation round picks its disagreement
    fn on_round_start(&self, _round: u32, _disagreement: &Disagreement) {}

    /// Called once the round's disagreement has been adjudicated
    fn on_round_resolved(&self, _round: u32, _resolution: &DebateResolution) {}

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: CouncilPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: CouncilPhase, _total_tasks: usize) {}
    fn on_agent_complete(&self, _agent: AgentType, _success: bool) {}
    fn on_phase_complete(&self, _phase: CouncilPhase) {}
}
