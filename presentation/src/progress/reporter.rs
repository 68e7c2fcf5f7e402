//! Progress reporting for council execution

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{AgentType, CouncilPhase, DebateResolution, Disagreement};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a council run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: CouncilPhase) -> &'static str {
        match phase {
            CouncilPhase::Evaluation => "Phase 1: Specialist Evaluation",
            CouncilPhase::Deliberation => "Phase 2: Deliberation",
            CouncilPhase::Synthesis => "Phase 3: Synthesis",
        }
    }

    fn phase_short_name(phase: CouncilPhase) -> &'static str {
        match phase {
            CouncilPhase::Evaluation => "Phase 1",
            CouncilPhase::Deliberation => "Phase 2",
            CouncilPhase::Synthesis => "Phase 3",
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.phase_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn agent_status(agent: AgentType, success: bool) -> String {
    if success {
        format!("{} {}", "v".green(), agent.display_name())
    } else {
        format!("{} {} (fallback)", "x".red(), agent.display_name())
    }
}

fn round_summary(disagreement: &Disagreement) -> String {
    format!(
        "{} vs {} on {} ({} pts)",
        disagreement.agent1.agent_type.display_name(),
        disagreement.agent2.agent_type.display_name(),
        disagreement.option_id,
        disagreement.difference
    )
}

fn resolution_summary(resolution: &DebateResolution) -> String {
    if resolution.applies() {
        format!("challenge sustained, adjusted to {}/10", resolution.adjusted_score)
    } else {
        "scores stand".to_string()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: CouncilPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase).to_string());
        pb.set_message("Starting...");

        if let Ok(mut guard) = self.phase_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_agent_complete(&self, agent: AgentType, success: bool) {
        self.with_bar(|pb| {
            pb.set_message(agent_status(agent, success));
            pb.inc(1);
        });
    }

    fn on_round_start(&self, round: u32, disagreement: &Disagreement) {
        self.with_bar(|pb| {
            pb.set_message(format!("Round {}: {}", round, round_summary(disagreement)));
        });
    }

    fn on_round_resolved(&self, round: u32, resolution: &DebateResolution) {
        self.with_bar(|pb| {
            pb.set_message(format!("Round {}: {}", round, resolution_summary(resolution)));
            pb.inc(1);
        });
    }

    fn on_phase_complete(&self, phase: CouncilPhase) {
        let bar = self.phase_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = bar {
            let phase_name = Self::phase_short_name(phase);
            pb.finish_with_message(format!("{} complete!", phase_name.green()));
        }
    }
}

/// Simple text-based progress (no progress bars)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: CouncilPhase, total_tasks: usize) {
        let phase_name = ProgressReporter::phase_display_name(phase);
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            phase_name.bold(),
            total_tasks
        );
    }

    fn on_agent_complete(&self, agent: AgentType, success: bool) {
        eprintln!("  {}", agent_status(agent, success));
    }

    fn on_round_start(&self, round: u32, disagreement: &Disagreement) {
        eprintln!("  Round {}: {}", round, round_summary(disagreement));
    }

    fn on_round_resolved(&self, _round: u32, resolution: &DebateResolution) {
        eprintln!("    {} {}", "->".cyan(), resolution_summary(resolution));
    }

    fn on_phase_complete(&self, _phase: CouncilPhase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{AgentEvaluation, OptionScore, find_disagreements};

    #[test]
    fn test_round_summary() {
        let evaluations = vec![
            AgentEvaluation::new(AgentType::Risk).with_score(OptionScore::new("expand", 2, "")),
            AgentEvaluation::new(AgentType::Market).with_score(OptionScore::new("expand", 9, "")),
        ];
        let disagreement = &find_disagreements(&evaluations)[0];
        assert_eq!(
            round_summary(disagreement),
            "Risk vs Market Analyst on expand (7 pts)"
        );
    }

    #[test]
    fn test_resolution_summary() {
        assert_eq!(
            resolution_summary(&DebateResolution::sustained("fair", 5)),
            "challenge sustained, adjusted to 5/10"
        );
        assert_eq!(
            resolution_summary(&DebateResolution::rejected("no")),
            "scores stand"
        );
        assert_eq!(resolution_summary(&DebateResolution::unresolved()), "scores stand");
    }

    #[test]
    fn test_reporter_tracks_phase_bar() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(CouncilPhase::Evaluation, 2);
        reporter.on_agent_complete(AgentType::Financial, true);
        reporter.on_agent_complete(AgentType::Risk, false);
        assert_eq!(
            reporter.phase_bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(2)
        );

        reporter.on_phase_complete(CouncilPhase::Evaluation);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
