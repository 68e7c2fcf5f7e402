//! Run Deliberation use case
//!
//! Bounded debate over the largest disagreement, one per round.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::debate_facilitator::DebateFacilitator;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use council_domain::deliberation::{
    apply_resolution, find_disagreements_with_threshold, has_consensus_with_threshold,
};
use council_domain::{
    AgentDebate, AgentEvaluation, DISAGREEMENT_THRESHOLD, DebateResolution, DeliberationResult,
    Disagreement, MAX_ROUNDS,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for running the deliberation loop
///
/// Each round recomputes disagreements from the current snapshot, debates
/// only the largest one, and threads the adjusted snapshot into the next
/// round. Adjudication failures never escape: they are recorded as
/// unresolved and the loop moves on.
pub struct RunDeliberationUseCase {
    facilitator: Arc<dyn DebateFacilitator>,
    max_rounds: u32,
    threshold: u8,
    logger: Arc<dyn ConversationLogger>,
}

impl RunDeliberationUseCase {
    pub fn new(facilitator: Arc<dyn DebateFacilitator>) -> Self {
        Self {
            facilitator,
            max_rounds: MAX_ROUNDS,
            threshold: DISAGREEMENT_THRESHOLD,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the loop with default (no-op) progress
    pub async fn execute(&self, evaluations: Vec<AgentEvaluation>) -> DeliberationResult {
        self.execute_with_progress(evaluations, &NoProgress).await
    }

    /// Execute the loop with progress callbacks
    pub async fn execute_with_progress(
        &self,
        evaluations: Vec<AgentEvaluation>,
        progress: &dyn ProgressNotifier,
    ) -> DeliberationResult {
        let mut current = evaluations;
        let mut debates = Vec::new();

        for round in 1..=self.max_rounds {
            let disagreements = find_disagreements_with_threshold(&current, self.threshold);
            let Some(top) = disagreements.first().cloned() else {
                info!("Consensus reached in round {}", round);
                return self.finish(current, debates, true, round);
            };

            info!(
                "Round {}: {} disagreement(s), debating {} vs {} on {} ({} points)",
                round,
                disagreements.len(),
                top.agent1.agent_type,
                top.agent2.agent_type,
                top.option_id,
                top.difference
            );
            if disagreements.len() > 1 {
                debug!(
                    "Round {}: deferring {} smaller disagreement(s)",
                    round,
                    disagreements.len() - 1
                );
            }
            progress.on_round_start(round, &top);
            self.log_round(round, &top);

            debates.extend(AgentDebate::opening_positions(round, &top));

            let resolution = self.adjudicate(round, &top).await;
            progress.on_round_resolved(round, &resolution);
            self.log_resolution(round, &top, &resolution);

            debates.push(AgentDebate::resolution(round, &top, &resolution));
            current = apply_resolution(&current, &top, &resolution);
        }

        // The last round's adjustment may have closed the final gap
        let consensus_reached = has_consensus_with_threshold(&current, self.threshold);
        if !consensus_reached {
            info!(
                "Deliberation ended after {} rounds without consensus",
                self.max_rounds
            );
        }
        self.finish(current, debates, consensus_reached, self.max_rounds)
    }

    async fn adjudicate(&self, round: u32, disagreement: &Disagreement) -> DebateResolution {
        let challenger = &disagreement.agent1;
        let challenged = &disagreement.agent2;

        match self
            .facilitator
            .resolve(
                challenger.agent_type,
                challenged.agent_type,
                &challenger.score.reasoning,
                &challenged.score.reasoning,
                &disagreement.option_id,
            )
            .await
        {
            Ok(resolution) => {
                debug!(
                    "Round {}: challenge valid={}, adjusted score={}",
                    round, resolution.challenge_valid, resolution.adjusted_score
                );
                resolution
            }
            Err(e) => {
                warn!("Round {}: adjudication failed, scores stand: {}", round, e);
                DebateResolution::unresolved()
            }
        }
    }

    fn finish(
        &self,
        final_evaluations: Vec<AgentEvaluation>,
        debates: Vec<AgentDebate>,
        consensus_reached: bool,
        rounds: u32,
    ) -> DeliberationResult {
        self.logger.log(ConversationEvent::new(
            "deliberation_complete",
            json!({
                "rounds": rounds,
                "consensus_reached": consensus_reached,
                "debate_entries": debates.len(),
            }),
        ));

        DeliberationResult {
            final_evaluations,
            debates,
            consensus_reached,
            rounds,
        }
    }

    fn log_round(&self, round: u32, disagreement: &Disagreement) {
        self.logger.log(ConversationEvent::new(
            "deliberation_round",
            json!({
                "round": round,
                "option_id": disagreement.option_id,
                "challenger": disagreement.agent1.agent_type.as_str(),
                "challenger_score": disagreement.agent1.score.score,
                "challenged": disagreement.agent2.agent_type.as_str(),
                "challenged_score": disagreement.agent2.score.score,
                "difference": disagreement.difference,
            }),
        ));
    }

    fn log_resolution(&self, round: u32, disagreement: &Disagreement, resolution: &DebateResolution) {
        self.logger.log(ConversationEvent::new(
            "debate_resolution",
            json!({
                "round": round,
                "option_id": disagreement.option_id,
                "challenged": disagreement.agent2.agent_type.as_str(),
                "challenge_valid": resolution.challenge_valid,
                "adjusted_score": resolution.adjusted_score,
                "applied": resolution.applies(),
                "resolution": resolution.resolution,
            }),
        ));
    }
}
