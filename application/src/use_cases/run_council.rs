//! Run Council use case
//!
//! Orchestrates the full council flow: parallel specialist evaluation,
//! deliberation, then synthesis by the chief of staff.

use crate::config::CouncilParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::debate_facilitator::{DebateFacilitator, LlmDebateFacilitator};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::evaluate_agent::EvaluateAgentUseCase;
use crate::use_cases::run_deliberation::RunDeliberationUseCase;
use council_domain::{
    AgentEvaluation, AgentType, CouncilEvaluation, CouncilInput, CouncilPhase, DeliberationResult,
    PromptTemplate, SynthesisResult, consensus_score,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Transcript error for an agent whose task panicked
const TASK_PANICKED: &str = "task panicked";

/// Errors that can occur during a council run
#[derive(Error, Debug)]
pub enum RunCouncilError {
    #[error("Decision has no options to evaluate")]
    NoOptions,

    #[error("No agents configured")]
    NoAgents,

    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),
}

/// Use case for running a strategy council
pub struct RunCouncilUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    facilitator: Arc<dyn DebateFacilitator>,
    params: CouncilParams,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunCouncilUseCase<G> {
    /// Council whose debates are adjudicated through the same gateway
    pub fn new(gateway: Arc<G>) -> Self {
        let facilitator = Arc::new(LlmDebateFacilitator::new(Arc::clone(&gateway)));
        Self {
            gateway,
            facilitator,
            params: CouncilParams::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: CouncilParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_facilitator(mut self, facilitator: Arc<dyn DebateFacilitator>) -> Self {
        self.facilitator = facilitator;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: CouncilInput) -> Result<CouncilEvaluation, RunCouncilError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: CouncilInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<CouncilEvaluation, RunCouncilError> {
        if input.decision.options.is_empty() {
            return Err(RunCouncilError::NoOptions);
        }
        let agents = self.params.unique_agents();
        if agents.is_empty() {
            return Err(RunCouncilError::NoAgents);
        }

        info!(
            "Convening council on '{}' with {} agents and {} options",
            input.decision.title,
            agents.len(),
            input.decision.options.len()
        );

        let input = Arc::new(input);

        // Phase 1: Specialist evaluation
        let evaluations = self.phase_evaluation(&input, &agents, progress).await;

        // Phase 2: Deliberation
        let deliberation = self.phase_deliberation(evaluations, progress).await;

        // Phase 3: Synthesis
        let consensus = consensus_score(&deliberation.final_evaluations);
        let synthesis = self
            .phase_synthesis(&input, &deliberation.final_evaluations, consensus, progress)
            .await?;

        let review_date = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        Ok(CouncilEvaluation::new(
            deliberation,
            synthesis,
            consensus,
            review_date,
        ))
    }

    /// Phase 1: Ask every specialist in parallel
    ///
    /// A failing agent (error or panic) is replaced by the neutral fallback.
    /// Results come back in configured agent order.
    async fn phase_evaluation(
        &self,
        input: &Arc<CouncilInput>,
        agents: &[AgentType],
        progress: &dyn ProgressNotifier,
    ) -> Vec<AgentEvaluation> {
        info!("Phase 1: Specialist Evaluation");
        progress.on_phase_start(CouncilPhase::Evaluation, agents.len());

        let evaluate = EvaluateAgentUseCase::new(Arc::clone(&self.gateway));
        let mut join_set = JoinSet::new();

        for (index, agent) in agents.iter().copied().enumerate() {
            let evaluate = evaluate.clone();
            let input = Arc::clone(input);

            join_set.spawn(async move {
                let result = evaluate.execute(agent, &input).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<AgentEvaluation>> = vec![None; agents.len()];

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(parsed))) => {
                    let agent = agents[index];
                    info!("{} agent scored {} options", agent, parsed.evaluation.option_scores.len());
                    progress.on_agent_complete(agent, true);
                    self.log_evaluation(
                        &parsed.evaluation,
                        parsed.issues.iter().map(|i| i.to_string()).collect(),
                    );
                    slots[index] = Some(parsed.evaluation);
                }
                Ok((index, Err(e))) => {
                    let agent = agents[index];
                    warn!("{}", e);
                    progress.on_agent_complete(agent, false);
                    slots[index] = Some(self.fallback(agent, input, &e.to_string()));
                }
                Err(e) => {
                    // Which agent panicked is unknown here; the empty slot is filled below
                    warn!("Agent task join error: {}", e);
                }
            }
        }

        let evaluations = slots
            .into_iter()
            .zip(agents)
            .map(|(slot, agent)| {
                slot.unwrap_or_else(|| {
                    warn!("{} agent task panicked, using fallback", agent);
                    progress.on_agent_complete(*agent, false);
                    self.fallback(*agent, input, TASK_PANICKED)
                })
            })
            .collect();

        progress.on_phase_complete(CouncilPhase::Evaluation);
        evaluations
    }

    /// Phase 2: Bounded debate over the largest disagreements
    async fn phase_deliberation(
        &self,
        evaluations: Vec<AgentEvaluation>,
        progress: &dyn ProgressNotifier,
    ) -> DeliberationResult {
        info!("Phase 2: Deliberation");
        progress.on_phase_start(CouncilPhase::Deliberation, self.params.max_rounds as usize);

        let result = RunDeliberationUseCase::new(Arc::clone(&self.facilitator))
            .with_max_rounds(self.params.max_rounds)
            .with_threshold(self.params.disagreement_threshold)
            .with_logger(Arc::clone(&self.logger))
            .execute_with_progress(evaluations, progress)
            .await;

        info!(
            "Deliberation finished: {} after {} round(s)",
            result.outcome(),
            result.rounds
        );
        progress.on_phase_complete(CouncilPhase::Deliberation);
        result
    }

    /// Phase 3: Chief of staff picks the recommendation
    ///
    /// Falls back to the highest mean score when the synthesizer fails.
    async fn phase_synthesis(
        &self,
        input: &CouncilInput,
        evaluations: &[AgentEvaluation],
        consensus: f64,
        progress: &dyn ProgressNotifier,
    ) -> Result<SynthesisResult, RunCouncilError> {
        info!("Phase 3: Synthesis");
        progress.on_phase_start(CouncilPhase::Synthesis, 1);

        let prompt = PromptTemplate::synthesis_prompt(input, evaluations);
        let synthesized = match self
            .gateway
            .ask(&prompt, PromptTemplate::synthesis_system())
            .await
        {
            Ok(response) => {
                SynthesisResult::parse(&response, &input.decision).map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        let (synthesis, fallback) = match synthesized {
            Ok(synthesis) => (synthesis, false),
            Err(reason) => {
                warn!("Synthesis failed, using highest mean score: {}", reason);
                let synthesis = SynthesisResult::fallback(&input.decision, evaluations, consensus)
                    .map_err(|e| RunCouncilError::SynthesisFailed(e.to_string()))?;
                (synthesis, true)
            }
        };

        if input.decision.option(&synthesis.recommended_option_id).is_none() {
            warn!(
                "Recommended option '{}' is not one of the decision's options",
                synthesis.recommended_option_id
            );
        }

        self.logger.log(ConversationEvent::new(
            "synthesis",
            json!({
                "recommended_option_id": synthesis.recommended_option_id,
                "confidence": synthesis.confidence,
                "dissent": synthesis.dissent,
                "key_tradeoffs": synthesis.key_tradeoffs,
                "fallback": fallback,
            }),
        ));

        progress.on_agent_complete(AgentType::ChiefOfStaff, !fallback);
        progress.on_phase_complete(CouncilPhase::Synthesis);
        Ok(synthesis)
    }

    /// Neutral evaluation for a failed agent, recorded in the transcript
    fn fallback(&self, agent: AgentType, input: &CouncilInput, error: &str) -> AgentEvaluation {
        let evaluation = AgentEvaluation::fallback(agent, input.decision.option_ids());
        self.logger.log(ConversationEvent::new(
            "agent_evaluation",
            json!({
                "agent": agent.as_str(),
                "success": false,
                "error": error,
                "evaluation": evaluation,
            }),
        ));
        evaluation
    }

    fn log_evaluation(&self, evaluation: &AgentEvaluation, issues: Vec<String>) {
        self.logger.log(ConversationEvent::new(
            "agent_evaluation",
            json!({
                "agent": evaluation.agent_type.as_str(),
                "success": true,
                "issues": issues,
                "evaluation": evaluation,
            }),
        ));
    }
}
