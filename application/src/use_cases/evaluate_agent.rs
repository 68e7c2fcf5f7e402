//! Evaluate Agent use case
//!
//! One specialist scores every option of the decision.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use council_domain::{
    AgentPromptTemplate, AgentType, CouncilInput, DomainError, ParsedEvaluation,
    parse_agent_evaluation,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while a single specialist evaluates
#[derive(Error, Debug)]
pub enum EvaluateAgentError {
    #[error("{agent} agent request failed: {source}")]
    Gateway {
        agent: AgentType,
        #[source]
        source: GatewayError,
    },

    #[error("{agent} agent returned an unusable answer: {source}")]
    Parse {
        agent: AgentType,
        #[source]
        source: DomainError,
    },
}

/// Use case for asking one specialist for its scores
pub struct EvaluateAgentUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> Clone for EvaluateAgentUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: LlmGateway + 'static> EvaluateAgentUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Prompt the agent and parse its scores.
    ///
    /// Boundary issues (missing or unknown options, clamped scores) are
    /// logged here and returned with the evaluation; they are not errors.
    pub async fn execute(
        &self,
        agent: AgentType,
        input: &CouncilInput,
    ) -> Result<ParsedEvaluation, EvaluateAgentError> {
        let system = AgentPromptTemplate::system(agent);
        let prompt = AgentPromptTemplate::evaluation_prompt(agent, input);

        debug!("Asking {} agent via {}", agent, self.gateway.name());
        let response = self
            .gateway
            .ask(&prompt, &system)
            .await
            .map_err(|source| EvaluateAgentError::Gateway { agent, source })?;

        let parsed = parse_agent_evaluation(agent, &response, &input.decision.option_ids())
            .map_err(|source| EvaluateAgentError::Parse { agent, source })?;

        for issue in &parsed.issues {
            warn!("{} agent: {}", agent, issue);
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use council_domain::{CompanyContext, Decision, DecisionOption, EvaluationIssue};

    struct FixedGateway(Result<&'static str, ()>);

    #[async_trait]
    impl LlmGateway for FixedGateway {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn ask(&self, _prompt: &str, system_prompt: &str) -> Result<String, GatewayError> {
            assert!(system_prompt.contains("Risk Agent"));
            self.0
                .map(str::to_string)
                .map_err(|_| GatewayError::ConnectionError("refused".to_string()))
        }

        async fn check(&self) -> Result<(), GatewayError> {
            Ok(())
        }
    }

    fn input() -> CouncilInput {
        let decision = Decision::new("d", "Hire")
            .with_option(DecisionOption::new("a", "Now"))
            .with_option(DecisionOption::new("b", "Later"));
        CouncilInput::new(CompanyContext::default(), decision)
    }

    #[tokio::test]
    async fn test_execute_parses_scores() {
        let gateway = FixedGateway(Ok(
            r#"{"optionScores":[{"optionId":"a","score":3,"reasoning":"Burn"},{"optionId":"b","score":8,"reasoning":"Safe"}],"keyFactors":["runway"]}"#,
        ));
        let parsed = EvaluateAgentUseCase::new(Arc::new(gateway))
            .execute(AgentType::Risk, &input())
            .await
            .unwrap();

        assert!(parsed.is_complete());
        assert_eq!(parsed.evaluation.agent_type, AgentType::Risk);
        assert_eq!(parsed.evaluation.score_for("b").unwrap().score, 8);
        assert_eq!(parsed.evaluation.key_factors, vec!["runway"]);
    }

    #[tokio::test]
    async fn test_execute_reports_missing_option() {
        let gateway = FixedGateway(Ok(
            r#"{"optionScores":[{"optionId":"a","score":3,"reasoning":"Burn"}],"keyFactors":[]}"#,
        ));
        let parsed = EvaluateAgentUseCase::new(Arc::new(gateway))
            .execute(AgentType::Risk, &input())
            .await
            .unwrap();

        assert_eq!(parsed.issues, vec![EvaluationIssue::MissingOption("b".into())]);
    }

    #[tokio::test]
    async fn test_execute_gateway_failure() {
        let err = EvaluateAgentUseCase::new(Arc::new(FixedGateway(Err(()))))
            .execute(AgentType::Risk, &input())
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluateAgentError::Gateway { agent: AgentType::Risk, .. }));
    }

    #[tokio::test]
    async fn test_execute_parse_failure() {
        let err = EvaluateAgentUseCase::new(Arc::new(FixedGateway(Ok("Option a looks risky."))))
            .execute(AgentType::Risk, &input())
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluateAgentError::Parse { .. }));
    }
}
