//! Prompt templates for debate adjudication and synthesis

use super::agent::{company_section, options_section};
use crate::core::agent_type::AgentType;
use crate::decision::CouncilInput;
use crate::evaluation::AgentEvaluation;

/// Templates for the chief of staff's prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for adjudicating a disagreement
    pub fn debate_system() -> &'static str {
        r#"You are the Chief of Staff facilitating a debate between agents.

An agent is challenging another agent's position. Analyze the challenge and determine if it's valid.

Respond with EXACTLY this JSON format:
{
  "challengeValid": true,
  "resolution": "How this disagreement should be resolved",
  "adjustedScore": 0,
  "reasoning": "Why the score should or should not change"
}

adjustedScore should be the new score (1-10) if the challenge is valid, or 0 if no change."#
    }

    /// User prompt for one debate round
    pub fn debate_prompt(
        challenger: AgentType,
        challenged: AgentType,
        challenger_position: &str,
        challenged_position: &str,
        option_id: &str,
    ) -> String {
        let challenger = challenger.display_name();
        let challenged = challenged.display_name();
        format!(
            r#"DEBATE CONTEXT:
{challenger} is challenging {challenged}'s position.

{challenged}'s Position:
{challenged_position}

{challenger}'s Challenge:
{challenger_position}

Option being debated: {option_id}

Analyze this challenge and determine if it's valid. Should {challenged}'s score be adjusted? Return as JSON."#
        )
    }

    /// System prompt for the final synthesis
    pub fn synthesis_system() -> &'static str {
        r#"You are the Chief of Staff Agent on a Strategy Council.
Your role is to SYNTHESIZE all agent evaluations into a final recommendation.

Consider:
- Weighted importance of each agent's perspective
- Areas of agreement across agents
- Resolving disagreements through synthesis
- Identifying the strongest option considering all factors
- Noting any dissenting opinions that deserve mention
- Confidence level based on agent consensus

IMPORTANT: You must respond in EXACTLY this JSON format with no other text:
{
  "recommendedOptionId": "option-id-here",
  "confidence": 0.85,
  "synthesis": "Comprehensive synthesis of all agent perspectives explaining the recommendation",
  "dissent": ["Any significant dissenting opinions that should be noted"],
  "keyTradeoffs": ["tradeoff1", "tradeoff2"]
}

Confidence should be:
- 0.9-1.0: Strong consensus across agents
- 0.7-0.9: General agreement with minor dissent
- 0.5-0.7: Mixed signals, proceed with caution
- <0.5: Significant disagreement, recommendation uncertain"#
    }

    /// User prompt for the final synthesis over post-deliberation scores
    pub fn synthesis_prompt(input: &CouncilInput, evaluations: &[AgentEvaluation]) -> String {
        let summaries: Vec<String> = evaluations
            .iter()
            .map(|eval| {
                let scores: Vec<String> = eval
                    .option_scores
                    .iter()
                    .map(|s| format!("  - {}: {}/10 - {}", s.option_id, s.score, s.reasoning))
                    .collect();
                format!(
                    "{} AGENT:\nScores:\n{}\nKey Factors: {}",
                    eval.agent_type.as_str().to_uppercase(),
                    scores.join("\n"),
                    eval.key_factors.join(", ")
                )
            })
            .collect();

        format!(
            "{}{}\nAGENT EVALUATIONS:\n{}\n\nSynthesize all agent perspectives into a final recommendation. Identify the best option considering all factors, note any significant dissent, and provide a confidence level. Return as JSON.",
            company_section(&input.context),
            options_section(&input.decision),
            summaries.join("\n\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{CompanyContext, Decision, DecisionOption};
    use crate::evaluation::OptionScore;

    #[test]
    fn test_debate_prompt_names_both_sides() {
        let prompt = PromptTemplate::debate_prompt(
            AgentType::Financial,
            AgentType::Market,
            "Negative ROI",
            "Huge TAM",
            "opt-A",
        );
        assert!(prompt.contains("Financial Analyst is challenging Market Analyst's position"));
        assert!(prompt.contains("Market Analyst's Position:\nHuge TAM"));
        assert!(prompt.contains("Financial Analyst's Challenge:\nNegative ROI"));
        assert!(prompt.contains("Option being debated: opt-A"));
    }

    #[test]
    fn test_system_prompts_describe_json_shape() {
        assert!(PromptTemplate::debate_system().contains("\"adjustedScore\""));
        assert!(PromptTemplate::synthesis_system().contains("\"recommendedOptionId\""));
    }

    #[test]
    fn test_synthesis_prompt_summarises_every_agent() {
        let decision = Decision::new("d", "Pricing").with_option(DecisionOption::new("a", "Raise"));
        let input = CouncilInput::new(CompanyContext::default(), decision);
        let evals = vec![
            AgentEvaluation::new(AgentType::Financial)
                .with_score(OptionScore::new("a", 7, "Margin up"))
                .with_key_factor("margin"),
            AgentEvaluation::new(AgentType::GameTheory).with_score(OptionScore::new("a", 4, "Invites undercut")),
        ];

        let prompt = PromptTemplate::synthesis_prompt(&input, &evals);
        assert!(prompt.contains("FINANCIAL AGENT:"));
        assert!(prompt.contains("GAMETHEORY AGENT:"));
        assert!(prompt.contains("  - a: 7/10 - Margin up"));
        assert!(prompt.contains("Key Factors: margin"));
        assert!(prompt.contains("Title: Pricing"));
    }
}
