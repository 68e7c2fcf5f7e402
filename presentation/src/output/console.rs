//! Console output formatter for council results

use colored::Colorize;
use council_domain::core::string::{single_line, truncate};
use council_domain::evaluation::average_scores;
use council_domain::{AgentDebate, AgentType, CouncilEvaluation, Decision, OutputFormat};

/// Width of the option column in the score table
const OPTION_COLUMN: usize = 24;
/// Width of each agent column in the score table
const AGENT_COLUMN: usize = 11;

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render in the requested format
    pub fn render(format: OutputFormat, result: &CouncilEvaluation, decision: &Decision) -> String {
        match format {
            OutputFormat::Full => Self::format(result, decision),
            OutputFormat::Summary => Self::format_summary(result, decision),
            OutputFormat::Json => Self::format_json(result),
        }
    }

    /// Format the complete council result
    pub fn format(result: &CouncilEvaluation, decision: &Decision) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Strategy Council Review"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Decision:".cyan().bold(),
            decision.title
        ));
        if !decision.description.is_empty() {
            output.push_str(&format!("{}\n", decision.description.dimmed()));
        }
        output.push_str(&format!(
            "{} {}\n\n",
            "Council:".cyan().bold(),
            result
                .agent_evaluations
                .iter()
                .map(|e| e.agent_type.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        // Phase 1: scores after deliberation
        output.push_str(&Self::section_header("Phase 1: Specialist Scores"));
        output.push_str(&Self::score_table(result, decision));

        let fallbacks: Vec<&str> = result
            .agent_evaluations
            .iter()
            .filter(|e| e.is_fallback())
            .map(|e| e.agent_type.display_name())
            .collect();
        if !fallbacks.is_empty() {
            output.push_str(&format!(
                "\n{} {} (neutral scores substituted)\n",
                "Failed:".red().bold(),
                fallbacks.join(", ")
            ));
        }

        for evaluation in &result.agent_evaluations {
            if evaluation.key_factors.is_empty() || evaluation.is_fallback() {
                continue;
            }
            output.push_str(&format!(
                "\n{}\n",
                format!("── {} ──", evaluation.agent_type.display_name())
                    .yellow()
                    .bold()
            ));
            for factor in &evaluation.key_factors {
                output.push_str(&format!("  * {}\n", factor));
            }
        }

        // Phase 2: debate timeline
        output.push_str(&Self::section_header("Phase 2: Deliberation"));
        output.push_str(&Self::deliberation_status(result));
        output.push('\n');

        if result.debates.is_empty() {
            output.push_str(&format!("\n{}\n", "No debates were needed.".dimmed()));
        }
        for round in 1..=result.deliberation_rounds {
            let entries: Vec<&AgentDebate> =
                result.debates.iter().filter(|d| d.round == round).collect();
            if entries.is_empty() {
                continue;
            }
            output.push_str(&format!("\n{}\n", format!("Round {}", round).bold()));
            for entry in entries {
                output.push_str(&Self::debate_entry(entry));
            }
        }

        // Phase 3: recommendation
        output.push_str(&Self::section_header("Phase 3: Recommendation"));
        output.push_str(&Self::recommendation(result, decision));
        output.push_str(&format!("\n{}\n", result.synthesis));

        if !result.dissent.is_empty() {
            output.push_str(&format!("\n{}\n", "Dissent:".yellow().bold()));
            for point in &result.dissent {
                output.push_str(&format!("  * {}\n", point));
            }
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Reviewed:".dimmed(),
            result.review_date.dimmed()
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &CouncilEvaluation) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the recommendation only (concise output)
    pub fn format_summary(result: &CouncilEvaluation, decision: &Decision) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Strategy Council Recommendation ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n", "Decision:".bold(), decision.title));
        output.push_str(&Self::recommendation(result, decision));
        output.push_str(&Self::deliberation_status(result));
        output.push_str(&format!("\n\n{}\n", result.synthesis));

        output
    }

    fn recommendation(result: &CouncilEvaluation, decision: &Decision) -> String {
        format!(
            "{} {} ({})\n{} {}%\n",
            "Recommended:".green().bold(),
            decision.option_name(&result.recommended_option_id),
            result.recommended_option_id,
            "Confidence:".green().bold(),
            result.confidence
        )
    }

    fn deliberation_status(result: &CouncilEvaluation) -> String {
        let rounds = match result.deliberation_rounds {
            1 => "1 round".to_string(),
            n => format!("{} rounds", n),
        };
        let status = if result.consensus_reached {
            format!("Consensus reached after {}", rounds).green()
        } else {
            format!("Disagreements remain after {}", rounds).yellow()
        };
        format!(
            "{} {} (consensus score {:.2})",
            "Deliberation:".cyan().bold(),
            status,
            result.consensus_score
        )
    }

    fn score_table(result: &CouncilEvaluation, decision: &Decision) -> String {
        let mut table = String::new();

        let mut header = format!("{:<width$}", "Option", width = OPTION_COLUMN);
        for evaluation in &result.agent_evaluations {
            header.push_str(&format!(
                "{:>width$}",
                Self::column_label(evaluation.agent_type),
                width = AGENT_COLUMN
            ));
        }
        header.push_str(&format!("{:>8}", "Avg"));
        table.push_str(&format!("{}\n", header.bold()));

        let averages = average_scores(
            &result.agent_evaluations,
            decision.options.iter().map(|o| o.id.as_str()),
        );
        for (option_id, average) in averages {
            let mut row = format!(
                "{:<width$}",
                truncate(decision.option_name(&option_id), OPTION_COLUMN - 2),
                width = OPTION_COLUMN
            );
            for evaluation in &result.agent_evaluations {
                let cell = match evaluation.score_for(&option_id) {
                    Some(score) => format!("{}/10", score.score),
                    None => "-".to_string(),
                };
                row.push_str(&format!("{:>width$}", cell, width = AGENT_COLUMN));
            }
            row.push_str(&format!("{:>8.1}", average));

            if option_id == result.recommended_option_id {
                table.push_str(&format!("{}\n", row.green()));
            } else {
                table.push_str(&format!("{}\n", row));
            }
        }

        table
    }

    fn debate_entry(entry: &AgentDebate) -> String {
        let mut text = String::new();

        let speaker = entry.agent_type.display_name();
        if entry.agent_type == AgentType::ChiefOfStaff {
            text.push_str(&format!(
                "  {} {}\n",
                format!("{}:", speaker).magenta().bold(),
                single_line(&entry.position)
            ));
        } else {
            text.push_str(&format!(
                "  {} {}\n",
                format!("{}:", speaker).yellow().bold(),
                single_line(&entry.position)
            ));
        }

        if let (Some(challenger), Some(challenge)) = (entry.challenged_by, &entry.challenge) {
            text.push_str(&format!(
                "    {} {}: {}\n",
                "challenged by".dimmed(),
                challenger.display_name(),
                challenge
            ));
        }
        if let Some(response) = &entry.response {
            text.push_str(&format!("    {} {}\n", "->".cyan(), response));
        }

        text
    }

    fn column_label(agent: AgentType) -> &'static str {
        match agent {
            AgentType::Financial => "Financial",
            AgentType::Market => "Market",
            AgentType::Risk => "Risk",
            AgentType::GameTheory => "GameTheory",
            AgentType::Resource => "Resource",
            AgentType::ChiefOfStaff => "Chief",
            AgentType::Cfo => "CFO",
            AgentType::Growth => "Growth",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::deliberation::DebateResolution;
    use council_domain::{
        AgentEvaluation, DecisionOption, DeliberationResult, Disagreement, OptionScore,
        SynthesisResult, find_disagreements,
    };

    fn decision() -> Decision {
        Decision::new("hire", "Hire a sales lead")
            .with_option(DecisionOption::new("now", "Hire now"))
            .with_option(DecisionOption::new("later", "Wait a quarter"))
    }

    fn evaluation() -> CouncilEvaluation {
        let evaluations = vec![
            AgentEvaluation::new(AgentType::Financial)
                .with_score(OptionScore::new("now", 3, "Burn rises"))
                .with_score(OptionScore::new("later", 7, "Preserves runway"))
                .with_key_factor("runway"),
            AgentEvaluation::new(AgentType::Market)
                .with_score(OptionScore::new("now", 8, "Window is open"))
                .with_score(OptionScore::new("later", 6, "Competitors move")),
        ];
        let disagreement: Disagreement = find_disagreements(&evaluations).remove(0);
        let resolution = DebateResolution::sustained("Window matters more", 6);

        let mut debates = AgentDebate::opening_positions(1, &disagreement).to_vec();
        debates.push(AgentDebate::resolution(1, &disagreement, &resolution));

        let deliberation = DeliberationResult {
            final_evaluations: evaluations,
            debates,
            consensus_reached: false,
            rounds: 1,
        };
        let synthesis = SynthesisResult {
            recommended_option_id: "later".to_string(),
            confidence: 0.74,
            synthesis: "Wait until the pipeline proves out.".to_string(),
            dissent: vec!["Market wants to move now".to_string()],
            key_tradeoffs: Vec::new(),
        };
        CouncilEvaluation::new(deliberation, synthesis, 0.61, "2026-01-05T10:00:00Z")
    }

    #[test]
    fn test_format_full() {
        let text = ConsoleFormatter::format(&evaluation(), &decision());

        assert!(text.contains("Hire a sales lead"));
        assert!(text.contains("Phase 1: Specialist Scores"));
        assert!(text.contains("3/10"));
        assert!(text.contains("Round 1"));
        assert!(text.contains("Window matters more"));
        assert!(text.contains("Wait a quarter"));
        assert!(text.contains("74%"));
        assert!(text.contains("Market wants to move now"));
        assert!(text.contains("Disagreements remain after 1 round"));
    }

    #[test]
    fn test_format_summary_omits_debates() {
        let text = ConsoleFormatter::format_summary(&evaluation(), &decision());

        assert!(text.contains("Wait a quarter"));
        assert!(text.contains("74%"));
        assert!(text.contains("Wait until the pipeline proves out."));
        assert!(!text.contains("Round 1"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let result = evaluation();
        let json = ConsoleFormatter::render(OutputFormat::Json, &result, &decision());
        let parsed: CouncilEvaluation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_fallback_agent_is_flagged() {
        let mut result = evaluation();
        result.agent_evaluations.push(AgentEvaluation::fallback(
            AgentType::Risk,
            ["now", "later"],
        ));
        let text = ConsoleFormatter::format(&result, &decision());
        assert!(text.contains("neutral scores substituted"));
    }

    #[test]
    fn test_long_option_names_are_truncated() {
        let decision = Decision::new("hire", "Hire a sales lead")
            .with_option(DecisionOption::new(
                "now",
                "Hire a senior enterprise sales lead this month",
            ))
            .with_option(DecisionOption::new("later", "Wait a quarter"));
        let text = ConsoleFormatter::format(&evaluation(), &decision);
        assert!(text.contains("Hire a senior enter..."));
    }

    #[test]
    fn test_multiline_positions_are_flattened() {
        let mut result = evaluation();
        result.debates[0].position = "Score 3/10: Burn rises.\n\nRunway shrinks.".to_string();
        let text = ConsoleFormatter::format(&result, &decision());
        assert!(text.contains("Score 3/10: Burn rises. Runway shrinks."));
    }
}
