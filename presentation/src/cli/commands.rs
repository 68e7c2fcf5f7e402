//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Scores, debate timeline, and recommendation
    Full,
    /// Recommendation and confidence only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Summary => council_domain::OutputFormat::Summary,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for strategy-council
#[derive(Parser, Debug)]
#[command(name = "strategy-council")]
#[command(author, version, about = "Strategy council - specialist agents debate a business decision")]
#[command(long_about = r#"
Strategy Council asks a panel of specialist agents to score the options of a
business decision, lets them debate their largest disagreements, and has a
chief of staff synthesize a recommendation.

The process has three phases:
1. Evaluation: every specialist scores every option in parallel
2. Deliberation: up to --max-rounds debates over the widest score gaps
3. Synthesis: the chief of staff recommends an option with a confidence

The decision is read from a JSON or TOML file describing the company
context, the decision and its options, business arms, and market data.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config (or ./.council.toml)
3. ~/.config/strategy-council/config.toml   Global config

Example:
  strategy-council decision.json
  strategy-council decision.toml -a financial -a risk --max-rounds 5
  strategy-council decision.json -o json --transcript run.jsonl
"#)]
pub struct Cli {
    /// Decision input file (.json or .toml)
    #[arg(value_name = "FILE", required_unless_present_any = ["show_config", "check_provider"])]
    pub input: Option<PathBuf>,

    /// Specialists to seat on the council (can be specified multiple times)
    #[arg(short, long = "agent", value_name = "AGENT")]
    pub agents: Vec<String>,

    /// Maximum number of deliberation rounds
    #[arg(long, value_name = "N")]
    pub max_rounds: Option<u32>,

    /// Score gap at which two agents disagree
    #[arg(long, value_name = "POINTS")]
    pub threshold: Option<u8>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Print plain progress lines instead of progress bars
    #[arg(long)]
    pub plain: bool,

    /// Write the council transcript as JSONL to this path
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Check that the configured provider is reachable and exit
    #[arg(long)]
    pub check_provider: bool,
}

impl Cli {
    /// Output format chosen on the command line, else the configured one
    pub fn output_format(
        &self,
        configured: Option<council_domain::OutputFormat>,
    ) -> council_domain::OutputFormat {
        self.output
            .map(Into::into)
            .or(configured)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_invocation() {
        let cli = Cli::try_parse_from([
            "strategy-council",
            "decision.json",
            "-a",
            "financial",
            "--agent",
            "risk",
            "--max-rounds",
            "5",
            "-o",
            "summary",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("decision.json")));
        assert_eq!(cli.agents, vec!["financial", "risk"]);
        assert_eq!(cli.max_rounds, Some(5));
        assert_eq!(cli.output, Some(OutputFormat::Summary));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_input_required_unless_utility_flag() {
        assert!(Cli::try_parse_from(["strategy-council"]).is_err());
        assert!(Cli::try_parse_from(["strategy-council", "--show-config"]).is_ok());
        assert!(Cli::try_parse_from(["strategy-council", "--check-provider"]).is_ok());
    }

    #[test]
    fn test_output_format_precedence() {
        let cli = Cli::try_parse_from(["strategy-council", "d.json"]).unwrap();
        assert_eq!(cli.output_format(None), council_domain::OutputFormat::Full);
        assert_eq!(
            cli.output_format(Some(council_domain::OutputFormat::Json)),
            council_domain::OutputFormat::Json
        );

        let cli = Cli::try_parse_from(["strategy-council", "d.json", "-o", "summary"]).unwrap();
        assert_eq!(
            cli.output_format(Some(council_domain::OutputFormat::Json)),
            council_domain::OutputFormat::Summary
        );
    }
}
