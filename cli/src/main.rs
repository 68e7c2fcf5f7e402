//! CLI entrypoint for Strategy Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{ConversationLogger, LlmGateway, NoConversationLogger, RunCouncilUseCase};
use council_infrastructure::{
    ConfigLoader, FileConfig, InputLoader, JsonlConversationLogger, ProviderGateway,
};
use council_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };
    apply_overrides(&cli, &mut config);
    config.validate().context("invalid configuration")?;

    // Keep the guard alive so the file writer flushes on exit
    let _log_guard = init_tracing(cli.verbose, config.logging.file.as_deref())?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting Strategy Council");

    // === Dependency Injection ===
    let gateway = Arc::new(ProviderGateway::from_config(&config.provider)?);

    if cli.check_provider {
        gateway
            .check()
            .await
            .with_context(|| format!("provider '{}' is not available", gateway.name()))?;
        println!("Provider '{}' is available", gateway.name());
        return Ok(());
    }

    let Some(input_path) = cli.input.as_deref() else {
        bail!("A decision input file is required.");
    };
    let input = InputLoader::load(input_path)?;
    let decision = input.decision.clone();

    let logger: Arc<dyn ConversationLogger> = match config.logging.transcript.as_deref() {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing transcript to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        },
        None => Arc::new(NoConversationLogger),
    };

    let use_case = RunCouncilUseCase::new(gateway)
        .with_params(config.council.to_params()?)
        .with_logger(logger);

    if !cli.quiet {
        eprintln!();
        eprintln!("+============================================================+");
        eprintln!("|           Strategy Council                                 |");
        eprintln!("+============================================================+");
        eprintln!();
        eprintln!("Decision: {}", decision.title);
        eprintln!("Options: {}", decision.options.len());
        eprintln!();
    }

    // Execute with or without progress reporting
    let result = if cli.quiet {
        use_case.execute(input).await?
    } else if cli.plain {
        use_case.execute_with_progress(input, &SimpleProgress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    let format = cli.output_format(config.output.format);
    println!("{}", ConsoleFormatter::render(format, &result, &decision));

    Ok(())
}

/// Command-line flags win over configuration files
fn apply_overrides(cli: &Cli, config: &mut FileConfig) {
    if !cli.agents.is_empty() {
        config.council.agents = cli.agents.clone();
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.council.max_rounds = max_rounds;
    }
    if let Some(threshold) = cli.threshold {
        config.council.disagreement_threshold = threshold;
    }
    if let Some(transcript) = &cli.transcript {
        config.logging.transcript = Some(transcript.clone());
    }
}

/// Initialize logging based on verbosity level, optionally teeing to a file
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create log directory {}", parent.display()))?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(EnvFilter::new(level)),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
