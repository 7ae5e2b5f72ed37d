//! CLI entrypoint for fabric-confirm
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use confirm_application::{
    ConfirmationLogger, ConfirmationProgress, EndorsementChannel, NoProgress,
    RunConfirmationInput, RunConfirmationUseCase, SchedulerParams, TransportFailurePolicy,
};
use confirm_domain::{ConsensusResult, ModelArtifact, ProposalResponse};
use confirm_infrastructure::{
    ArtifactLoader, ConfigLoader, FileConfig, FileOutputFormat, JsonlConfirmationLogger,
    StaticEndorsementChannel,
};
use confirm_presentation::{
    Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress, TransportErrorArg,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", ConfigLoader::render(&config)?);
        return Ok(());
    }

    config.validate()?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // Resolve the artifact
    let artifact_path = cli
        .artifact
        .clone()
        .or_else(|| config.artifact.path.as_ref().map(PathBuf::from));
    let Some(artifact_path) = artifact_path else {
        bail!("No model artifact given. Use --artifact or set [artifact].path in the config.");
    };
    let artifact = ArtifactLoader::load(&artifact_path)?;

    if cli.list_models {
        print_models(&artifact);
        return Ok(());
    }

    let Some(model_id) = cli.model_id.or(config.artifact.model_id) else {
        bail!("No model id given. Use --model-id or set [artifact].model_id in the config.");
    };

    let mut input = RunConfirmationInput::new(model_id, config.proposal.clone());
    let reference_path = cli
        .reference
        .clone()
        .or_else(|| config.artifact.reference.as_ref().map(PathBuf::from));
    if let Some(path) = reference_path {
        let reference: ProposalResponse = ArtifactLoader::load_reference(&path)?;
        input = input.with_reference(reference);
    }

    let params = scheduler_params(&cli, &config);
    info!(
        "Starting fabric-confirm: model {} ({})",
        model_id,
        input.match_strategy()
    );

    // Optional JSONL event log
    let event_log = cli
        .event_log
        .clone()
        .or_else(|| config.logging.event_log.as_ref().map(PathBuf::from));
    let logger: Option<Arc<dyn ConfirmationLogger>> = event_log.and_then(|path| {
        JsonlConfirmationLogger::new(&path).map(|l| Arc::new(l) as Arc<dyn ConfirmationLogger>)
    });

    let run_timeout = cli.timeout.map(Duration::from_secs);
    let display = if cli.quiet {
        ProgressDisplay::Hidden
    } else if cli.verbose > 0 {
        ProgressDisplay::Lines
    } else {
        ProgressDisplay::Bar
    };

    // === Dependency Injection ===
    let outcome = if cli.simulate {
        let channel = config
            .peers
            .iter()
            .fold(StaticEndorsementChannel::new(), |channel, peer| {
                channel.with_peer(peer.to_peer(), peer.responses.clone())
            });
        let use_case = build_use_case(Arc::new(channel), params, logger);
        run(&use_case, &artifact, input, display, run_timeout).await?
    } else {
        run_over_network(&config, &artifact, input, params, logger, display, run_timeout)
            .await?
    };

    match outcome {
        Ok(result) => {
            print_result(&result, output_format(&cli, &config));
            Ok(())
        }
        Err(e) => {
            if let Some(partial) = e.partial_result() {
                eprintln!("{}", ConsoleFormatter::format_summary(partial));
            }
            Err(e).context("Confirmation run failed")
        }
    }
}

type RunOutcome = Result<ConsensusResult, confirm_application::RunConfirmationError>;

/// How run progress is shown
#[derive(Debug, Clone, Copy)]
enum ProgressDisplay {
    Hidden,
    /// Plain lines; used when log output would garble a progress bar
    Lines,
    Bar,
}

#[cfg(feature = "http-channel")]
async fn run_over_network(
    config: &FileConfig,
    artifact: &ModelArtifact,
    input: RunConfirmationInput,
    params: SchedulerParams,
    logger: Option<Arc<dyn ConfirmationLogger>>,
    display: ProgressDisplay,
    run_timeout: Option<Duration>,
) -> Result<RunOutcome> {
    use confirm_infrastructure::{DEFAULT_REQUEST_TIMEOUT, HttpEndorsementChannel};

    let request_timeout = config
        .scheduler
        .request_timeout()
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
    let channel = HttpEndorsementChannel::new(config.endorsing_peers(), request_timeout)?;
    let use_case = build_use_case(Arc::new(channel), params, logger);
    run(&use_case, artifact, input, display, run_timeout).await
}

#[cfg(not(feature = "http-channel"))]
async fn run_over_network(
    _config: &FileConfig,
    _artifact: &ModelArtifact,
    _input: RunConfirmationInput,
    _params: SchedulerParams,
    _logger: Option<Arc<dyn ConfirmationLogger>>,
    _display: ProgressDisplay,
    _run_timeout: Option<Duration>,
) -> Result<RunOutcome> {
    bail!("Built without the http-channel feature; use --simulate.")
}

fn build_use_case<C: EndorsementChannel + 'static>(
    channel: Arc<C>,
    params: SchedulerParams,
    logger: Option<Arc<dyn ConfirmationLogger>>,
) -> RunConfirmationUseCase<C> {
    let use_case = RunConfirmationUseCase::new(channel).with_params(params);
    match logger {
        Some(logger) => use_case.with_logger(logger),
        None => use_case,
    }
}

async fn run<C: EndorsementChannel + 'static>(
    use_case: &RunConfirmationUseCase<C>,
    artifact: &ModelArtifact,
    input: RunConfirmationInput,
    display: ProgressDisplay,
    run_timeout: Option<Duration>,
) -> Result<RunOutcome> {
    let progress: Box<dyn ConfirmationProgress> = match display {
        ProgressDisplay::Hidden => Box::new(NoProgress),
        ProgressDisplay::Lines => Box::new(SimpleProgress),
        ProgressDisplay::Bar => Box::new(ProgressReporter::new()),
    };
    let execution = use_case.execute_with_progress(artifact, input, progress.as_ref());

    match run_timeout {
        Some(limit) => match tokio::time::timeout(limit, execution).await {
            Ok(outcome) => Ok(outcome),
            Err(_) => {
                warn!("Run cancelled after {}s", limit.as_secs());
                bail!("Confirmation run timed out after {}s", limit.as_secs())
            }
        },
        None => Ok(execution.await),
    }
}

fn scheduler_params(cli: &Cli, config: &FileConfig) -> SchedulerParams {
    let mut params = config.scheduler.to_params();

    if let Some(max) = cli.max_requests {
        params = params.with_max_requests_per_organization(max);
    }
    if let Some(max) = cli.max_messages {
        params = params.with_max_total_messages(max);
    }
    if let Some(policy) = cli.on_transport_error {
        params = params.with_transport_failure_policy(match policy {
            TransportErrorArg::Abort => TransportFailurePolicy::Abort,
            TransportErrorArg::Reject => TransportFailurePolicy::TreatAsReject,
        });
    }

    params
}

fn output_format(cli: &Cli, config: &FileConfig) -> OutputFormat {
    cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Full) => OutputFormat::Full,
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Summary) | None => OutputFormat::Summary,
    })
}

fn print_result(result: &ConsensusResult, format: OutputFormat) {
    let output = match format {
        OutputFormat::Summary => ConsoleFormatter::format_summary(result),
        OutputFormat::Full => ConsoleFormatter::format(result),
        OutputFormat::Json => ConsoleFormatter::format_json(result),
    };

    println!("{}", output);
}

fn print_models(artifact: &ModelArtifact) {
    for id in artifact.model_ids() {
        if let Some(entry) = artifact.get(id) {
            println!(
                "{:>4}  p={:.4}  E[msgs]={:.2}  transitions={}",
                id,
                entry.probability,
                entry.expected_messages,
                entry.backward_transitions.len()
            );
        }
    }
}
