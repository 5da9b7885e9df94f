// crates/decfuzz-cli/src/main.rs
// ============================================================================
// Module: Decfuzz CLI Entry Point
// Description: Command dispatcher for decimal crosscheck campaigns.
// Purpose: Wire config, generator, engines, and the runner into a console
//          campaign with a stable exit policy.
// Dependencies: clap, decfuzz-backends, decfuzz-config, decfuzz-core,
//               serde_json, tracing-subscriber.
// ============================================================================

//! ## Overview
//! The decfuzz CLI runs crosscheck campaigns: it loads the TOML config,
//! applies flag overrides, connects the reference engine, wraps the
//! calculator under test, and drives the sequential runner. Mismatch
//! diagnostics stream to stdout as they are found, progress lines go to
//! stderr, and the closing summary renders as text or JSON. Setup problems
//! exit nonzero; mismatches only affect the exit code under
//! `--fail-on-mismatch`.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use decfuzz_backends::CandidateSettings;
use decfuzz_backends::ProcessCandidate;
use decfuzz_backends::ReferenceKind;
use decfuzz_backends::ReferenceSettings;
use decfuzz_backends::connect_reference;
use decfuzz_config::BackendKind;
use decfuzz_config::FuzzConfig;
use decfuzz_config::SummaryFormat;
use decfuzz_core::CampaignRunner;
use decfuzz_core::CampaignStats;
use decfuzz_core::GenerationMode;
use decfuzz_core::OperandGenerator;
use decfuzz_core::ReportSink;
use decfuzz_core::TrialRecord;
use decfuzz_core::Verdict;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable controlling the log filter.
const LOG_ENV: &str = "DECFUZZ_LOG";
/// Log filter applied when the environment variable is absent or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "decfuzz",
    version,
    about = "Differential tester for arbitrary-precision decimal arithmetic"
)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a crosscheck campaign against a live reference engine.
    Run(RunCommand),
    /// Load and validate configuration, then exit.
    ValidateConfig(ValidateConfigCommand),
}

/// Configuration for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Optional config file path (defaults to decfuzz.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of trials to run.
    #[arg(long, value_name = "N")]
    test_count: Option<u64>,
    /// Path to the calculator executable under test.
    #[arg(long, value_name = "PATH")]
    calculator: Option<PathBuf>,
    /// Reference backend (mysql or postgres).
    #[arg(long, value_name = "ENGINE", value_parser = parse_backend)]
    backend: Option<BackendKind>,
    /// Reference server hostname or IP address.
    #[arg(long, value_name = "HOST")]
    host: Option<String>,
    /// Reference server TCP port.
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
    /// Reference login user.
    #[arg(long, value_name = "USER")]
    user: Option<String>,
    /// Reference login password.
    #[arg(long, value_name = "PASSWORD")]
    password: Option<String>,
    /// Reference database name.
    #[arg(long, value_name = "NAME")]
    database: Option<String>,
    /// Operand generation mode (uniform or boundary).
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<GenerationMode>,
    /// RNG seed for a reproducible campaign.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Exit nonzero when any trial mismatches.
    #[arg(long, action = ArgAction::SetTrue)]
    fail_on_mismatch: bool,
    /// Closing summary rendering (text or json).
    #[arg(long, value_name = "FORMAT", value_parser = parse_summary_format)]
    summary_format: Option<SummaryFormat>,
}

/// Configuration for the `validate-config` command.
#[derive(Args, Debug)]
struct ValidateConfigCommand {
    /// Optional config file path (defaults to decfuzz.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a finished user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self { message }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(command) => command_run(&command),
        Commands::ValidateConfig(command) => command_validate_config(&command),
    }
}

/// Installs the stderr log subscriber with the `DECFUZZ_LOG` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
fn command_run(command: &RunCommand) -> CliResult<ExitCode> {
    let mut config = FuzzConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    apply_overrides(&mut config, command);
    config.validate().map_err(|err| CliError::new(err.to_string()))?;
    let calculator = config
        .require_command()
        .map_err(|err| CliError::new(err.to_string()))?
        .to_path_buf();

    let generator = OperandGenerator::new(config.generator_config())
        .map_err(|err| CliError::new(format!("generator setup failed: {err}")))?;
    let reference = connect_reference(
        reference_kind(config.reference.backend),
        &reference_settings(&config),
    )
    .map_err(|err| CliError::new(err.to_string()))?;
    let candidate = Box::new(ProcessCandidate::new(CandidateSettings {
        command: calculator,
        timeout: config.candidate.timeout(),
    }));

    let mut runner =
        CampaignRunner::new(config.campaign_config(), generator, reference, candidate);
    let mut sink = ConsoleSink::new(config.campaign.summary_format);
    let stats = runner
        .run(&mut sink)
        .map_err(|err| CliError::new(format!("campaign failed: {err}")))?;

    if config.campaign.fail_on_mismatch && stats.failed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Applies flag overrides on top of the loaded config.
fn apply_overrides(config: &mut FuzzConfig, command: &RunCommand) {
    if let Some(trials) = command.test_count {
        config.campaign.trials = trials;
    }
    if command.fail_on_mismatch {
        config.campaign.fail_on_mismatch = true;
    }
    if let Some(format) = command.summary_format {
        config.campaign.summary_format = format;
    }
    if let Some(mode) = command.mode {
        config.generator.mode = mode;
    }
    if let Some(seed) = command.seed {
        config.generator.seed = Some(seed);
    }
    if let Some(backend) = command.backend {
        config.reference.backend = backend;
    }
    if let Some(host) = &command.host {
        config.reference.host = host.clone();
    }
    if let Some(port) = command.port {
        config.reference.port = Some(port);
    }
    if let Some(user) = &command.user {
        config.reference.user = user.clone();
    }
    if let Some(password) = &command.password {
        config.reference.password = password.clone();
    }
    if let Some(database) = &command.database {
        config.reference.database = database.clone();
    }
    if let Some(calculator) = &command.calculator {
        config.candidate.command = Some(calculator.clone());
    }
}

/// Maps the config backend selection onto the backends crate.
const fn reference_kind(kind: BackendKind) -> ReferenceKind {
    match kind {
        BackendKind::Mysql => ReferenceKind::Mysql,
        BackendKind::Postgres => ReferenceKind::Postgres,
    }
}

/// Builds connection settings from the resolved config.
fn reference_settings(config: &FuzzConfig) -> ReferenceSettings {
    ReferenceSettings {
        host: config.reference.host.clone(),
        port: config.reference.resolved_port(),
        user: config.reference.user.clone(),
        password: config.reference.password.clone(),
        database: config.reference.database.clone(),
        connect_timeout: config.reference.connect_timeout(),
        query_timeout: config.reference.query_timeout(),
    }
}

// ============================================================================
// SECTION: Validate-Config Command
// ============================================================================

/// Executes the `validate-config` command.
fn command_validate_config(command: &ValidateConfigCommand) -> CliResult<ExitCode> {
    let config = FuzzConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let calculator = config
        .candidate
        .command
        .as_ref()
        .map_or_else(|| "(unset)".to_string(), |path| path.display().to_string());
    let line = format!(
        "config ok: backend={} host={} port={} database={} trials={} mode={} calculator={calculator}",
        config.reference.backend,
        config.reference.host,
        config.reference.resolved_port(),
        config.reference.database,
        config.campaign.trials,
        mode_label(config.generator.mode),
    );
    write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Stable label for a generation mode.
const fn mode_label(mode: GenerationMode) -> &'static str {
    match mode {
        GenerationMode::Uniform => "uniform",
        GenerationMode::Boundary => "boundary",
    }
}

// ============================================================================
// SECTION: Flag Parsers
// ============================================================================

/// Parses the `--backend` flag value.
fn parse_backend(value: &str) -> Result<BackendKind, String> {
    value.parse::<BackendKind>().map_err(|err| err.to_string())
}

/// Parses the `--summary-format` flag value.
fn parse_summary_format(value: &str) -> Result<SummaryFormat, String> {
    value.parse::<SummaryFormat>().map_err(|err| err.to_string())
}

/// Parses the `--mode` flag value.
fn parse_mode(value: &str) -> Result<GenerationMode, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "uniform" => Ok(GenerationMode::Uniform),
        "boundary" => Ok(GenerationMode::Boundary),
        _ => Err(format!("unknown generation mode '{value}'")),
    }
}

// ============================================================================
// SECTION: Console Sink
// ============================================================================

/// Report sink writing mismatches and the summary to stdout and progress to
/// stderr.
struct ConsoleSink {
    /// Closing summary rendering.
    summary_format: SummaryFormat,
}

impl ConsoleSink {
    /// Builds a sink with the configured summary rendering.
    const fn new(summary_format: SummaryFormat) -> Self {
        Self { summary_format }
    }
}

impl ReportSink for ConsoleSink {
    fn mismatch(&mut self, sequence: u64, record: &TrialRecord, verdict: &Verdict) {
        let _ = write_stdout_line(&format_mismatch(sequence, record, verdict));
    }

    fn progress(&mut self, completed: u64, total: u64, stats: &CampaignStats) {
        let line =
            format!("[{completed}/{total}] passed={} failed={}", stats.passed, stats.failed);
        let _ = write_stderr_line(&line);
    }

    fn summary(&mut self, stats: &CampaignStats) {
        let line = match self.summary_format {
            SummaryFormat::Text => format!(
                "total {} passed {} failed {}",
                stats.attempted, stats.passed, stats.failed
            ),
            SummaryFormat::Json => {
                serde_json::to_string(stats).unwrap_or_else(|_| String::from("{}"))
            }
        };
        let _ = write_stdout_line(&line);
    }
}

/// Renders one mismatch block with full repro context.
fn format_mismatch(sequence: u64, record: &TrialRecord, verdict: &Verdict) -> String {
    format!(
        "trial {sequence} failed: {verdict}\n  \
         expression: {expression}\n  \
         query:      {query}\n  \
         reference:  {reference}\n  \
         candidate:  {candidate}",
        expression = record.case.expression(),
        query = record.reference.query,
        reference = record.reference.outcome,
        candidate = record.candidate,
    )
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream failure message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
