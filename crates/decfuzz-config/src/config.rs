// crates/decfuzz-config/src/config.rs
// ============================================================================
// Module: Decfuzz Configuration
// Description: Configuration loading and validation for decfuzz campaigns.
// Purpose: Provide strict config parsing with hard limits and typed sections.
// Dependencies: decfuzz-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Campaign configuration is loaded from a TOML file with strict size and
//! path limits. An explicitly named file must exist and parse; the implicit
//! `decfuzz.toml` fallback is only consulted when present, so a flags-only
//! invocation starts from defaults. Every section validates against hard
//! ceilings before a campaign is allowed to start.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use decfuzz_core::CampaignConfig;
use decfuzz_core::GenerationMode;
use decfuzz_core::GeneratorConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "decfuzz.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "DECFUZZ_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Minimum trials per campaign.
pub(crate) const MIN_TRIALS: u64 = 1;
/// Maximum trials per campaign.
pub(crate) const MAX_TRIALS: u64 = 100_000_000;
/// Total digit capacity of the widest decimal type either engine accepts.
pub(crate) const ENGINE_DIGIT_CAPACITY: usize = 65;
/// Fractional digit ceiling shared by generated operands.
pub(crate) const ENGINE_SCALE_CEILING: usize = 30;
/// Minimum candidate invocation timeout in milliseconds.
pub(crate) const MIN_CANDIDATE_TIMEOUT_MS: u64 = 50;
/// Maximum candidate invocation timeout in milliseconds.
pub(crate) const MAX_CANDIDATE_TIMEOUT_MS: u64 = 600_000;
/// Minimum reference connect timeout in milliseconds.
pub(crate) const MIN_CONNECT_TIMEOUT_MS: u64 = 100;
/// Maximum reference connect timeout in milliseconds.
pub(crate) const MAX_CONNECT_TIMEOUT_MS: u64 = 60_000;
/// Minimum reference statement timeout in milliseconds.
pub(crate) const MIN_QUERY_TIMEOUT_MS: u64 = 100;
/// Maximum reference statement timeout in milliseconds.
pub(crate) const MAX_QUERY_TIMEOUT_MS: u64 = 600_000;
/// Maximum hostname length.
pub(crate) const MAX_HOST_LENGTH: usize = 255;
/// Maximum user or database name length.
pub(crate) const MAX_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Complete decfuzz campaign configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FuzzConfig {
    /// Campaign loop settings.
    #[serde(default)]
    pub campaign: CampaignSection,
    /// Operand generation settings.
    #[serde(default)]
    pub generator: GeneratorSection,
    /// Reference engine connection settings.
    #[serde(default)]
    pub reference: ReferenceSection,
    /// Candidate calculator settings.
    #[serde(default)]
    pub candidate: CandidateSection,
}

impl FuzzConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// An explicit path or `DECFUZZ_CONFIG` value must name a readable file.
    /// With neither set, `decfuzz.toml` is loaded when present and defaults
    /// are returned otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section against its hard limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when any section is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.campaign.validate()?;
        self.generator.validate()?;
        self.reference.validate()?;
        self.candidate.validate()?;
        Ok(())
    }

    /// Returns the calculator path, which a campaign cannot run without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no calculator is configured.
    pub fn require_command(&self) -> Result<&Path, ConfigError> {
        self.candidate.command.as_deref().ok_or_else(|| {
            ConfigError::Invalid(
                "candidate.command must be set (config [candidate] or --calculator)".to_string(),
            )
        })
    }

    /// Builds the generator settings for the core runner.
    #[must_use]
    pub const fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            max_precision: self.generator.max_precision,
            max_scale: self.generator.max_scale,
            negative_probability: self.generator.negative_probability,
            mode: self.generator.mode,
            seed: self.generator.seed,
        }
    }

    /// Builds the campaign settings for the core runner.
    #[must_use]
    pub const fn campaign_config(&self) -> CampaignConfig {
        CampaignConfig {
            trials: self.campaign.trials,
            progress_interval: self.campaign.progress_interval,
            candidate_max_precision: self.candidate.max_precision,
        }
    }
}

/// Campaign loop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignSection {
    /// Number of trials to run.
    #[serde(default = "default_trials")]
    pub trials: u64,
    /// Progress event cadence in trials; zero disables progress events.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Exit nonzero when any trial mismatches.
    #[serde(default)]
    pub fail_on_mismatch: bool,
    /// Closing summary rendering.
    #[serde(default)]
    pub summary_format: SummaryFormat,
}

impl CampaignSection {
    /// Validates campaign settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.trials < MIN_TRIALS || self.trials > MAX_TRIALS {
            return Err(ConfigError::Invalid(format!(
                "campaign.trials must be between {MIN_TRIALS} and {MAX_TRIALS}"
            )));
        }
        Ok(())
    }
}

impl Default for CampaignSection {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            progress_interval: default_progress_interval(),
            fail_on_mismatch: false,
            summary_format: SummaryFormat::default(),
        }
    }
}

/// Operand generation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorSection {
    /// Maximum significant digit count for a drawn operand.
    #[serde(default = "default_max_precision")]
    pub max_precision: usize,
    /// Maximum fractional digit count for a drawn operand.
    #[serde(default = "default_max_scale")]
    pub max_scale: usize,
    /// Probability that a non-negative draw is flipped negative.
    #[serde(default = "default_negative_probability")]
    pub negative_probability: f64,
    /// Generation strategy.
    #[serde(default)]
    pub mode: GenerationMode,
    /// Seed for reproducible campaigns; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GeneratorSection {
    /// Validates generator settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_precision == 0 || self.max_precision > ENGINE_DIGIT_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "generator.max_precision must be between 1 and {ENGINE_DIGIT_CAPACITY}"
            )));
        }
        if self.max_scale > ENGINE_SCALE_CEILING {
            return Err(ConfigError::Invalid(format!(
                "generator.max_scale must not exceed {ENGINE_SCALE_CEILING}"
            )));
        }
        if !(0.0..=1.0).contains(&self.negative_probability) {
            return Err(ConfigError::Invalid(
                "generator.negative_probability must be between 0.0 and 1.0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            max_precision: default_max_precision(),
            max_scale: default_max_scale(),
            negative_probability: default_negative_probability(),
            mode: GenerationMode::default(),
            seed: None,
        }
    }
}

/// Reference engine connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSection {
    /// Reference engine selection.
    #[serde(default)]
    pub backend: BackendKind,
    /// Server hostname or IP address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Server TCP port; the backend's standard port when absent.
    #[serde(default)]
    pub port: Option<u16>,
    /// Login user.
    #[serde(default = "default_user")]
    pub user: String,
    /// Login password, possibly empty.
    #[serde(default)]
    pub password: String,
    /// Database (schema) to attach to.
    #[serde(default = "default_database")]
    pub database: String,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Per-statement timeout in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl ReferenceSection {
    /// Validates reference connection settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_name("reference.host", &self.host, MAX_HOST_LENGTH)?;
        validate_name("reference.user", &self.user, MAX_NAME_LENGTH)?;
        validate_name("reference.database", &self.database, MAX_NAME_LENGTH)?;
        validate_timeout_range(
            "reference.connect_timeout_ms",
            self.connect_timeout_ms,
            MIN_CONNECT_TIMEOUT_MS,
            MAX_CONNECT_TIMEOUT_MS,
        )?;
        validate_timeout_range(
            "reference.query_timeout_ms",
            self.query_timeout_ms,
            MIN_QUERY_TIMEOUT_MS,
            MAX_QUERY_TIMEOUT_MS,
        )?;
        Ok(())
    }

    /// Returns the configured port or the backend's standard port.
    #[must_use]
    pub fn resolved_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.backend.default_port())
    }

    /// Connect timeout as a duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Per-statement timeout as a duration.
    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for ReferenceSection {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            host: default_host(),
            port: None,
            user: default_user(),
            password: String::new(),
            database: default_database(),
            connect_timeout_ms: default_connect_timeout_ms(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

/// Candidate calculator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateSection {
    /// Path to the calculator executable.
    #[serde(default)]
    pub command: Option<PathBuf>,
    /// Per-invocation timeout in milliseconds.
    #[serde(default = "default_candidate_timeout_ms")]
    pub timeout_ms: u64,
    /// Total digit capacity claimed by the calculator, used by the overflow
    /// allowance when the reference result is wider.
    #[serde(default = "default_max_precision")]
    pub max_precision: usize,
}

impl CandidateSection {
    /// Validates candidate settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(command) = &self.command {
            validate_path_string("candidate.command", &command.to_string_lossy())?;
        }
        validate_timeout_range(
            "candidate.timeout_ms",
            self.timeout_ms,
            MIN_CANDIDATE_TIMEOUT_MS,
            MAX_CANDIDATE_TIMEOUT_MS,
        )?;
        if self.max_precision == 0 || self.max_precision > ENGINE_DIGIT_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "candidate.max_precision must be between 1 and {ENGINE_DIGIT_CAPACITY}"
            )));
        }
        Ok(())
    }

    /// Invocation timeout as a duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CandidateSection {
    fn default() -> Self {
        Self {
            command: None,
            timeout_ms: default_candidate_timeout_ms(),
            max_precision: default_max_precision(),
        }
    }
}

// ============================================================================
// SECTION: Selection Enums
// ============================================================================

/// Reference engine selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// MySQL reference.
    #[default]
    Mysql,
    /// PostgreSQL reference.
    Postgres,
}

impl BackendKind {
    /// Standard port for the selected backend.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Mysql => 3306,
            Self::Postgres => 5432,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
        };
        formatter.write_str(label)
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::Mysql),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(ConfigError::Invalid(format!("unknown reference backend '{value}'"))),
        }
    }
}

/// Closing summary rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryFormat {
    /// Human-oriented single line.
    #[default]
    Text,
    /// One JSON object.
    Json,
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Text => "text",
            Self::Json => "json",
        };
        formatter.write_str(label)
    }
}

impl FromStr for SummaryFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::Invalid(format!("unknown summary format '{value}'"))),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// Returns `None` when no path is named anywhere and the implicit default
/// file does not exist.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_NAME);
    if fallback.is_file() {
        return Ok(Some(fallback));
    }
    Ok(None)
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path-valued field against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Validates a short name-valued field.
fn validate_name(field: &str, value: &str, max_length: usize) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > max_length {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Validates a millisecond timeout against an inclusive range.
fn validate_timeout_range(
    field: &str,
    value_ms: u64,
    min_ms: u64,
    max_ms: u64,
) -> Result<(), ConfigError> {
    if value_ms < min_ms || value_ms > max_ms {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between {min_ms} and {max_ms} milliseconds",
        )));
    }
    Ok(())
}

/// Default trial count.
pub(crate) const fn default_trials() -> u64 {
    1_000
}

/// Default progress event cadence.
pub(crate) const fn default_progress_interval() -> u64 {
    100
}

/// Default operand digit ceiling.
pub(crate) const fn default_max_precision() -> usize {
    ENGINE_DIGIT_CAPACITY
}

/// Default operand fractional ceiling.
pub(crate) const fn default_max_scale() -> usize {
    ENGINE_SCALE_CEILING
}

/// Default sign-flip probability.
pub(crate) const fn default_negative_probability() -> f64 {
    0.5
}

/// Default reference host.
pub(crate) fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Default reference user.
pub(crate) fn default_user() -> String {
    "root".to_string()
}

/// Default reference database.
pub(crate) fn default_database() -> String {
    "test".to_string()
}

/// Default reference connect timeout in milliseconds.
pub(crate) const fn default_connect_timeout_ms() -> u64 {
    5_000
}

/// Default reference statement timeout in milliseconds.
pub(crate) const fn default_query_timeout_ms() -> u64 {
    10_000
}

/// Default candidate invocation timeout in milliseconds.
pub(crate) const fn default_candidate_timeout_ms() -> u64 {
    5_000
}

// ============================================================================
// SECTION: Tests
// ============================================================================
