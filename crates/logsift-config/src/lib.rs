use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// TOML data model
// ---------------------------------------------------------------------------

/// Where and how the three per-domain summary files are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the summary files land in (default: current directory).
    #[serde(default = "default_dir")]
    pub dir: String,
    /// File name for the metric summary (default: "apm.json").
    #[serde(default = "default_apm")]
    pub apm: String,
    /// File name for the event summary (default: "application.json").
    #[serde(default = "default_application")]
    pub application: String,
    /// File name for the request summary (default: "request.json").
    #[serde(default = "default_request")]
    pub request: String,
    /// Pretty-print JSON output (default: true).
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            apm: default_apm(),
            application: default_application(),
            request: default_request(),
            pretty: default_true(),
        }
    }
}

/// Top-level TOML config file (`logsift.toml`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiftConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_dir() -> String {
    ".".to_string()
}

fn default_apm() -> String {
    "apm.json".to_string()
}

fn default_application() -> String {
    "application.json".to_string()
}

fn default_request() -> String {
    "request.json".to_string()
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parse a TOML string into a validated config.
pub fn parse(input: &str) -> Result<SiftConfig> {
    let config: SiftConfig = toml::from_str(input)?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate a config file from disk.
pub fn load(path: &Path) -> Result<SiftConfig> {
    let raw = std::fs::read_to_string(path)?;
    parse(&raw)
}

fn validate(config: &SiftConfig) -> Result<()> {
    let out = &config.output;
    for (key, name) in [
        ("output.apm", &out.apm),
        ("output.application", &out.application),
        ("output.request", &out.request),
    ] {
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{key} must not be empty"
            )));
        }
    }
    if out.dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.dir must not be empty".to_string(),
        ));
    }
    Ok(())
}
