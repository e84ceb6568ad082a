/*!
 * Allocator Configuration
 *
 * Resolved from the command line first, then the environment:
 * - `allocator <MAX>`: address space size
 * - ALLOCATOR_MAX: address space size when no argument is given
 * - ALLOCATOR_STAT_FORMAT: `text` (default) or `json` rendering for STAT
 * - ALLOCATOR_TRACE_JSON: JSON log output on stderr (default: false)
 */

use crate::core::limits::{DEFAULT_MEMORY_MAX, DEFAULT_PROMPT};
use crate::core::types::Size;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const ENV_MAX: &str = "ALLOCATOR_MAX";
pub const ENV_STAT_FORMAT: &str = "ALLOCATOR_STAT_FORMAT";
pub const ENV_TRACE_JSON: &str = "ALLOCATOR_TRACE_JSON";

/// Configuration result
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("MAX must be a positive integer, got '{0}'")]
    #[diagnostic(
        code(config::invalid_max),
        help("Usage: allocator <MAX>, e.g. `allocator 10000`.")
    )]
    InvalidMax(String),

    #[error("Unknown STAT format '{0}'")]
    #[diagnostic(code(config::invalid_stat_format), help("Use `text` or `json`."))]
    InvalidStatFormat(String),

    #[error("Unexpected argument '{0}'")]
    #[diagnostic(code(config::unexpected_argument), help("Usage: allocator <MAX>"))]
    UnexpectedArgument(String),
}

/// Output format for STAT
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for StatFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(StatFormat::Text),
            "json" => Ok(StatFormat::Json),
            _ => Err(ConfigError::InvalidStatFormat(s.to_string())),
        }
    }
}

/// Allocator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Total address space size (MAX)
    pub max_memory: Size,
    pub stat_format: StatFormat,
    pub prompt: String,
    pub trace_json: bool,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MEMORY_MAX,
            stat_format: StatFormat::Text,
            prompt: DEFAULT_PROMPT.to_string(),
            trace_json: false,
        }
    }
}

impl AllocatorConfig {
    pub fn new(max_memory: Size) -> Self {
        Self {
            max_memory,
            ..Default::default()
        }
    }

    pub fn with_stat_format(mut self, stat_format: StatFormat) -> Self {
        self.stat_format = stat_format;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Load from process arguments (program name already skipped) and the
    /// process environment
    pub fn load(args: impl IntoIterator<Item = String>) -> ConfigResult<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve configuration from arguments and an environment lookup
    pub fn resolve(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut args = args.into_iter();
        let max_arg = args.next();
        if let Some(extra) = args.next() {
            return Err(ConfigError::UnexpectedArgument(extra));
        }

        let max_memory = match max_arg.or_else(|| env(ENV_MAX)) {
            Some(raw) => parse_max(&raw)?,
            None => DEFAULT_MEMORY_MAX,
        };

        let stat_format = env(ENV_STAT_FORMAT)
            .map(|raw| raw.parse::<StatFormat>())
            .transpose()?
            .unwrap_or_default();

        let trace_json = env(ENV_TRACE_JSON)
            .map(|v| v == "1" || v == "true")
            .unwrap_or(false);

        Ok(Self {
            max_memory,
            stat_format,
            prompt: DEFAULT_PROMPT.to_string(),
            trace_json,
        })
    }
}

fn parse_max(raw: &str) -> ConfigResult<Size> {
    match raw.trim().parse::<Size>() {
        Ok(max) if max > 0 => Ok(max),
        _ => Err(ConfigError::InvalidMax(raw.to_string())),
    }
}
