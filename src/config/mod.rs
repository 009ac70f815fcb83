//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `PAPERRANK_*` environment
//! variables; API credentials come from `OPENAI_API_KEY` and
//! `ANTHROPIC_API_KEY`.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_MAX_RESULTS, DEFAULT_MODEL_KEY, DEFAULT_OPENAI_BASE_URL, DEFAULT_SEARCH_URL,
    DEFAULT_THROTTLE_BASE_MS, DEFAULT_THROTTLE_FLOOR_MS, DEFAULT_THROTTLE_JITTER_MS,
};
use crate::models::ModelRegistry;
use crate::throttle::ThrottleConfig;

/// API keys resolved once at startup. Providers never read the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .finish()
    }
}

impl Credentials {
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_ANTHROPIC_API_KEY: &'static str = "ANTHROPIC_API_KEY";

    /// Reads keys from the environment; blank values count as absent.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: Config::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY),
            anthropic_api_key: Config::parse_optional_string_from_env(
                Self::ENV_ANTHROPIC_API_KEY,
            ),
        }
    }
}

/// Run configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PAPERRANK_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bibliographic search endpoint. Default: arXiv export API.
    pub search_url: String,

    /// Candidates requested per search strategy. Default: `5`.
    pub max_results: usize,

    /// Model registry key used for scoring. Default: `gpt-4o-mini`.
    pub model_key: String,

    /// Where the ranked table is saved. Default: `./.data/papers.rkyv`.
    pub table_path: PathBuf,

    /// JSON input document read by the binary.
    pub input_path: Option<PathBuf>,

    /// Timeout for every outbound HTTP request. Default: `30`.
    pub http_timeout_secs: u64,

    /// Pacing for the search service.
    pub throttle: ThrottleConfig,

    /// Base URL of the chat-completion API.
    pub openai_base_url: String,

    /// Rows printed after a run. Default: `10`.
    pub top_n: usize,

    pub credentials: Credentials,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            model_key: DEFAULT_MODEL_KEY.to_string(),
            table_path: PathBuf::from("./.data/papers.rkyv"),
            input_path: None,
            http_timeout_secs: 30,
            throttle: ThrottleConfig::default(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            top_n: 10,
            credentials: Credentials::default(),
        }
    }
}

impl Config {
    const ENV_SEARCH_URL: &'static str = "PAPERRANK_SEARCH_URL";
    const ENV_MAX_RESULTS: &'static str = "PAPERRANK_MAX_RESULTS";
    const ENV_MODEL: &'static str = "PAPERRANK_MODEL";
    const ENV_TABLE_PATH: &'static str = "PAPERRANK_TABLE_PATH";
    const ENV_INPUT_PATH: &'static str = "PAPERRANK_INPUT_PATH";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "PAPERRANK_HTTP_TIMEOUT_SECS";
    const ENV_THROTTLE_BASE_MS: &'static str = "PAPERRANK_THROTTLE_BASE_MS";
    const ENV_THROTTLE_JITTER_MS: &'static str = "PAPERRANK_THROTTLE_JITTER_MS";
    const ENV_THROTTLE_FLOOR_MS: &'static str = "PAPERRANK_THROTTLE_FLOOR_MS";
    const ENV_OPENAI_BASE_URL: &'static str = "PAPERRANK_OPENAI_BASE_URL";
    const ENV_TOP_N: &'static str = "PAPERRANK_TOP_N";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let search_url = Self::parse_string_from_env(Self::ENV_SEARCH_URL, defaults.search_url);
        let max_results = Self::parse_u64_from_env(Self::ENV_MAX_RESULTS, defaults.max_results as u64)?
            as usize;
        let model_key = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model_key);
        let table_path = env::var(Self::ENV_TABLE_PATH)
            .map(PathBuf::from)
            .unwrap_or(defaults.table_path);
        let input_path = Self::parse_optional_string_from_env(Self::ENV_INPUT_PATH).map(PathBuf::from);
        let http_timeout_secs =
            Self::parse_u64_from_env(Self::ENV_HTTP_TIMEOUT_SECS, defaults.http_timeout_secs)?;
        let throttle = ThrottleConfig::from_millis(
            Self::parse_u64_from_env(Self::ENV_THROTTLE_BASE_MS, DEFAULT_THROTTLE_BASE_MS)?,
            Self::parse_u64_from_env(Self::ENV_THROTTLE_JITTER_MS, DEFAULT_THROTTLE_JITTER_MS)?,
            Self::parse_u64_from_env(Self::ENV_THROTTLE_FLOOR_MS, DEFAULT_THROTTLE_FLOOR_MS)?,
        );
        let openai_base_url =
            Self::parse_string_from_env(Self::ENV_OPENAI_BASE_URL, defaults.openai_base_url);
        let top_n = Self::parse_u64_from_env(Self::ENV_TOP_N, defaults.top_n as u64)? as usize;

        Ok(Self {
            search_url,
            max_results,
            model_key,
            table_path,
            input_path,
            http_timeout_secs,
            throttle,
            openai_base_url,
            top_n,
            credentials: Credentials::from_env(),
        })
    }

    /// Checks ranges, the model key, and paths (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !ModelRegistry::contains(&self.model_key) {
            return Err(ConfigError::UnknownModel {
                key: self.model_key.clone(),
                known: ModelRegistry::keys().collect::<Vec<_>>().join(", "),
            });
        }

        if self.max_results == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_RESULTS,
                reason: "must be at least 1".to_string(),
            });
        }

        if self.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_HTTP_TIMEOUT_SECS,
                reason: "must be at least 1".to_string(),
            });
        }

        self.throttle
            .validate()
            .map_err(|reason| ConfigError::InvalidValue {
                name: "throttle",
                reason,
            })?;

        if self.table_path.is_dir() {
            return Err(ConfigError::NotAFile {
                path: self.table_path.clone(),
            });
        }

        if let Some(ref path) = self.input_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Input path, or [`ConfigError::MissingEnvVar`] when unset.
    pub fn require_input_path(&self) -> Result<&PathBuf, ConfigError> {
        self.input_path.as_ref().ok_or(ConfigError::MissingEnvVar {
            name: Self::ENV_INPUT_PATH,
        })
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
