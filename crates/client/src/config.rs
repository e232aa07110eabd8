use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL for local development.
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_REPLY_DELAY_MS: u64 = 1500;
const DEFAULT_TOP_K: u32 = 5;
const DEFAULT_SESSION_FILE: &str = ".askknightro/session.json";

/// Which [`AssistantProvider`](askknightro_core::assistant::AssistantProvider)
/// answers chat questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssistantMode {
    /// Fixed delay, canned answer.
    Canned,
    /// The backend's `/api/ask` endpoint.
    Backend,
}

impl std::str::FromStr for AssistantMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "canned" => Ok(AssistantMode::Canned),
            "backend" => Ok(AssistantMode::Backend),
            other => Err(format!("expected 'canned' or 'backend', got '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a backend
/// on `localhost:8080`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub assistant_mode: AssistantMode,
    /// Simulated thinking time of the canned assistant.
    pub reply_delay: Duration,
    /// Number of material chunks the backend assistant retrieves.
    pub assistant_top_k: u32,
    /// Where the persisted session lives.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            assistant_mode: AssistantMode::Canned,
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            assistant_top_k: DEFAULT_TOP_K,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                       |
    /// |----------------------------|-------------------------------|
    /// | `API_BASE_URL`             | `http://localhost:8080`       |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                          |
    /// | `ASSISTANT_MODE`           | `canned` (or `backend`)       |
    /// | `ASSISTANT_REPLY_DELAY_MS` | `1500`                        |
    /// | `ASSISTANT_TOP_K`          | `5`                           |
    /// | `SESSION_FILE`             | `.askknightro/session.json`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or(defaults.api_base_url);
        if api_base_url.is_empty() {
            return Err(ConfigError::Invalid {
                var: "API_BASE_URL",
                reason: "must not be empty".into(),
            });
        }

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", &v)?),
            None => defaults.request_timeout,
        };

        let assistant_mode = match lookup("ASSISTANT_MODE") {
            Some(v) => v.parse().map_err(|reason| ConfigError::Invalid {
                var: "ASSISTANT_MODE",
                reason,
            })?,
            None => defaults.assistant_mode,
        };

        let reply_delay = match lookup("ASSISTANT_REPLY_DELAY_MS") {
            Some(v) => Duration::from_millis(parse_var("ASSISTANT_REPLY_DELAY_MS", &v)?),
            None => defaults.reply_delay,
        };

        let assistant_top_k = match lookup("ASSISTANT_TOP_K") {
            Some(v) => parse_var("ASSISTANT_TOP_K", &v)?,
            None => defaults.assistant_top_k,
        };

        let session_file = lookup("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        Ok(Self {
            api_base_url,
            request_timeout,
            assistant_mode,
            reply_delay,
            assistant_top_k,
            session_file,
        })
    }
}

/// Trim whitespace and trailing slashes from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}
