use std::time::Duration;

use crate::error::{CoreError, CoreResult};

pub const DEFAULT_ENDPOINT: &str =
    "https://free-google-translator.p.rapidapi.com/external-api/free-google-translator";
pub const DEFAULT_HOST: &str = "free-google-translator.p.rapidapi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub api_key: String,
    pub endpoint: String,
    pub api_host: String,
    /// `None` means the client waits indefinitely.
    pub timeout: Option<Duration>,
    pub seed: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_host: DEFAULT_HOST.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            seed: None,
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut cfg = CoreConfig::default();

        if let Some(key) = non_empty("TEXTTOOLS_RAPIDAPI_KEY").or_else(|| non_empty("RAPIDAPI_KEY")) {
            cfg.api_key = key;
        }

        if let Some(endpoint) = non_empty("TEXTTOOLS_TRANSLATE_ENDPOINT") {
            cfg.endpoint = endpoint;
        }

        if let Some(host) = non_empty("TEXTTOOLS_TRANSLATE_HOST") {
            cfg.api_host = host;
        }

        if let Some(raw) = non_empty("TEXTTOOLS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| {
                CoreError::Config(format!("TEXTTOOLS_HTTP_TIMEOUT_SECS must be a non-negative integer, got {raw:?}"))
            })?;
            cfg.timeout = if secs == 0 {
                None
            } else {
                Some(Duration::from_secs(secs))
            };
        }

        if let Some(raw) = non_empty("TEXTTOOLS_SEED") {
            let seed: u64 = raw.parse().map_err(|_| {
                CoreError::Config(format!("TEXTTOOLS_SEED must be an unsigned integer, got {raw:?}"))
            })?;
            cfg.seed = Some(seed);
        }

        Ok(cfg)
    }
}
