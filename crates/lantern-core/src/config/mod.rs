//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `LANTERN_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;

use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_MIN_SCORE, DEFAULT_RATE_CEILING, DEFAULT_RATE_WINDOW_SECS,
    DEFAULT_TOP_N, MAX_EXTRACTED_CANDIDATES, REMOTE_CANDIDATE_CAP,
};

/// Default judge model used when `LANTERN_JUDGE_MODEL` is not set.
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4o-mini";

/// Gateway configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LANTERN_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8787`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Judge model identifier; the prefix selects the provider.
    pub judge_model: String,

    /// Requests allowed per client per window. Default: `120`.
    pub rate_ceiling: u32,

    /// Rate window length in seconds. Default: `60`.
    pub rate_window_secs: u64,

    /// Judgment cache TTL in seconds. Default: `30`.
    pub cache_ttl_secs: u64,

    /// Max entries in the judgment cache. Default: `4096`.
    pub cache_capacity: u64,

    /// Hard cap on candidates one extraction produces. Default: `800`.
    pub max_candidates: usize,

    /// Candidates shown to the remote judge. Default: `80`.
    pub remote_cap: usize,

    /// Results returned by the local heuristic path. Default: `5`.
    pub top_n: usize,

    /// Minimum heuristic score for a returned result. Default: `8`.
    pub min_score: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8787,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            judge_model: DEFAULT_JUDGE_MODEL.to_string(),
            rate_ceiling: DEFAULT_RATE_CEILING,
            rate_window_secs: DEFAULT_RATE_WINDOW_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_capacity: 4096,
            max_candidates: MAX_EXTRACTED_CANDIDATES,
            remote_cap: REMOTE_CANDIDATE_CAP,
            top_n: DEFAULT_TOP_N,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "LANTERN_PORT";
    const ENV_BIND_ADDR: &'static str = "LANTERN_BIND_ADDR";
    const ENV_JUDGE_MODEL: &'static str = "LANTERN_JUDGE_MODEL";
    const ENV_RATE_CEILING: &'static str = "LANTERN_RATE_CEILING";
    const ENV_RATE_WINDOW_SECS: &'static str = "LANTERN_RATE_WINDOW_SECS";
    const ENV_CACHE_TTL_SECS: &'static str = "LANTERN_CACHE_TTL_SECS";
    const ENV_CACHE_CAPACITY: &'static str = "LANTERN_CACHE_CAPACITY";
    const ENV_MAX_CANDIDATES: &'static str = "LANTERN_MAX_CANDIDATES";
    const ENV_REMOTE_CAP: &'static str = "LANTERN_REMOTE_CAP";
    const ENV_TOP_N: &'static str = "LANTERN_TOP_N";
    const ENV_MIN_SCORE: &'static str = "LANTERN_MIN_SCORE";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let judge_model = Self::parse_string_from_env(Self::ENV_JUDGE_MODEL, defaults.judge_model);
        let rate_ceiling =
            Self::parse_u64_from_env(Self::ENV_RATE_CEILING, u64::from(defaults.rate_ceiling))
                .min(u64::from(u32::MAX)) as u32;
        let rate_window_secs =
            Self::parse_u64_from_env(Self::ENV_RATE_WINDOW_SECS, defaults.rate_window_secs);
        let cache_ttl_secs =
            Self::parse_u64_from_env(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl_secs);
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let max_candidates =
            Self::parse_u64_from_env(Self::ENV_MAX_CANDIDATES, defaults.max_candidates as u64)
                as usize;
        let remote_cap =
            Self::parse_u64_from_env(Self::ENV_REMOTE_CAP, defaults.remote_cap as u64) as usize;
        let top_n = Self::parse_u64_from_env(Self::ENV_TOP_N, defaults.top_n as u64) as usize;
        let min_score = Self::parse_i32_from_env(Self::ENV_MIN_SCORE, defaults.min_score);

        Ok(Self {
            port,
            bind_addr,
            judge_model,
            rate_ceiling,
            rate_window_secs,
            cache_ttl_secs,
            cache_capacity,
            max_candidates,
            remote_cap,
            top_n,
            min_score,
        })
    }

    /// Validates limit invariants and the judge credential.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_ceiling == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_RATE_CEILING,
            });
        }
        if self.rate_window_secs == 0 {
            return Err(ConfigError::ZeroLimit {
                name: Self::ENV_RATE_WINDOW_SECS,
            });
        }
        if self.remote_cap > self.max_candidates {
            return Err(ConfigError::CapOrdering {
                remote_cap: self.remote_cap,
                max_candidates: self.max_candidates,
            });
        }

        if let Some(name) = credential_env_for_model(&self.judge_model) {
            if env::var(name).is_err() {
                return Err(ConfigError::MissingEnvVar { name });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn parse_i32_from_env(var_name: &str, default: i32) -> i32 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// Maps a model identifier to the provider credential it needs, or `None`
/// for models whose provider is unknown (validation then skips the check).
pub fn credential_env_for_model(model: &str) -> Option<&'static str> {
    let model = model.to_ascii_lowercase();
    if model.starts_with("gpt") || model.starts_with("o1") || model.starts_with("o3") {
        Some("OPENAI_API_KEY")
    } else if model.starts_with("claude") {
        Some("ANTHROPIC_API_KEY")
    } else if model.starts_with("gemini") {
        Some("GEMINI_API_KEY")
    } else if model.starts_with("deepseek") {
        Some("DEEPSEEK_API_KEY")
    } else if model.starts_with("grok") {
        Some("XAI_API_KEY")
    } else {
        None
    }
}
