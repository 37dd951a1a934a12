//! # config — typed environment configuration
//!
//! Loaded once at startup and passed into [`AppState`](crate::state::AppState)
//! — no module reads process env after boot.
//!
//! Outbound calls carry an explicit timeout and are **never retried**; a
//! failed advisor or mothership call degrades the tick, it does not repeat it.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};

// ─── AdvisorProvider ──────────────────────────────────────────────────────────

/// Which decision source backs `recommend()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorProvider {
    /// Remote LLM with the trade-recommendation tool.
    Model,
    /// Local moving-average crossover over the tick's market history.
    Rules,
}

impl std::fmt::Display for AdvisorProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisorProvider::Model => write!(f, "model"),
            AdvisorProvider::Rules => write!(f, "rules"),
        }
    }
}

// ─── Config ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    /// Server key expected in the `apikey` header. `None` means the server is
    /// misconfigured: protected routes answer 500 until it is set.
    pub api_key: Option<String>,

    pub advisor_provider: AdvisorProvider,
    /// Key for the recommendation provider (model mode only).
    pub advisor_api_key: Option<String>,
    pub advisor_model: String,
    pub advisor_timeout: Duration,

    /// Base URL of the reconciliation service.
    pub mothership_base_url: String,
    pub mothership_api_key: Option<String>,
    pub mothership_timeout: Duration,

    /// Directory holding the ledger and log files.
    pub data_dir: PathBuf,

    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let provider_str = std::env::var("ADVISOR_PROVIDER")
            .unwrap_or_else(|_| "model".to_string())
            .to_lowercase();
        let advisor_provider = match provider_str.as_str() {
            "model" => AdvisorProvider::Model,
            "rules" => AdvisorProvider::Rules,
            other => bail!("Unknown ADVISOR_PROVIDER: '{other}'. Use 'model' or 'rules'"),
        };

        let advisor_timeout_secs: u64 = std::env::var("ADVISOR_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("ADVISOR_TIMEOUT_SECS must be a number")?;
        let mothership_timeout_secs: u64 = std::env::var("MOTHERSHIP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("MOTHERSHIP_TIMEOUT_SECS must be a number")?;

        Ok(Self {
            api_key: non_empty(std::env::var("API_KEY").ok()),
            advisor_provider,
            advisor_api_key: non_empty(std::env::var("ADVISOR_API_KEY").ok()),
            advisor_model: std::env::var("ADVISOR_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            advisor_timeout: Duration::from_secs(advisor_timeout_secs),
            mothership_base_url: std::env::var("MOTHERSHIP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            mothership_api_key: non_empty(std::env::var("MOTHERSHIP_API_KEY").ok()),
            mothership_timeout: Duration::from_secs(mothership_timeout_secs),
            data_dir: PathBuf::from(std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
        })
    }

    pub fn positions_path(&self) -> PathBuf {
        self.data_dir.join("positions.json")
    }

    pub fn trading_log_path(&self) -> PathBuf {
        self.data_dir.join("trading_log.json")
    }

    pub fn trading_history_path(&self) -> PathBuf {
        self.data_dir.join("trading_history.json")
    }
}

/// Keys arrive with stray whitespace often enough that we trim, and an empty
/// key is treated as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_unset() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" k1 ".into())), Some("k1".to_string()));
        assert_eq!(non_empty(None), None);
    }
}
