//! # clients::mothership — the reconciliation authority
//!
//! Submits each tick's decisions and, on success, receives the canonical
//! position snapshot to adopt. A failed call is an outcome, not an exception:
//! the pipeline keeps its local positions and records the error string.
//! One attempt per tick, no retry.

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;
use tracing::info;

use crate::config::Config;
use crate::models::{Decision, Position, ReconcileOutcome};

pub struct Mothership {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl Mothership {
    pub fn new(client: reqwest::Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    /// POST the decision list for `trade_id` and return whatever the
    /// mothership answered. Transport failures collapse into
    /// [`ReconcileOutcome::Error`].
    pub async fn reconcile(&self, trade_id: &str, decisions: &[Decision]) -> ReconcileOutcome {
        match self.submit(trade_id, decisions).await {
            Ok(outcome) => outcome,
            Err(error) => ReconcileOutcome::error(error.to_string()),
        }
    }

    async fn submit(
        &self,
        trade_id: &str,
        decisions: &[Decision],
    ) -> anyhow::Result<ReconcileOutcome> {
        let api_key = self
            .config
            .mothership_api_key
            .as_deref()
            .context("MOTHERSHIP_API_KEY not configured")?;
        let url = format!("{}/make_trade", self.config.mothership_base_url);

        info!(trade_id, trades = decisions.len(), %url, "Submitting decisions to mothership...");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .json(&json!({ "id": trade_id, "trades": decisions }))
            .timeout(self.config.mothership_timeout)
            .send()
            .await
            .context("mothership unreachable")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("mothership rejected trade: HTTP {status}: {body}");
        }

        resp.json().await.context("mothership response parse error")
    }

    /// Live position snapshot for the dashboard.
    pub async fn positions(&self) -> anyhow::Result<Vec<Position>> {
        let api_key = self
            .config
            .mothership_api_key
            .as_deref()
            .context("MOTHERSHIP_API_KEY not configured")?;
        let url = format!("{}/positions", self.config.mothership_base_url);

        let resp = self
            .client
            .get(&url)
            .header("x-api-key", api_key)
            .timeout(self.config.mothership_timeout)
            .send()
            .await
            .context("mothership unreachable")?;

        if !resp.status().is_success() {
            anyhow::bail!("mothership positions fetch failed: HTTP {}", resp.status());
        }

        resp.json()
            .await
            .context("mothership positions parse error")
    }
}
