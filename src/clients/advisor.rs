//! # clients::advisor — decision recommendations
//!
//! `recommend()` is the pipeline's single decision source, backed by one of
//! two providers selected via `ADVISOR_PROVIDER`:
//!
//! - **model** — an OpenAI-compatible chat-completions call carrying a
//!   `make_trade_recommendation` function tool; the model's tool call is the
//!   recommendation list.
//! - **rules** — the local moving-average crossover over the tick's market
//!   history, one signal-only decision per ticker.
//!
//! An empty result means "no recommendation", never an error: transport and
//! parse failures are logged and absorbed to an empty list so the tick
//! pipeline always completes. One attempt per tick, no retry.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::config::{AdvisorProvider, Config};
use crate::engine::crossover;
use crate::models::{Decision, HistoryPoint, TickPayload};

pub struct Advisor {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl Advisor {
    pub fn new(client: reqwest::Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    /// One decision list for this tick. Empty = no recommendation.
    pub async fn recommend(&self, payload: &TickPayload, day: NaiveDate) -> Vec<Decision> {
        match self.config.advisor_provider {
            AdvisorProvider::Rules => rule_signals(&payload.market_history),
            AdvisorProvider::Model => match self.call_model(payload, day).await {
                Ok(trades) => trades,
                Err(error) => {
                    warn!(%error, "advisor call failed — proceeding with no recommendations");
                    Vec::new()
                }
            },
        }
    }

    // ─── Model provider ───────────────────────────────────────────────────────

    async fn call_model(
        &self,
        payload: &TickPayload,
        day: NaiveDate,
    ) -> anyhow::Result<Vec<Decision>> {
        let api_key = self
            .config
            .advisor_api_key
            .as_deref()
            .context("ADVISOR_API_KEY not configured")?;

        let prompt = build_prompt(payload, day)?;
        let body = ChatRequest {
            model: &self.config.advisor_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "You are a trading assistant that analyzes stock positions \
                              and provides buy/sell recommendations.",
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            tools: trading_tools(),
            tool_choice: "auto",
        };

        debug!(model = %self.config.advisor_model, "Calling advisor...");

        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(api_key)
            .json(&body)
            .timeout(self.config.advisor_timeout)
            .send()
            .await
            .context("advisor request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("advisor error {status}: {text}");
        }

        let data: ChatResponse = resp.json().await.context("advisor response parse error")?;

        let Some(tool_call) = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls.into_iter().next())
        else {
            // The model answered in prose — that counts as "no recommendation".
            return Ok(Vec::new());
        };

        let args: TradeArguments = serde_json::from_str(&tool_call.function.arguments)
            .context("advisor tool arguments parse error")?;
        Ok(args.trades)
    }
}

/// One flat prompt embedding the tick data as pretty-printed JSON.
fn build_prompt(payload: &TickPayload, day: NaiveDate) -> anyhow::Result<String> {
    Ok(format!(
        "Analyze the following stock positions and market data, then provide \
         trading recommendations.\n\n\
         Current Positions: {positions}\n\
         Market Summary: {summary}\n\
         Market History: {history}\n\
         Date: {day}\n\n\
         For each position, decide whether to:\n\
         - BUY: Purchase more shares (specify quantity)\n\
         - SELL: Sell shares (specify quantity)\n\
         - STAY: Hold current position (quantity = 0)\n\n\
         Use the make_trade_recommendation function to provide your recommendations.",
        positions = serde_json::to_string_pretty(&payload.positions)?,
        summary = serde_json::to_string_pretty(&payload.market_summary)?,
        history = serde_json::to_string_pretty(&payload.market_history)?,
    ))
}

/// The `make_trade_recommendation` function tool the model must call.
fn trading_tools() -> serde_json::Value {
    json!([{
        "type": "function",
        "function": {
            "name": "make_trade_recommendation",
            "description": "Analyze stock data and recommend trading actions \
                            (BUY, SELL, or STAY) for each position",
            "parameters": {
                "type": "object",
                "properties": {
                    "trades": {
                        "type": "array",
                        "description": "List of trade recommendations",
                        "items": {
                            "type": "object",
                            "properties": {
                                "action": {
                                    "type": "string",
                                    "enum": ["BUY", "SELL", "STAY"],
                                    "description": "The trading action to take"
                                },
                                "ticker": {
                                    "type": "string",
                                    "description": "The stock ticker symbol"
                                },
                                "quantity": {
                                    "type": "integer",
                                    "description": "The quantity to trade (0 for STAY)"
                                }
                            },
                            "required": ["action", "ticker", "quantity"]
                        }
                    }
                },
                "required": ["trades"]
            }
        }
    }])
}

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    tools: serde_json::Value,
    tool_choice: &'a str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Deserialize)]
struct ToolCall {
    function: ToolFunction,
}

#[derive(Deserialize)]
struct ToolFunction {
    /// JSON-encoded string, per the chat-completions tool-call format.
    arguments: String,
}

#[derive(Deserialize)]
struct TradeArguments {
    #[serde(default)]
    trades: Vec<Decision>,
}

// ─── Rules provider ───────────────────────────────────────────────────────────

/// One crossover signal per ticker, in first-appearance order.
fn rule_signals(market_history: &[HistoryPoint]) -> Vec<Decision> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_ticker: HashMap<&str, Vec<HistoryPoint>> = HashMap::new();
    for point in market_history {
        let rows = by_ticker.entry(point.ticker.as_str()).or_insert_with(|| {
            order.push(point.ticker.as_str());
            Vec::new()
        });
        rows.push(point.clone());
    }

    order
        .into_iter()
        .map(|ticker| Decision {
            action: crossover::decide(&by_ticker[ticker]),
            ticker: ticker.to_string(),
            quantity: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeAction;

    fn make_point(ticker: &str, price: f64, offset: u64) -> HistoryPoint {
        HistoryPoint {
            ticker: ticker.into(),
            price,
            day: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Days::new(offset),
        }
    }

    #[test]
    fn rule_signals_group_per_ticker() {
        let mut history = Vec::new();
        for (i, price) in [10.0, 11.0, 12.0, 13.0, 14.0].iter().enumerate() {
            history.push(make_point("UP", *price, i as u64));
        }
        for (i, price) in [14.0, 13.0, 12.0, 11.0, 10.0].iter().enumerate() {
            history.push(make_point("DOWN", *price, i as u64));
        }
        history.push(make_point("THIN", 5.0, 0));

        let decisions = rule_signals(&history);
        assert_eq!(decisions.len(), 3);
        assert_eq!(decisions[0].ticker, "UP");
        assert_eq!(decisions[0].action, TradeAction::Buy);
        assert_eq!(decisions[1].action, TradeAction::Sell);
        assert_eq!(decisions[2].action, TradeAction::Hold);
        assert!(decisions.iter().all(|d| d.quantity.is_none()));
    }

    #[test]
    fn empty_history_yields_no_signals() {
        assert!(rule_signals(&[]).is_empty());
    }

    #[test]
    fn tool_call_arguments_parse_into_decisions() {
        let args: TradeArguments = serde_json::from_str(
            r#"{"trades":[{"action":"BUY","ticker":"AAPL","quantity":5}]}"#,
        )
        .unwrap();
        assert_eq!(args.trades.len(), 1);
        assert_eq!(args.trades[0].action, TradeAction::Buy);
    }
}
