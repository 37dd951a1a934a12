//! # routes::dashboard
//!
//! `GET /dashboard` — unauthenticated server-rendered overview: the
//! mothership's live positions, the local ledger, and the recent audit log.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
};

use crate::models::{Position, TickLogEntry};
use crate::state::SharedState;

/// `GET /` — the dashboard is the landing page.
pub async fn home() -> impl IntoResponse {
    Redirect::to("/dashboard")
}

pub async fn dashboard(State(state): State<SharedState>) -> impl IntoResponse {
    let local_positions = state.ledger.snapshot().await;
    let recent_entries = state.audit.recent(10).await;
    let remote = state.mothership.positions().await;

    let mut page = String::with_capacity(4096);
    page.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>Trading Dashboard</title>\n<style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }\n\
         h1 { color: #333; }\n\
         h2 { color: #555; margin-top: 30px; }\n\
         table { border-collapse: collapse; width: 100%; margin-top: 20px; background-color: white; }\n\
         th, td { border: 1px solid #ddd; padding: 12px; text-align: left; }\n\
         th { background-color: #4CAF50; color: white; }\n\
         tr:nth-child(even) { background-color: #f9f9f9; }\n\
         .section { margin-top: 30px; background-color: white; padding: 20px; border-radius: 5px; }\n\
         .error { color: red; }\n\
         </style>\n</head>\n<body>\n<h1>Trading Dashboard</h1>\n",
    );

    page.push_str("<div class=\"section\">\n<h2>Mothership Current Positions</h2>\n");
    match remote {
        Ok(positions) if positions.is_empty() => {
            page.push_str("<p>No positions found on mothership.</p>\n");
        }
        Ok(positions) => position_table(&mut page, &positions),
        Err(error) => {
            page.push_str(&format!(
                "<p class=\"error\">Error fetching mothership positions: {}</p>\n",
                esc(&error.to_string())
            ));
        }
    }
    page.push_str("</div>\n");

    page.push_str("<div class=\"section\">\n<h2>Local Positions</h2>\n");
    if local_positions.is_empty() {
        page.push_str("<p>No local positions recorded yet.</p>\n");
    } else {
        position_table(&mut page, &local_positions);
    }
    page.push_str("</div>\n");

    page.push_str("<div class=\"section\">\n<h2>Recent Trading Log</h2>\n");
    if recent_entries.is_empty() {
        page.push_str("<p>No trading activity recorded yet.</p>\n");
    } else {
        log_table(&mut page, &recent_entries);
    }
    page.push_str("</div>\n</body>\n</html>\n");

    Html(page)
}

fn position_table(page: &mut String, positions: &[Position]) {
    page.push_str(
        "<table>\n<tr><th>Ticker</th><th>Quantity</th><th>Purchase Price</th></tr>\n",
    );
    for position in positions {
        page.push_str(&format!(
            "<tr><td><strong>{}</strong></td><td>{}</td><td>${:.2}</td></tr>\n",
            esc(&position.ticker),
            position.quantity,
            position.purchase_price,
        ));
    }
    page.push_str("</table>\n");
}

fn log_table(page: &mut String, entries: &[TickLogEntry]) {
    page.push_str(
        "<table>\n<tr><th>Timestamp</th><th>Trade ID</th><th>Day</th>\
         <th>P&amp;L</th><th>Decisions</th></tr>\n",
    );
    for entry in entries {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>${:.2}</td><td>{} trades</td></tr>\n",
            entry.timestamp.to_rfc3339(),
            esc(&entry.trade_id),
            entry.day,
            entry.unrealized_pnl,
            entry.decisions.len(),
        ));
    }
    page.push_str("</table>\n");
}

fn esc(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_text() {
        assert_eq!(esc("a<b>&c"), "a&lt;b&gt;&amp;c");
    }

    #[test]
    fn position_table_renders_rows() {
        let mut page = String::new();
        position_table(
            &mut page,
            &[Position::new("AAPL".into(), 10.0, 5.0, 8.0)],
        );
        assert!(page.contains("<strong>AAPL</strong>"));
        assert!(page.contains("$5.00"));
    }
}
