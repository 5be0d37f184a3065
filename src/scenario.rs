// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Replays a feed of customer requests through the order desk.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::desk::{self, OrderRequest, Outcome};
use crate::report;
use crate::utils::parse_request_date;

#[derive(Debug, Deserialize)]
struct RequestRow {
    request_date: String,
    item_name: String,
    quantity: i64,
    #[serde(default)]
    need_by: Option<String>,
    #[serde(default)]
    request: Option<String>,
}

/// One row of a request feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    /// 1-based row number in the source file.
    pub request_id: usize,
    pub order: OrderRequest,
}

/// Reads a request feed and orders it by request date. Requests on the same
/// day keep their file order.
pub fn load_requests(path: &Path) -> Result<Vec<FeedRequest>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<RequestRow>().enumerate() {
        let row = rec.with_context(|| format!("Bad request row {}", i + 1))?;
        let request_date = parse_request_date(&row.request_date)
            .with_context(|| format!("Request row {}", i + 1))?;
        let need_by = row.need_by.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let need_by = match need_by {
            Some(raw) => Some(
                parse_request_date(raw).with_context(|| format!("Request row {}", i + 1))?,
            ),
            None => None,
        };
        out.push(FeedRequest {
            request_id: i + 1,
            order: OrderRequest {
                request_date,
                item_name: row.item_name,
                quantity: row.quantity,
                need_by,
                text: row.request.unwrap_or_default(),
            },
        });
    }
    out.sort_by_key(|r| r.order.request_date);
    Ok(out)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub request_id: usize,
    pub request_date: NaiveDate,
    pub item_name: String,
    pub quantity: i64,
    pub outcome: Outcome,
    pub message: String,
    pub cash_balance: Decimal,
    pub inventory_value: Decimal,
}

/// Runs every request in order and records the balances right after each.
pub fn run_scenario(conn: &Connection, requests: &[FeedRequest]) -> Result<Vec<ResultRow>> {
    let mut results = Vec::with_capacity(requests.len());
    for feed in requests {
        let req = &feed.order;
        let outcome = desk::process_request(conn, req)
            .with_context(|| format!("Request {} ({})", feed.request_id, req.item_name))?;
        let snapshot = report::generate_financial_report(conn, req.request_date)?;
        tracing::debug!(
            request = feed.request_id,
            outcome = %outcome.outcome,
            cash = %snapshot.cash_balance,
            "request processed"
        );
        results.push(ResultRow {
            request_id: feed.request_id,
            request_date: req.request_date,
            item_name: req.item_name.clone(),
            quantity: req.quantity,
            outcome: outcome.outcome,
            message: outcome.message,
            cash_balance: snapshot.cash_balance,
            inventory_value: snapshot.inventory_value,
        });
    }
    Ok(results)
}

pub fn write_results(path: &Path, rows: &[ResultRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Create results log {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
