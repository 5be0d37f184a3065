// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Historical quotes: read-only reference data searched by keyword.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::QuoteRecord;

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewQuote {
    pub order_date: NaiveDate,
    pub item_name: Option<String>,
    pub request_text: String,
    pub explanation: String,
    pub total_amount: Decimal,
    pub job_type: String,
    pub order_size: String,
    pub event_type: String,
}

pub fn insert_quote(conn: &Connection, q: &NewQuote) -> LedgerResult<i64> {
    conn.execute(
        "INSERT INTO quotes(order_date, item_name, request_text, explanation, total_amount,
                            job_type, order_size, event_type)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        rusqlite::params![
            q.order_date.to_string(),
            q.item_name.as_deref(),
            q.request_text,
            q.explanation,
            q.total_amount.to_string(),
            q.job_type,
            q.order_size,
            q.event_type,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Quotes whose request text or explanation contains any of `terms`,
/// ignoring case. Newest order date first; quotes from the same day keep
/// insertion order. Blank terms are skipped, and no usable terms means no
/// results.
pub fn search_quote_history(
    conn: &Connection,
    terms: &[&str],
    limit: Option<usize>,
) -> LedgerResult<Vec<QuoteRecord>> {
    let needles: Vec<String> = terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    if needles.is_empty() || limit == Some(0) {
        return Ok(Vec::new());
    }
    let matches = |text: &str| {
        let text = text.to_lowercase();
        needles.iter().any(|n| text.contains(n.as_str()))
    };

    // SQLite's lower() only folds ASCII, so matching happens here.
    let mut stmt = conn.prepare(
        "SELECT id, order_date, item_name, request_text, explanation, total_amount,
                job_type, order_size, event_type
         FROM quotes ORDER BY order_date DESC, id ASC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, Option<String>>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, String>(7)?,
            r.get::<_, String>(8)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        if limit.is_some_and(|n| out.len() >= n) {
            break;
        }
        let (id, date, item_name, request_text, explanation, amount, job_type, order_size, event) =
            row?;
        if !matches(&request_text) && !matches(&explanation) {
            continue;
        }
        let order_date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            LedgerError::Corrupt {
                column: "quotes.order_date",
                value: date.clone(),
            }
        })?;
        let total_amount = amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| LedgerError::Corrupt {
                column: "quotes.total_amount",
                value: amount.clone(),
            })?;
        out.push(QuoteRecord {
            id,
            order_date,
            item_name,
            request_text,
            explanation,
            total_amount,
            job_type,
            order_size,
            event_type: event,
        });
    }
    tracing::debug!(terms = ?needles, hits = out.len(), "quote search");
    Ok(out)
}

static META_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"['"](\w+)['"]\s*:\s*(?:'([^']*)'|"([^"]*)")"#).expect("static regex")
});

/// Quote metadata as written by the quoting tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    pub job_type: String,
    pub order_size: String,
    pub event_type: String,
}

/// Parses a dict literal such as
/// `{'job_type': 'office manager', 'order_size': 'small', 'event_type': 'ceremony'}`.
/// Unknown keys are ignored and missing ones stay empty.
pub fn parse_request_metadata(raw: &str) -> RequestMetadata {
    let mut meta = RequestMetadata::default();
    for cap in META_FIELD.captures_iter(raw) {
        let value = cap
            .get(2)
            .or_else(|| cap.get(3))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        match &cap[1] {
            "job_type" => meta.job_type = value,
            "order_size" => meta.order_size = value,
            "event_type" => meta.event_type = value,
            _ => {}
        }
    }
    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_single_and_double_quotes() {
        let m = parse_request_metadata(
            "{'job_type': 'office manager', 'order_size': 'small', 'event_type': 'ceremony'}",
        );
        assert_eq!(m.job_type, "office manager");
        assert_eq!(m.order_size, "small");
        assert_eq!(m.event_type, "ceremony");

        let m = parse_request_metadata(r#"{"job_type": "office manager", "extra": "x"}"#);
        assert_eq!(m.job_type, "office manager");
        assert_eq!(m.order_size, "");
    }

    #[test]
    fn metadata_garbage_is_empty() {
        assert_eq!(parse_request_metadata("n/a"), RequestMetadata::default());
    }
}
