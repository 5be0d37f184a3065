// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::get_opening_date;
use crate::ledger::create_transaction;
use crate::models::{NewTransaction, TransactionType};
use crate::quotes::{NewQuote, insert_quote, parse_request_metadata};
use crate::utils::{parse_date, parse_decimal, parse_request_date, required_arg};
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, StringRecord};
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = required_arg(sub, "path")?.trim();
            let n = import_transactions(conn, Path::new(path))?;
            println!("Imported {} transactions from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

/// Loads `date,item_name,transaction_type,quantity,unit_price` rows. Every
/// row is validated like a normal ledger write; one bad row aborts the whole
/// file.
pub fn import_transactions(conn: &mut Connection, path: &Path) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let tx = conn.transaction()?;
    let mut count = 0;
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = i + 2;
        let date_raw = rec.get(0).context("date missing")?.trim();
        let item = rec.get(1).context("item_name missing")?.trim();
        let kind_raw = rec.get(2).context("transaction_type missing")?.trim();
        let qty_raw = rec.get(3).context("quantity missing")?.trim();
        let price_raw = rec.get(4).context("unit_price missing")?.trim();

        let new = NewTransaction {
            item_name: item.to_string(),
            transaction_type: kind_raw
                .parse::<TransactionType>()
                .with_context(|| format!("line {}", line))?,
            quantity: qty_raw
                .parse::<i64>()
                .with_context(|| format!("Invalid quantity '{}' on line {}", qty_raw, line))?,
            unit_price: parse_decimal(price_raw).with_context(|| format!("line {}", line))?,
            date: parse_date(date_raw).with_context(|| format!("line {}", line))?,
        };
        create_transaction(&tx, &new).with_context(|| format!("line {}", line))?;
        count += 1;
    }
    tx.commit()?;
    tracing::info!(path = %path.display(), count, "transactions imported");
    Ok(count)
}

/// Joins quote row `i` with request row `i` and stores the pair as one quote
/// record. Both files are read fully before anything is written.
pub fn import_quotes(conn: &mut Connection, quotes: &Path, requests: &Path) -> Result<usize> {
    let mut req_rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(requests)
        .with_context(|| format!("Open CSV {}", requests.display()))?;
    let req_headers = req_rdr.headers()?.clone();
    let text_col = column(&req_headers, &["response", "request", "request_text"])
        .ok_or_else(|| anyhow!("{} has no response column", requests.display()))?;
    let mut request_texts = Vec::new();
    for rec in req_rdr.records() {
        let rec = rec?;
        request_texts.push(rec.get(text_col).unwrap_or("").trim().to_string());
    }

    let mut q_rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(quotes)
        .with_context(|| format!("Open CSV {}", quotes.display()))?;
    let q_headers = q_rdr.headers()?.clone();
    let amount_col = column(&q_headers, &["total_amount"])
        .ok_or_else(|| anyhow!("{} has no total_amount column", quotes.display()))?;
    let explanation_col = column(&q_headers, &["quote_explanation", "explanation"]);
    let meta_col = column(&q_headers, &["request_metadata"]);
    let date_col = column(&q_headers, &["order_date"]);
    let item_col = column(&q_headers, &["item_name"]);

    let default_date = get_opening_date(conn)?;
    let mut pending = Vec::new();
    for (i, rec) in q_rdr.records().enumerate() {
        let rec = rec?;
        let line = i + 2;
        let request_text = request_texts.get(i).cloned().ok_or_else(|| {
            anyhow!(
                "quote on line {} has no matching request in {}",
                line,
                requests.display()
            )
        })?;
        let field = |col: Option<usize>| {
            col.and_then(|c| rec.get(c))
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };
        let amount_raw = rec.get(amount_col).unwrap_or("").trim();
        let total_amount = parse_decimal(amount_raw)
            .with_context(|| format!("Invalid total_amount on line {}", line))?;
        let order_date = match field(date_col) {
            d if d.is_empty() => default_date,
            d => parse_request_date(&d).with_context(|| format!("line {}", line))?,
        };
        let meta = parse_request_metadata(&field(meta_col));
        let item = field(item_col);
        pending.push(NewQuote {
            order_date,
            item_name: if item.is_empty() { None } else { Some(item) },
            request_text,
            explanation: field(explanation_col),
            total_amount,
            job_type: meta.job_type,
            order_size: meta.order_size,
            event_type: meta.event_type,
        });
    }

    let tx = conn.transaction()?;
    for q in &pending {
        insert_quote(&tx, q)?;
    }
    tx.commit()?;
    tracing::info!(quotes = %quotes.display(), count = pending.len(), "quotes imported");
    Ok(pending.len())
}
