// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::all_transactions;
use crate::utils::required_arg;
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required_arg(sub, "format")?.to_lowercase();
    let out = required_arg(sub, "out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let rows = all_transactions(conn)?;
    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "item_name",
                "transaction_type",
                "quantity",
                "unit_price",
                "cash_amount",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.item_name.clone(),
                    t.transaction_type.to_string(),
                    t.quantity.to_string(),
                    t.unit_price.to_string(),
                    t.cash_amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date.to_string(),
                        "item_name": t.item_name,
                        "transaction_type": t.transaction_type.as_str(),
                        "quantity": t.quantity,
                        "unit_price": t.unit_price.to_string(),
                        "cash_amount": t.cash_amount.to_string(),
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    tracing::info!(out, count = rows.len(), format = %fmt, "ledger exported");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
