// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::desk::Outcome;
use crate::report::generate_financial_report;
use crate::scenario::{load_requests, run_scenario, write_results};
use crate::utils::{fmt_money, pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = required_arg(sub, "path")?.trim();
    let out = required_arg(sub, "out")?.trim();

    let requests = load_requests(Path::new(path))?;
    let (Some(first), Some(last)) = (requests.first(), requests.last()) else {
        println!("No requests in {}", path);
        return Ok(());
    };
    let opening = generate_financial_report(conn, first.order.request_date)?;
    println!(
        "Starting {}: cash {}, inventory {}",
        first.order.request_date,
        fmt_money(&opening.cash_balance),
        fmt_money(&opening.inventory_value)
    );

    let results = run_scenario(conn, &requests)?;
    write_results(Path::new(out), &results)?;

    let rows = results
        .iter()
        .map(|r| {
            vec![
                r.request_id.to_string(),
                r.request_date.to_string(),
                format!("{} x {}", r.quantity, r.item_name),
                r.outcome.to_string(),
                fmt_money(&r.cash_balance),
                fmt_money(&r.inventory_value),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["#", "Date", "Order", "Outcome", "Cash", "Inventory"],
            rows
        )
    );

    let fulfilled = results
        .iter()
        .filter(|r| r.outcome == Outcome::Fulfilled)
        .count();
    let closing = generate_financial_report(conn, last.order.request_date)?;
    println!(
        "Fulfilled {}/{} requests. Final cash {}, inventory {}. Results written to {}",
        fulfilled,
        results.len(),
        fmt_money(&closing.cash_balance),
        fmt_money(&closing.inventory_value),
        out
    );
    Ok(())
}
