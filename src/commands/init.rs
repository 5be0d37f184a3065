// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog::{self, SeedOptions};
use crate::utils::{fmt_money, parse_date, parse_decimal, pretty_table, required_arg};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let opts = SeedOptions {
        seed: sub.get_one::<u64>("seed").copied().unwrap_or(catalog::DEFAULT_SEED),
        coverage: sub
            .get_one::<f64>("coverage")
            .copied()
            .unwrap_or(catalog::DEFAULT_COVERAGE),
        initial_balance: parse_decimal(required_arg(sub, "initial_balance")?)?,
        opening_date: parse_date(required_arg(sub, "opening_date")?)?,
    };
    let stocked = catalog::seed_database(conn, &opts).context("Seed ledger")?;

    let rows: Vec<Vec<String>> = stocked
        .iter()
        .map(|s| {
            vec![
                s.name.to_string(),
                s.current_stock.to_string(),
                s.min_stock_level.to_string(),
                s.unit_price.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Item", "Opening Stock", "Min Stock", "Unit Price"], rows)
    );
    println!(
        "Seeded {} items on {} with {} cash",
        stocked.len(),
        opts.opening_date,
        fmt_money(&opts.initial_balance)
    );
    Ok(())
}
