// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{get_cash_balance, latest_date};
use crate::report::generate_financial_report;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;

pub fn cash(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(required_arg(sub, "date")?)?;
    let balance = get_cash_balance(conn, date)?;
    println!("Cash as of {}: {}", date, fmt_money(&balance));
    Ok(())
}

pub fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => match latest_date(conn)? {
            Some(d) => d,
            None => crate::config::get_opening_date(conn)?,
        },
    };
    let r = generate_financial_report(conn, date)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &r)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["As Of", "Cash", "Inventory", "Total Assets"],
            vec![vec![
                r.as_of_date.to_string(),
                fmt_money(&r.cash_balance),
                fmt_money(&r.inventory_value),
                fmt_money(&r.total_assets),
            ]],
        )
    );

    let inventory = r
        .inventory_summary
        .iter()
        .map(|l| {
            vec![
                l.item_name.clone(),
                l.stock.to_string(),
                l.unit_price.to_string(),
                format!("{:.2}", l.value),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Item", "Stock", "Unit Price", "Value"], inventory)
    );

    if !r.top_selling_products.is_empty() {
        let top = r
            .top_selling_products
            .iter()
            .map(|t| {
                vec![
                    t.item_name.clone(),
                    t.total_units.to_string(),
                    format!("{:.2}", t.total_revenue),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Top Seller", "Units", "Revenue"], top));
    }
    Ok(())
}
