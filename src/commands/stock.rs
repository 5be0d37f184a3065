// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{available_inventory, get_all_inventory, get_stock_level};
use crate::utils::{maybe_print_json, parse_date, pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("level", sub)) => {
            let item = required_arg(sub, "item")?.trim();
            let date = parse_date(required_arg(sub, "date")?)?;
            let stock = get_stock_level(conn, item, date)?;
            println!("{} as of {}: {}", item, date, stock);
        }
        Some(("all", sub)) => {
            let date = parse_date(required_arg(sub, "date")?)?;
            let inventory = if sub.get_flag("available") {
                available_inventory(conn, date)?
            } else {
                get_all_inventory(conn, date)?
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &inventory)? {
                let rows = inventory
                    .into_iter()
                    .map(|(item, stock)| vec![item, stock.to_string()])
                    .collect();
                println!("{}", pretty_table(&["Item", "Stock"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
