// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::importer::import_quotes;
use crate::quotes::{DEFAULT_SEARCH_LIMIT, search_quote_history};
use crate::models::QuoteRecord;
use crate::utils::{maybe_print_json, pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("search", sub)) => search(conn, sub)?,
        Some(("import", sub)) => {
            let quotes = required_arg(sub, "quotes")?.trim();
            let requests = required_arg(sub, "requests")?.trim();
            let n = import_quotes(conn, Path::new(quotes), Path::new(requests))?;
            println!("Imported {} quotes", n);
        }
        _ => {}
    }
    Ok(())
}

pub fn query(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<QuoteRecord>> {
    let terms: Vec<&str> = sub
        .get_many::<String>("terms")
        .map(|vals| vals.map(|s| s.as_str()).collect())
        .unwrap_or_default();
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(DEFAULT_SEARCH_LIMIT);
    Ok(search_quote_history(conn, &terms, Some(limit))?)
}

fn search(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No matching quotes");
            return Ok(());
        }
        let rows = data
            .into_iter()
            .map(|q| {
                vec![
                    q.order_date.to_string(),
                    q.request_text,
                    format!("{:.2}", q.total_amount),
                    q.explanation,
                    q.event_type,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Request", "Total", "Explanation", "Event"], rows)
        );
    }
    Ok(())
}
