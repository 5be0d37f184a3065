// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::desk::{OrderRequest, process_request};
use crate::utils::{parse_date, required_arg};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let need_by = match sub.get_one::<String>("need_by") {
        Some(raw) => Some(parse_date(raw)?),
        None => None,
    };
    let req = OrderRequest {
        request_date: parse_date(required_arg(sub, "date")?)?,
        item_name: required_arg(sub, "item")?.trim().to_string(),
        quantity: *sub
            .get_one::<i64>("quantity")
            .ok_or_else(|| anyhow!("missing --quantity"))?,
        need_by,
        text: String::new(),
    };
    let res = process_request(conn, &req)?;
    println!("[{}] {}", res.outcome, res.message);
    Ok(())
}
