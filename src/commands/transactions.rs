// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{create_transaction, get_stock_level};
use crate::models::{NewTransaction, TransactionType};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table, required_arg};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the ledger write described by `tx add` arguments.
pub fn new_transaction_from_args(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let transaction_type = required_arg(sub, "type")?.parse::<TransactionType>()?;
    let quantity = *sub
        .get_one::<i64>("quantity")
        .ok_or_else(|| anyhow::anyhow!("missing --quantity"))?;
    Ok(NewTransaction {
        item_name: required_arg(sub, "item")?.trim().to_string(),
        transaction_type,
        quantity,
        unit_price: parse_decimal(required_arg(sub, "price")?)?,
        date: parse_date(required_arg(sub, "date")?)?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction_from_args(sub)?;
    let id = create_transaction(conn, &new)?;
    println!(
        "Recorded #{}: {} {} x {} @ {} on {}",
        id, new.transaction_type, new.quantity, new.item_name, new.unit_price, new.date
    );
    if new.transaction_type == TransactionType::Sale {
        let left = get_stock_level(conn, &new.item_name, new.date)?;
        if left < 0 {
            eprintln!("warning: {} is oversold ({} on hand)", new.item_name, left);
        }
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.item_name.clone(),
                    r.transaction_type.clone(),
                    r.quantity.to_string(),
                    r.unit_price.clone(),
                    r.cash_amount.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Item", "Type", "Qty", "Unit Price", "Cash"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub item_name: String,
    pub transaction_type: String,
    pub quantity: i64,
    pub unit_price: String,
    pub cash_amount: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT id, date, item_name, transaction_type, quantity, unit_price, cash_amount
         FROM transactions WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(item) = sub.get_one::<String>("item") {
        sql.push_str(" AND item_name=?");
        params_vec.push(item.trim().into());
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        sql.push_str(" AND transaction_type=?");
        params_vec.push(kind.parse::<TransactionType>()?.as_str().into());
    }
    if let Some(since) = sub.get_one::<String>("since") {
        sql.push_str(" AND date>=?");
        params_vec.push(parse_date(since)?.to_string());
    }
    if let Some(until) = sub.get_one::<String>("until") {
        sql.push_str(" AND date<=?");
        params_vec.push(parse_date(until)?.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            item_name: r.get(2)?,
            transaction_type: r.get(3)?,
            quantity: r.get(4)?,
            unit_price: r.get(5)?,
            cash_amount: r.get(6)?,
        });
    }
    Ok(data)
}
