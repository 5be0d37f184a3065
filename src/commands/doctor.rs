// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::get_initial_balance;
use crate::ledger::{
    Tally, all_transactions, get_all_inventory, get_cash_balance, latest_date,
};
use crate::models::TransactionType;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

/// Every problem found, as (issue, detail) pairs.
pub fn issues(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();

    // 1) Ledger items the catalog does not know
    let mut stmt = conn.prepare(
        "SELECT DISTINCT item_name FROM transactions EXCEPT SELECT name FROM catalog",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let item: String = r.get(0)?;
        rows.push(("item_not_in_catalog".to_string(), item));
    }

    // 2) Cash sign must follow the transaction type
    let txs = all_transactions(conn)?;
    for t in &txs {
        let bad = match t.transaction_type {
            TransactionType::Sale => t.cash_amount < Decimal::ZERO,
            TransactionType::Purchase => t.cash_amount > Decimal::ZERO,
        };
        if bad {
            rows.push((
                "cash_sign_mismatch".to_string(),
                format!("#{} {} {}", t.id, t.transaction_type, t.cash_amount),
            ));
        }
    }

    let Some(latest) = latest_date(conn)? else {
        return Ok(rows);
    };

    // 3) Oversold items
    let inventory = get_all_inventory(conn, latest)?;
    for (item, stock) in &inventory {
        if *stock < 0 {
            rows.push(("negative_stock".to_string(), format!("{} {}", item, stock)));
        }
    }

    // 4) Replaying the ledger must agree with the aggregate queries
    let tally = Tally::from_transactions(&txs)?;
    if tally.inventory() != &inventory {
        rows.push((
            "replay_mismatch".to_string(),
            "stock from replay differs from query".to_string(),
        ));
    }
    let replayed_cash = get_initial_balance(conn)? + tally.cash_delta();
    let queried_cash = get_cash_balance(conn, latest)?;
    if replayed_cash != queried_cash {
        rows.push((
            "replay_mismatch".to_string(),
            format!("cash {} vs {}", replayed_cash, queried_cash),
        ));
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let found = issues(conn)?;
    if found.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = found.into_iter().map(|(a, b)| vec![a, b]).collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
