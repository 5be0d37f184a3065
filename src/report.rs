// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};

use crate::catalog;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger;
use crate::models::{FinancialReport, InventoryLine, TopSeller};

pub const TOP_SELLERS: usize = 5;

/// Items ranked by sale revenue up to `as_of`, highest first, ties by name.
pub fn top_selling_products(
    conn: &Connection,
    as_of: NaiveDate,
    limit: usize,
) -> LedgerResult<Vec<TopSeller>> {
    let mut stmt = conn.prepare(
        "SELECT item_name, quantity, cash_amount FROM transactions
         WHERE transaction_type = 'sale' AND date <= ?1",
    )?;
    let rows = stmt.query_map(params![ledger::as_of_key(as_of)], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, i64>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut agg: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
    for row in rows {
        let (item, qty, amount_raw) = row?;
        let amount = amount_raw
            .trim()
            .parse::<Decimal>()
            .map_err(|_| LedgerError::Corrupt {
                column: "transactions.cash_amount",
                value: amount_raw.clone(),
            })?;
        let e = agg.entry(item).or_insert((0, Decimal::ZERO));
        e.0 = e
            .0
            .checked_add(qty)
            .ok_or(LedgerError::Overflow("units sold"))?;
        e.1 = e
            .1
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("revenue"))?;
    }
    let mut items: Vec<TopSeller> = agg
        .into_iter()
        .map(|(item_name, (total_units, total_revenue))| TopSeller {
            item_name,
            total_units,
            total_revenue,
        })
        .collect();
    items.sort_by(|a, b| {
        b.total_revenue
            .cmp(&a.total_revenue)
            .then_with(|| a.item_name.cmp(&b.item_name))
    });
    items.truncate(limit);
    Ok(items)
}

/// Cash, inventory valuation at catalog prices, total assets and best
/// sellers, all as of `as_of`.
pub fn generate_financial_report(
    conn: &Connection,
    as_of: NaiveDate,
) -> LedgerResult<FinancialReport> {
    let cash_balance = ledger::get_cash_balance(conn, as_of)?;
    let inventory = ledger::get_all_inventory(conn, as_of)?;
    let prices: HashMap<String, Decimal> = catalog::list_items(conn)?
        .into_iter()
        .map(|i| (i.name, i.unit_price))
        .collect();

    let mut inventory_value = Decimal::ZERO;
    let mut inventory_summary = Vec::with_capacity(inventory.len());
    for (item_name, stock) in inventory {
        let unit_price = match prices.get(&item_name) {
            Some(p) => *p,
            None => {
                tracing::warn!(item = %item_name, "no catalog price; valued at zero");
                Decimal::ZERO
            }
        };
        let value = Decimal::from(stock)
            .checked_mul(unit_price)
            .ok_or(LedgerError::Overflow("inventory value"))?;
        inventory_value = inventory_value
            .checked_add(value)
            .ok_or(LedgerError::Overflow("inventory value"))?;
        inventory_summary.push(InventoryLine {
            item_name,
            stock,
            unit_price,
            value,
        });
    }

    let total_assets = cash_balance
        .checked_add(inventory_value)
        .ok_or(LedgerError::Overflow("total assets"))?;
    let top_selling_products = top_selling_products(conn, as_of, TOP_SELLERS)?;
    tracing::debug!(%as_of, %cash_balance, %inventory_value, "financial report");
    Ok(FinancialReport {
        as_of_date: as_of,
        cash_balance,
        inventory_value,
        total_assets,
        inventory_summary,
        top_selling_products,
    })
}
