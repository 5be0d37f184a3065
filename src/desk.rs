// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Order desk: turns one customer request into ledger writes.
//!
//! The desk never oversells. A request that cannot be served from stock
//! triggers a supplier reorder (shortfall plus the item's minimum stock
//! level) when cash allows.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::catalog;
use crate::delivery;
use crate::error::LedgerResult;
use crate::ledger;
use crate::models::NewTransaction;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub request_date: NaiveDate,
    pub item_name: String,
    pub quantity: i64,
    pub need_by: Option<NaiveDate>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Sold from stock.
    Fulfilled,
    /// Restock ordered and due in time; nothing sold yet.
    Backordered,
    /// Could not be served in time, or at all.
    Unfulfilled,
    /// Not a valid order.
    Rejected,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Fulfilled => "fulfilled",
            Outcome::Backordered => "backordered",
            Outcome::Unfulfilled => "unfulfilled",
            Outcome::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeskResult {
    pub outcome: Outcome,
    pub message: String,
    pub sale_id: Option<i64>,
    pub restock_id: Option<i64>,
    pub delivery_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
}

impl DeskResult {
    fn new(outcome: Outcome, message: String) -> Self {
        DeskResult {
            outcome,
            message,
            sale_id: None,
            restock_id: None,
            delivery_date: None,
            amount: None,
        }
    }
}

pub fn process_request(conn: &Connection, req: &OrderRequest) -> LedgerResult<DeskResult> {
    let item = match catalog::find_item(conn, req.item_name.trim())? {
        Some(item) => item,
        None => {
            return Ok(DeskResult::new(
                Outcome::Rejected,
                format!("'{}' is not something we sell", req.item_name.trim()),
            ));
        }
    };
    if req.quantity <= 0 {
        return Ok(DeskResult::new(
            Outcome::Rejected,
            format!("cannot order {} units", req.quantity),
        ));
    }
    let Some(total) = item.unit_price.checked_mul(Decimal::from(req.quantity)) else {
        return Ok(too_large(req));
    };

    let on_hand = ledger::get_stock_level(conn, &item.name, req.request_date)?;
    if on_hand >= req.quantity {
        let sale =
            NewTransaction::sale(&item.name, req.quantity, item.unit_price, req.request_date);
        let id = ledger::create_transaction(conn, &sale)?;
        tracing::info!(id, item = %item.name, quantity = req.quantity, %total, "order fulfilled");
        let mut res = DeskResult::new(
            Outcome::Fulfilled,
            format!(
                "Invoice #{id}: {} x {} @ {} = {}",
                req.quantity,
                item.name,
                item.unit_price,
                total.round_dp(2)
            ),
        );
        res.sale_id = Some(id);
        res.amount = Some(total);
        return Ok(res);
    }

    let shortfall = req.quantity - on_hand.max(0);
    let Some(reorder_qty) = shortfall.checked_add(item.min_stock_level.max(0)) else {
        return Ok(too_large(req));
    };
    let Some(cost) = item.unit_price.checked_mul(Decimal::from(reorder_qty)) else {
        return Ok(too_large(req));
    };
    let cash = ledger::get_cash_balance(conn, req.request_date)?;
    if cash < cost {
        tracing::warn!(item = %item.name, %cash, %cost, "cannot afford restock");
        return Ok(DeskResult::new(
            Outcome::Unfulfilled,
            format!(
                "only {on_hand} {} in stock; restock of {reorder_qty} ({}) exceeds cash",
                item.name,
                cost.round_dp(2)
            ),
        ));
    }

    let restock =
        NewTransaction::purchase(&item.name, reorder_qty, item.unit_price, req.request_date);
    let restock_id = ledger::create_transaction(conn, &restock)?;
    let eta = delivery::get_supplier_delivery_date(reorder_qty, req.request_date);
    let late = req.need_by.is_some_and(|due| eta > due);
    let (outcome, message) = if late {
        (
            Outcome::Unfulfilled,
            format!(
                "only {on_hand} {} in stock; restock of {reorder_qty} arrives {eta}, after {}",
                item.name,
                req.need_by.map(|d| d.to_string()).unwrap_or_default()
            ),
        )
    } else {
        (
            Outcome::Backordered,
            format!(
                "only {on_hand} {} in stock; restock of {reorder_qty} ordered, expected {eta}",
                item.name
            ),
        )
    };
    tracing::info!(restock_id, item = %item.name, reorder_qty, %eta, %outcome, "restock placed");
    let mut res = DeskResult::new(outcome, message);
    res.restock_id = Some(restock_id);
    res.delivery_date = Some(eta);
    res.amount = Some(cost);
    Ok(res)
}

fn too_large(req: &OrderRequest) -> DeskResult {
    DeskResult::new(
        Outcome::Rejected,
        format!("{} x {} is too large to price", req.quantity, req.item_name.trim()),
    )
}
