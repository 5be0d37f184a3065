// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Sale,
    Purchase,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Sale => "sale",
            TransactionType::Purchase => "purchase",
        }
    }

    /// Cash effect of `quantity` units at `unit_price`: money in for a sale,
    /// money out for a purchase. `None` if the product does not fit a
    /// `Decimal`.
    pub fn signed_amount(&self, quantity: i64, unit_price: Decimal) -> Option<Decimal> {
        let gross = Decimal::from(quantity).checked_mul(unit_price)?;
        Some(match self {
            TransactionType::Sale => gross,
            TransactionType::Purchase => -gross,
        })
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = InvalidInput;

    // Also accepts the plural names older ledgers were written with.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" | "sales" => Ok(TransactionType::Sale),
            "purchase" | "purchases" | "stock_order" | "stock_orders" => {
                Ok(TransactionType::Purchase)
            }
            other => Err(InvalidInput::UnknownTransactionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub item_name: String,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub cash_amount: Decimal,
}

/// A ledger write before it has been assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub item_name: String,
    pub transaction_type: TransactionType,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn sale(item: &str, quantity: i64, unit_price: Decimal, date: NaiveDate) -> Self {
        NewTransaction {
            item_name: item.to_string(),
            transaction_type: TransactionType::Sale,
            quantity,
            unit_price,
            date,
        }
    }

    pub fn purchase(item: &str, quantity: i64, unit_price: Decimal, date: NaiveDate) -> Self {
        NewTransaction {
            item_name: item.to_string(),
            transaction_type: TransactionType::Purchase,
            quantity,
            unit_price,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub category: String,
    pub unit_price: Decimal,
    pub min_stock_level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: i64,
    pub order_date: NaiveDate,
    pub item_name: Option<String>,
    pub request_text: String,
    pub explanation: String,
    pub total_amount: Decimal,
    pub job_type: String,
    pub order_size: String,
    pub event_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryLine {
    pub item_name: String,
    pub stock: i64,
    pub unit_price: Decimal,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSeller {
    pub item_name: String,
    pub total_units: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialReport {
    pub as_of_date: NaiveDate,
    pub cash_balance: Decimal,
    pub inventory_value: Decimal,
    pub total_assets: Decimal,
    pub inventory_summary: Vec<InventoryLine>,
    pub top_selling_products: Vec<TopSeller>,
}
