// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Append-only transaction ledger and the state derived from it.
//!
//! Every query takes an as-of date and only counts transactions dated on or
//! before it. Nothing is cached in the database: stock and cash are always
//! recomputed from the rows.

use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::catalog;
use crate::config;
use crate::error::{InvalidInput, LedgerError, LedgerResult};
use crate::models::{NewTransaction, Transaction, TransactionType};

const SELECT_TX: &str =
    "SELECT id, date, item_name, transaction_type, quantity, unit_price, cash_amount FROM transactions";

// Dates are stored as ISO text and compared as strings, which only sorts
// correctly for four-digit years.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Text key for comparing an as-of date against stored dates. Cutoffs past
/// the last storable year are clamped so they still include every row.
pub(crate) fn as_of_key(as_of: NaiveDate) -> String {
    if as_of.year() > MAX_YEAR {
        "9999-12-31".to_string()
    } else {
        as_of.to_string()
    }
}

/// Checks a write and returns its signed cash amount.
fn validate(conn: &Connection, new: &NewTransaction) -> LedgerResult<Decimal> {
    if new.item_name.trim().is_empty() {
        return Err(InvalidInput::BlankItem.into());
    }
    if new.quantity <= 0 {
        return Err(InvalidInput::NonPositiveQuantity(new.quantity).into());
    }
    if new.unit_price < Decimal::ZERO {
        return Err(InvalidInput::NegativePrice(new.unit_price).into());
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&new.date.year()) {
        return Err(InvalidInput::DateOutOfRange(new.date).into());
    }
    let cash_amount = new
        .transaction_type
        .signed_amount(new.quantity, new.unit_price)
        .ok_or(InvalidInput::AmountOverflow {
            quantity: new.quantity,
            unit_price: new.unit_price,
        })?;
    if catalog::find_item(conn, new.item_name.trim())?.is_none() {
        return Err(InvalidInput::UnknownItem(new.item_name.trim().to_string()).into());
    }
    Ok(cash_amount)
}

/// Appends one transaction and returns its id.
///
/// Overselling is not checked here; callers that care must look at
/// [`get_stock_level`] first.
pub fn create_transaction(conn: &Connection, new: &NewTransaction) -> LedgerResult<i64> {
    let cash_amount = validate(conn, new)?;
    conn.execute(
        "INSERT INTO transactions(date, item_name, transaction_type, quantity, unit_price, cash_amount)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.date.to_string(),
            new.item_name.trim(),
            new.transaction_type.as_str(),
            new.quantity,
            new.unit_price.to_string(),
            cash_amount.to_string(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(
        id,
        item = %new.item_name,
        kind = %new.transaction_type,
        quantity = new.quantity,
        %cash_amount,
        date = %new.date,
        "transaction recorded"
    );
    Ok(id)
}

fn parse_decimal_col(column: &'static str, raw: String) -> LedgerResult<Decimal> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_| LedgerError::Corrupt { column, value: raw })
}

fn parse_date_col(column: &'static str, raw: String) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| LedgerError::Corrupt { column, value: raw })
}

type RawTx = (i64, String, String, String, i64, String, String);

fn raw_row(r: &Row<'_>) -> rusqlite::Result<RawTx> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn decode(raw: RawTx) -> LedgerResult<Transaction> {
    let (id, date, item_name, kind, quantity, unit_price, cash_amount) = raw;
    let transaction_type = kind
        .parse::<TransactionType>()
        .map_err(|_| LedgerError::Corrupt {
            column: "transactions.transaction_type",
            value: kind,
        })?;
    Ok(Transaction {
        id,
        date: parse_date_col("transactions.date", date)?,
        item_name,
        transaction_type,
        quantity,
        unit_price: parse_decimal_col("transactions.unit_price", unit_price)?,
        cash_amount: parse_decimal_col("transactions.cash_amount", cash_amount)?,
    })
}

fn collect(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> LedgerResult<Vec<Transaction>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, raw_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(decode(row?)?);
    }
    Ok(out)
}

/// All transactions dated on or before `as_of`, oldest first.
pub fn transactions_as_of(
    conn: &Connection,
    as_of: NaiveDate,
) -> LedgerResult<Vec<Transaction>> {
    let sql = format!("{SELECT_TX} WHERE date <= ?1 ORDER BY date, id");
    collect(conn, &sql, &[&as_of_key(as_of)])
}

/// The whole ledger in insertion order.
pub fn all_transactions(conn: &Connection) -> LedgerResult<Vec<Transaction>> {
    let sql = format!("{SELECT_TX} ORDER BY id");
    collect(conn, &sql, &[])
}

pub fn get_transaction(conn: &Connection, id: i64) -> LedgerResult<Option<Transaction>> {
    let sql = format!("{SELECT_TX} WHERE id = ?1");
    let raw = conn.query_row(&sql, params![id], raw_row).optional()?;
    raw.map(decode).transpose()
}

/// Date of the most recent transaction, if any.
pub fn latest_date(conn: &Connection) -> LedgerResult<Option<NaiveDate>> {
    let raw: Option<String> =
        conn.query_row("SELECT MAX(date) FROM transactions", [], |r| r.get(0))?;
    raw.map(|d| parse_date_col("transactions.date", d)).transpose()
}

/// Net units of `item_name` (purchases minus sales) as of `as_of`. An item
/// that never appears in the ledger has zero stock.
pub fn get_stock_level(
    conn: &Connection,
    item_name: &str,
    as_of: NaiveDate,
) -> LedgerResult<i64> {
    let stock: i64 = conn.query_row(
        "SELECT COALESCE(SUM(CASE
                    WHEN transaction_type = 'purchase' THEN quantity
                    WHEN transaction_type = 'sale' THEN -quantity
                    ELSE 0
                END), 0)
         FROM transactions
         WHERE item_name = ?1 AND date <= ?2",
        params![item_name.trim(), as_of_key(as_of)],
        |r| r.get(0),
    )?;
    tracing::trace!(item = item_name, %as_of, stock, "stock level");
    Ok(stock)
}

/// Net units of every item that appears in the ledger as of `as_of`,
/// including items that are sold out or oversold.
pub fn get_all_inventory(
    conn: &Connection,
    as_of: NaiveDate,
) -> LedgerResult<BTreeMap<String, i64>> {
    let mut stmt = conn.prepare(
        "SELECT item_name,
                SUM(CASE
                    WHEN transaction_type = 'purchase' THEN quantity
                    WHEN transaction_type = 'sale' THEN -quantity
                    ELSE 0
                END) AS stock
         FROM transactions
         WHERE date <= ?1
         GROUP BY item_name",
    )?;
    let rows = stmt.query_map(params![as_of_key(as_of)], |r| {
        Ok((r.get::<_, String>(0)?, r.get::<_, i64>(1)?))
    })?;
    let mut out = BTreeMap::new();
    for row in rows {
        let (item, stock) = row?;
        out.insert(item, stock);
    }
    Ok(out)
}

/// Like [`get_all_inventory`] but only items that can actually be sold.
pub fn available_inventory(
    conn: &Connection,
    as_of: NaiveDate,
) -> LedgerResult<BTreeMap<String, i64>> {
    let mut inv = get_all_inventory(conn, as_of)?;
    inv.retain(|_, stock| *stock > 0);
    Ok(inv)
}

/// Configured initial balance plus every signed cash amount dated on or
/// before `as_of`.
pub fn get_cash_balance(conn: &Connection, as_of: NaiveDate) -> LedgerResult<Decimal> {
    let initial = config::get_initial_balance(conn)?;
    let mut stmt = conn.prepare("SELECT cash_amount FROM transactions WHERE date <= ?1")?;
    let rows = stmt.query_map(params![as_of_key(as_of)], |r| r.get::<_, String>(0))?;
    let mut balance = initial;
    for row in rows {
        let amount = parse_decimal_col("transactions.cash_amount", row?)?;
        balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow("cash balance"))?;
    }
    Ok(balance)
}

/// Running totals built one transaction at a time.
///
/// The queries above never use this; it exists for callers that replay a
/// ledger (the order desk, `doctor`) and must agree with them exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tally {
    cash_delta: Decimal,
    stock: BTreeMap<String, i64>,
    sales: BTreeMap<String, (i64, Decimal)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions<'a, I>(txs: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut t = Tally::new();
        for tx in txs {
            t.apply(tx)?;
        }
        Ok(t)
    }

    /// Folds one transaction in. On overflow the tally is left unchanged.
    pub fn apply(&mut self, tx: &Transaction) -> LedgerResult<()> {
        let cash_delta = self
            .cash_delta
            .checked_add(tx.cash_amount)
            .ok_or(LedgerError::Overflow("cash"))?;
        let stock = self.stock_of(&tx.item_name);
        let stock = match tx.transaction_type {
            TransactionType::Purchase => stock.checked_add(tx.quantity),
            TransactionType::Sale => stock.checked_sub(tx.quantity),
        }
        .ok_or(LedgerError::Overflow("stock"))?;
        if tx.transaction_type == TransactionType::Sale {
            let (units, revenue) = self
                .sales
                .get(&tx.item_name)
                .copied()
                .unwrap_or((0, Decimal::ZERO));
            let units = units
                .checked_add(tx.quantity)
                .ok_or(LedgerError::Overflow("units sold"))?;
            let revenue = revenue
                .checked_add(tx.cash_amount)
                .ok_or(LedgerError::Overflow("revenue"))?;
            self.sales.insert(tx.item_name.clone(), (units, revenue));
        }
        self.cash_delta = cash_delta;
        self.stock.insert(tx.item_name.clone(), stock);
        Ok(())
    }

    pub fn stock_of(&self, item: &str) -> i64 {
        self.stock.get(item).copied().unwrap_or(0)
    }

    pub fn inventory(&self) -> &BTreeMap<String, i64> {
        &self.stock
    }

    /// Units sold and revenue per item.
    pub fn sales(&self) -> &BTreeMap<String, (i64, Decimal)> {
        &self.sales
    }

    /// Net cash movement, excluding the initial balance.
    pub fn cash_delta(&self) -> Decimal {
        self.cash_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn tx(id: i64, kind: TransactionType, qty: i64, price: Decimal) -> Transaction {
        Transaction {
            id,
            date: d("2025-01-01"),
            item_name: "Cardstock".into(),
            transaction_type: kind,
            quantity: qty,
            unit_price: price,
            cash_amount: kind.signed_amount(qty, price).unwrap(),
        }
    }

    #[test]
    fn tally_tracks_stock_cash_and_sales() {
        let txs = vec![
            tx(1, TransactionType::Purchase, 100, Decimal::new(15, 2)),
            tx(2, TransactionType::Sale, 30, Decimal::new(25, 2)),
            tx(3, TransactionType::Sale, 10, Decimal::new(25, 2)),
        ];
        let t = Tally::from_transactions(&txs).unwrap();
        assert_eq!(t.stock_of("Cardstock"), 60);
        assert_eq!(t.stock_of("Nope"), 0);
        // -15.00 + 7.50 + 2.50
        assert_eq!(t.cash_delta(), Decimal::new(-500, 2));
        assert_eq!(t.sales()["Cardstock"], (40, Decimal::new(1000, 2)));
    }

    #[test]
    fn corrupt_rows_are_reported() {
        let raw: RawTx = (
            1,
            "2025-01-01".into(),
            "A4 paper".into(),
            "sale".into(),
            1,
            "0.05".into(),
            "five cents".into(),
        );
        assert!(matches!(
            decode(raw),
            Err(LedgerError::Corrupt { column: "transactions.cash_amount", .. })
        ));
    }

    #[test]
    fn tally_refuses_to_wrap_stock() {
        let mut t = Tally::new();
        t.apply(&tx(1, TransactionType::Purchase, i64::MAX, Decimal::ZERO))
            .unwrap();
        let before = t.clone();
        let err = t
            .apply(&tx(2, TransactionType::Purchase, 1, Decimal::ZERO))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Overflow("stock")));
        assert_eq!(t, before);
    }

    #[test]
    fn far_future_cutoffs_are_clamped() {
        assert_eq!(as_of_key(d("2025-03-04")), "2025-03-04");
        let far = NaiveDate::from_ymd_opt(12000, 1, 1).unwrap();
        assert_eq!(as_of_key(far), "9999-12-31");
    }
}
