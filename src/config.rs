// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger settings persisted in the `settings` table.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};

pub const INITIAL_BALANCE_KEY: &str = "initial_balance";
pub const OPENING_DATE_KEY: &str = "opening_date";

/// Starting cash when no balance has been configured.
pub const DEFAULT_INITIAL_BALANCE: Decimal = Decimal::from_parts(50000, 0, 0, false, 0);

pub fn default_opening_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

fn get_setting(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key=?1",
        params![key],
        |r| r.get(0),
    )
    .optional()
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_initial_balance(conn: &Connection) -> LedgerResult<Decimal> {
    match get_setting(conn, INITIAL_BALANCE_KEY)? {
        Some(s) => s.trim().parse::<Decimal>().map_err(|_| LedgerError::Corrupt {
            column: "settings.initial_balance",
            value: s,
        }),
        None => Ok(DEFAULT_INITIAL_BALANCE),
    }
}

pub fn set_initial_balance(conn: &Connection, amount: Decimal) -> LedgerResult<()> {
    set_setting(conn, INITIAL_BALANCE_KEY, &amount.to_string())?;
    tracing::info!(%amount, "initial balance set");
    Ok(())
}

pub fn get_opening_date(conn: &Connection) -> LedgerResult<NaiveDate> {
    match get_setting(conn, OPENING_DATE_KEY)? {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            LedgerError::Corrupt {
                column: "settings.opening_date",
                value: s,
            }
        }),
        None => Ok(default_opening_date()),
    }
}

pub fn set_opening_date(conn: &Connection, date: NaiveDate) -> LedgerResult<()> {
    set_setting(conn, OPENING_DATE_KEY, &date.to_string())?;
    Ok(())
}
