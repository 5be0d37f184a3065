// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Paperledger", "paperledger"));

pub const DB_ENV: &str = "PAPERLEDGER_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("paperledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    open_at(&path)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn).with_context(|| format!("Initialize schema at {}", path.display()))?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Creates every table the ledger needs. Safe to run on an existing database.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS catalog(
        name TEXT PRIMARY KEY,
        category TEXT NOT NULL,
        unit_price TEXT NOT NULL,
        min_stock_level INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        item_name TEXT NOT NULL,
        transaction_type TEXT NOT NULL CHECK(transaction_type IN ('sale','purchase')),
        quantity INTEGER NOT NULL CHECK(quantity > 0),
        unit_price TEXT NOT NULL,
        cash_amount TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_item ON transactions(item_name, date);

    -- the ledger is append-only
    CREATE TRIGGER IF NOT EXISTS transactions_no_update
    BEFORE UPDATE ON transactions
    BEGIN
        SELECT RAISE(ABORT, 'transactions are append-only');
    END;
    CREATE TRIGGER IF NOT EXISTS transactions_no_delete
    BEFORE DELETE ON transactions
    BEGIN
        SELECT RAISE(ABORT, 'transactions are append-only');
    END;

    CREATE TABLE IF NOT EXISTS quotes(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_date TEXT NOT NULL,
        item_name TEXT,
        request_text TEXT NOT NULL,
        explanation TEXT NOT NULL DEFAULT '',
        total_amount TEXT NOT NULL,
        job_type TEXT NOT NULL DEFAULT '',
        order_size TEXT NOT NULL DEFAULT '',
        event_type TEXT NOT NULL DEFAULT ''
    );
    CREATE INDEX IF NOT EXISTS idx_quotes_date ON quotes(order_date);
    "#,
    )
}
