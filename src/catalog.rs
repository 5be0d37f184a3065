// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The fixed price list and reproducible starting inventory.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::config;
use crate::error::{InvalidInput, LedgerError, LedgerResult};
use crate::ledger;
use crate::models::{CatalogItem, NewTransaction};

pub struct Supply {
    pub name: &'static str,
    pub category: &'static str,
    /// Reference unit price in cents.
    pub price_cents: i64,
}

impl Supply {
    pub fn unit_price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

const fn supply(name: &'static str, category: &'static str, price_cents: i64) -> Supply {
    Supply {
        name,
        category,
        price_cents,
    }
}

pub static PAPER_SUPPLIES: &[Supply] = &[
    // paper, priced per sheet
    supply("A4 paper", "paper", 5),
    supply("Letter-sized paper", "paper", 6),
    supply("Cardstock", "paper", 15),
    supply("Colored paper", "paper", 10),
    supply("Glossy paper", "paper", 20),
    supply("Matte paper", "paper", 18),
    supply("Recycled paper", "paper", 8),
    supply("Eco-friendly paper", "paper", 12),
    supply("Poster paper", "paper", 25),
    supply("Banner paper", "paper", 30),
    supply("Kraft paper", "paper", 10),
    supply("Construction paper", "paper", 7),
    supply("Wrapping paper", "paper", 15),
    supply("Glitter paper", "paper", 22),
    supply("Decorative paper", "paper", 18),
    supply("Letterhead paper", "paper", 12),
    supply("Legal-size paper", "paper", 8),
    supply("Crepe paper", "paper", 5),
    supply("Photo paper", "paper", 25),
    supply("Uncoated paper", "paper", 6),
    supply("Butcher paper", "paper", 10),
    supply("Heavyweight paper", "paper", 20),
    supply("Standard copy paper", "paper", 4),
    supply("Bright-colored paper", "paper", 12),
    supply("Patterned paper", "paper", 15),
    // products, priced per unit
    supply("Paper plates", "product", 10),
    supply("Paper cups", "product", 8),
    supply("Paper napkins", "product", 2),
    supply("Disposable cups", "product", 10),
    supply("Table covers", "product", 150),
    supply("Envelopes", "product", 5),
    supply("Sticky notes", "product", 3),
    supply("Notepads", "product", 200),
    supply("Invitation cards", "product", 50),
    supply("Flyers", "product", 15),
    supply("Party streamers", "product", 5),
    supply("Decorative adhesive tape (washi tape)", "product", 20),
    supply("Paper party bags", "product", 25),
    supply("Name tags with lanyards", "product", 75),
    supply("Presentation folders", "product", 50),
    supply("Large poster paper (24x36 inches)", "large_format", 100),
    supply("Rolls of banner paper (36-inch width)", "large_format", 250),
    supply("100 lb cover stock", "specialty", 50),
    supply("80 lb text paper", "specialty", 40),
    supply("250 gsm cardstock", "specialty", 30),
    supply("220 gsm poster paper", "specialty", 35),
];

pub const DEFAULT_SEED: u64 = 137;
pub const DEFAULT_COVERAGE: f64 = 0.4;

/// One item picked for the starting inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct StockedItem {
    pub name: &'static str,
    pub unit_price: Decimal,
    pub current_stock: i64,
    pub min_stock_level: i64,
}

/// Picks `coverage` of the price list without replacement and gives each pick
/// a starting stock in 200..800 and a reorder threshold in 50..150. The same
/// seed always yields the same picks.
pub fn sample_inventory(coverage: f64, seed: u64) -> Vec<StockedItem> {
    let mut rng = StdRng::seed_from_u64(seed);
    let total = PAPER_SUPPLIES.len();
    let wanted = ((total as f64) * coverage.clamp(0.0, 1.0)) as usize;
    rand::seq::index::sample(&mut rng, total, wanted)
        .into_iter()
        .map(|i| {
            let s = &PAPER_SUPPLIES[i];
            StockedItem {
                name: s.name,
                unit_price: s.unit_price(),
                current_stock: rng.gen_range(200..800),
                min_stock_level: rng.gen_range(50..150),
            }
        })
        .collect()
}

/// Writes the full price list into `catalog`, leaving existing rows alone.
pub fn install_catalog(conn: &Connection) -> LedgerResult<usize> {
    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO catalog(name, category, unit_price, min_stock_level)
         VALUES (?1, ?2, ?3, 0)",
    )?;
    let mut added = 0;
    for s in PAPER_SUPPLIES {
        added += stmt.execute(params![s.name, s.category, s.unit_price().to_string()])?;
    }
    Ok(added)
}

pub fn upsert_item(conn: &Connection, item: &CatalogItem) -> LedgerResult<()> {
    if item.name.trim().is_empty() {
        return Err(InvalidInput::BlankItem.into());
    }
    if item.unit_price < Decimal::ZERO {
        return Err(InvalidInput::NegativePrice(item.unit_price).into());
    }
    conn.execute(
        "INSERT INTO catalog(name, category, unit_price, min_stock_level) VALUES (?1,?2,?3,?4)
         ON CONFLICT(name) DO UPDATE SET category=excluded.category,
             unit_price=excluded.unit_price, min_stock_level=excluded.min_stock_level",
        params![
            item.name.trim(),
            item.category,
            item.unit_price.to_string(),
            item.min_stock_level
        ],
    )?;
    Ok(())
}

fn row_to_item(
    name: String,
    category: String,
    price: String,
    min: i64,
) -> LedgerResult<CatalogItem> {
    let unit_price = price.parse::<Decimal>().map_err(|_| LedgerError::Corrupt {
        column: "catalog.unit_price",
        value: price,
    })?;
    Ok(CatalogItem {
        name,
        category,
        unit_price,
        min_stock_level: min,
    })
}

pub fn find_item(conn: &Connection, name: &str) -> LedgerResult<Option<CatalogItem>> {
    let row: Option<(String, String, String, i64)> = conn
        .query_row(
            "SELECT name, category, unit_price, min_stock_level FROM catalog WHERE name=?1",
            params![name],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;
    row.map(|(n, c, p, m)| row_to_item(n, c, p, m)).transpose()
}

pub fn list_items(conn: &Connection) -> LedgerResult<Vec<CatalogItem>> {
    let mut stmt = conn.prepare(
        "SELECT name, category, unit_price, min_stock_level FROM catalog ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, i64>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (n, c, p, m) = row?;
        out.push(row_to_item(n, c, p, m)?);
    }
    Ok(out)
}

#[derive(Debug, Clone)]
pub struct SeedOptions {
    pub seed: u64,
    pub coverage: f64,
    pub initial_balance: Decimal,
    pub opening_date: NaiveDate,
}

impl Default for SeedOptions {
    fn default() -> Self {
        SeedOptions {
            seed: DEFAULT_SEED,
            coverage: DEFAULT_COVERAGE,
            initial_balance: config::DEFAULT_INITIAL_BALANCE,
            opening_date: config::default_opening_date(),
        }
    }
}

/// Installs the catalog, records the settings, and buys the sampled starting
/// stock on the opening date. Everything lands in one SQLite transaction.
pub fn seed_database(conn: &mut Connection, opts: &SeedOptions) -> LedgerResult<Vec<StockedItem>> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?;
    if existing > 0 {
        return Err(InvalidInput::AlreadySeeded(existing).into());
    }
    let stocked = sample_inventory(opts.coverage, opts.seed);

    let tx = conn.transaction()?;
    install_catalog(&tx)?;
    config::set_initial_balance(&tx, opts.initial_balance)?;
    config::set_opening_date(&tx, opts.opening_date)?;
    for item in &stocked {
        tx.execute(
            "UPDATE catalog SET min_stock_level=?1 WHERE name=?2",
            params![item.min_stock_level, item.name],
        )?;
        ledger::create_transaction(
            &tx,
            &NewTransaction::purchase(
                item.name,
                item.current_stock,
                item.unit_price,
                opts.opening_date,
            ),
        )?;
    }
    tx.commit()?;
    tracing::info!(
        seed = opts.seed,
        items = stocked.len(),
        opening_date = %opts.opening_date,
        "ledger seeded"
    );
    Ok(stocked)
}
