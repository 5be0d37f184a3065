// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use paperledger::catalog;
use paperledger::config;
use paperledger::db::init_schema;
use paperledger::ledger::{
    Tally, all_transactions, available_inventory, create_transaction, get_all_inventory,
    get_cash_balance, get_stock_level, get_transaction, transactions_as_of,
};
use paperledger::models::{CatalogItem, NewTransaction, TransactionType};
use paperledger::{InvalidInput, LedgerError};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup(initial: i64) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    config::set_initial_balance(&conn, Decimal::new(initial, 0)).unwrap();
    catalog::upsert_item(
        &conn,
        &CatalogItem {
            name: "Paper A4".into(),
            category: "paper".into(),
            unit_price: Decimal::new(2, 2),
            min_stock_level: 0,
        },
    )
    .unwrap();
    catalog::install_catalog(&conn).unwrap();
    conn
}

fn count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap()
}

#[test]
fn purchase_moves_cash_and_stock() {
    let conn = setup(1000);
    let id = create_transaction(
        &conn,
        &NewTransaction::purchase("Paper A4", 500, Decimal::new(2, 2), d("2024-01-01")),
    )
    .unwrap();

    let tx = all_transactions(&conn).unwrap();
    assert_eq!(tx.len(), 1);
    assert_eq!(tx[0].id, id);
    assert_eq!(tx[0].cash_amount, Decimal::new(-1000, 2));
    assert_eq!(
        get_cash_balance(&conn, d("2024-01-01")).unwrap(),
        Decimal::new(99000, 2)
    );
    assert_eq!(get_stock_level(&conn, "Paper A4", d("2024-01-01")).unwrap(), 500);
}

#[test]
fn overselling_is_recorded_not_blocked() {
    let conn = setup(1000);
    create_transaction(
        &conn,
        &NewTransaction::purchase("Paper A4", 500, Decimal::new(2, 2), d("2024-01-01")),
    )
    .unwrap();
    create_transaction(
        &conn,
        &NewTransaction::sale("Paper A4", 600, Decimal::new(5, 2), d("2024-01-02")),
    )
    .unwrap();

    assert_eq!(get_stock_level(&conn, "Paper A4", d("2024-01-02")).unwrap(), -100);
    assert_eq!(get_stock_level(&conn, "Paper A4", d("2024-01-01")).unwrap(), 500);
    // 1000 - 10.00 + 30.00
    assert_eq!(
        get_cash_balance(&conn, d("2024-01-02")).unwrap(),
        Decimal::new(102000, 2)
    );
    assert!(available_inventory(&conn, d("2024-01-02")).unwrap().is_empty());
    assert_eq!(
        get_all_inventory(&conn, d("2024-01-02")).unwrap()["Paper A4"],
        -100
    );
}

#[test]
fn invalid_writes_leave_ledger_untouched() {
    let conn = setup(1000);
    let date = d("2024-01-01");
    let cases = [
        (
            NewTransaction::purchase("Paper A4", 0, Decimal::ONE, date),
            InvalidInput::NonPositiveQuantity(0),
        ),
        (
            NewTransaction::sale("Paper A4", -3, Decimal::ONE, date),
            InvalidInput::NonPositiveQuantity(-3),
        ),
        (
            NewTransaction::purchase("Paper A4", 1, Decimal::new(-1, 2), date),
            InvalidInput::NegativePrice(Decimal::new(-1, 2)),
        ),
        (
            NewTransaction::sale("Papyrus", 1, Decimal::ONE, date),
            InvalidInput::UnknownItem("Papyrus".into()),
        ),
        (
            NewTransaction::sale("   ", 1, Decimal::ONE, date),
            InvalidInput::BlankItem,
        ),
        (
            NewTransaction::sale("Flyers", i64::MAX, Decimal::new(100_000_000_000, 0), date),
            InvalidInput::AmountOverflow {
                quantity: i64::MAX,
                unit_price: Decimal::new(100_000_000_000, 0),
            },
        ),
    ];
    for (new, want) in cases {
        match create_transaction(&conn, &new) {
            Err(LedgerError::InvalidInput(got)) => assert_eq!(got, want),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }
    assert_eq!(count(&conn), 0);
}

#[test]
fn dates_past_year_9999_are_rejected() {
    let conn = setup(1000);
    let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
    let err = create_transaction(
        &conn,
        &NewTransaction::purchase("Flyers", 50, Decimal::ONE, far),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InvalidInput(InvalidInput::DateOutOfRange(got)) if got == far
    ));
    assert_eq!(count(&conn), 0);
    assert_eq!(get_stock_level(&conn, "Flyers", d("2024-01-01")).unwrap(), 0);
    assert_eq!(
        get_cash_balance(&conn, d("2024-01-01")).unwrap(),
        Decimal::new(1000, 0)
    );
}

#[test]
fn far_future_as_of_sees_whole_ledger() {
    let conn = setup(1000);
    create_transaction(
        &conn,
        &NewTransaction::purchase("Flyers", 50, Decimal::ONE, d("9999-12-31")),
    )
    .unwrap();
    let far = NaiveDate::from_ymd_opt(10000, 6, 1).unwrap();
    assert_eq!(get_stock_level(&conn, "Flyers", far).unwrap(), 50);
    assert_eq!(get_stock_level(&conn, "Flyers", d("2024-01-01")).unwrap(), 0);
    assert_eq!(get_cash_balance(&conn, far).unwrap(), Decimal::new(950, 0));
    assert_eq!(transactions_as_of(&conn, far).unwrap().len(), 1);
}

#[test]
fn free_items_are_allowed() {
    let conn = setup(1000);
    create_transaction(
        &conn,
        &NewTransaction::sale("Flyers", 10, Decimal::ZERO, d("2024-01-01")),
    )
    .unwrap();
    assert_eq!(get_cash_balance(&conn, d("2024-01-01")).unwrap(), Decimal::new(1000, 0));
}

#[test]
fn transaction_type_text() {
    assert_eq!("sale".parse::<TransactionType>().unwrap(), TransactionType::Sale);
    assert_eq!("Sales".parse::<TransactionType>().unwrap(), TransactionType::Sale);
    assert_eq!(
        "stock_orders".parse::<TransactionType>().unwrap(),
        TransactionType::Purchase
    );
    assert_eq!(
        "refund".parse::<TransactionType>(),
        Err(InvalidInput::UnknownTransactionType("refund".into()))
    );
}

#[test]
fn unknown_item_reads_as_zero() {
    let conn = setup(1000);
    assert_eq!(get_stock_level(&conn, "Unobtainium", d("2030-01-01")).unwrap(), 0);
    assert!(get_all_inventory(&conn, d("2030-01-01")).unwrap().is_empty());
    assert_eq!(get_cash_balance(&conn, d("2030-01-01")).unwrap(), Decimal::new(1000, 0));
}

#[test]
fn as_of_date_is_inclusive_cutoff() {
    let conn = setup(1000);
    for (day, qty) in [("2025-01-01", 100), ("2025-01-05", 50), ("2025-01-10", 25)] {
        create_transaction(
            &conn,
            &NewTransaction::purchase("Cardstock", qty, Decimal::new(15, 2), d(day)),
        )
        .unwrap();
    }
    assert_eq!(get_stock_level(&conn, "Cardstock", d("2024-12-31")).unwrap(), 0);
    assert_eq!(get_stock_level(&conn, "Cardstock", d("2025-01-01")).unwrap(), 100);
    assert_eq!(get_stock_level(&conn, "Cardstock", d("2025-01-09")).unwrap(), 150);
    assert_eq!(get_stock_level(&conn, "Cardstock", d("2025-01-10")).unwrap(), 175);
    assert_eq!(transactions_as_of(&conn, d("2025-01-05")).unwrap().len(), 2);
}

#[test]
fn stock_only_rises_with_purchases_and_falls_with_sales() {
    let conn = setup(1000);
    let days = ["2025-02-01", "2025-02-02", "2025-02-03", "2025-02-04"];
    let mut last = 0;
    for day in days {
        create_transaction(
            &conn,
            &NewTransaction::purchase("Envelopes", 40, Decimal::new(5, 2), d(day)),
        )
        .unwrap();
        let now = get_stock_level(&conn, "Envelopes", d(day)).unwrap();
        assert!(now >= last);
        last = now;
    }
    for day in ["2025-03-01", "2025-03-02", "2025-03-03"] {
        create_transaction(
            &conn,
            &NewTransaction::sale("Envelopes", 70, Decimal::new(9, 2), d(day)),
        )
        .unwrap();
        let now = get_stock_level(&conn, "Envelopes", d(day)).unwrap();
        assert!(now <= last);
        last = now;
    }
    assert_eq!(last, 160 - 210);
}

#[test]
fn cash_balance_matches_sum_of_signed_amounts() {
    let conn = setup(250);
    let writes = [
        NewTransaction::purchase("Cardstock", 300, Decimal::new(15, 2), d("2025-01-01")),
        NewTransaction::sale("Cardstock", 120, Decimal::new(33, 2), d("2025-01-02")),
        NewTransaction::purchase("Notepads", 7, Decimal::new(199, 2), d("2025-01-02")),
        NewTransaction::sale("Notepads", 3, Decimal::new(3333, 3), d("2025-01-03")),
    ];
    for w in &writes {
        create_transaction(&conn, w).unwrap();
    }
    for day in ["2025-01-01", "2025-01-02", "2025-01-03"] {
        let expected = transactions_as_of(&conn, d(day))
            .unwrap()
            .iter()
            .fold(Decimal::new(250, 0), |acc, t| acc + t.cash_amount);
        assert_eq!(get_cash_balance(&conn, d(day)).unwrap(), expected);
    }
    // no rounding: 3 x 3.333 = 9.999
    assert_eq!(
        get_cash_balance(&conn, d("2025-01-03")).unwrap(),
        Decimal::new(250, 0) - Decimal::new(4500, 2) + Decimal::new(3960, 2)
            - Decimal::new(1393, 2)
            + Decimal::new(9999, 3)
    );
}

#[test]
fn inventory_snapshot_is_repeatable() {
    let conn = setup(1000);
    create_transaction(
        &conn,
        &NewTransaction::purchase("Cardstock", 10, Decimal::ONE, d("2025-01-01")),
    )
    .unwrap();
    create_transaction(
        &conn,
        &NewTransaction::purchase("Flyers", 5, Decimal::ONE, d("2025-01-01")),
    )
    .unwrap();
    let a = get_all_inventory(&conn, d("2025-01-01")).unwrap();
    let b = get_all_inventory(&conn, d("2025-01-01")).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}

#[test]
fn incremental_tally_matches_recomputation() {
    let conn = setup(1000);
    let mut tally = Tally::new();
    let writes = [
        NewTransaction::purchase("Cardstock", 200, Decimal::new(15, 2), d("2025-01-01")),
        NewTransaction::purchase("Flyers", 80, Decimal::new(15, 2), d("2025-01-01")),
        NewTransaction::sale("Cardstock", 30, Decimal::new(20, 2), d("2025-01-02")),
        NewTransaction::sale("Flyers", 100, Decimal::new(25, 2), d("2025-01-03")),
        NewTransaction::sale("Cardstock", 5, Decimal::new(20, 2), d("2025-01-03")),
    ];
    for w in &writes {
        let id = create_transaction(&conn, w).unwrap();
        let stored = get_transaction(&conn, id).unwrap().unwrap();
        tally.apply(&stored).unwrap();

        // the write shows up exactly once
        assert_eq!(
            get_stock_level(&conn, &w.item_name, w.date).unwrap(),
            tally.stock_of(&w.item_name)
        );
    }
    let as_of = d("2025-01-03");
    assert_eq!(tally.inventory(), &get_all_inventory(&conn, as_of).unwrap());
    assert_eq!(
        config::get_initial_balance(&conn).unwrap() + tally.cash_delta(),
        get_cash_balance(&conn, as_of).unwrap()
    );
}

#[test]
fn ids_increase_and_rows_are_immutable() {
    let conn = setup(1000);
    let a = create_transaction(
        &conn,
        &NewTransaction::purchase("Cardstock", 1, Decimal::ONE, d("2025-01-02")),
    )
    .unwrap();
    let b = create_transaction(
        &conn,
        &NewTransaction::purchase("Cardstock", 1, Decimal::ONE, d("2025-01-01")),
    )
    .unwrap();
    assert!(b > a);

    assert!(conn
        .execute("UPDATE transactions SET quantity=99 WHERE id=?1", [a])
        .is_err());
    assert!(conn.execute("DELETE FROM transactions", []).is_err());
    assert_eq!(count(&conn), 2);
}
