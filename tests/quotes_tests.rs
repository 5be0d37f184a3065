// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use paperledger::commands::importer::import_quotes;
use paperledger::db::init_schema;
use paperledger::quotes::{NewQuote, insert_quote, search_quote_history};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn quote(date: &str, text: &str, explanation: &str) -> NewQuote {
    NewQuote {
        order_date: d(date),
        request_text: text.to_string(),
        explanation: explanation.to_string(),
        total_amount: Decimal::new(4250, 2),
        ..Default::default()
    }
}

#[test]
fn any_term_matches_case_insensitively() {
    let conn = base_conn();
    let id = insert_quote(&conn, &quote("2025-01-01", "Bulk A4 order", "")).unwrap();

    let hits = search_quote_history(&conn, &["A4", "bulk"], None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, id);
    assert_eq!(hits[0].request_text, "Bulk A4 order");
    assert_eq!(hits[0].total_amount, Decimal::new(4250, 2));

    assert!(search_quote_history(&conn, &["zzz"], None).unwrap().is_empty());
    assert_eq!(search_quote_history(&conn, &["zzz", "a4"], None).unwrap().len(), 1);
}

#[test]
fn explanation_is_searched_too() {
    let conn = base_conn();
    insert_quote(&conn, &quote("2025-01-01", "Cups for a picnic", "Bulk discount of 10%")).unwrap();
    let hits = search_quote_history(&conn, &["DISCOUNT"], None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].explanation, "Bulk discount of 10%");
}

#[test]
fn newest_first_then_insertion_order() {
    let conn = base_conn();
    let a = insert_quote(&conn, &quote("2025-01-01", "glossy paper", "")).unwrap();
    let b = insert_quote(&conn, &quote("2025-03-01", "glossy cards", "")).unwrap();
    let c = insert_quote(&conn, &quote("2025-01-01", "glossy posters", "")).unwrap();
    insert_quote(&conn, &quote("2025-04-01", "matte paper", "")).unwrap();

    let ids: Vec<i64> = search_quote_history(&conn, &["Glossy"], None)
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(ids, [b, a, c]);

    let limited: Vec<i64> = search_quote_history(&conn, &["glossy"], Some(2))
        .unwrap()
        .iter()
        .map(|q| q.id)
        .collect();
    assert_eq!(limited, [b, a]);
}

#[test]
fn blank_terms_find_nothing() {
    let conn = base_conn();
    insert_quote(&conn, &quote("2025-01-01", "anything", "")).unwrap();
    assert!(search_quote_history(&conn, &[], None).unwrap().is_empty());
    assert!(search_quote_history(&conn, &["  ", ""], None).unwrap().is_empty());
    assert!(search_quote_history(&conn, &["any"], Some(0)).unwrap().is_empty());
}

#[test]
fn sql_wildcards_are_literal() {
    let conn = base_conn();
    insert_quote(&conn, &quote("2025-01-01", "plain request", "")).unwrap();
    insert_quote(&conn, &quote("2025-01-01", "save 100% today", "")).unwrap();
    let hits = search_quote_history(&conn, &["%"], None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].request_text, "save 100% today");
}

#[test]
fn non_ascii_text_matches_in_any_case() {
    let conn = base_conn();
    insert_quote(&conn, &quote("2025-01-01", "CAFÉ ORDER", "")).unwrap();
    insert_quote(&conn, &quote("2025-01-02", "Straße banners", "Größe A3")).unwrap();

    assert_eq!(search_quote_history(&conn, &["CAFÉ"], None).unwrap().len(), 1);
    assert_eq!(search_quote_history(&conn, &["café"], None).unwrap().len(), 1);
    assert_eq!(search_quote_history(&conn, &["ORDER"], None).unwrap().len(), 1);
    let hits = search_quote_history(&conn, &["GRÖßE"], None).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].explanation, "Größe A3");
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn import_pairs_quotes_with_requests() {
    let mut conn = base_conn();
    let requests = csv_file(
        "job,need_size,event,response\n\
         office manager,small,ceremony,I need 500 sheets of glossy paper\n\
         office manager,large,party,Please send streamers\n",
    );
    let quotes = csv_file(
        "request_id,total_amount,quote_explanation,request_metadata\n\
         1,60,Bulk glossy discount applied,\"{'job_type': 'office manager', 'order_size': 'small', 'event_type': 'ceremony'}\"\n\
         2,120.5,Streamers priced per roll,\"{'job_type': 'office manager', 'order_size': 'large', 'event_type': 'party'}\"\n",
    );

    let n = import_quotes(&mut conn, quotes.path(), requests.path()).unwrap();
    assert_eq!(n, 2);

    let hits = search_quote_history(&conn, &["glossy"], None).unwrap();
    assert_eq!(hits.len(), 1);
    let q = &hits[0];
    assert_eq!(q.request_text, "I need 500 sheets of glossy paper");
    assert_eq!(q.total_amount, Decimal::new(60, 0));
    assert_eq!(q.job_type, "office manager");
    assert_eq!(q.order_size, "small");
    assert_eq!(q.event_type, "ceremony");
    assert_eq!(q.order_date, d("2025-01-01"));

    let streamers = search_quote_history(&conn, &["roll"], None).unwrap();
    assert_eq!(streamers[0].total_amount, Decimal::new(1205, 1));
    assert_eq!(streamers[0].event_type, "party");
}

#[test]
fn import_without_matching_request_writes_nothing() {
    let mut conn = base_conn();
    let requests = csv_file("response\nonly one request\n");
    let quotes = csv_file(
        "total_amount,quote_explanation\n\
         10,first\n\
         20,second\n",
    );
    assert!(import_quotes(&mut conn, quotes.path(), requests.path()).is_err());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM quotes", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}
