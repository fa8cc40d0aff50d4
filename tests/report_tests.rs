// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use coinflow::engine::report::compose;
use coinflow::{db, store};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn insert_tx(conn: &Connection, owner: i64, kind: &str, cat: &str, amount: &str, date: &str) {
    conn.execute(
        "INSERT INTO transactions(owner_id, kind, category, amount, date) VALUES (?1,?2,?3,?4,?5)",
        params![owner, kind, cat, amount, date],
    )
    .unwrap();
}

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute("INSERT INTO owners(name) VALUES('alice')", [])
        .unwrap();
    conn.execute("INSERT INTO owners(name) VALUES('bob')", [])
        .unwrap();

    insert_tx(&conn, 1, "income", "Salary", "2000", "2024-06-01");
    insert_tx(&conn, 1, "expense", "Rent", "900", "2024-06-03");
    insert_tx(&conn, 1, "expense", "Food", "100", "2024-06-05");
    insert_tx(&conn, 1, "expense", "Food", "30", "2024-06-20");
    insert_tx(&conn, 1, "expense", "Food", "50", "2024-07-10");
    // Another owner's records must never leak in
    insert_tx(&conn, 2, "expense", "Food", "999", "2024-06-10");

    conn.execute(
        "INSERT INTO budgets(owner_id, category, amount, period, start_date, end_date)
         VALUES (1, 'Food', '120', 'monthly', '2024-06-01', '2024-07-01')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO budgets(owner_id, category, amount, period, start_date, end_date, is_active)
         VALUES (1, 'Travel', '300', 'monthly', '2024-06-01', '2024-07-01', 0)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO goals(owner_id, title, target_amount, target_date, created_at)
         VALUES (1, 'House deposit', '5000', '2025-06-01', '2024-06-01')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn summary_and_trend_respect_the_window() {
    let conn = setup();
    let report = compose(&conn, 1, Some(d(2024, 6, 1)), Some(d(2024, 6, 15)), d(2024, 7, 15)).unwrap();

    assert_eq!(report.period.start_date, Some(d(2024, 6, 1)));
    assert_eq!(report.summary.total_income, dec("2000"));
    assert_eq!(report.summary.total_expense, dec("1000"));
    assert_eq!(report.summary.balance, dec("1000"));
    assert_eq!(report.summary.transaction_count, 3);

    assert_eq!(report.monthly_data.len(), 1);
    let june = &report.monthly_data["2024-06"];
    assert_eq!(june.income, dec("2000"));
    assert_eq!(june.expense, dec("1000"));

    assert_eq!(report.category_breakdown.len(), 2);
    assert_eq!(report.category_breakdown["Food"], dec("100"));
    assert_eq!(report.category_breakdown["Rent"], dec("900"));
}

#[test]
fn budgets_use_their_own_window_not_the_reports() {
    let conn = setup();
    let report = compose(&conn, 1, Some(d(2024, 6, 1)), Some(d(2024, 6, 15)), d(2024, 7, 15)).unwrap();

    // Only the active budget appears
    assert_eq!(report.budget_comparison.len(), 1);
    let line = &report.budget_comparison[0];
    assert_eq!(line.category, "Food");
    assert_eq!(line.budgeted, dec("120"));
    // The 2024-06-20 Food expense is outside the report window but inside
    // the budget's own period window, so it still counts here.
    assert_eq!(line.spent, dec("130"));
    assert_eq!(line.remaining, dec("-10"));
}

#[test]
fn goals_span_the_owners_whole_history() {
    let conn = setup();
    let report = compose(&conn, 1, Some(d(2024, 6, 1)), Some(d(2024, 6, 15)), d(2024, 7, 15)).unwrap();

    assert_eq!(report.goals.len(), 1);
    let g = &report.goals[0];
    assert_eq!(g.title, "House deposit");
    // net = 2000 - (900 + 100 + 30 + 50) = 920, no report-window clipping
    assert_eq!(g.current_amount, dec("920"));
    assert_eq!(g.progress, dec("18.4"));
    assert!(!g.is_completed);
}

#[test]
fn compose_latches_goal_completion() {
    let conn = setup();
    conn.execute(
        "INSERT INTO goals(owner_id, title, target_amount, target_date, created_at)
         VALUES (1, 'Rainy day', '500', '2024-12-31', '2024-06-01')",
        [],
    )
    .unwrap();

    let report = compose(&conn, 1, None, None, d(2024, 7, 15)).unwrap();
    let rainy = report.goals.iter().find(|g| g.title == "Rainy day").unwrap();
    assert!(rainy.is_completed);
    assert_eq!(rainy.current_amount, dec("500"));

    let stored = store::find_goals(&conn, 1)
        .unwrap()
        .into_iter()
        .find(|g| g.title == "Rainy day")
        .unwrap();
    assert!(stored.is_completed);
    assert_eq!(stored.completed_date, Some(d(2024, 7, 15)));
}

#[test]
fn owners_are_isolated() {
    let conn = setup();
    let report = compose(&conn, 2, None, None, d(2024, 7, 15)).unwrap();
    assert_eq!(report.summary.total_expense, dec("999"));
    assert_eq!(report.summary.transaction_count, 1);
    assert!(report.budget_comparison.is_empty());
    assert!(report.goals.is_empty());
}

#[test]
fn empty_owner_yields_empty_report() {
    let conn = db::open_in_memory().unwrap();
    conn.execute("INSERT INTO owners(name) VALUES('carol')", [])
        .unwrap();
    let report = compose(&conn, 1, Some(d(2024, 1, 1)), Some(d(2024, 12, 31)), d(2024, 7, 1)).unwrap();
    assert_eq!(report.summary.total_income, Decimal::ZERO);
    assert_eq!(report.summary.total_expense, Decimal::ZERO);
    assert_eq!(report.summary.balance, Decimal::ZERO);
    assert_eq!(report.summary.transaction_count, 0);
    assert!(report.monthly_data.is_empty());
    assert!(report.category_breakdown.is_empty());
    assert!(report.budget_comparison.is_empty());
    assert!(report.goals.is_empty());
}
