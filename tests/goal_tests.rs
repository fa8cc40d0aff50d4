// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use coinflow::engine::goal::{evaluate_goal, latch_goal};
use coinflow::models::{Transaction, TxKind};
use coinflow::{db, store};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(kind: TxKind, amount: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id: 0,
        owner_id: 1,
        kind,
        category: "General".to_string(),
        amount: dec(amount),
        date,
        notes: None,
        is_recurring: false,
        frequency: None,
        next_date: None,
    }
}

fn setup_with_goal(target: &str, created: &str) -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute("INSERT INTO owners(name) VALUES('alice')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO goals(owner_id, title, target_amount, target_date, created_at)
         VALUES (1, 'Emergency fund', ?1, '2024-12-31', ?2)",
        params![target, created],
    )
    .unwrap();
    conn
}

#[test]
fn progress_tracks_net_savings_since_creation() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let goal = &store::find_goals(&conn, 1).unwrap()[0];
    let txs = vec![
        tx(TxKind::Income, "500", d(2024, 1, 5)),
        tx(TxKind::Expense, "100", d(2024, 1, 6)),
    ];
    let p = evaluate_goal(goal, &txs, d(2024, 1, 10));
    assert_eq!(p.current_amount, dec("400"));
    assert_eq!(p.progress, dec("40"));
    assert!(!p.is_completed);
    assert!(p.completed_date.is_none());
}

#[test]
fn transactions_before_creation_are_ignored() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let goal = &store::find_goals(&conn, 1).unwrap()[0];
    let txs = vec![
        tx(TxKind::Income, "900", d(2023, 12, 31)),
        tx(TxKind::Income, "200", d(2024, 1, 5)),
    ];
    let p = evaluate_goal(goal, &txs, d(2024, 1, 10));
    assert_eq!(p.current_amount, dec("200"));
}

#[test]
fn negative_net_floors_at_zero() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let goal = &store::find_goals(&conn, 1).unwrap()[0];
    let txs = vec![
        tx(TxKind::Income, "100", d(2024, 1, 5)),
        tx(TxKind::Expense, "400", d(2024, 1, 6)),
    ];
    let p = evaluate_goal(goal, &txs, d(2024, 1, 10));
    assert_eq!(p.current_amount, Decimal::ZERO);
    assert_eq!(p.progress, Decimal::ZERO);
}

#[test]
fn current_amount_is_capped_at_target() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let goal = &store::find_goals(&conn, 1).unwrap()[0];
    let txs = vec![tx(TxKind::Income, "1500", d(2024, 1, 5))];
    let p = evaluate_goal(goal, &txs, d(2024, 1, 10));
    assert_eq!(p.current_amount, dec("1000"));
    assert_eq!(p.progress, dec("100"));
    assert!(p.is_completed);
}

#[test]
fn completion_latch_persists_and_stays_latched() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let goal = store::find_goals(&conn, 1).unwrap().remove(0);
    let mut txs = vec![
        tx(TxKind::Income, "500", d(2024, 1, 5)),
        tx(TxKind::Expense, "100", d(2024, 1, 6)),
    ];

    // Not there yet: nothing persisted
    let p = latch_goal(&conn, &goal, &txs, d(2024, 1, 10)).unwrap();
    assert!(!p.is_completed);
    let goal = store::find_goals(&conn, 1).unwrap().remove(0);
    assert!(!goal.is_completed);

    // Crossing the target fires the latch exactly once
    txs.push(tx(TxKind::Income, "700", d(2024, 1, 7)));
    let p = latch_goal(&conn, &goal, &txs, d(2024, 1, 12)).unwrap();
    assert!(p.is_completed);
    assert_eq!(p.current_amount, dec("1000"));
    assert_eq!(p.progress, dec("100"));
    let goal = store::find_goals(&conn, 1).unwrap().remove(0);
    assert!(goal.is_completed);
    assert_eq!(goal.completed_date, Some(d(2024, 1, 12)));
    assert_eq!(goal.current_amount, dec("1000"));

    // A later large expense does not revert completion
    txs.push(tx(TxKind::Expense, "2000", d(2024, 2, 1)));
    let p = latch_goal(&conn, &goal, &txs, d(2024, 2, 2)).unwrap();
    assert!(p.is_completed);
    assert_eq!(p.current_amount, dec("1000"));
    assert_eq!(p.completed_date, Some(d(2024, 1, 12)));
    let goal = store::find_goals(&conn, 1).unwrap().remove(0);
    assert_eq!(goal.completed_date, Some(d(2024, 1, 12)));
}

#[test]
fn compare_and_set_fires_once() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let won = store::complete_goal(&conn, 1, dec("1000"), d(2024, 1, 12)).unwrap();
    assert!(won);
    // A concurrent second transition loses and must not move completed_date
    let won = store::complete_goal(&conn, 1, dec("1000"), d(2024, 1, 13)).unwrap();
    assert!(!won);
    let goal = store::find_goals(&conn, 1).unwrap().remove(0);
    assert_eq!(goal.completed_date, Some(d(2024, 1, 12)));
}

#[test]
fn evaluation_is_idempotent() {
    let conn = setup_with_goal("1000", "2024-01-01");
    let goal = &store::find_goals(&conn, 1).unwrap()[0];
    let txs = vec![tx(TxKind::Income, "300", d(2024, 1, 5))];
    let first = evaluate_goal(goal, &txs, d(2024, 1, 10));
    let second = evaluate_goal(goal, &txs, d(2024, 1, 10));
    assert_eq!(first.current_amount, second.current_amount);
    assert_eq!(first.progress, second.progress);
    assert_eq!(first.is_completed, second.is_completed);
}
