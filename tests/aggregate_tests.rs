// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use coinflow::engine::aggregate::{aggregate, DateRange};
use coinflow::models::{Transaction, TxKind};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(kind: TxKind, category: &str, amount: &str, date: NaiveDate) -> Transaction {
    Transaction {
        id: 0,
        owner_id: 1,
        kind,
        category: category.to_string(),
        amount: dec(amount),
        date,
        notes: None,
        is_recurring: false,
        frequency: None,
        next_date: None,
    }
}

#[test]
fn totals_and_balance_identity() {
    let records = vec![
        tx(TxKind::Income, "Salary", "2500", d(2024, 6, 1)),
        tx(TxKind::Expense, "Food", "100.25", d(2024, 6, 5)),
        tx(TxKind::Expense, "Rent", "900", d(2024, 6, 7)),
        tx(TxKind::Income, "Side", "150.75", d(2024, 6, 20)),
    ];
    let s = aggregate(&records, None);
    assert_eq!(s.total_income, dec("2650.75"));
    assert_eq!(s.total_expense, dec("1000.25"));
    assert_eq!(s.balance, s.total_income - s.total_expense);
    assert_eq!(s.transaction_count, 4);
}

#[test]
fn empty_input_yields_zeros() {
    let s = aggregate(&[], None);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.transaction_count, 0);
    assert!(s.category_breakdown.is_empty());
}

#[test]
fn breakdown_sums_expenses_only() {
    let records = vec![
        tx(TxKind::Expense, "Food", "30", d(2024, 6, 1)),
        tx(TxKind::Expense, "Food", "20", d(2024, 6, 2)),
        tx(TxKind::Expense, "Travel", "55", d(2024, 6, 3)),
        tx(TxKind::Income, "Salary", "1000", d(2024, 6, 4)),
    ];
    let s = aggregate(&records, None);
    assert_eq!(s.category_breakdown.len(), 2);
    assert_eq!(s.category_breakdown["Food"], dec("50"));
    assert_eq!(s.category_breakdown["Travel"], dec("55"));
    assert!(!s.category_breakdown.contains_key("Salary"));
    // count is taken before the breakdown filtering
    assert_eq!(s.transaction_count, 4);
}

#[test]
fn range_bounds_are_inclusive() {
    let records = vec![
        tx(TxKind::Expense, "Food", "1", d(2024, 5, 31)),
        tx(TxKind::Expense, "Food", "2", d(2024, 6, 1)),
        tx(TxKind::Expense, "Food", "4", d(2024, 6, 30)),
        tx(TxKind::Expense, "Food", "8", d(2024, 7, 1)),
    ];
    let range = DateRange::new(Some(d(2024, 6, 1)), Some(d(2024, 6, 30)));
    let s = aggregate(&records, Some(&range));
    assert_eq!(s.total_expense, dec("6"));
    assert_eq!(s.transaction_count, 2);
}

#[test]
fn missing_bound_is_unbounded() {
    let records = vec![
        tx(TxKind::Expense, "Food", "1", d(2024, 1, 1)),
        tx(TxKind::Expense, "Food", "2", d(2024, 6, 1)),
        tx(TxKind::Expense, "Food", "4", d(2024, 12, 31)),
    ];
    let from_june = DateRange::new(Some(d(2024, 6, 1)), None);
    assert_eq!(aggregate(&records, Some(&from_june)).total_expense, dec("6"));
    let until_june = DateRange::new(None, Some(d(2024, 6, 1)));
    assert_eq!(aggregate(&records, Some(&until_june)).total_expense, dec("3"));
    let unbounded = DateRange::new(None, None);
    assert_eq!(aggregate(&records, Some(&unbounded)).total_expense, dec("7"));
}

#[test]
fn inverted_range_matches_nothing() {
    let records = vec![tx(TxKind::Expense, "Food", "10", d(2024, 6, 15))];
    let range = DateRange::new(Some(d(2024, 7, 1)), Some(d(2024, 6, 1)));
    let s = aggregate(&records, Some(&range));
    assert_eq!(s.transaction_count, 0);
    assert_eq!(s.total_expense, Decimal::ZERO);
    assert!(s.category_breakdown.is_empty());
}
