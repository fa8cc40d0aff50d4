// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Optional `[start, end]` window, inclusive on both bounds. A missing bound
/// leaves that side unbounded.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// An inverted range (end before start) matches nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if let (Some(s), Some(e)) = (self.start, self.end) {
            if e < s {
                return false;
            }
        }
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
    pub category_breakdown: BTreeMap<String, Decimal>,
}

/// Sums a record set: income, expense, balance, and per-category expense
/// totals. Income never enters the breakdown. An empty set yields all zeros,
/// never an error.
pub fn aggregate(records: &[Transaction], range: Option<&DateRange>) -> Summary {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut count = 0usize;

    for tx in records {
        if let Some(r) = range {
            if !r.contains(tx.date) {
                continue;
            }
        }
        count += 1;
        match tx.kind {
            TxKind::Income => total_income += tx.amount,
            TxKind::Expense => {
                total_expense += tx.amount;
                *breakdown.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount;
            }
        }
    }

    Summary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        transaction_count: count,
        category_breakdown: breakdown,
    }
}
