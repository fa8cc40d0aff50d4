// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::aggregate::{aggregate, DateRange};
use crate::models::{Budget, Transaction, TxKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub spent_amount: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub is_exceeded: bool,
}

/// Live consumption figures for one budget. Expenses are restricted to the
/// budget's category and its own `[start_date, end_date]` window; an open
/// end date means "up to today". The displayed percentage saturates at 100
/// while `is_exceeded` keeps the uncapped truth. Never mutates the budget.
pub fn evaluate_budget(
    budget: &Budget,
    transactions: &[Transaction],
    today: NaiveDate,
) -> BudgetStatus {
    let window = DateRange::new(
        Some(budget.start_date),
        Some(budget.end_date.unwrap_or(today)),
    );
    let in_category: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && t.category == budget.category)
        .cloned()
        .collect();
    let spent = aggregate(&in_category, Some(&window)).total_expense;

    let hundred = Decimal::from(100);
    let (percentage, is_exceeded) = if budget.amount.is_zero() {
        // Unreachable in valid state (amount > 0 at creation).
        (Decimal::ZERO, spent > Decimal::ZERO)
    } else {
        ((spent / budget.amount * hundred).min(hundred), spent > budget.amount)
    };

    BudgetStatus {
        spent_amount: spent,
        remaining: budget.amount - spent,
        percentage,
        is_exceeded,
    }
}
