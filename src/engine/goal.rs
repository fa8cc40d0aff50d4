// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::aggregate::{aggregate, DateRange};
use crate::models::{Goal, Transaction};
use crate::store;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub current_amount: Decimal,
    pub progress: Decimal,
    pub is_completed: bool,
    pub completed_date: Option<NaiveDate>,
    /// True when this evaluation crossed the target for the first time and
    /// the completion latch should be persisted.
    #[serde(skip)]
    pub completes: bool,
}

/// Progress of a savings goal against the owner's net savings since the goal
/// was created. Goals track overall net income minus expenses, not a single
/// category. A completed goal is frozen: its stored figures are returned
/// unchanged no matter what the transactions now say.
pub fn evaluate_goal(goal: &Goal, transactions: &[Transaction], today: NaiveDate) -> GoalProgress {
    let hundred = Decimal::from(100);

    if goal.is_completed {
        return GoalProgress {
            current_amount: goal.current_amount,
            progress: capped_progress(goal.current_amount, goal.target_amount, hundred),
            is_completed: true,
            completed_date: goal.completed_date,
            completes: false,
        };
    }

    let since_creation = DateRange::new(Some(goal.created_at), None);
    let summary = aggregate(transactions, Some(&since_creation));
    let net = summary.balance.max(Decimal::ZERO);

    let current = net.min(goal.target_amount);
    let completes = !goal.target_amount.is_zero() && net >= goal.target_amount;

    GoalProgress {
        current_amount: current,
        progress: capped_progress(current, goal.target_amount, hundred),
        is_completed: completes,
        completed_date: if completes { Some(today) } else { None },
        completes,
    }
}

/// Evaluates a goal and, when it first reaches its target, persists the
/// one-way completion transition through the store's compare-and-set. A
/// failed write does not disturb the returned figures; the completed state
/// is simply not durable until a later evaluation retries it.
pub fn latch_goal(
    conn: &Connection,
    goal: &Goal,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<GoalProgress> {
    let progress = evaluate_goal(goal, transactions, today);
    if progress.completes {
        match store::complete_goal(conn, goal.id, progress.current_amount, today) {
            Ok(_won) => {}
            Err(err) => eprintln!("warning: goal {} completion not persisted: {}", goal.id, err),
        }
    }
    Ok(progress)
}

fn capped_progress(current: Decimal, target: Decimal, hundred: Decimal) -> Decimal {
    if target.is_zero() {
        return Decimal::ZERO;
    }
    (current / target * hundred).min(hundred)
}
