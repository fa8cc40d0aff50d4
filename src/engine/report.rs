// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::aggregate::{aggregate, DateRange, Summary};
use crate::engine::budget::evaluate_budget;
use crate::engine::goal::latch_goal;
use crate::store::{self, TxFilter};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct Period {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthFlow {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetLine {
    pub category: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalLine {
    pub title: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub progress: Decimal,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub period: Period,
    pub summary: Summary,
    pub monthly_data: BTreeMap<String, MonthFlow>,
    pub category_breakdown: BTreeMap<String, Decimal>,
    pub budget_comparison: Vec<BudgetLine>,
    pub goals: Vec<GoalLine>,
}

/// The composite report behind `report summary` and the export seam.
///
/// The requested window bounds the summary, the monthly trend, and the
/// category breakdown. Budgets and goals deliberately ignore it: a budget
/// accounts over its own period window and a goal over its whole lifetime,
/// neither of which needs to align with the report. Each budget/goal line is
/// computed independently of the others; the only write this can trigger is
/// the goal-completion latch.
pub fn compose(
    conn: &Connection,
    owner_id: i64,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Report> {
    let transactions = store::find_transactions(conn, owner_id, &TxFilter::default())?;

    let range = DateRange::new(start, end);
    let summary = aggregate(&transactions, Some(&range));

    let mut monthly_data: BTreeMap<String, MonthFlow> = BTreeMap::new();
    for tx in &transactions {
        if !range.contains(tx.date) {
            continue;
        }
        let flow = monthly_data
            .entry(tx.date.format("%Y-%m").to_string())
            .or_default();
        match tx.kind {
            crate::models::TxKind::Income => flow.income += tx.amount,
            crate::models::TxKind::Expense => flow.expense += tx.amount,
        }
    }

    let budget_comparison = store::find_budgets(conn, owner_id, true)?
        .iter()
        .map(|b| {
            let status = evaluate_budget(b, &transactions, today);
            BudgetLine {
                category: b.category.clone(),
                budgeted: b.amount,
                spent: status.spent_amount,
                remaining: status.remaining,
            }
        })
        .collect();

    let mut goals = Vec::new();
    for goal in store::find_goals(conn, owner_id)? {
        let progress = latch_goal(conn, &goal, &transactions, today)?;
        goals.push(GoalLine {
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: progress.current_amount,
            progress: progress.progress,
            is_completed: progress.is_completed,
        });
    }

    let category_breakdown = summary.category_breakdown.clone();
    Ok(Report {
        period: Period {
            start_date: start,
            end_date: end,
        },
        summary,
        monthly_data,
        category_breakdown,
        budget_comparison,
        goals,
    })
}
