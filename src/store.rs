// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner-scoped record queries. Every read here filters by `owner_id`; the
//! aggregation engine never sees another owner's rows.

use crate::models::{Budget, Frequency, Goal, Period, Transaction, TxKind};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

#[derive(Debug, Default, Clone)]
pub struct TxFilter {
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

pub fn find_transactions(
    conn: &Connection,
    owner_id: i64,
    filter: &TxFilter,
) -> Result<Vec<Transaction>> {
    let mut sql = String::from(
        "SELECT id, owner_id, kind, category, amount, date, notes, is_recurring, frequency, next_date
         FROM transactions WHERE owner_id=?",
    );
    let mut params_vec: Vec<String> = vec![owner_id.to_string()];

    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind=?");
        params_vec.push(kind.as_str().to_string());
    }
    if let Some(ref cat) = filter.category {
        sql.push_str(" AND category=?");
        params_vec.push(cat.clone());
    }
    if let Some(from) = filter.from {
        sql.push_str(" AND date>=?");
        params_vec.push(from.to_string());
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date<=?");
        params_vec.push(to.to_string());
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let refs: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(refs))?;

    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        out.push(tx_from_row(r)?);
    }
    Ok(out)
}

pub fn get_transaction(conn: &Connection, owner_id: i64, id: i64) -> Result<Transaction> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, kind, category, amount, date, notes, is_recurring, frequency, next_date
         FROM transactions WHERE id=?1 AND owner_id=?2",
    )?;
    let mut rows = stmt.query(params![id, owner_id])?;
    let row = rows
        .next()?
        .with_context(|| format!("Transaction {} not found", id))?;
    tx_from_row(row)
}

fn tx_from_row(r: &rusqlite::Row) -> Result<Transaction> {
    let id: i64 = r.get(0)?;
    let owner_id: i64 = r.get(1)?;
    let kind_s: String = r.get(2)?;
    let category: String = r.get(3)?;
    let amount_s: String = r.get(4)?;
    let date_s: String = r.get(5)?;
    let notes: Option<String> = r.get(6)?;
    let is_recurring: bool = r.get(7)?;
    let freq_s: Option<String> = r.get(8)?;
    let next_s: Option<String> = r.get(9)?;

    Ok(Transaction {
        id,
        owner_id,
        kind: TxKind::parse(&kind_s)?,
        category,
        amount: parse_stored_decimal(&amount_s, "transactions.amount", id)?,
        date: parse_stored_date(&date_s, "transactions.date", id)?,
        notes,
        is_recurring,
        frequency: freq_s.as_deref().map(Frequency::parse).transpose()?,
        next_date: next_s
            .as_deref()
            .map(|s| parse_stored_date(s, "transactions.next_date", id))
            .transpose()?,
    })
}

pub fn find_budgets(conn: &Connection, owner_id: i64, active_only: bool) -> Result<Vec<Budget>> {
    let mut sql = String::from(
        "SELECT id, owner_id, category, amount, period, start_date, end_date, is_active
         FROM budgets WHERE owner_id=?1",
    );
    if active_only {
        sql.push_str(" AND is_active=1");
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![owner_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(3)?;
        let period_s: String = r.get(4)?;
        let start_s: String = r.get(5)?;
        let end_s: Option<String> = r.get(6)?;
        out.push(Budget {
            id,
            owner_id: r.get(1)?,
            category: r.get(2)?,
            amount: parse_stored_decimal(&amount_s, "budgets.amount", id)?,
            period: Period::parse(&period_s)?,
            start_date: parse_stored_date(&start_s, "budgets.start_date", id)?,
            end_date: end_s
                .as_deref()
                .map(|s| parse_stored_date(s, "budgets.end_date", id))
                .transpose()?,
            is_active: r.get(7)?,
        });
    }
    Ok(out)
}

pub fn find_goals(conn: &Connection, owner_id: i64) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, title, target_amount, current_amount, target_date,
                description, is_completed, completed_date, created_at
         FROM goals WHERE owner_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![owner_id])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let target_s: String = r.get(3)?;
        let current_s: String = r.get(4)?;
        let target_date_s: String = r.get(5)?;
        let completed_s: Option<String> = r.get(8)?;
        let created_s: String = r.get(9)?;
        out.push(Goal {
            id,
            owner_id: r.get(1)?,
            title: r.get(2)?,
            target_amount: parse_stored_decimal(&target_s, "goals.target_amount", id)?,
            current_amount: parse_stored_decimal(&current_s, "goals.current_amount", id)?,
            target_date: parse_stored_date(&target_date_s, "goals.target_date", id)?,
            description: r.get(6)?,
            is_completed: r.get(7)?,
            completed_date: completed_s
                .as_deref()
                .map(|s| parse_stored_date(s, "goals.completed_date", id))
                .transpose()?,
            created_at: parse_stored_date(&created_s, "goals.created_at", id)?,
        });
    }
    Ok(out)
}

/// One-way completion latch. The update is conditioned on `is_completed=0`
/// so two concurrent evaluations cannot both fire the transition; returns
/// whether this call won it.
pub fn complete_goal(
    conn: &Connection,
    goal_id: i64,
    current_amount: Decimal,
    completed_on: NaiveDate,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE goals SET is_completed=1, completed_date=?1, current_amount=?2
         WHERE id=?3 AND is_completed=0",
        params![completed_on.to_string(), current_amount.to_string(), goal_id],
    )?;
    Ok(changed == 1)
}

fn parse_stored_decimal(s: &str, field: &str, id: i64) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}' in {} (row {})", s, field, id))
}

fn parse_stored_date(s: &str, field: &str, id: i64) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' in {} (row {})", s, field, id))
}
