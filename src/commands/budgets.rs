// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::budget::evaluate_budget;
use crate::models::Period;
use crate::store::{self, TxFilter};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, resolve_owner,
};
use anyhow::{bail, Result};
use chrono::{Months, NaiveDate};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        Some(("pause", sub)) => set_active(conn, sub, false)?,
        Some(("resume", sub)) => set_active(conn, sub, true)?,
        _ => {}
    }
    Ok(())
}

fn period_end(start: NaiveDate, period: Period) -> NaiveDate {
    let months = match period {
        Period::Monthly => 1,
        Period::Yearly => 12,
    };
    start.checked_add_months(Months::new(months)).unwrap_or(start)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    if category.is_empty() {
        bail!("Category must not be empty");
    }
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let period = Period::parse(sub.get_one::<String>("period").unwrap())?;
    let start = match sub.get_one::<String>("start") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let end = match sub.get_one::<String>("end") {
        Some(s) => parse_date(s)?,
        None => period_end(start, period),
    };
    if end <= start {
        bail!("End date {} must be after start date {}", end, start);
    }

    conn.execute(
        "INSERT INTO budgets(owner_id, category, amount, period, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            category,
            amount.to_string(),
            period.as_str(),
            start.to_string(),
            end.to_string(),
        ],
    )?;
    println!(
        "Budget set: {} {} for {} ({} to {})",
        amount,
        period.as_str(),
        category,
        start,
        end
    );
    Ok(())
}

#[derive(Serialize)]
struct BudgetRow {
    id: i64,
    category: String,
    period: String,
    window: String,
    budgeted: String,
    spent: String,
    remaining: String,
    percentage: String,
    exceeded: bool,
    active: bool,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let include_paused = sub.get_flag("all");
    let today = chrono::Utc::now().date_naive();

    let budgets = store::find_budgets(conn, owner_id, !include_paused)?;
    let transactions = store::find_transactions(conn, owner_id, &TxFilter::default())?;

    let data: Vec<BudgetRow> = budgets
        .iter()
        .map(|b| {
            let status = evaluate_budget(b, &transactions, today);
            BudgetRow {
                id: b.id,
                category: b.category.clone(),
                period: b.period.as_str().to_string(),
                window: match b.end_date {
                    Some(end) => format!("{} to {}", b.start_date, end),
                    None => format!("{} to now", b.start_date),
                },
                budgeted: fmt_money(&b.amount),
                spent: fmt_money(&status.spent_amount),
                remaining: fmt_money(&status.remaining),
                percentage: format!("{:.0}%", status.percentage),
                exceeded: status.is_exceeded,
                active: b.is_active,
            }
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.category.clone(),
                    r.period.clone(),
                    r.window.clone(),
                    r.budgeted.clone(),
                    r.spent.clone(),
                    r.remaining.clone(),
                    r.percentage.clone(),
                    if r.exceeded { "EXCEEDED".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Category", "Period", "Window", "Budget", "Spent", "Remaining", "Used", ""],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "DELETE FROM budgets WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if changed == 0 {
        bail!("Budget {} not found", id);
    }
    println!("Budget {} deleted", id);
    Ok(())
}

fn set_active(conn: &Connection, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "UPDATE budgets SET is_active=?1 WHERE id=?2 AND owner_id=?3",
        params![active, id, owner_id],
    )?;
    if changed == 0 {
        bail!("Budget {} not found", id);
    }
    println!(
        "Budget {} {}",
        id,
        if active { "resumed" } else { "paused" }
    );
    Ok(())
}
