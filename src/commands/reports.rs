// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::report::compose;
use crate::store::{self, TxFilter};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, resolve_owner};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("export", sub)) => export(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let start = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let end = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;
    let today = chrono::Utc::now().date_naive();

    let report = compose(conn, owner_id, start, end, today)?;

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let s = &report.summary;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance", "Transactions"],
            vec![vec![
                fmt_money(&s.total_income),
                fmt_money(&s.total_expense),
                fmt_money(&s.balance),
                s.transaction_count.to_string(),
            ]],
        )
    );

    if !report.monthly_data.is_empty() {
        let rows: Vec<Vec<String>> = report
            .monthly_data
            .iter()
            .map(|(month, flow)| {
                vec![month.clone(), fmt_money(&flow.income), fmt_money(&flow.expense)]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }

    if !report.category_breakdown.is_empty() {
        let rows: Vec<Vec<String>> = report
            .category_breakdown
            .iter()
            .map(|(cat, amt)| vec![cat.clone(), fmt_money(amt)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }

    if !report.budget_comparison.is_empty() {
        let rows: Vec<Vec<String>> = report
            .budget_comparison
            .iter()
            .map(|b| {
                vec![
                    b.category.clone(),
                    fmt_money(&b.budgeted),
                    fmt_money(&b.spent),
                    fmt_money(&b.remaining),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Budget", "Budgeted", "Spent", "Remaining"], rows)
        );
    }

    if !report.goals.is_empty() {
        let rows: Vec<Vec<String>> = report
            .goals
            .iter()
            .map(|g| {
                vec![
                    g.title.clone(),
                    fmt_money(&g.target_amount),
                    fmt_money(&g.current_amount),
                    format!("{:.0}%", g.progress),
                    if g.is_completed { "done".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Target", "Saved", "Progress", ""], rows)
        );
    }
    Ok(())
}

fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let filter = TxFilter {
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        ..TxFilter::default()
    };

    let mut transactions = store::find_transactions(conn, owner_id, &filter)?;
    transactions.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "category", "amount", "notes"])?;
            for t in &transactions {
                wtr.write_record([
                    t.date.to_string(),
                    t.kind.as_str().to_string(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = transactions
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.to_string(),
                        "type": t.kind.as_str(),
                        "category": t.category,
                        "amount": t.amount.to_string(),
                        "notes": t.notes,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}
