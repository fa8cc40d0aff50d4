// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::recurrence::project;
use crate::models::{Frequency, TxKind};
use crate::store::{self, TxFilter};
use crate::utils::{
    maybe_print_json, parse_amount, parse_date, pretty_table, resolve_owner, validate_notes,
};
use anyhow::{bail, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let kind = TxKind::parse(sub.get_one::<String>("type").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    if category.is_empty() {
        bail!("Category must not be empty");
    }
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Utc::now().date_naive(),
    };
    let notes = sub.get_one::<String>("notes").map(|s| s.to_string());
    if let Some(ref n) = notes {
        validate_notes(n)?;
    }

    let is_recurring = sub.get_flag("recurring");
    let (frequency, next_date) = recurrence_fields(is_recurring, sub.get_one::<String>("every"), date)?;

    conn.execute(
        "INSERT INTO transactions(owner_id, kind, category, amount, date, notes, is_recurring, frequency, next_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            owner_id,
            kind.as_str(),
            category,
            amount.to_string(),
            date.to_string(),
            notes,
            is_recurring,
            frequency.map(|f| f.as_str()),
            next_date.map(|d| d.to_string()),
        ],
    )?;
    match next_date {
        Some(next) => println!(
            "Recorded {} {} '{}' on {} (recurs, next {})",
            kind.as_str(),
            amount,
            category,
            date,
            next
        ),
        None => println!("Recorded {} {} '{}' on {}", kind.as_str(), amount, category, date),
    }
    Ok(())
}

fn recurrence_fields(
    is_recurring: bool,
    every: Option<&String>,
    date: NaiveDate,
) -> Result<(Option<Frequency>, Option<NaiveDate>)> {
    if !is_recurring {
        return Ok((None, None));
    }
    let freq = match every {
        Some(s) => Frequency::parse(s)?,
        None => bail!("--recurring requires --every daily|weekly|monthly|yearly"),
    };
    Ok((Some(freq), Some(project(date, freq))))
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub notes: String,
    pub recurs: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let filter = TxFilter {
        kind: sub
            .get_one::<String>("type")
            .map(|s| TxKind::parse(s))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        from: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        to: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        limit: sub.get_one::<usize>("limit").copied(),
    };

    let data: Vec<TransactionRow> = store::find_transactions(conn, owner_id, &filter)?
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            kind: t.kind.as_str().to_string(),
            category: t.category,
            amount: t.amount.to_string(),
            notes: t.notes.unwrap_or_default(),
            recurs: match (t.frequency, t.next_date) {
                (Some(f), Some(next)) => format!("{} (next {})", f.as_str(), next),
                _ => String::new(),
            },
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.notes.clone(),
                    r.recurs.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Amount", "Notes", "Recurs"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut tx = store::get_transaction(conn, owner_id, id)?;

    if let Some(s) = sub.get_one::<String>("type") {
        tx.kind = TxKind::parse(s)?;
    }
    if let Some(s) = sub.get_one::<String>("category") {
        let cat = s.trim().to_string();
        if cat.is_empty() {
            bail!("Category must not be empty");
        }
        tx.category = cat;
    }
    if let Some(s) = sub.get_one::<String>("amount") {
        tx.amount = parse_amount(s)?;
    }
    if let Some(s) = sub.get_one::<String>("date") {
        tx.date = parse_date(s)?;
    }
    if let Some(s) = sub.get_one::<String>("notes") {
        validate_notes(s)?;
        tx.notes = Some(s.to_string());
    }
    if sub.get_flag("once") {
        tx.is_recurring = false;
        tx.frequency = None;
    } else if sub.get_flag("recurring") {
        tx.is_recurring = true;
    }
    if let Some(s) = sub.get_one::<String>("every") {
        tx.frequency = Some(Frequency::parse(s)?);
    }

    // Re-derive the projection so next_date tracks the edited date/frequency.
    tx.next_date = match (tx.is_recurring, tx.frequency) {
        (true, Some(f)) => Some(project(tx.date, f)),
        (true, None) => bail!("Recurring transaction needs a frequency (--every)"),
        _ => None,
    };

    conn.execute(
        "UPDATE transactions SET kind=?1, category=?2, amount=?3, date=?4, notes=?5,
                is_recurring=?6, frequency=?7, next_date=?8
         WHERE id=?9 AND owner_id=?10",
        params![
            tx.kind.as_str(),
            tx.category,
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.notes,
            tx.is_recurring,
            tx.frequency.map(|f| f.as_str()),
            tx.next_date.map(|d| d.to_string()),
            id,
            owner_id,
        ],
    )?;
    println!("Transaction {} updated", id);
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let changed = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if changed == 0 {
        bail!("Transaction {} not found", id);
    }
    println!("Transaction {} deleted", id);
    Ok(())
}
