// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::goal::latch_goal;
use crate::store::{self, TxFilter};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, resolve_owner,
    validate_notes,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let title = sub.get_one::<String>("title").unwrap().trim().to_string();
    if title.is_empty() {
        bail!("Title must not be empty");
    }
    let target = parse_amount(sub.get_one::<String>("target").unwrap())?;
    let target_date = parse_date(sub.get_one::<String>("by").unwrap())?;
    let description = sub.get_one::<String>("notes").map(|s| s.to_string());
    if let Some(ref d) = description {
        validate_notes(d)?;
    }
    let created_at = chrono::Utc::now().date_naive();

    conn.execute(
        "INSERT INTO goals(owner_id, title, target_amount, target_date, description, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            owner_id,
            title,
            target.to_string(),
            target_date.to_string(),
            description,
            created_at.to_string(),
        ],
    )?;
    println!("Goal '{}' created: {} by {}", title, target, target_date);
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    id: i64,
    title: String,
    target: String,
    current: String,
    progress: String,
    target_date: String,
    completed: bool,
    completed_date: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner_id = resolve_owner(conn, sub)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = chrono::Utc::now().date_naive();

    let goals = store::find_goals(conn, owner_id)?;
    let transactions = store::find_transactions(conn, owner_id, &TxFilter::default())?;

    let mut data = Vec::new();
    for goal in &goals {
        let progress = latch_goal(conn, goal, &transactions, today)?;
        data.push(GoalRow {
            id: goal.id,
            title: goal.title.clone(),
            target: fmt_money(&goal.target_amount),
            current: fmt_money(&progress.current_amount),
            progress: format!("{:.0}%", progress.progress),
            target_date: goal.target_date.to_string(),
            completed: progress.is_completed,
            completed_date: progress
                .completed_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        });
    }

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.title.clone(),
                    r.target.clone(),
                    r.current.clone(),
                    r.progress.clone(),
                    r.target_date.clone(),
                    if r.completed {
                        format!("DONE {}", r.completed_date)
                    } else {
                        String::new()
                    },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Title", "Target", "Saved", "Progress", "By", "Status"],
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
        "DELETE FROM goals WHERE id=?1 AND owner_id=?2",
        params![id, owner_id],
    )?;
    if changed == 0 {
        bail!("Goal {} not found", id);
    }
    println!("Goal {} deleted", id);
    Ok(())
}
