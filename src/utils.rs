// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Amounts are validated strictly positive at the boundary; the engine
/// relies on it.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        bail!("Amount must be positive, got '{}'", s);
    }
    Ok(d)
}

pub fn validate_notes(s: &str) -> Result<()> {
    if s.chars().count() > 500 {
        bail!("Notes must be at most 500 characters");
    }
    Ok(())
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_owner(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM owners WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Profile '{}' not found (try 'coinflow profile add')", name))?;
    Ok(id)
}

// Default profile settings
pub fn get_default_profile(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='default_profile'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_default_profile(conn: &Connection, name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('default_profile', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![name],
    )?;
    Ok(())
}

/// Owner for the current invocation: `--profile` flag if given, else the
/// stored default.
pub fn resolve_owner(conn: &Connection, m: &clap::ArgMatches) -> Result<i64> {
    if let Some(name) = m.get_one::<String>("profile") {
        return id_for_owner(conn, name);
    }
    let name = get_default_profile(conn)?
        .context("No profile selected (pass --profile or run 'coinflow profile use')")?;
    id_for_owner(conn, &name)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
