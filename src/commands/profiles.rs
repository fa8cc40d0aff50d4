// Copyright (c) 2025 Coinflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{id_for_owner, pretty_table, set_default_profile};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", _)) => list(conn)?,
        Some(("use", sub)) => set_default(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    conn.execute("INSERT INTO owners(name) VALUES (?1)", params![name])?;
    println!("Profile '{}' added", name);
    Ok(())
}

fn list(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM owners ORDER BY name")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, name, created) = row?;
        data.push(vec![id.to_string(), name, created]);
    }
    println!("{}", pretty_table(&["ID", "Name", "Created"], data));
    Ok(())
}

fn set_default(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    // Validate the profile exists before storing it as the default.
    id_for_owner(conn, &name)?;
    set_default_profile(conn, &name)?;
    println!("Default profile set to '{}'", name);
    Ok(())
}
