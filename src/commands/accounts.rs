// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountKind;
use crate::utils::{fmt_idr, load_accounts, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};
use std::str::FromStr;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = AccountKind::from_str(sub.get_one::<String>("kind").unwrap())
        .map_err(anyhow::Error::msg)?;
    let opening = parse_decimal(sub.get_one::<String>("opening").unwrap())?;
    let savings = sub.get_flag("savings");
    let color = sub.get_one::<String>("color").map(|s| s.to_string());

    conn.execute(
        "INSERT INTO accounts(name, kind, opening_balance, balance, is_savings, color)
         VALUES (?1, ?2, ?3, ?3, ?4, ?5)",
        params![name, kind.as_str(), opening.to_string(), savings, color],
    )?;
    println!("Added account '{}' ({}, opening {})", name, kind, fmt_idr(&opening));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = load_accounts(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        return Ok(());
    }
    let rows = accounts
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.kind.to_string(),
                fmt_idr(&a.balance),
                if a.is_savings { "yes".into() } else { String::new() },
                a.color.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Kind", "Balance", "Savings", "Color"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let removed = conn.execute("DELETE FROM accounts WHERE name=?1", params![name])?;
    if removed == 0 {
        println!("No account named '{}'", name);
    } else {
        println!(
            "Removed account '{}'. Its transactions are kept; run `dompet doctor` to list orphans.",
            name
        );
    }
    Ok(())
}
