// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::utils::{
    fmt_idr, load_accounts, load_goals, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let deadline = sub
        .get_one::<String>("deadline")
        .map(|s| parse_date(s))
        .transpose()?;
    let description = sub.get_one::<String>("description");
    conn.execute(
        "INSERT INTO goals(name, target_amount, deadline, description) VALUES (?1,?2,?3,?4)",
        params![
            name,
            target.to_string(),
            deadline.map(|d| d.to_string()),
            description
        ],
    )?;
    println!("Added goal '{}' targeting {}", name, fmt_idr(&target));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goals = load_goals(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        return Ok(());
    }
    let rows = goals
        .iter()
        .map(|g| {
            vec![
                g.name.clone(),
                fmt_idr(&g.target_amount),
                g.deadline.map(|d| d.to_string()).unwrap_or_default(),
                g.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Target", "Deadline", "Description"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let removed = conn.execute("DELETE FROM goals WHERE name=?1", params![name])?;
    if removed == 0 {
        println!("No goal named '{}'", name);
    } else {
        println!("Removed goal '{}'", name);
    }
    Ok(())
}

/// Progress is the pooled balance of savings accounts; every goal shares it.
fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let goals = load_goals(conn)?;
    let pool = analytics::savings_progress(&load_accounts(conn)?);
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if json_flag || jsonl_flag {
        let out: Vec<_> = goals
            .iter()
            .map(|g| {
                json!({
                    "name": g.name,
                    "target": g.target_amount,
                    "pooled_savings": pool,
                    "percentage": analytics::share_of_total(pool, g.target_amount),
                })
            })
            .collect();
        maybe_print_json(json_flag, jsonl_flag, &out)?;
        return Ok(());
    }
    let rows = goals
        .iter()
        .map(|g| {
            let pct = analytics::share_of_total(pool, g.target_amount);
            vec![
                g.name.clone(),
                fmt_idr(&g.target_amount),
                fmt_idr(&pool),
                format!("{:.1}%", pct),
                g.deadline.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Goal", "Target", "Pooled savings", "Progress", "Deadline"],
            rows
        )
    );
    Ok(())
}
