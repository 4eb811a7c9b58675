// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::models::{GROUP_DEBT_PAYMENT, GROUP_TRANSFER};
use crate::utils::{
    load_categories, load_debts, maybe_print_json, parse_decimal, pretty_table,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("budget", sub)) => budget(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let name = sub.get_one::<String>("subcategory").unwrap();
    let budget = parse_decimal(sub.get_one::<String>("budget").unwrap())?;
    if group == GROUP_TRANSFER || group == GROUP_DEBT_PAYMENT {
        bail!("'{}' is a reserved group and cannot hold user sub-categories", group);
    }
    conn.execute(
        "INSERT INTO categories(category, sub_category, budget) VALUES (?1, ?2, ?3)",
        params![group, name, budget.to_string()],
    )?;
    println!("Added '{}' under '{}'", name, group);
    Ok(())
}

/// Shows the reconciled taxonomy, so the synthetic "Mutasi" and
/// "Bayar Hutang" groups appear exactly as transaction entry sees them.
fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let groups = catalog::reconcile(&load_categories(conn)?, &load_debts(conn)?);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &groups)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for g in &groups {
        for name in &g.subcategories {
            rows.push(vec![
                g.name.clone(),
                format!("{:?}", g.kind).to_lowercase(),
                name.clone(),
            ]);
        }
    }
    println!("{}", pretty_table(&["Group", "Kind", "Sub-category"], rows));
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let name = sub.get_one::<String>("subcategory").unwrap();
    let removed = conn.execute(
        "DELETE FROM categories WHERE category=?1 AND sub_category=?2",
        params![group, name],
    )?;
    if removed == 0 {
        println!("No sub-category '{}' under '{}'", name, group);
    } else {
        println!("Removed '{}' from '{}'", name, group);
    }
    Ok(())
}

fn budget(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let group = sub.get_one::<String>("group").unwrap();
    let name = sub.get_one::<String>("subcategory").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let updated = conn.execute(
        "UPDATE categories SET budget=?1 WHERE category=?2 AND sub_category=?3",
        params![amount.to_string(), group, name],
    )?;
    if updated == 0 {
        bail!("Sub-category '{}' under '{}' not found", name, group);
    }
    println!("Budget for {} / {} = {}", group, name, amount);
    Ok(())
}
