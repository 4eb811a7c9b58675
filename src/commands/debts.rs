// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::utils::{
    fmt_idr, load_debts, load_tx_rows, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::Result;
use rusqlite::{params, Connection};

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
    let total = parse_decimal(sub.get_one::<String>("total").unwrap())?;
    let remaining = match sub.get_one::<String>("remaining") {
        Some(s) => parse_decimal(s)?,
        None => total,
    };
    let rate = sub
        .get_one::<String>("rate")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let min_payment = sub
        .get_one::<String>("min-payment")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let due = sub
        .get_one::<String>("due")
        .map(|s| parse_date(s))
        .transpose()?;
    let description = sub.get_one::<String>("description");

    conn.execute(
        "INSERT INTO debts(name, total_amount, remaining_amount, interest_rate,
                           minimum_payment, due_date, description)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            name,
            total.to_string(),
            remaining.to_string(),
            rate.map(|d| d.to_string()),
            min_payment.map(|d| d.to_string()),
            due.map(|d| d.to_string()),
            description,
        ],
    )?;
    println!(
        "Added debt '{}' ({} total). It now appears under 'Bayar Hutang'.",
        name,
        fmt_idr(&total)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let debts = load_debts(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &debts)? {
        return Ok(());
    }
    let rows = debts
        .iter()
        .map(|d| {
            vec![
                d.name.clone(),
                fmt_idr(&d.total_amount),
                fmt_idr(&d.remaining_amount),
                d.interest_rate
                    .map(|r| format!("{}%", r))
                    .unwrap_or_default(),
                d.due_date.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Total", "Remaining", "Rate", "Due"], rows)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let removed = conn.execute("DELETE FROM debts WHERE name=?1", params![name])?;
    if removed == 0 {
        println!("No debt named '{}'", name);
    } else {
        println!(
            "Removed debt '{}'. Past 'Bayar Hutang' entries under this name are no longer attributed.",
            name
        );
    }
    Ok(())
}

/// Paid totals come from name attribution over "Bayar Hutang" entries, not
/// from the stored remaining amount.
fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let debts = load_debts(conn)?;
    let rows = load_tx_rows(conn, None, None)?;
    let paid = analytics::debt_paid_totals(&rows, &debts);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &paid)? {
        return Ok(());
    }
    let table_rows = debts
        .iter()
        .zip(paid.iter())
        .map(|(d, p)| {
            vec![
                d.name.clone(),
                fmt_idr(&d.total_amount),
                fmt_idr(&d.remaining_amount),
                fmt_idr(&p.paid),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Total", "Remaining", "Paid (attributed)"], table_rows)
    );
    Ok(())
}
