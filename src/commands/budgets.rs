// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::utils::{
    fmt_idr, load_categories, load_tx_rows, maybe_print_json, parse_month, pretty_table,
};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => Utc::now().format("%Y-%m").to_string(),
    };
    let rows = load_tx_rows(conn, None, None)?;
    let categories = load_categories(conn)?;
    let usages = analytics::budget_utilization(&rows, &categories, &month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &usages)? {
        return Ok(());
    }
    if usages.is_empty() {
        println!("No budget ceilings set for {}", month);
        return Ok(());
    }
    let table_rows = usages
        .iter()
        .map(|u| {
            vec![
                u.sub_category.clone(),
                fmt_idr(&u.budget),
                fmt_idr(&u.spent),
                fmt_idr(&u.remaining),
                format!("{:.1}%", u.percentage),
                u.status.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Sub-category", "Budget", "Spent", "Remaining", "Used", "Status"],
            table_rows
        )
    );
    Ok(())
}
