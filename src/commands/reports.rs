// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics;
use crate::utils::{
    fmt_idr, load_accounts, load_tx_rows, maybe_print_json, parse_month, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(conn, sub)?,
        Some(("balances", sub)) => balances(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rows = load_tx_rows(conn, None, None)?;
    let mut series = analytics::monthly_series(&rows);
    if let Some(months) = sub.get_one::<usize>("months") {
        let skip = series.len().saturating_sub(*months);
        series.drain(..skip);
    }
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        return Ok(());
    }
    let table_rows = series
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                fmt_idr(&p.income),
                fmt_idr(&p.expense),
                fmt_idr(&p.savings),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Savings"], table_rows)
    );
    Ok(())
}

fn spend_by_category(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let rows = load_tx_rows(conn, None, None)?;
    let rows: Vec<_> = match sub.get_one::<String>("month") {
        Some(month) => {
            let month = parse_month(month)?;
            rows.into_iter().filter(|r| r.month_key() == month).collect()
        }
        None => rows,
    };
    let slices = analytics::category_composition(&rows);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &slices)? {
        return Ok(());
    }
    let total: Decimal = slices.iter().map(|s| s.total).sum();
    let table_rows = slices
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                fmt_idr(&s.total),
                format!("{:.1}%", analytics::share_of_total(s.total, total)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Sub-category", "Spent", "Share"], table_rows)
    );
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let accounts = load_accounts(conn)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &accounts)? {
        return Ok(());
    }
    let mut table_rows: Vec<Vec<String>> = accounts
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.kind.to_string(),
                fmt_idr(&a.balance),
                if a.is_savings { "yes".into() } else { String::new() },
            ]
        })
        .collect();
    let total: Decimal = accounts.iter().map(|a| a.balance).sum();
    let pool = analytics::savings_progress(&accounts);
    table_rows.push(vec!["TOTAL".into(), String::new(), fmt_idr(&total), String::new()]);
    table_rows.push(vec![
        "SAVINGS POOL".into(),
        String::new(),
        fmt_idr(&pool),
        String::new(),
    ]);
    println!(
        "{}",
        pretty_table(&["Account", "Kind", "Balance", "Savings"], table_rows)
    );
    Ok(())
}
