// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, Entry};
use crate::models::CategoryKind;
use crate::utils::{id_for_account, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("strike", sub)) => strike(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let sub_category = sub.get_one::<String>("subcategory").map(|s| s.to_string());
    let account_id = id_for_account(conn, sub.get_one::<String>("account").unwrap())?;
    let explicit_dest = sub
        .get_one::<String>("to")
        .map(|name| id_for_account(conn, name))
        .transpose()?;
    let receipt = sub.get_one::<String>("receipt").map(|s| s.to_string());

    let destination_account_id =
        ledger::resolve_destination(conn, &category, sub_category.as_deref(), explicit_dest)?;
    let entry = Entry {
        date,
        description: description.clone(),
        category,
        sub_category,
        amount,
        account_id,
        destination_account_id,
        receipt,
    };
    let id = ledger::record(conn, &entry)?;
    println!("Recorded #{}: {} on {} ('{}')", id, amount, date, description);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    pub amount: String,
    pub account: String,
    pub to_account: String,
    pub struck: bool,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, t.description, t.category, t.sub_category, t.amount,
                a.name, b.name, t.struck
         FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id
         LEFT JOIN accounts b ON t.destination_account_id=b.id
         WHERE 1=1",
    );
    let mut params_vec: Vec<String> = Vec::new();

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(t.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(acct) = sub.get_one::<String>("account") {
        sql.push_str(" AND (a.name=? OR b.name=?)");
        params_vec.push(acct.into());
        params_vec.push(acct.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND t.category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let sub_category: Option<String> = r.get(4)?;
        let account: Option<String> = r.get(6)?;
        let to_account: Option<String> = r.get(7)?;
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            description: r.get(2)?,
            category: r.get(3)?,
            sub_category: sub_category.unwrap_or_default(),
            amount: r.get(5)?,
            account: account.unwrap_or_default(),
            to_account: to_account.unwrap_or_default(),
            struck: r.get(8)?,
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.date.clone(),
                r.description.clone(),
                r.category.clone(),
                r.sub_category.clone(),
                r.amount.clone(),
                r.account.clone(),
                r.to_account.clone(),
                if r.struck { "x".into() } else { String::new() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Id", "Date", "Description", "Category", "Sub", "Amount", "From", "To", "✓"],
            rows,
        )
    );
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let old = ledger::load_entry(conn, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => old.date,
    };
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.to_string())
        .unwrap_or_else(|| old.description.clone());
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => parse_decimal(s)?,
        None => old.amount,
    };
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.to_string())
        .unwrap_or_else(|| old.category.clone());
    let sub_category = match sub.get_one::<String>("subcategory") {
        Some(s) => Some(s.to_string()),
        None => old.sub_category.clone(),
    };
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => id_for_account(conn, name)?,
        None => old.account_id,
    };
    let receipt = match sub.get_one::<String>("receipt") {
        Some(s) => Some(s.to_string()),
        None => old.receipt.clone(),
    };
    let explicit_dest = match sub.get_one::<String>("to") {
        Some(name) => Some(id_for_account(conn, name)?),
        None => old.destination_account_id,
    };
    let destination_account_id = if CategoryKind::classify(&category) == CategoryKind::Transfer {
        ledger::resolve_destination(conn, &category, sub_category.as_deref(), explicit_dest)?
    } else {
        None
    };

    let entry = Entry {
        date,
        description,
        category,
        sub_category,
        amount,
        account_id,
        destination_account_id,
        receipt,
    };
    ledger::amend(conn, id, &entry)?;
    println!("Updated #{} (balances reverted and reapplied)", id);
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::void(conn, id)?;
    println!("Deleted #{} (balance effect reverted)", id);
    Ok(())
}

fn strike(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let struck = ledger::strike(conn, id)?;
    println!(
        "#{} marked as {}",
        id,
        if struck { "reconciled" } else { "not reconciled" }
    );
    Ok(())
}
