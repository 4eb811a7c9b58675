// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, Entry};
use crate::models::{Account, GROUP_TRANSFER, SUB_ALLOCATE, SUB_WITHDRAW};
use crate::transfer;
use crate::utils::{
    account_by_id, fmt_idr, id_for_account, maybe_print_json, parse_date, parse_decimal,
    pretty_table,
};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("preview", sub)) => preview(conn, sub)?,
        Some(("exec", sub)) => exec(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn account_by_name(conn: &Connection, name: &str) -> Result<Account> {
    let id = id_for_account(conn, name)?;
    account_by_id(conn, id)?.with_context(|| format!("Account '{}' not found", name))
}

fn preview(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = account_by_name(conn, sub.get_one::<String>("from").unwrap())?;
    let to = account_by_name(conn, sub.get_one::<String>("to").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;

    let p = transfer::preview(&from, &to, amount);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Amount".into(), fmt_idr(&amount)],
        vec!["Fee (estimate)".into(), fmt_idr(&p.fee)],
        vec!["Total out of pocket".into(), fmt_idr(&p.total_deduction)],
        vec![
            format!("{} after", from.name),
            fmt_idr(&p.source_balance_after),
        ],
        vec![format!("{} after", to.name), fmt_idr(&p.destination_balance_after)],
    ];
    println!("{}", pretty_table(&["", ""], rows));
    if p.insufficient_funds {
        println!("⚠ Insufficient funds: balance does not cover amount + fee");
    }
    println!("Note: the fee is charged by the institution and is NOT recorded on the ledger.");
    Ok(())
}

fn exec(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let from = account_by_name(conn, sub.get_one::<String>("from").unwrap())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let sub_category = sub
        .get_one::<String>("subcategory")
        .map(|s| s.to_string())
        .unwrap_or_else(|| SUB_ALLOCATE.to_string());
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let explicit_dest = sub
        .get_one::<String>("to")
        .map(|name| id_for_account(conn, name))
        .transpose()?;

    let destination_account_id =
        ledger::resolve_destination(conn, GROUP_TRANSFER, Some(&sub_category), explicit_dest)?;
    let dest = destination_account_id
        .map(|id| account_by_id(conn, id))
        .transpose()?
        .flatten();

    let description = match sub.get_one::<String>("description") {
        Some(s) => s.to_string(),
        None if sub_category == SUB_WITHDRAW => format!("Tarik tunai dari {}", from.name),
        None => match &dest {
            Some(d) => format!("Transfer dari {} ke {}", from.name, d.name),
            None => format!("Transfer dari {}", from.name),
        },
    };

    let fee = dest
        .as_ref()
        .map(|d| transfer::transfer_fee(from.kind, d.kind, amount))
        .unwrap_or_default();

    let entry = Entry {
        date,
        description,
        category: GROUP_TRANSFER.to_string(),
        sub_category: Some(sub_category),
        amount,
        account_id: from.id,
        destination_account_id,
        receipt: None,
    };
    let id = ledger::record(conn, &entry)?;
    match &dest {
        Some(d) => println!(
            "Transfer #{} committed: {} from '{}' to '{}'",
            id,
            fmt_idr(&amount),
            from.name,
            d.name
        ),
        None => println!("Transfer #{} committed: {} from '{}'", id, fmt_idr(&amount), from.name),
    }
    if !fee.is_zero() {
        println!(
            "Estimated institution fee {} (not deducted from any balance)",
            fmt_idr(&fee)
        );
    }
    Ok(())
}
