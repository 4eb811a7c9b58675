// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT t.date, t.description, t.category, t.sub_category, t.amount,
                a.name AS account, b.name AS to_account, t.struck
         FROM transactions t
         LEFT JOIN accounts a ON t.account_id=a.id
         LEFT JOIN accounts b ON t.destination_account_id=b.id
         ORDER BY t.date, t.id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, bool>(7)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "description",
                "category",
                "sub_category",
                "amount",
                "account",
                "to_account",
                "struck",
            ])?;
            for row in rows {
                let (d, desc, cat, subcat, amt, acct, to_acct, struck) = row?;
                wtr.write_record([
                    d,
                    desc,
                    cat,
                    subcat.unwrap_or_default(),
                    amt,
                    acct.unwrap_or_default(),
                    to_acct.unwrap_or_default(),
                    struck.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, desc, cat, subcat, amt, acct, to_acct, struck) = row?;
                items.push(json!({
                    "date": d, "description": desc, "category": cat,
                    "sub_category": subcat, "amount": amt,
                    "account": acct, "to_account": to_acct, "struck": struck
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
