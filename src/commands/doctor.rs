// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::GROUP_DEBT_PAYMENT;
use crate::utils::{fmt_idr, load_accounts, load_debts, normalize_name, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = audit(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Audits the divergences the data model tolerates: stored-balance drift,
/// orphaned account references, debt payments that match no debt, and
/// transfers without a destination. Returns (issue, detail) pairs.
pub fn audit(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    check_balance_drift(conn, &mut rows)?;
    check_orphaned_accounts(conn, &mut rows)?;
    check_unattributed_debt_payments(conn, &mut rows)?;
    check_transfers_without_destination(conn, &mut rows)?;
    Ok(rows)
}

fn check_balance_drift(conn: &Connection, rows: &mut Vec<Vec<String>>) -> Result<()> {
    for account in load_accounts(conn)? {
        let expected = ledger::expected_balance(conn, account.id, account.opening_balance)?;
        if expected != account.balance {
            rows.push(vec![
                "balance_drift".into(),
                format!(
                    "'{}' stored {} expected {}",
                    account.name,
                    fmt_idr(&account.balance),
                    fmt_idr(&expected)
                ),
            ]);
        }
    }
    Ok(())
}

fn check_orphaned_accounts(conn: &Connection, rows: &mut Vec<Vec<String>>) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.date, t.account_id FROM transactions t
         WHERE t.account_id NOT IN (SELECT id FROM accounts)
         UNION
         SELECT t.id, t.date, t.destination_account_id FROM transactions t
         WHERE t.destination_account_id IS NOT NULL
           AND t.destination_account_id NOT IN (SELECT id FROM accounts)",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let account: i64 = r.get(2)?;
        rows.push(vec![
            "orphaned_account_ref".into(),
            format!("tx #{} ({}) references deleted account {}", id, date, account),
        ]);
    }
    Ok(())
}

/// A "Bayar Hutang" entry only counts toward a debt when its sub-category
/// matches the debt name (case/whitespace-insensitively); anything else
/// silently contributes nothing, so surface it here.
fn check_unattributed_debt_payments(conn: &Connection, rows: &mut Vec<Vec<String>>) -> Result<()> {
    let debt_keys: Vec<String> = load_debts(conn)?
        .iter()
        .map(|d| normalize_name(&d.name))
        .collect();
    let mut stmt = conn
        .prepare("SELECT id, date, sub_category FROM transactions WHERE category=?1 ORDER BY id")?;
    let mut cur = stmt.query([GROUP_DEBT_PAYMENT])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let sub: Option<String> = r.get(2)?;
        let attributed = sub
            .as_deref()
            .map(|s| debt_keys.contains(&normalize_name(s)))
            .unwrap_or(false);
        if !attributed {
            rows.push(vec![
                "unattributed_debt_payment".into(),
                format!(
                    "tx #{} ({}) sub-category '{}' matches no debt",
                    id,
                    date,
                    sub.unwrap_or_default()
                ),
            ]);
        }
    }
    Ok(())
}

fn check_transfers_without_destination(
    conn: &Connection,
    rows: &mut Vec<Vec<String>>,
) -> Result<()> {
    let mut stmt = conn.prepare(
        "SELECT id, date FROM transactions
         WHERE category='Mutasi' AND destination_account_id IS NULL ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        rows.push(vec![
            "transfer_without_destination".into(),
            format!("tx #{} ({})", id, date),
        ]);
    }
    Ok(())
}
