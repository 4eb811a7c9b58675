// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Balance-consistency engine. Every ledger mutation (record, amend, void)
//! runs the row write and the compensating balance update(s) inside one
//! SQLite transaction, so a failed step never leaves the stored balances out
//! of sync with the transaction rows.
//!
//! Sign convention: "Pemasukan" credits the source account, "Mutasi" debits
//! the source and credits the destination by the same magnitude, everything
//! else debits the source. Transfer fees are advisory only and never enter a
//! delta.

use crate::models::{AccountKind, CategoryKind, Transaction, SUB_WITHDRAW};
use crate::utils::parse_date;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Source account (id {0}) not found")]
    MissingSourceAccount(i64),
    #[error("Destination account (id {0}) not found")]
    MissingDestinationAccount(i64),
    #[error("Transfer requires a destination account")]
    DestinationRequired,
    #[error("Source and destination accounts must differ")]
    SameSourceAndDestination,
    #[error("Only 'Mutasi' entries may carry a destination account")]
    UnexpectedDestination,
    #[error("No account of kind 'cash' exists for 'Tarik Tunai dari'")]
    NoCashAccount,
    #[error("More than one 'cash' account exists; 'Tarik Tunai dari' is ambiguous")]
    AmbiguousCashAccount,
    #[error("Transaction {0} not found")]
    MissingEntry(i64),
}

/// A ledger entry as proposed by the caller, before it is committed.
#[derive(Debug, Clone)]
pub struct Entry {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub sub_category: Option<String>,
    /// Positive magnitude; direction comes from the category group.
    pub amount: Decimal,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
    pub receipt: Option<String>,
}

/// The per-account balance changes an entry produces: one debit or credit for
/// ordinary entries, a debit/credit pair of equal magnitude for transfers.
pub fn signed_deltas(
    category: &str,
    amount: Decimal,
    account_id: i64,
    destination_account_id: Option<i64>,
) -> Vec<(i64, Decimal)> {
    match CategoryKind::classify(category) {
        CategoryKind::Income => vec![(account_id, amount)],
        CategoryKind::Transfer => {
            let mut deltas = vec![(account_id, -amount)];
            if let Some(dest) = destination_account_id {
                deltas.push((dest, amount));
            }
            deltas
        }
        _ => vec![(account_id, -amount)],
    }
}

/// Resolve the destination of a "Mutasi" entry. For the reserved
/// "Tarik Tunai dari" sub-category the destination is the single account of
/// kind `cash`; otherwise the caller's explicit choice is used. Non-transfer
/// categories never have a destination.
pub fn resolve_destination(
    conn: &Connection,
    category: &str,
    sub_category: Option<&str>,
    explicit: Option<i64>,
) -> Result<Option<i64>> {
    if CategoryKind::classify(category) != CategoryKind::Transfer {
        return Ok(None);
    }
    if sub_category == Some(SUB_WITHDRAW) {
        let mut stmt = conn.prepare("SELECT id FROM accounts WHERE kind=?1 ORDER BY id")?;
        let ids: Vec<i64> = stmt
            .query_map(params![AccountKind::Cash.as_str()], |r| r.get(0))?
            .collect::<std::result::Result<_, _>>()?;
        return match ids.as_slice() {
            [] => Err(LedgerError::NoCashAccount.into()),
            [id] => Ok(Some(*id)),
            _ => Err(LedgerError::AmbiguousCashAccount.into()),
        };
    }
    match explicit {
        Some(id) => Ok(Some(id)),
        None => Err(LedgerError::DestinationRequired.into()),
    }
}

fn account_exists(conn: &Connection, id: i64) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM accounts WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

/// Validation runs before any write; a failed check leaves no partial state.
fn validate(conn: &Connection, entry: &Entry) -> Result<()> {
    if entry.amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount(entry.amount).into());
    }
    if !account_exists(conn, entry.account_id)? {
        return Err(LedgerError::MissingSourceAccount(entry.account_id).into());
    }
    match CategoryKind::classify(&entry.category) {
        CategoryKind::Transfer => {
            let dest = entry
                .destination_account_id
                .ok_or(LedgerError::DestinationRequired)?;
            if dest == entry.account_id {
                return Err(LedgerError::SameSourceAndDestination.into());
            }
            if !account_exists(conn, dest)? {
                return Err(LedgerError::MissingDestinationAccount(dest).into());
            }
        }
        _ => {
            if entry.destination_account_id.is_some() {
                return Err(LedgerError::UnexpectedDestination.into());
            }
        }
    }
    Ok(())
}

/// Balances are stored as decimal TEXT, so deltas are read-modify-write.
/// A missing account is skipped: reverts against an account the user has
/// since deleted have nothing to update (orphans are reported by `doctor`).
fn apply_delta(conn: &Connection, account_id: i64, delta: Decimal) -> Result<()> {
    let current: Option<String> = conn
        .query_row(
            "SELECT balance FROM accounts WHERE id=?1",
            params![account_id],
            |r| r.get(0),
        )
        .optional()?;
    let Some(current) = current else {
        return Ok(());
    };
    let balance = current
        .parse::<Decimal>()
        .with_context(|| format!("Invalid balance '{}' for account {}", current, account_id))?;
    conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2",
        params![(balance + delta).to_string(), account_id],
    )?;
    Ok(())
}

/// Commit a new entry: insert the row, then apply its deltas, atomically.
pub fn record(conn: &mut Connection, entry: &Entry) -> Result<i64> {
    let tx = conn.transaction()?;
    validate(&tx, entry)?;
    tx.execute(
        "INSERT INTO transactions(date, description, category, sub_category, amount,
                                  account_id, destination_account_id, receipt)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            entry.date.to_string(),
            entry.description,
            entry.category,
            entry.sub_category,
            entry.amount.to_string(),
            entry.account_id,
            entry.destination_account_id,
            entry.receipt,
        ],
    )?;
    let id = tx.last_insert_rowid();
    for (account, delta) in signed_deltas(
        &entry.category,
        entry.amount,
        entry.account_id,
        entry.destination_account_id,
    ) {
        apply_delta(&tx, account, delta)?;
    }
    tx.commit()?;
    Ok(id)
}

/// Replace an entry: revert the old deltas, then apply the new ones, even
/// when the accounts are unchanged. All inside one transaction.
pub fn amend(conn: &mut Connection, id: i64, entry: &Entry) -> Result<()> {
    let tx = conn.transaction()?;
    let old = load_entry(&tx, id)?.ok_or(LedgerError::MissingEntry(id))?;
    validate(&tx, entry)?;
    for (account, delta) in signed_deltas(
        &old.category,
        old.amount,
        old.account_id,
        old.destination_account_id,
    ) {
        apply_delta(&tx, account, -delta)?;
    }
    tx.execute(
        "UPDATE transactions SET date=?1, description=?2, category=?3, sub_category=?4,
                amount=?5, account_id=?6, destination_account_id=?7, receipt=?8
         WHERE id=?9",
        params![
            entry.date.to_string(),
            entry.description,
            entry.category,
            entry.sub_category,
            entry.amount.to_string(),
            entry.account_id,
            entry.destination_account_id,
            entry.receipt,
            id,
        ],
    )?;
    for (account, delta) in signed_deltas(
        &entry.category,
        entry.amount,
        entry.account_id,
        entry.destination_account_id,
    ) {
        apply_delta(&tx, account, delta)?;
    }
    tx.commit()?;
    Ok(())
}

/// Remove an entry: revert its deltas, then delete the row, atomically.
pub fn void(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let old = load_entry(&tx, id)?.ok_or(LedgerError::MissingEntry(id))?;
    for (account, delta) in signed_deltas(
        &old.category,
        old.amount,
        old.account_id,
        old.destination_account_id,
    ) {
        apply_delta(&tx, account, -delta)?;
    }
    tx.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    tx.commit()?;
    Ok(())
}

/// Toggle the reconciled flag. No balance effect.
pub fn strike(conn: &Connection, id: i64) -> Result<bool> {
    let entry = load_entry(conn, id)?.ok_or(LedgerError::MissingEntry(id))?;
    let new_value = !entry.struck;
    conn.execute(
        "UPDATE transactions SET struck=?1 WHERE id=?2",
        params![new_value, id],
    )?;
    Ok(new_value)
}

pub fn load_entry(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, description, category, sub_category, amount,
                account_id, destination_account_id, receipt, struck
         FROM transactions WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    let Some(r) = rows.next()? else {
        return Ok(None);
    };
    let date: String = r.get(1)?;
    let amount: String = r.get(5)?;
    Ok(Some(Transaction {
        id: r.get(0)?,
        date: parse_date(&date)?,
        description: r.get(2)?,
        category: r.get(3)?,
        sub_category: r.get(4)?,
        amount: amount
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount))?,
        account_id: r.get(6)?,
        destination_account_id: r.get(7)?,
        receipt: r.get(8)?,
        struck: r.get(9)?,
    }))
}

/// Recompute what an account's balance should be from its opening balance and
/// the full transaction history. `doctor` compares this with the stored value.
pub fn expected_balance(
    conn: &Connection,
    account_id: i64,
    opening_balance: Decimal,
) -> Result<Decimal> {
    let mut stmt = conn.prepare(
        "SELECT category, amount, account_id, destination_account_id
         FROM transactions WHERE account_id=?1 OR destination_account_id=?1",
    )?;
    let rows = stmt.query_map(params![account_id], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, i64>(2)?,
            r.get::<_, Option<i64>>(3)?,
        ))
    })?;
    let mut balance = opening_balance;
    for row in rows {
        let (category, amount_s, source, dest) = row?;
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in transactions", amount_s))?;
        for (account, delta) in signed_deltas(&category, amount, source, dest) {
            if account == account_id {
                balance += delta;
            }
        }
    }
    Ok(balance)
}
