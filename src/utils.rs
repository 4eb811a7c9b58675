// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::TxRow;
use crate::models::{Account, AccountKind, CategoryRow, Debt, Goal};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::str::FromStr;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))
}

/// Rupiah display: no decimals, dot thousands separators.
pub fn fmt_idr(d: &Decimal) -> String {
    let rounded = d.round_dp(0);
    let digits = rounded.abs().to_string();
    let mut rev = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            rev.push('.');
        }
        rev.push(ch);
    }
    let body: String = rev.chars().rev().collect();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-Rp {}", body)
    } else {
        format!("Rp {}", body)
    }
}

/// Key used for case/whitespace-insensitive name matching (debt attribution,
/// account lookups in read paths).
pub fn normalize_name(s: &str) -> String {
    s.trim().to_lowercase()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_account(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name))?;
    Ok(id)
}

fn decimal_column(s: String, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid {} '{}' in database", what, s))
}

fn account_from_row(
    id: i64,
    name: String,
    kind: String,
    opening: String,
    balance: String,
    is_savings: bool,
    color: Option<String>,
) -> Result<Account> {
    Ok(Account {
        id,
        kind: AccountKind::from_str(&kind)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Account '{}'", name))?,
        opening_balance: decimal_column(opening, "opening balance")?,
        balance: decimal_column(balance, "balance")?,
        name,
        is_savings,
        color,
    })
}

pub fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, opening_balance, balance, is_savings, color
         FROM accounts ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, bool>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, kind, opening, balance, is_savings, color) = row?;
        out.push(account_from_row(
            id, name, kind, opening, balance, is_savings, color,
        )?);
    }
    Ok(out)
}

pub fn account_by_id(conn: &Connection, id: i64) -> Result<Option<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, kind, opening_balance, balance, is_savings, color
         FROM accounts WHERE id=?1",
    )?;
    let mut rows = stmt.query(params![id])?;
    if let Some(r) = rows.next()? {
        let acc = account_from_row(
            r.get(0)?,
            r.get(1)?,
            r.get(2)?,
            r.get(3)?,
            r.get(4)?,
            r.get(5)?,
            r.get(6)?,
        )?;
        return Ok(Some(acc));
    }
    Ok(None)
}

pub fn load_categories(conn: &Connection) -> Result<Vec<CategoryRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, category, sub_category, budget FROM categories
         ORDER BY category, sub_category",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, category, sub_category, budget) = row?;
        out.push(CategoryRow {
            id,
            category,
            sub_category,
            budget: decimal_column(budget, "budget")?,
        });
    }
    Ok(out)
}

pub fn load_debts(conn: &Connection) -> Result<Vec<Debt>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, total_amount, remaining_amount, interest_rate,
                minimum_payment, due_date, description
         FROM debts ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, Option<String>>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
            r.get::<_, Option<String>>(7)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, total, remaining, rate, min_pay, due, description) = row?;
        out.push(Debt {
            id,
            total_amount: decimal_column(total, "debt total")?,
            remaining_amount: decimal_column(remaining, "debt remaining")?,
            interest_rate: rate.map(|s| decimal_column(s, "interest rate")).transpose()?,
            minimum_payment: min_pay
                .map(|s| decimal_column(s, "minimum payment"))
                .transpose()?,
            due_date: due.map(|s| parse_date(&s)).transpose()?,
            name,
            description,
        });
    }
    Ok(out)
}

/// Fetch the lightweight rows the aggregations run over, optionally limited
/// to an inclusive date range.
pub fn load_tx_rows(
    conn: &Connection,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<TxRow>> {
    let mut sql =
        String::from("SELECT date, category, sub_category, amount FROM transactions WHERE 1=1");
    let mut params_vec: Vec<String> = Vec::new();
    if let Some(d) = from {
        sql.push_str(" AND date>=?");
        params_vec.push(d.to_string());
    }
    if let Some(d) = to {
        sql.push_str(" AND date<=?");
        params_vec.push(d.to_string());
    }
    sql.push_str(" ORDER BY date, id");

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(rusqlite::params_from_iter(params_vec.iter()))?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let amount: String = r.get(3)?;
        out.push(TxRow {
            date: parse_date(&date)?,
            category: r.get(1)?,
            sub_category: r.get(2)?,
            amount: decimal_column(amount, "amount")?,
        });
    }
    Ok(out)
}

pub fn load_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, deadline, description FROM goals ORDER BY deadline, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, Option<String>>(4)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, name, target, deadline, description) = row?;
        out.push(Goal {
            id,
            target_amount: decimal_column(target, "goal target")?,
            deadline: deadline.map(|s| parse_date(&s)).transpose()?,
            name,
            description,
        });
    }
    Ok(out)
}
