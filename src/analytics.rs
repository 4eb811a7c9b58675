// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart-ready aggregates over already-fetched transaction rows. Everything
//! here is pure and safe to re-run; nothing mutates shared state.

use crate::models::{Account, CategoryKind, CategoryRow, Debt, GROUP_DEBT_PAYMENT, OTHER_BUCKET};
use crate::utils::normalize_name;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// The slice of a transaction the aggregations need.
#[derive(Debug, Clone)]
pub struct TxRow {
    pub date: NaiveDate,
    pub category: String,
    pub sub_category: Option<String>,
    pub amount: Decimal,
}

impl TxRow {
    pub fn kind(&self) -> CategoryKind {
        CategoryKind::classify(&self.category)
    }

    pub fn month_key(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub savings: Decimal,
}

/// Income/expense/savings per calendar month, in ascending chronological
/// order. The order comes from the (year, month) key, never from the
/// formatted label. Transfers move money between own accounts and are
/// excluded.
pub fn monthly_series(rows: &[TxRow]) -> Vec<MonthlyPoint> {
    let mut buckets: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for row in rows {
        match row.kind() {
            CategoryKind::Transfer => continue,
            CategoryKind::Income => {
                buckets
                    .entry((row.date.year(), row.date.month()))
                    .or_insert((Decimal::ZERO, Decimal::ZERO))
                    .0 += row.amount;
            }
            _ => {
                buckets
                    .entry((row.date.year(), row.date.month()))
                    .or_insert((Decimal::ZERO, Decimal::ZERO))
                    .1 += row.amount.abs();
            }
        }
    }
    buckets
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyPoint {
            year,
            month,
            label: NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %y").to_string())
                .unwrap_or_else(|| format!("{:04}-{:02}", year, month)),
            income,
            expense,
            savings: income - expense,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub total: Decimal,
}

/// Expense composition by sub-category, largest first. Unlabeled expenses
/// land in the "Lainnya" bucket. Shares are not stored here; compute them
/// against the live total with `share_of_total` so they never go stale.
pub fn category_composition(rows: &[TxRow]) -> Vec<CategorySlice> {
    let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in rows {
        match row.kind() {
            CategoryKind::Income | CategoryKind::Transfer => continue,
            _ => {}
        }
        let name = match row.sub_category.as_deref() {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => OTHER_BUCKET.to_string(),
        };
        *buckets.entry(name).or_insert(Decimal::ZERO) += row.amount.abs();
    }
    let mut slices: Vec<CategorySlice> = buckets
        .into_iter()
        .map(|(name, total)| CategorySlice { name, total })
        .collect();
    slices.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    slices
}

/// Percent of `total`, zero when the total is zero.
pub fn share_of_total(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        Decimal::ZERO
    } else {
        part / total * Decimal::from(100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Safe,
    Warning,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Safe => "safe",
            BudgetStatus::Warning => "warning",
            BudgetStatus::Over => "over",
        }
    }
}

/// Safe below 80%, warning from 80% up to (not including) 100%, over at 100%.
pub fn classify_budget(spent: Decimal, budget: Decimal) -> (Decimal, BudgetStatus) {
    let percentage = if budget > Decimal::ZERO {
        spent / budget * Decimal::from(100)
    } else {
        Decimal::ZERO
    };
    let status = if percentage >= Decimal::from(100) {
        BudgetStatus::Over
    } else if percentage >= Decimal::from(80) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Safe
    };
    (percentage, status)
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetUsage {
    pub sub_category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub status: BudgetStatus,
}

/// Budget utilization for one calendar month (`YYYY-MM`), highest usage
/// first. Only expense sub-categories with a nonzero ceiling participate.
pub fn budget_utilization(
    rows: &[TxRow],
    categories: &[CategoryRow],
    month: &str,
) -> Vec<BudgetUsage> {
    let mut usages: Vec<BudgetUsage> = categories
        .iter()
        .filter(|c| {
            c.budget > Decimal::ZERO && CategoryKind::classify(&c.category) == CategoryKind::Expense
        })
        .map(|c| {
            let spent: Decimal = rows
                .iter()
                .filter(|r| {
                    r.kind() != CategoryKind::Income
                        && r.kind() != CategoryKind::Transfer
                        && r.month_key() == month
                        && r.sub_category.as_deref() == Some(c.sub_category.as_str())
                })
                .map(|r| r.amount.abs())
                .sum();
            let (percentage, status) = classify_budget(spent, c.budget);
            BudgetUsage {
                sub_category: c.sub_category.clone(),
                budget: c.budget,
                spent,
                remaining: (c.budget - spent).max(Decimal::ZERO),
                percentage,
                status,
            }
        })
        .collect();
    usages.sort_by(|a, b| {
        b.percentage
            .cmp(&a.percentage)
            .then_with(|| a.sub_category.cmp(&b.sub_category))
    });
    usages
}

#[derive(Debug, Clone, Serialize)]
pub struct DebtPaid {
    pub debt_id: i64,
    pub name: String,
    pub paid: Decimal,
}

/// Amount paid per debt: the sum of "Bayar Hutang" entries whose sub-category
/// equals the debt name, ignoring case and surrounding whitespace. Payments
/// matching no debt contribute nowhere; `doctor` reports them.
pub fn debt_paid_totals(rows: &[TxRow], debts: &[Debt]) -> Vec<DebtPaid> {
    debts
        .iter()
        .map(|debt| {
            let key = normalize_name(&debt.name);
            let paid = rows
                .iter()
                .filter(|r| {
                    r.category == GROUP_DEBT_PAYMENT
                        && r.sub_category
                            .as_deref()
                            .map(|s| normalize_name(s) == key)
                            .unwrap_or(false)
                })
                .map(|r| r.amount.abs())
                .sum();
            DebtPaid {
                debt_id: debt.id,
                name: debt.name.clone(),
                paid,
            }
        })
        .collect()
}

/// Pooled savings figure: goals do not track individually, they all share the
/// sum of balances across accounts flagged as savings.
pub fn savings_progress(accounts: &[Account]) -> Decimal {
    accounts
        .iter()
        .filter(|a| a.is_savings)
        .map(|a| a.balance)
        .sum()
}
