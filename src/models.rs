// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category group for incoming money. Credits the source account.
pub const GROUP_INCOME: &str = "Pemasukan";
/// Default expense group created for new users.
pub const GROUP_EXPENSE: &str = "Pengeluaran";
/// Reserved group for transfers between two accounts. Synthesized, never stored.
pub const GROUP_TRANSFER: &str = "Mutasi";
/// Reserved group for debt payments. Synthesized from the debt list, never stored.
pub const GROUP_DEBT_PAYMENT: &str = "Bayar Hutang";
/// Stored group for debt-related rows.
pub const GROUP_DEBT: &str = "Hutang";

/// Fixed sub-categories of the synthetic "Mutasi" group.
pub const SUB_ALLOCATE: &str = "Alokasi saldo ke";
pub const SUB_WITHDRAW: &str = "Tarik Tunai dari";

/// Bucket for expense transactions without a sub-category.
pub const OTHER_BUCKET: &str = "Lainnya";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Bank,
    Ewallet,
    Cash,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Bank => "bank",
            AccountKind::Ewallet => "ewallet",
            AccountKind::Cash => "cash",
        }
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Ok(AccountKind::Bank),
            "ewallet" | "e-wallet" => Ok(AccountKind::Ewallet),
            "cash" => Ok(AccountKind::Cash),
            other => Err(format!(
                "unknown account kind '{}' (use bank|ewallet|cash)",
                other
            )),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic kind of a category group, inferred from the group label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
    Transfer,
    Debt,
}

impl CategoryKind {
    /// Classify a category group label. "Pemasukan" is income, "Mutasi" is a
    /// transfer, "Hutang" is a debt group; anything else, including unknown
    /// labels and "Bayar Hutang", is treated as an expense.
    pub fn classify(group: &str) -> CategoryKind {
        match group {
            GROUP_INCOME => CategoryKind::Income,
            GROUP_TRANSFER => CategoryKind::Transfer,
            GROUP_DEBT => CategoryKind::Debt,
            _ => CategoryKind::Expense,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: AccountKind,
    pub opening_balance: Decimal,
    pub balance: Decimal,
    pub is_savings: bool,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub sub_category: Option<String>,
    /// Positive magnitude; the sign convention comes from the category group.
    pub amount: Decimal,
    pub account_id: i64,
    pub destination_account_id: Option<i64>,
    pub receipt: Option<String>,
    pub struck: bool,
}

/// One stored (group, sub-category) row with its monthly budget ceiling.
/// A zero budget means no ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: i64,
    pub category: String,
    pub sub_category: String,
    pub budget: Decimal,
}

/// One entry of the reconciled taxonomy produced by `catalog::reconcile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub kind: CategoryKind,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub minimum_payment: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub deadline: Option<NaiveDate>,
    pub description: Option<String>,
}
