// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Transfer fee and preview calculator. Pure: nothing here touches the
//! ledger. The fee is advisory only; the institution charges it outside the
//! tracked accounts, so committed transfers always move exactly `amount`.

use crate::models::{Account, AccountKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// Fixed fee table by (source kind, destination kind). Inter-bank transfers
/// above 1,000,000 use the premium rail.
pub fn transfer_fee(from: AccountKind, to: AccountKind, amount: Decimal) -> Decimal {
    match (from, to) {
        (AccountKind::Bank, AccountKind::Bank) => {
            if amount > Decimal::from(1_000_000) {
                Decimal::from(6_500)
            } else {
                Decimal::from(2_500)
            }
        }
        (AccountKind::Ewallet, AccountKind::Bank) => Decimal::from(2_500),
        _ => Decimal::ZERO,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferPreview {
    pub fee: Decimal,
    /// amount + fee; what the user will be out of pocket, not what the
    /// ledger records.
    pub total_deduction: Decimal,
    pub source_balance_after: Decimal,
    pub destination_balance_after: Decimal,
    pub insufficient_funds: bool,
}

/// Project the post-transfer balances and the advisory fee for display
/// before submission.
pub fn preview(from: &Account, to: &Account, amount: Decimal) -> TransferPreview {
    let fee = transfer_fee(from.kind, to.kind, amount);
    let total_deduction = amount + fee;
    TransferPreview {
        fee,
        total_deduction,
        source_balance_after: from.balance - amount,
        destination_balance_after: to.balance + amount,
        insufficient_funds: from.balance < total_deduction,
    }
}
