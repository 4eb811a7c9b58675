// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::models::{Account, AccountKind};
use dompet::transfer::{preview, transfer_fee};
use rust_decimal::Decimal;

fn account(kind: AccountKind, balance: i64) -> Account {
    Account {
        id: 1,
        name: "A".into(),
        kind,
        opening_balance: Decimal::from(balance),
        balance: Decimal::from(balance),
        is_savings: false,
        color: None,
    }
}

#[test]
fn fee_table() {
    use AccountKind::*;
    assert_eq!(
        transfer_fee(Bank, Bank, Decimal::from(500_000)),
        Decimal::from(2_500)
    );
    assert_eq!(
        transfer_fee(Bank, Bank, Decimal::from(1_000_000)),
        Decimal::from(2_500)
    );
    assert_eq!(
        transfer_fee(Bank, Bank, Decimal::from(1_000_001)),
        Decimal::from(6_500)
    );
    assert_eq!(
        transfer_fee(Ewallet, Bank, Decimal::from(2_000_000)),
        Decimal::from(2_500)
    );
    assert_eq!(
        transfer_fee(Bank, Ewallet, Decimal::from(2_000_000)),
        Decimal::ZERO
    );
    assert_eq!(
        transfer_fee(Ewallet, Ewallet, Decimal::from(50_000)),
        Decimal::ZERO
    );
    assert_eq!(
        transfer_fee(Bank, Cash, Decimal::from(50_000)),
        Decimal::ZERO
    );
}

#[test]
fn preview_projects_balances_without_fee() {
    let from = account(AccountKind::Bank, 100_000);
    let to = account(AccountKind::Ewallet, 0);
    let p = preview(&from, &to, Decimal::from(20_000));
    assert_eq!(p.fee, Decimal::ZERO);
    assert_eq!(p.total_deduction, Decimal::from(20_000));
    assert_eq!(p.source_balance_after, Decimal::from(80_000));
    assert_eq!(p.destination_balance_after, Decimal::from(20_000));
    assert!(!p.insufficient_funds);
}

#[test]
fn insufficient_when_balance_below_amount_plus_fee() {
    let from = account(AccountKind::Bank, 101_000);
    let to = account(AccountKind::Bank, 0);
    // 100,000 + 2,500 fee > 101,000 even though the amount alone fits.
    let p = preview(&from, &to, Decimal::from(100_000));
    assert_eq!(p.fee, Decimal::from(2_500));
    assert_eq!(p.total_deduction, Decimal::from(102_500));
    assert!(p.insufficient_funds);
}
