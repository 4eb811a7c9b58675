// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::ledger::{self, Entry, LedgerError};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    dompet::db::init_schema(&mut conn).unwrap();
    conn
}

fn add_account(conn: &Connection, name: &str, kind: &str, balance: i64) -> i64 {
    conn.execute(
        "INSERT INTO accounts(name, kind, opening_balance, balance) VALUES (?1,?2,?3,?3)",
        rusqlite::params![name, kind, balance.to_string()],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn balance(conn: &Connection, id: i64) -> Decimal {
    let s: String = conn
        .query_row(
            "SELECT balance FROM accounts WHERE id=?1",
            rusqlite::params![id],
            |r| r.get(0),
        )
        .unwrap();
    s.parse().unwrap()
}

fn expense(account_id: i64, amount: i64) -> Entry {
    Entry {
        date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        description: "Belanja".into(),
        category: "Pengeluaran".into(),
        sub_category: Some("Makanan".into()),
        amount: Decimal::from(amount),
        account_id,
        destination_account_id: None,
        receipt: None,
    }
}

#[test]
fn expense_create_edit_delete_roundtrip() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);

    let id = ledger::record(&mut conn, &expense(a, 30_000)).unwrap();
    assert_eq!(balance(&conn, a), Decimal::from(70_000));

    ledger::amend(&mut conn, id, &expense(a, 50_000)).unwrap();
    assert_eq!(balance(&conn, a), Decimal::from(50_000));

    ledger::void(&mut conn, id).unwrap();
    assert_eq!(balance(&conn, a), Decimal::from(100_000));
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn income_credits_source() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 10_000);
    let mut entry = expense(a, 5_000);
    entry.category = "Pemasukan".into();
    entry.sub_category = Some("Gaji".into());
    ledger::record(&mut conn, &entry).unwrap();
    assert_eq!(balance(&conn, a), Decimal::from(15_000));
}

#[test]
fn transfer_moves_exact_amount_ignoring_fee() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let b = add_account(&conn, "Gopay", "ewallet", 0);

    let entry = Entry {
        date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        description: "Top up".into(),
        category: "Mutasi".into(),
        sub_category: Some("Alokasi saldo ke".into()),
        amount: Decimal::from(20_000),
        account_id: a,
        destination_account_id: Some(b),
        receipt: None,
    };
    ledger::record(&mut conn, &entry).unwrap();
    assert_eq!(balance(&conn, a), Decimal::from(80_000));
    assert_eq!(balance(&conn, b), Decimal::from(20_000));
}

#[test]
fn transfer_edit_moving_destination() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let b = add_account(&conn, "Gopay", "ewallet", 0);
    let c = add_account(&conn, "Ovo", "ewallet", 0);

    let mut entry = Entry {
        date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        description: "Top up".into(),
        category: "Mutasi".into(),
        sub_category: Some("Alokasi saldo ke".into()),
        amount: Decimal::from(20_000),
        account_id: a,
        destination_account_id: Some(b),
        receipt: None,
    };
    let id = ledger::record(&mut conn, &entry).unwrap();

    entry.destination_account_id = Some(c);
    entry.amount = Decimal::from(30_000);
    ledger::amend(&mut conn, id, &entry).unwrap();

    assert_eq!(balance(&conn, a), Decimal::from(70_000));
    assert_eq!(balance(&conn, b), Decimal::ZERO);
    assert_eq!(balance(&conn, c), Decimal::from(30_000));
}

#[test]
fn rejects_non_positive_amount() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let err = ledger::record(&mut conn, &expense(a, 0)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NonPositiveAmount(_))
    ));
    // No partial state: no rows, balance untouched.
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
    assert_eq!(balance(&conn, a), Decimal::from(100_000));
}

#[test]
fn rejects_transfer_to_same_account() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let entry = Entry {
        destination_account_id: Some(a),
        category: "Mutasi".into(),
        ..expense(a, 10_000)
    };
    let err = ledger::record(&mut conn, &entry).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::SameSourceAndDestination)
    ));
}

#[test]
fn rejects_destination_on_plain_expense() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let b = add_account(&conn, "Gopay", "ewallet", 0);
    let entry = Entry {
        destination_account_id: Some(b),
        ..expense(a, 10_000)
    };
    let err = ledger::record(&mut conn, &entry).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::UnexpectedDestination)
    ));
}

#[test]
fn withdraw_cash_resolves_single_cash_account() {
    let conn = setup();
    let _bank = add_account(&conn, "BCA", "bank", 100_000);
    let cash = add_account(&conn, "Dompet", "cash", 0);
    let resolved =
        ledger::resolve_destination(&conn, "Mutasi", Some("Tarik Tunai dari"), None).unwrap();
    assert_eq!(resolved, Some(cash));
}

#[test]
fn withdraw_cash_requires_a_cash_account() {
    let conn = setup();
    add_account(&conn, "BCA", "bank", 100_000);
    let err =
        ledger::resolve_destination(&conn, "Mutasi", Some("Tarik Tunai dari"), None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::NoCashAccount)
    ));
}

#[test]
fn withdraw_cash_is_ambiguous_with_two_cash_accounts() {
    let conn = setup();
    add_account(&conn, "Dompet", "cash", 0);
    add_account(&conn, "Laci", "cash", 0);
    let err =
        ledger::resolve_destination(&conn, "Mutasi", Some("Tarik Tunai dari"), None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LedgerError>(),
        Some(LedgerError::AmbiguousCashAccount)
    ));
}

#[test]
fn unknown_category_group_debits_like_expense() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let mut entry = expense(a, 10_000);
    entry.category = "Sesuatu".into();
    ledger::record(&mut conn, &entry).unwrap();
    assert_eq!(balance(&conn, a), Decimal::from(90_000));
}

#[test]
fn strike_toggles_without_balance_effect() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let id = ledger::record(&mut conn, &expense(a, 30_000)).unwrap();
    assert!(ledger::strike(&conn, id).unwrap());
    assert!(!ledger::strike(&conn, id).unwrap());
    assert_eq!(balance(&conn, a), Decimal::from(70_000));
}

#[test]
fn expected_balance_matches_stored_after_mixed_history() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "bank", 100_000);
    let b = add_account(&conn, "Gopay", "ewallet", 5_000);

    ledger::record(&mut conn, &expense(a, 10_000)).unwrap();
    let mut income = expense(a, 40_000);
    income.category = "Pemasukan".into();
    ledger::record(&mut conn, &income).unwrap();
    let transfer = Entry {
        date: NaiveDate::from_ymd_opt(2025, 8, 11).unwrap(),
        description: "Top up".into(),
        category: "Mutasi".into(),
        sub_category: Some("Alokasi saldo ke".into()),
        amount: Decimal::from(25_000),
        account_id: a,
        destination_account_id: Some(b),
        receipt: None,
    };
    ledger::record(&mut conn, &transfer).unwrap();

    for (id, opening) in [(a, 100_000), (b, 5_000)] {
        let expected = ledger::expected_balance(&conn, id, Decimal::from(opening)).unwrap();
        assert_eq!(expected, balance(&conn, id));
    }
}
