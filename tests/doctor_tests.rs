// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::commands::doctor;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    dompet::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,opening_balance,balance) VALUES \
         (1,'BCA','bank','100000','100000')",
        [],
    )
    .unwrap();
    conn
}

fn issues_of(conn: &Connection, kind: &str) -> usize {
    doctor::audit(conn)
        .unwrap()
        .iter()
        .filter(|row| row[0] == kind)
        .count()
}

#[test]
fn clean_database_has_no_issues() {
    let conn = setup();
    assert!(doctor::audit(&conn).unwrap().is_empty());
}

#[test]
fn detects_balance_drift() {
    let conn = setup();
    // Row written without its compensating balance update.
    conn.execute(
        "INSERT INTO transactions(date,description,category,sub_category,amount,account_id) \
         VALUES ('2025-08-01','Belanja','Pengeluaran','Makanan','30000',1)",
        [],
    )
    .unwrap();
    assert_eq!(issues_of(&conn, "balance_drift"), 1);
}

#[test]
fn detects_orphaned_account_reference() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,description,category,sub_category,amount,account_id) \
         VALUES ('2025-08-01','Belanja','Pengeluaran','Makanan','30000',99)",
        [],
    )
    .unwrap();
    assert_eq!(issues_of(&conn, "orphaned_account_ref"), 1);
}

#[test]
fn detects_unattributed_debt_payment() {
    let conn = setup();
    conn.execute(
        "INSERT INTO debts(name,total_amount,remaining_amount) VALUES ('KPR','1000000','800000')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(date,description,category,sub_category,amount,account_id) \
         VALUES ('2025-08-01','Cicilan','Bayar Hutang','KPRS','200000',1)",
        [],
    )
    .unwrap();
    // The matching payment is fine, the typo is flagged.
    conn.execute(
        "INSERT INTO transactions(date,description,category,sub_category,amount,account_id) \
         VALUES ('2025-08-02','Cicilan','Bayar Hutang',' kpr ','200000',1)",
        [],
    )
    .unwrap();
    assert_eq!(issues_of(&conn, "unattributed_debt_payment"), 1);
}

#[test]
fn detects_transfer_without_destination() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date,description,category,sub_category,amount,account_id) \
         VALUES ('2025-08-01','Top up','Mutasi','Alokasi saldo ke','30000',1)",
        [],
    )
    .unwrap();
    assert_eq!(issues_of(&conn, "transfer_without_destination"), 1);
}
