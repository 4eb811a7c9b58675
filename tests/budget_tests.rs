// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::analytics::{budget_utilization, BudgetStatus};
use dompet::ledger::{self, Entry};
use dompet::utils::{load_categories, load_tx_rows};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    dompet::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,opening_balance,balance) VALUES \
         (1,'BCA','bank','500000','500000')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO categories(category,sub_category,budget) VALUES \
         ('Pengeluaran','Makanan','100000'), ('Pengeluaran','Transportasi','0')",
        [],
    )
    .unwrap();
    conn
}

fn spend(conn: &mut Connection, date: &str, sub: &str, amount: i64) {
    let entry = Entry {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        description: "Belanja".into(),
        category: "Pengeluaran".into(),
        sub_category: Some(sub.into()),
        amount: Decimal::from(amount),
        account_id: 1,
        destination_account_id: None,
        receipt: None,
    };
    ledger::record(conn, &entry).unwrap();
}

#[test]
fn utilization_from_recorded_ledger_entries() {
    let mut conn = setup();
    spend(&mut conn, "2025-08-05", "Makanan", 60_000);
    spend(&mut conn, "2025-08-20", "Makanan", 25_000);
    spend(&mut conn, "2025-07-20", "Makanan", 90_000); // outside the month
    spend(&mut conn, "2025-08-21", "Transportasi", 10_000); // no ceiling

    let rows = load_tx_rows(&conn, None, None).unwrap();
    let categories = load_categories(&conn).unwrap();
    let usages = budget_utilization(&rows, &categories, "2025-08");

    assert_eq!(usages.len(), 1);
    assert_eq!(usages[0].sub_category, "Makanan");
    assert_eq!(usages[0].spent, Decimal::from(85_000));
    assert_eq!(usages[0].percentage, Decimal::from(85));
    assert_eq!(usages[0].status, BudgetStatus::Warning);
}
