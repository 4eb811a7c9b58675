// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::{cli, commands::exporter};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    dompet::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO accounts(id,name,kind,opening_balance,balance) VALUES (1,'BCA','bank','100000','100000')",
        [],
    )
    .unwrap();
    conn
}

#[test]
fn export_transactions_streams_pretty_json() {
    let conn = base_conn();
    conn.execute(
        "INSERT INTO transactions(date,description,category,sub_category,amount,account_id) VALUES \
        ('2025-01-02','Belanja mingguan','Pengeluaran','Makanan','12500',1)",
        [],
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "dompet",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "date": "2025-01-02",
                "description": "Belanja mingguan",
                "category": "Pengeluaran",
                "sub_category": "Makanan",
                "amount": "12500",
                "account": "BCA",
                "to_account": null,
                "struck": false
            }
        ])
    );
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "dompet",
        "export",
        "transactions",
        "--format",
        "xml",
        "--out",
        &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
