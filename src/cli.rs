// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .about("Personal finance tracker: accounts, ledger, debts, goals, budgets, analytics")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .required(true)
                                .help("bank|ewallet|cash"),
                        )
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(
                            Arg::new("savings")
                                .long("savings")
                                .action(ArgAction::SetTrue)
                                .help("Count this account toward savings goals"),
                        )
                        .arg(Arg::new("color").long("color").help("Display color")),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account (its transactions are kept)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage the category taxonomy")
                .subcommand(
                    Command::new("add")
                        .about("Add a sub-category under a group")
                        .arg(Arg::new("group").required(true).help("e.g. Pengeluaran"))
                        .arg(Arg::new("subcategory").required(true))
                        .arg(
                            Arg::new("budget")
                                .long("budget")
                                .default_value("0")
                                .help("Monthly budget ceiling (0 = none)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("Show the reconciled taxonomy"),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a sub-category")
                        .arg(Arg::new("group").required(true))
                        .arg(Arg::new("subcategory").required(true)),
                )
                .subcommand(
                    Command::new("budget")
                        .about("Set the monthly budget ceiling of a sub-category")
                        .arg(Arg::new("group").required(true))
                        .arg(Arg::new("subcategory").required(true))
                        .arg(Arg::new("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Category group, e.g. Pengeluaran"),
                        )
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(
                            Arg::new("account")
                                .long("account")
                                .required(true)
                                .help("Source account name"),
                        )
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .help("Destination account name (Mutasi only)"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("receipt").long("receipt").help("Receipt path or URL")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction (balances are reverted and reapplied)")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("subcategory").long("subcategory"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("to").long("to"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("receipt").long("receipt")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction (its balance effect is reverted)")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("strike")
                        .about("Toggle the reconciled flag")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move funds between accounts")
                .subcommand(json_flags(
                    Command::new("preview")
                        .about("Show the advisory fee and projected balances")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                ))
                .subcommand(
                    Command::new("exec")
                        .about("Record the transfer on the ledger (fee not deducted)")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(
                            Arg::new("to")
                                .long("to")
                                .help("Destination account; omitted for 'Tarik Tunai dari'"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(
                            Arg::new("subcategory")
                                .long("subcategory")
                                .help("'Alokasi saldo ke' (default) or 'Tarik Tunai dari'"),
                        )
                        .arg(Arg::new("date").long("date")),
                ),
        )
        .subcommand(
            Command::new("debt")
                .about("Track debts")
                .subcommand(
                    Command::new("add")
                        .about("Add a debt")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("total").long("total").required(true))
                        .arg(
                            Arg::new("remaining")
                                .long("remaining")
                                .help("Defaults to the total"),
                        )
                        .arg(Arg::new("rate").long("rate").help("Interest rate, percent"))
                        .arg(Arg::new("min-payment").long("min-payment"))
                        .arg(Arg::new("due").long("due").help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("list").about("List debts")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a debt")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("status").about("Paid totals attributed per debt"),
                )),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals (all goals share the pooled savings balance)")
                .subcommand(
                    Command::new("add")
                        .about("Add a goal")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("deadline").long("deadline").help("YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a goal")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("status").about("Progress against the pooled savings"),
                )),
        )
        .subcommand(
            Command::new("budget").about("Budget ceilings").subcommand(json_flags(
                Command::new("report")
                    .about("Utilization for a month")
                    .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to current")),
            )),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over the ledger")
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income/expense/savings")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(usize))
                                .help("Most recent N months"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expense composition by sub-category")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("balances").about("Account balances and savings pool"),
                )),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Dump transactions to a file")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(Command::new("doctor").about("Audit ledger/balance consistency"))
}
