// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cropledger::{
    cli,
    commands::{expenses, incomes, ledger, loans},
    store::Books,
};

fn run(books: &mut Books, argv: &[&str]) {
    let mut full = vec!["cropledger"];
    full.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some(("income", m)) => incomes::handle(books, m).unwrap(),
        Some(("expense", m)) => expenses::handle(books, m).unwrap(),
        Some(("loan", m)) => loans::handle(books, m).unwrap(),
        other => panic!("unhandled command {:?}", other.map(|(n, _)| n)),
    }
}

fn list_rows(books: &Books, extra: &[&str]) -> anyhow::Result<Vec<ledger::LedgerRow>> {
    let mut full = vec!["cropledger", "ledger", "list"];
    full.extend_from_slice(extra);
    let matches = cli::build_cli().get_matches_from(full);
    if let Some(("ledger", m)) = matches.subcommand() {
        if let Some(("list", sub)) = m.subcommand() {
            return ledger::query_rows(books, sub);
        }
    }
    panic!("no ledger list subcommand");
}

fn summarize(books: &Books, extra: &[&str]) -> ledger::LedgerSummary {
    let mut full = vec!["cropledger", "ledger", "summary"];
    full.extend_from_slice(extra);
    let matches = cli::build_cli().get_matches_from(full);
    if let Some(("ledger", m)) = matches.subcommand() {
        if let Some(("summary", sub)) = m.subcommand() {
            return ledger::summarize(books, sub).unwrap();
        }
    }
    panic!("no ledger summary subcommand");
}

/// Income 15000, expense 8500, income 22000.
fn seed(books: &mut Books) {
    run(books, &[
        "income", "add", "--description", "Wheat harvest sale", "--amount", "15000",
        "--source", "Crop Sales", "--date", "2025-06-01",
    ]);
    run(books, &[
        "expense", "add", "--description", "Urea bags", "--amount", "8500",
        "--category", "Fertilizers", "--date", "2025-06-05",
    ]);
    run(books, &[
        "income", "add", "--description", "Milk contract", "--amount", "22000",
        "--source", "Dairy", "--date", "2025-06-20",
    ]);
}

#[test]
fn running_balance_follows_the_displayed_rows() {
    let mut books = Books::default();
    seed(&mut books);

    let rows = list_rows(&books, &[]).unwrap();
    let balances: Vec<&str> = rows.iter().map(|r| r.balance.as_str()).collect();
    assert_eq!(balances, ["15000", "6500", "28500"]);
    let amounts: Vec<&str> = rows.iter().map(|r| r.amount.as_str()).collect();
    assert_eq!(amounts, ["15000", "-8500", "22000"]);
}

#[test]
fn postings_carry_entry_references() {
    let mut books = Books::default();
    seed(&mut books);

    let rows = list_rows(&books, &[]).unwrap();
    let refs: Vec<&str> = rows.iter().map(|r| r.reference.as_str()).collect();
    assert_eq!(refs, ["INV-001", "EXP-001", "INV-002"]);
}

#[test]
fn removing_an_entry_drops_its_posting() {
    let mut books = Books::default();
    seed(&mut books);

    let matches = cli::build_cli().get_matches_from(["cropledger", "expense", "rm", "1"]);
    if let Some(("expense", m)) = matches.subcommand() {
        expenses::handle(&mut books, m).unwrap();
    } else {
        panic!("no expense subcommand");
    }

    assert!(books.expenses.is_empty());
    let rows = list_rows(&books, &[]).unwrap();
    assert_eq!(rows.len(), 2);
    // The balance recomputes over what is left
    assert_eq!(rows.last().unwrap().balance, "37000");
}

#[test]
fn type_and_search_filters_narrow_the_view() {
    let mut books = Books::default();
    seed(&mut books);
    run(&mut books, &[
        "loan", "add", "--source", "Cooperative Bank", "--principal", "50000",
        "--rate", "7.5", "--tenure", "12", "--start-date", "2025-06-25",
    ]);

    let only_expenses = list_rows(&books, &["--type", "expense"]).unwrap();
    assert_eq!(only_expenses.len(), 1);
    assert_eq!(only_expenses[0].description, "Urea bags");

    let wheat = list_rows(&books, &["--search", "wheat"]).unwrap();
    assert_eq!(wheat.len(), 1);
    assert_eq!(wheat[0].reference, "INV-001");

    // Reference text is searchable too
    let by_ref = list_rows(&books, &["--search", "loan-001"]).unwrap();
    assert_eq!(by_ref.len(), 1);
    assert_eq!(by_ref[0].r#type, "loan_disbursement");
}

#[test]
fn month_filter_and_explicit_bounds_are_exclusive() {
    let mut books = Books::default();
    seed(&mut books);
    run(&mut books, &[
        "income", "add", "--description", "Subsidy tranche", "--amount", "5000",
        "--source", "Government Subsidy", "--date", "2025-07-02",
    ]);

    let june = list_rows(&books, &["--month", "2025-06"]).unwrap();
    assert_eq!(june.len(), 3);

    let clash = list_rows(&books, &["--month", "2025-06", "--from", "2025-06-01"]);
    assert!(clash.is_err());
}

#[test]
fn limit_keeps_the_newest_rows_and_their_balances() {
    let mut books = Books::default();
    seed(&mut books);

    let rows = list_rows(&books, &["--limit", "2"]).unwrap();
    assert_eq!(rows.len(), 2);
    let balances: Vec<&str> = rows.iter().map(|r| r.balance.as_str()).collect();
    // Oldest row trimmed off; balances keep their full-view values
    assert_eq!(balances, ["6500", "28500"]);
}

#[test]
fn summary_reports_absolute_flows_and_signed_net() {
    let mut books = Books::default();
    seed(&mut books);

    let s = summarize(&books, &[]);
    assert_eq!(s.transactions, 3);
    assert_eq!(s.income, "37000");
    assert_eq!(s.expenses, "8500");
    assert_eq!(s.net_cash_flow, "28500");

    let july = summarize(&books, &["--month", "2025-07"]);
    assert_eq!(july.transactions, 0);
    assert_eq!(july.net_cash_flow, "0");
}
