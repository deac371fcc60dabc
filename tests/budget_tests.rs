// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cropledger::{cli, commands::budgets, store::Books};
use rust_decimal::Decimal;

fn run(books: &mut Books, argv: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["cropledger", "budget"];
    full.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(full);
    if let Some(("budget", m)) = matches.subcommand() {
        budgets::handle(books, m)
    } else {
        panic!("no budget subcommand");
    }
}

#[test]
fn set_creates_then_updates_without_touching_spent() {
    let mut books = Books::default();
    run(&mut books, &["set", "--category", "Seeds", "--amount", "10000"]).unwrap();
    run(&mut books, &["spend", "--category", "Seeds", "--amount", "2500"]).unwrap();
    run(&mut books, &["set", "--category", "Seeds", "--amount", "12000"]).unwrap();

    let b = books.budgets.get(1).unwrap();
    assert_eq!(b.budgeted, Decimal::from(12000));
    assert_eq!(b.spent, Decimal::from(2500));
    // Still one budget row for the category
    assert_eq!(books.budgets.len(), 1);
}

#[test]
fn set_rejects_unknown_categories() {
    let mut books = Books::default();
    let err = run(&mut books, &["set", "--category", "Drones", "--amount", "5000"]).unwrap_err();
    assert!(err.to_string().contains("Unknown expense category 'Drones'"));
}

#[test]
fn spend_requires_an_existing_budget() {
    let mut books = Books::default();
    let err = run(&mut books, &["spend", "--category", "Seeds", "--amount", "100"]).unwrap_err();
    assert!(err.to_string().contains("No budget for category 'Seeds'"));
}

#[test]
fn spend_accumulates_case_insensitively() {
    let mut books = Books::default();
    run(&mut books, &["set", "--category", "Labor", "--amount", "4000"]).unwrap();
    run(&mut books, &["spend", "--category", "labor", "--amount", "1500"]).unwrap();
    run(&mut books, &["spend", "--category", "LABOR", "--amount", "500"]).unwrap();
    assert_eq!(books.budgets.get(1).unwrap().spent, Decimal::from(2000));
}

#[test]
fn status_bands_move_at_seventy_and_ninety_percent() {
    let mut books = Books::default();
    run(&mut books, &["set", "--category", "Seeds", "--amount", "1000"]).unwrap();

    run(&mut books, &["spend", "--category", "Seeds", "--amount", "699"]).unwrap();
    assert_eq!(budgets::status_rows(&books, None)[0].status, "On Track");

    // 699 + 1 = 700, exactly 70%
    run(&mut books, &["spend", "--category", "Seeds", "--amount", "1"]).unwrap();
    let row = &budgets::status_rows(&books, None)[0];
    assert_eq!(row.used_pct.parse::<Decimal>().unwrap(), Decimal::from(70));
    assert_eq!(row.status, "Warning");

    run(&mut books, &["spend", "--category", "Seeds", "--amount", "199"]).unwrap();
    assert_eq!(budgets::status_rows(&books, None)[0].status, "Warning");

    run(&mut books, &["spend", "--category", "Seeds", "--amount", "1"]).unwrap();
    let row = &budgets::status_rows(&books, None)[0];
    assert_eq!(row.used_pct.parse::<Decimal>().unwrap(), Decimal::from(90));
    assert_eq!(row.status, "Over Budget");
}

#[test]
fn zero_budget_reads_as_fully_on_track() {
    let mut books = Books::default();
    run(&mut books, &["set", "--category", "Transport", "--amount", "500"]).unwrap();
    if let Some(b) = books.budgets.get_mut(1) {
        b.budgeted = Decimal::ZERO;
        b.spent = Decimal::from(300);
    }
    let row = &budgets::status_rows(&books, None)[0];
    assert_eq!(row.used_pct.parse::<Decimal>().unwrap(), Decimal::ZERO);
    assert_eq!(row.status, "On Track");
}

#[test]
fn status_can_single_out_one_category() {
    let mut books = Books::default();
    run(&mut books, &["set", "--category", "Seeds", "--amount", "1000"]).unwrap();
    run(&mut books, &["set", "--category", "Labor", "--amount", "2000"]).unwrap();

    let rows = budgets::status_rows(&books, Some("labor"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Labor");

    let err = run(&mut books, &["status", "--category", "Drones"]).unwrap_err();
    assert!(err.to_string().contains("No budget for category 'Drones'"));
}
