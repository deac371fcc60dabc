// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use cropledger::{
    models::{IncomeRecord, IncomeStatus, TransactionType},
    store::Books,
};
use rust_decimal::Decimal;

fn income(description: &str) -> IncomeRecord {
    IncomeRecord {
        id: 0,
        description: description.to_string(),
        amount: Decimal::from(100),
        source: "Crop Sales".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        status: IncomeStatus::Received,
    }
}

#[test]
fn ids_are_monotonic_and_never_reused() {
    let mut books = Books::default();
    let a = books.incomes.add(income("first"));
    let b = books.incomes.add(income("second"));
    assert_eq!((a, b), (1, 2));

    books.incomes.remove(b).unwrap();
    let c = books.incomes.add(income("third"));
    // The freed id 2 must not come back
    assert_eq!(c, 3);
}

#[test]
fn entry_collections_insert_at_front() {
    let mut books = Books::default();
    books.incomes.add(income("older"));
    books.incomes.add(income("newer"));
    let names: Vec<&str> = books
        .incomes
        .iter()
        .map(|i| i.description.as_str())
        .collect();
    assert_eq!(names, ["newer", "older"]);
}

#[test]
fn ledger_appends_in_arrival_order() {
    let mut books = Books::default();
    let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    books.post(d, TransactionType::Income, "a", "Crop Sales", Decimal::from(10), None);
    books.post(d, TransactionType::Expense, "b", "Seeds", Decimal::from(5), None);
    let descriptions: Vec<&str> = books
        .ledger
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, ["a", "b"]);
}

#[test]
fn remove_missing_id_is_an_error() {
    let mut books = Books::default();
    let err = books.incomes.remove(42).unwrap_err();
    assert_eq!(err.to_string(), "record 42 not found");
}

#[test]
fn update_edits_in_place_and_reports_missing_ids() {
    let mut books = Books::default();
    let id = books.incomes.add(income("draft"));
    let old = books
        .incomes
        .update(id, |i| {
            let old = i.amount;
            i.amount = Decimal::from(250);
            old
        })
        .unwrap();
    assert_eq!(old, Decimal::from(100));
    assert_eq!(books.incomes.get(id).unwrap().amount, Decimal::from(250));

    let err = books.incomes.update(99, |_| {}).unwrap_err();
    assert_eq!(err.to_string(), "record 99 not found");
}

#[test]
fn post_applies_signs_from_the_type() {
    let mut books = Books::default();
    let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    books.post(d, TransactionType::Income, "in", "Crop Sales", Decimal::from(100), None);
    // Magnitude passed positive, but debits land negative regardless
    books.post(d, TransactionType::Expense, "out", "Seeds", Decimal::from(40), None);
    books.post(
        d,
        TransactionType::LoanPayment,
        "emi",
        "Loan",
        Decimal::from(25),
        None,
    );
    let amounts: Vec<String> = books.ledger.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, ["100", "-40", "-25"]);
}

#[test]
fn remove_postings_drops_only_the_matching_reference() {
    let mut books = Books::default();
    let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    books.post(
        d,
        TransactionType::Income,
        "keep",
        "Crop Sales",
        Decimal::from(10),
        Some("INV-001".to_string()),
    );
    books.post(
        d,
        TransactionType::Expense,
        "drop",
        "Seeds",
        Decimal::from(5),
        Some("EXP-001".to_string()),
    );
    let dropped = books.remove_postings("EXP-001");
    assert_eq!(dropped, 1);
    assert_eq!(books.ledger.len(), 1);
    assert_eq!(books.ledger.iter().next().unwrap().description, "keep");
}
