// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{days_until_due, effective_loan_status, emi, next_due_date};
use crate::models::{Loan, LoanStatus, TransactionType};
use crate::store::{Books, StoreError};
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, parse_decimal, pretty_table, today,
};

pub fn handle(books: &mut Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(books, sub)?,
        Some(("list", sub)) => list(books, sub)?,
        Some(("pay", sub)) => pay(books, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn disbursement_reference(id: i64) -> String {
    format!("LOAN-{:03}", id)
}

pub fn payment_reference(id: i64) -> String {
    format!("EMI-{:03}", id)
}

fn add(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let source = sub.get_one::<String>("source").unwrap().to_string();
    let principal = parse_amount(sub.get_one::<String>("principal").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    if rate < Decimal::ZERO {
        bail!("Interest rate must not be negative, got '{}'", rate);
    }
    let tenure = *sub.get_one::<u32>("tenure").unwrap();
    let start = match sub.get_one::<String>("start-date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };

    let installment = emi(principal, rate, tenure);
    let next_due = next_due_date(start);
    let id = books.loans.add(Loan {
        id: 0,
        source: source.clone(),
        principal,
        interest_rate: rate,
        tenure_months: tenure,
        start_date: start,
        emi: installment,
        remaining_amount: principal,
        status: LoanStatus::Active,
        next_due_date: next_due,
    });
    books.post(
        start,
        TransactionType::LoanDisbursement,
        &format!("Loan disbursement - {}", source),
        "Loan",
        principal,
        Some(disbursement_reference(id)),
    );
    println!(
        "Added loan #{} from '{}': EMI {}/month, next due {}",
        id,
        source,
        fmt_money(&installment, &books.settings.currency_symbol),
        next_due
    );
    Ok(())
}

#[derive(Serialize)]
pub struct LoanRow {
    pub id: i64,
    pub source: String,
    pub principal: String,
    pub interest_rate: String,
    pub tenure_months: u32,
    pub emi: String,
    pub remaining: String,
    pub status: String,
    pub next_due_date: String,
    pub days_until_due: i64,
}

pub fn query_rows(books: &Books) -> Vec<LoanRow> {
    let now = today();
    books
        .loans
        .iter()
        .map(|l| LoanRow {
            id: l.id,
            source: l.source.clone(),
            principal: l.principal.to_string(),
            interest_rate: l.interest_rate.to_string(),
            tenure_months: l.tenure_months,
            emi: l.emi.to_string(),
            remaining: l.remaining_amount.to_string(),
            status: effective_loan_status(l, now).to_string(),
            next_due_date: l.next_due_date.to_string(),
            days_until_due: days_until_due(l.next_due_date, now),
        })
        .collect()
}

fn list(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(books);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.source.clone(),
                    r.principal.clone(),
                    r.interest_rate.clone(),
                    r.tenure_months.to_string(),
                    r.emi.clone(),
                    r.remaining.clone(),
                    r.status.clone(),
                    r.next_due_date.clone(),
                    format!("{}d", r.days_until_due),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Source", "Principal", "Rate %", "Months", "EMI", "Remaining",
                    "Status", "Next Due", "Due In",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn pay(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let explicit = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?;

    let (source, paid, remaining, closed) = {
        let Some(loan) = books.loans.get_mut(id) else {
            return Err(StoreError::NotFound(id).into());
        };
        if loan.status == LoanStatus::Closed {
            bail!("Loan #{} is already closed", id);
        }
        if loan.remaining_amount <= Decimal::ZERO {
            bail!("Loan #{} has nothing left to repay", id);
        }
        let mut pay = match explicit {
            Some(a) => a,
            None => loan.emi,
        };
        if pay <= Decimal::ZERO {
            bail!("Loan #{} has no EMI on file; pass --amount", id);
        }
        if pay > loan.remaining_amount {
            pay = loan.remaining_amount;
        }
        loan.remaining_amount -= pay;
        let closed = loan.remaining_amount.is_zero();
        if closed {
            loan.status = LoanStatus::Closed;
        } else {
            loan.next_due_date = next_due_date(loan.next_due_date);
        }
        (loan.source.clone(), pay, loan.remaining_amount, closed)
    };

    books.post(
        date,
        TransactionType::LoanPayment,
        &format!("EMI payment - {}", source),
        "Loan",
        paid,
        Some(payment_reference(id)),
    );

    let symbol = &books.settings.currency_symbol;
    if closed {
        println!(
            "Paid {} on loan #{} ({}); fully repaid, loan closed",
            fmt_money(&paid, symbol),
            id,
            source
        );
    } else {
        println!(
            "Paid {} on loan #{} ({}); remaining {}",
            fmt_money(&paid, symbol),
            id,
            source,
            fmt_money(&remaining, symbol)
        );
    }
    Ok(())
}
