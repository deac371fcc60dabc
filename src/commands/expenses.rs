// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::filters;
use crate::models::{ExpenseRecord, ExpenseStatus, TransactionType};
use crate::settings::CategoryKind;
use crate::store::Books;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, today,
};

pub fn handle(books: &mut Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(books, sub)?,
        Some(("list", sub)) => list(books, sub)?,
        Some(("rm", sub)) => rm(books, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn reference(id: i64) -> String {
    format!("EXP-{:03}", id)
}

fn add(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let status = match sub.get_one::<String>("status") {
        Some(s) => s.parse::<ExpenseStatus>()?,
        None => ExpenseStatus::Paid,
    };
    if !books
        .settings
        .categories(CategoryKind::Expense)
        .iter()
        .any(|c| c.eq_ignore_ascii_case(&category))
    {
        bail!(
            "Unknown expense category '{}' (see `settings category list`)",
            category
        );
    }

    let id = books.expenses.add(ExpenseRecord {
        id: 0,
        description: description.clone(),
        amount,
        category: category.clone(),
        date,
        status,
    });
    books.post(
        date,
        TransactionType::Expense,
        &description,
        &category,
        amount,
        Some(reference(id)),
    );
    println!(
        "Recorded expense #{} {} on '{}' ({}) [{}]",
        id,
        fmt_money(&amount, &books.settings.currency_symbol),
        description,
        category,
        reference(id)
    );
    Ok(())
}

fn list(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(books, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Amount", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let removed = books
        .expenses
        .remove(id)
        .with_context(|| format!("Delete expense {}", id))?;
    let dropped = books.remove_postings(&reference(id));
    println!(
        "Deleted expense #{} '{}' and {} ledger posting(s)",
        id, removed.description, dropped
    );
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub status: String,
}

pub fn query_rows(books: &Books, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let term = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<ExpenseStatus>())
        .transpose()?;
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;

    let mut picked = filters::filter_by_date_range(
        filters::search(books.expenses.items(), term),
        from,
        to,
    );
    if let Some(wanted) = status {
        picked.retain(|r| r.status == wanted);
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        picked.truncate(*limit);
    }

    Ok(picked
        .into_iter()
        .map(|r| ExpenseRow {
            id: r.id,
            date: r.date.to_string(),
            description: r.description.clone(),
            category: r.category.clone(),
            amount: r.amount.to_string(),
            status: r.status.to_string(),
        })
        .collect())
}
