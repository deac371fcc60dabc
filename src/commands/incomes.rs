// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use serde::Serialize;

use crate::filters;
use crate::models::{IncomeRecord, IncomeStatus, TransactionType};
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
    format!("INV-{:03}", id)
}

fn add(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let source = sub.get_one::<String>("source").unwrap().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let status = match sub.get_one::<String>("status") {
        Some(s) => s.parse::<IncomeStatus>()?,
        None => IncomeStatus::Received,
    };
    if !books
        .settings
        .categories(CategoryKind::Income)
        .iter()
        .any(|c| c.eq_ignore_ascii_case(&source))
    {
        bail!(
            "Unknown income source '{}' (see `settings category list`)",
            source
        );
    }

    let id = books.incomes.add(IncomeRecord {
        id: 0,
        description: description.clone(),
        amount,
        source: source.clone(),
        date,
        status,
    });
    books.post(
        date,
        TransactionType::Income,
        &description,
        &source,
        amount,
        Some(reference(id)),
    );
    println!(
        "Recorded income #{} {} from '{}' on {} [{}]",
        id,
        fmt_money(&amount, &books.settings.currency_symbol),
        source,
        date,
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
                    r.source.clone(),
                    r.amount.clone(),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Source", "Amount", "Status"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let removed = books
        .incomes
        .remove(id)
        .with_context(|| format!("Delete income {}", id))?;
    let dropped = books.remove_postings(&reference(id));
    println!(
        "Deleted income #{} '{}' and {} ledger posting(s)",
        id, removed.description, dropped
    );
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub source: String,
    pub amount: String,
    pub status: String,
}

pub fn query_rows(books: &Books, sub: &clap::ArgMatches) -> Result<Vec<IncomeRow>> {
    let term = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<IncomeStatus>())
        .transpose()?;
    let from = sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?;
    let to = sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?;

    let mut picked = filters::filter_by_date_range(
        filters::search(books.incomes.items(), term),
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
        .map(|r| IncomeRow {
            id: r.id,
            date: r.date.to_string(),
            description: r.description.clone(),
            source: r.source.clone(),
            amount: r.amount.to_string(),
            status: r.status.to_string(),
        })
        .collect())
}
