// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::filters::{self, TypeFilter};
use crate::metrics::{ledger_expenses, ledger_income, net_cash_flow, running_balances};
use crate::models::LedgerTransaction;
use crate::store::Books;
use crate::utils::{
    fmt_date, fmt_money, maybe_print_json, month_end, month_start, parse_date, parse_month,
    pretty_table,
};

pub fn handle(books: &Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(books, sub)?,
        Some(("summary", sub)) => summary(books, sub)?,
        _ => {}
    }
    Ok(())
}

/// Signed money for table cells: the sign goes before the symbol.
fn money_cell(d: Decimal, symbol: &str) -> String {
    if d < Decimal::ZERO {
        format!("-{}", fmt_money(&d.abs(), symbol))
    } else {
        fmt_money(&d, symbol)
    }
}

fn date_bounds(
    sub: &clap::ArgMatches,
) -> Result<(Option<chrono::NaiveDate>, Option<chrono::NaiveDate>)> {
    if let Some(month) = sub.get_one::<String>("month") {
        if sub.get_one::<String>("from").is_some() || sub.get_one::<String>("to").is_some() {
            bail!("Use either --month or --from/--to, not both");
        }
        let m = parse_month(month)?;
        return Ok((Some(month_start(&m)?), Some(month_end(&m)?)));
    }
    Ok((
        sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
    ))
}

/// Filtered view plus its running balances. The balance restarts from
/// zero over the view, the way the ledger screen recomputes it for
/// whatever is displayed; --limit only trims the oldest rows off.
fn collect<'a>(
    books: &'a Books,
    sub: &clap::ArgMatches,
) -> Result<(Vec<&'a LedgerTransaction>, Vec<Decimal>)> {
    let term = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let type_filter = match sub.get_one::<String>("type") {
        Some(s) => s.parse::<TypeFilter>()?,
        None => TypeFilter::All,
    };
    let (from, to) = date_bounds(sub)?;

    let mut picked = filters::filter_by_date_range(
        filters::filter_by_type(filters::search(books.ledger.items(), term), type_filter),
        from,
        to,
    );
    let mut balances = running_balances(picked.iter().copied());
    if let Some(limit) = sub.get_one::<usize>("limit") {
        let cut = picked.len().saturating_sub(*limit);
        picked.drain(..cut);
        balances.drain(..cut);
    }
    Ok((picked, balances))
}

#[derive(Serialize)]
pub struct LedgerRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub reference: String,
    pub balance: String,
}

pub fn query_rows(books: &Books, sub: &clap::ArgMatches) -> Result<Vec<LedgerRow>> {
    let (picked, balances) = collect(books, sub)?;
    Ok(picked
        .into_iter()
        .zip(balances)
        .map(|(t, balance)| LedgerRow {
            id: t.id,
            date: t.date.to_string(),
            r#type: t.r#type.to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            amount: t.amount.to_string(),
            reference: t.reference.clone().unwrap_or_default(),
            balance: balance.to_string(),
        })
        .collect())
}

fn list(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if json_flag || jsonl_flag {
        let data = query_rows(books, sub)?;
        maybe_print_json(json_flag, jsonl_flag, &data)?;
        return Ok(());
    }

    let (picked, balances) = collect(books, sub)?;
    let symbol = &books.settings.currency_symbol;
    let date_format = books.settings.date_format;
    let rows: Vec<Vec<String>> = picked
        .into_iter()
        .zip(balances)
        .map(|(t, balance)| {
            vec![
                t.id.to_string(),
                fmt_date(t.date, date_format),
                t.r#type.label().to_string(),
                t.description.clone(),
                t.category.clone(),
                money_cell(t.amount, symbol),
                t.reference.clone().unwrap_or_default(),
                money_cell(balance, symbol),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Id", "Date", "Type", "Description", "Category", "Amount", "Reference",
                "Balance",
            ],
            rows,
        )
    );
    Ok(())
}

#[derive(Serialize)]
pub struct LedgerSummary {
    pub transactions: usize,
    pub income: String,
    pub expenses: String,
    pub net_cash_flow: String,
}

fn totals(books: &Books, sub: &clap::ArgMatches) -> Result<(usize, Decimal, Decimal, Decimal)> {
    let (from, to) = date_bounds(sub)?;
    let picked = filters::filter_by_date_range(books.ledger.items(), from, to);
    Ok((
        picked.len(),
        ledger_income(picked.iter().copied()),
        ledger_expenses(picked.iter().copied()),
        net_cash_flow(picked.iter().copied()),
    ))
}

pub fn summarize(books: &Books, sub: &clap::ArgMatches) -> Result<LedgerSummary> {
    let (count, income, expenses, net) = totals(books, sub)?;
    Ok(LedgerSummary {
        transactions: count,
        income: income.to_string(),
        expenses: expenses.to_string(),
        net_cash_flow: net.to_string(),
    })
}

fn summary(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if json_flag || jsonl_flag {
        maybe_print_json(json_flag, jsonl_flag, &summarize(books, sub)?)?;
        return Ok(());
    }
    let (count, income, expenses, net) = totals(books, sub)?;
    let symbol = &books.settings.currency_symbol;
    let rows = vec![
        vec!["Transactions".to_string(), count.to_string()],
        vec!["Income".to_string(), fmt_money(&income, symbol)],
        vec!["Expenses".to_string(), fmt_money(&expenses, symbol)],
        vec!["Net Cash Flow".to_string(), money_cell(net, symbol)],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}
