// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::{budget_percentage, budget_status};
use crate::models::Budget;
use crate::settings::CategoryKind;
use crate::store::Books;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};

pub fn handle(books: &mut Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(books, sub)?,
        Some(("spend", sub)) => spend(books, sub)?,
        Some(("list", sub)) => list(books, sub)?,
        Some(("status", sub)) => status(books, sub)?,
        _ => {}
    }
    Ok(())
}

fn known_expense_category(books: &Books, name: &str) -> bool {
    books
        .settings
        .categories(CategoryKind::Expense)
        .iter()
        .any(|c| c.eq_ignore_ascii_case(name))
}

fn find_budget_id(books: &Books, category: &str) -> Option<i64> {
    books
        .budgets
        .iter()
        .find(|b| b.category.eq_ignore_ascii_case(category))
        .map(|b| b.id)
}

fn set(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    if !known_expense_category(books, &category) {
        bail!(
            "Unknown expense category '{}' (see `settings category list`)",
            category
        );
    }
    // Upsert: a second `set` changes the target, spending stays.
    match find_budget_id(books, &category) {
        Some(id) => {
            books.budgets.update(id, |b| b.budgeted = amount)?;
            println!("Budget for '{}' updated to {}", category, amount);
        }
        None => {
            books.budgets.add(Budget {
                id: 0,
                category: category.clone(),
                budgeted: amount,
                spent: Decimal::ZERO,
            });
            println!("Budget set for '{}' = {}", category, amount);
        }
    }
    Ok(())
}

fn spend(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let Some(id) = find_budget_id(books, category) else {
        bail!("No budget for category '{}' (run `budget set` first)", category);
    };
    let symbol = books.settings.currency_symbol.clone();
    let (name, spent, budgeted) = books.budgets.update(id, |b| {
        b.spent += amount;
        (b.category.clone(), b.spent, b.budgeted)
    })?;
    println!(
        "Spent {} against '{}' ({} of {} used)",
        fmt_money(&amount, &symbol),
        name,
        fmt_money(&spent, &symbol),
        fmt_money(&budgeted, &symbol)
    );
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub id: i64,
    pub category: String,
    pub budgeted: String,
    pub spent: String,
    pub remaining: String,
}

fn list(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<BudgetRow> = books
        .budgets
        .iter()
        .map(|b| BudgetRow {
            id: b.id,
            category: b.category.clone(),
            budgeted: b.budgeted.to_string(),
            spent: b.spent.to_string(),
            remaining: (b.budgeted - b.spent).to_string(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.category.clone(),
                    r.budgeted.clone(),
                    r.spent.clone(),
                    r.remaining.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Category", "Budgeted", "Spent", "Remaining"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetStatusRow {
    pub category: String,
    pub budgeted: String,
    pub spent: String,
    pub used_pct: String,
    pub status: String,
}

pub fn status_rows(books: &Books, only: Option<&str>) -> Vec<BudgetStatusRow> {
    books
        .budgets
        .iter()
        .filter(|b| only.is_none_or(|c| b.category.eq_ignore_ascii_case(c)))
        .map(|b| {
            let pct = budget_percentage(b.spent, b.budgeted);
            BudgetStatusRow {
                category: b.category.clone(),
                budgeted: b.budgeted.to_string(),
                spent: b.spent.to_string(),
                used_pct: pct.round_dp(1).to_string(),
                status: budget_status(pct).to_string(),
            }
        })
        .collect()
}

fn status(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let only = sub.get_one::<String>("category").map(String::as_str);
    if let Some(c) = only {
        if find_budget_id(books, c).is_none() {
            bail!("No budget for category '{}'", c);
        }
    }
    let data = status_rows(books, only);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    r.budgeted.clone(),
                    r.spent.clone(),
                    format!("{}%", r.used_pct),
                    r.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Budgeted", "Spent", "Used", "Status"], rows)
        );
    }
    Ok(())
}
