// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use serde_json::json;

use crate::store::Books;

pub fn handle(books: &Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ledger", sub)) => export_ledger(books, sub),
        Some(("incomes", sub)) => export_incomes(books, sub),
        Some(("expenses", sub)) => export_expenses(books, sub),
        _ => Ok(()),
    }
}

fn export_ledger(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "description",
                "category",
                "amount",
                "reference",
            ])?;
            for t in books.ledger.iter() {
                wtr.write_record([
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.reference.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in books.ledger.iter() {
                items.push(json!({
                    "date": t.date.to_string(),
                    "type": t.r#type.to_string(),
                    "description": t.description,
                    "category": t.category,
                    "amount": t.amount.to_string(),
                    "reference": t.reference.clone().unwrap_or_default(),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported ledger to {}", out);
    Ok(())
}

fn export_incomes(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "description", "source", "amount", "status"])?;
            for i in books.incomes.iter() {
                wtr.write_record([
                    i.date.to_string(),
                    i.description.clone(),
                    i.source.clone(),
                    i.amount.to_string(),
                    i.status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for i in books.incomes.iter() {
                items.push(json!({
                    "date": i.date.to_string(),
                    "description": i.description,
                    "source": i.source,
                    "amount": i.amount.to_string(),
                    "status": i.status.to_string(),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported incomes to {}", out);
    Ok(())
}

fn export_expenses(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "description", "category", "amount", "status"])?;
            for e in books.expenses.iter() {
                wtr.write_record([
                    e.date.to_string(),
                    e.description.clone(),
                    e.category.clone(),
                    e.amount.to_string(),
                    e.status.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for e in books.expenses.iter() {
                items.push(json!({
                    "date": e.date.to_string(),
                    "description": e.description,
                    "category": e.category,
                    "amount": e.amount.to_string(),
                    "status": e.status.to_string(),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported expenses to {}", out);
    Ok(())
}
