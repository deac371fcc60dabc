// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::metrics::{days_until_due, effective_reminder_status};
use crate::models::{Priority, Reminder, ReminderStatus, ReminderType};
use crate::store::Books;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table, today};

pub fn handle(books: &mut Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(books, sub)?,
        Some(("list", sub)) => list(books, sub)?,
        Some(("done", sub)) => done(books, sub)?,
        Some(("rm", sub)) => rm(books, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").unwrap().to_string();
    let due = parse_date(sub.get_one::<String>("due").unwrap())?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.to_string())
        .unwrap_or_default();
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_amount(s))
        .transpose()?;
    let r#type = match sub.get_one::<String>("type") {
        Some(s) => s.parse::<ReminderType>()?,
        None => ReminderType::Custom,
    };
    let priority = match sub.get_one::<String>("priority") {
        Some(s) => s.parse::<Priority>()?,
        None => Priority::Medium,
    };

    let id = books.reminders.add(Reminder {
        id: 0,
        title: title.clone(),
        description,
        due_date: due,
        amount,
        r#type,
        status: ReminderStatus::Pending,
        priority,
    });
    println!("Added reminder #{} '{}' due {}", id, title, due);
    Ok(())
}

#[derive(Serialize)]
pub struct ReminderRow {
    pub id: i64,
    pub due_date: String,
    pub title: String,
    pub r#type: String,
    pub amount: String,
    pub priority: String,
    pub status: String,
    pub days_until_due: i64,
}

pub fn query_rows(books: &Books, sub: &clap::ArgMatches) -> Result<Vec<ReminderRow>> {
    let now = today();
    let wanted = match sub.get_one::<String>("status") {
        None => None,
        Some(s) if s.eq_ignore_ascii_case("all") => None,
        Some(s) => Some(s.parse::<ReminderStatus>()?),
    };

    let mut picked: Vec<&Reminder> = books
        .reminders
        .iter()
        .filter(|r| wanted.is_none_or(|w| effective_reminder_status(r, now) == w))
        .collect();
    picked.sort_by_key(|r| r.due_date);

    Ok(picked
        .into_iter()
        .map(|r| ReminderRow {
            id: r.id,
            due_date: r.due_date.to_string(),
            title: r.title.clone(),
            r#type: r.r#type.to_string(),
            amount: r.amount.map(|a| a.to_string()).unwrap_or_default(),
            priority: r.priority.to_string(),
            status: effective_reminder_status(r, now).to_string(),
            days_until_due: days_until_due(r.due_date, now),
        })
        .collect())
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
                    r.due_date.clone(),
                    r.title.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.priority.clone(),
                    r.status.clone(),
                    format!("{}d", r.days_until_due),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Due", "Title", "Type", "Amount", "Priority", "Status", "In"],
                rows,
            )
        );
    }
    Ok(())
}

fn done(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let title = books.reminders.update(id, |r| {
        r.status = ReminderStatus::Completed;
        r.title.clone()
    })?;
    println!("Reminder #{} '{}' marked completed", id, title);
    Ok(())
}

fn rm(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let removed = books
        .reminders
        .remove(id)
        .with_context(|| format!("Delete reminder {}", id))?;
    println!("Deleted reminder #{} '{}'", id, removed.title);
    Ok(())
}
