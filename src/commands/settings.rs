// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;

use anyhow::{Context, Result, bail};

use crate::settings::{CategoryKind, DEFAULT_EXPORT_FILE, Settings, symbol_for};
use crate::store::Books;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(books: &mut Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(books, sub)?,
        Some(("set", sub)) => set(books, sub)?,
        Some(("notify", sub)) => notify(books, sub)?,
        Some(("category", sub)) => category(books, sub)?,
        Some(("export", sub)) => export(books, sub)?,
        Some(("import", sub)) => import(books, sub)?,
        _ => {}
    }
    Ok(())
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

fn show(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &books.settings)? {
        return Ok(());
    }
    let s = &books.settings;
    let rows = vec![
        vec![
            "Currency".to_string(),
            format!("{} ({})", s.currency, s.currency_symbol),
        ],
        vec![
            "Financial Year Start".to_string(),
            s.financial_year_start.clone(),
        ],
        vec!["Language".to_string(), s.language.clone()],
        vec!["Date Format".to_string(), s.date_format.to_string()],
        vec!["Backup Frequency".to_string(), s.backup_frequency.to_string()],
        vec![
            "Email Reminders".to_string(),
            on_off(s.notifications.email_reminders).to_string(),
        ],
        vec![
            "SMS Alerts".to_string(),
            on_off(s.notifications.sms_alerts).to_string(),
        ],
        vec![
            "Push Notifications".to_string(),
            on_off(s.notifications.push_notifications).to_string(),
        ],
        vec![
            "Income Categories".to_string(),
            s.categories.income_categories.join(", "),
        ],
        vec![
            "Expense Categories".to_string(),
            s.categories.expense_categories.join(", "),
        ],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

/// All edits land on a copy that must validate before it replaces the
/// live settings, so a bad flag cannot leave them half-changed.
fn set(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let mut next = books.settings.clone();
    let mut changed: Vec<String> = Vec::new();

    if let Some(code) = sub.get_one::<String>("currency") {
        let code = code.to_uppercase();
        let Some(symbol) = symbol_for(&code) else {
            bail!("Unknown currency '{}' (use INR|USD|EUR|GBP)", code);
        };
        next.currency = code.clone();
        next.currency_symbol = symbol.to_string();
        changed.push(format!("currency={}", code));
    }
    if let Some(symbol) = sub.get_one::<String>("symbol") {
        next.currency_symbol = symbol.clone();
        changed.push(format!("symbol={}", symbol));
    }
    if let Some(fy) = sub.get_one::<String>("fy-start") {
        next.financial_year_start = fy.clone();
        changed.push(format!("fy-start={}", fy));
    }
    if let Some(lang) = sub.get_one::<String>("language") {
        next.language = lang.clone();
        changed.push(format!("language={}", lang));
    }
    if let Some(df) = sub.get_one::<String>("date-format") {
        next.date_format = df.parse()?;
        changed.push(format!("date-format={}", next.date_format));
    }
    if let Some(bf) = sub.get_one::<String>("backup") {
        next.backup_frequency = bf.parse()?;
        changed.push(format!("backup={}", next.backup_frequency));
    }

    if changed.is_empty() {
        bail!("Nothing to change (see `settings set --help`)");
    }
    next.validate()?;
    books.settings = next;
    println!("Updated settings: {}", changed.join(", "));
    Ok(())
}

fn parse_toggle(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => bail!("Expected on|off, got '{}'", other),
    }
}

fn notify(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let mut changed: Vec<String> = Vec::new();
    let prefs = &mut books.settings.notifications;

    if let Some(v) = sub.get_one::<String>("email") {
        prefs.email_reminders = parse_toggle(v)?;
        changed.push(format!("email={}", on_off(prefs.email_reminders)));
    }
    if let Some(v) = sub.get_one::<String>("sms") {
        prefs.sms_alerts = parse_toggle(v)?;
        changed.push(format!("sms={}", on_off(prefs.sms_alerts)));
    }
    if let Some(v) = sub.get_one::<String>("push") {
        prefs.push_notifications = parse_toggle(v)?;
        changed.push(format!("push={}", on_off(prefs.push_notifications)));
    }

    if changed.is_empty() {
        bail!("Nothing to change (pass --email/--sms/--push on|off)");
    }
    println!("Notifications: {}", changed.join(", "));
    Ok(())
}

fn category(books: &mut Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Category name must not be blank");
            }
            let list = books.settings.categories_mut(kind);
            if list.iter().any(|c| c.eq_ignore_ascii_case(&name)) {
                bail!("Category '{}' already exists", name);
            }
            list.push(name.clone());
            println!("Added {} category '{}'", kind, name);
        }
        Some(("rm", sub)) => {
            let kind: CategoryKind = sub.get_one::<String>("kind").unwrap().parse()?;
            let name = sub.get_one::<String>("name").unwrap();
            let list = books.settings.categories_mut(kind);
            let Some(pos) = list.iter().position(|c| c.eq_ignore_ascii_case(name)) else {
                bail!("No {} category '{}'", kind, name);
            };
            if list.len() == 1 {
                bail!("Cannot remove the last {} category", kind);
            }
            let gone = list.remove(pos);
            println!("Removed {} category '{}'", kind, gone);
        }
        Some(("list", _)) => {
            let mut rows = Vec::new();
            for c in books.settings.categories(CategoryKind::Income) {
                rows.push(vec!["income".to_string(), c.clone()]);
            }
            for c in books.settings.categories(CategoryKind::Expense) {
                rows.push(vec!["expense".to_string(), c.clone()]);
            }
            println!("{}", pretty_table(&["Kind", "Category"], rows));
        }
        _ => {}
    }
    Ok(())
}

fn export(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub
        .get_one::<String>("out")
        .map(String::as_str)
        .unwrap_or(DEFAULT_EXPORT_FILE);
    fs::write(out, books.settings.to_json()?)
        .with_context(|| format!("Write settings to {}", out))?;
    println!("Exported settings to {}", out);
    Ok(())
}

fn import(books: &mut Books, sub: &clap::ArgMatches) -> Result<()> {
    let file = sub.get_one::<String>("file").unwrap();
    let raw =
        fs::read_to_string(file).with_context(|| format!("Read settings from {}", file))?;
    let parsed = Settings::from_json(&raw)?;
    books.settings = parsed;
    println!("Imported settings from {}", file);
    Ok(())
}
