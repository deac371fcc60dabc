// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command, value_parser};

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn req(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).required(true)
}

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn with_json_flags(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn limit_arg() -> Arg {
    Arg::new("limit")
        .long("limit")
        .value_parser(value_parser!(usize))
        .help("Show at most N entries")
}

fn income_cmd() -> Command {
    Command::new("income")
        .about("Track money coming in")
        .subcommand(
            Command::new("add")
                .about("Record an income entry")
                .arg(req("description", "What the money was for"))
                .arg(req("amount", "Amount received").allow_negative_numbers(true))
                .arg(req("source", "Income source (one of the income categories)"))
                .arg(opt("date", "Date YYYY-MM-DD (default: today)"))
                .arg(opt("status", "received|pending (default: received)")),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List income entries, newest first")
                .arg(opt("search", "Filter by description or source"))
                .arg(opt("status", "Only received|pending"))
                .arg(opt("from", "Start date YYYY-MM-DD"))
                .arg(opt("to", "End date YYYY-MM-DD"))
                .arg(limit_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an income entry and its ledger posting")
                .arg(id_arg("Income id")),
        )
}

fn expense_cmd() -> Command {
    Command::new("expense")
        .about("Track money going out")
        .subcommand(
            Command::new("add")
                .about("Record an expense entry")
                .arg(req("description", "What the money was spent on"))
                .arg(req("amount", "Amount spent").allow_negative_numbers(true))
                .arg(req("category", "Expense category"))
                .arg(opt("date", "Date YYYY-MM-DD (default: today)"))
                .arg(opt("status", "paid|pending (default: paid)")),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List expense entries, newest first")
                .arg(opt("search", "Filter by description or category"))
                .arg(opt("status", "Only paid|pending"))
                .arg(opt("from", "Start date YYYY-MM-DD"))
                .arg(opt("to", "End date YYYY-MM-DD"))
                .arg(limit_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an expense entry and its ledger posting")
                .arg(id_arg("Expense id")),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Plan and watch per-category spending")
        .subcommand(
            Command::new("set")
                .about("Set (or update) the budget for a category")
                .arg(req("category", "Expense category"))
                .arg(req("amount", "Budgeted amount").allow_negative_numbers(true)),
        )
        .subcommand(
            Command::new("spend")
                .about("Add spending against a category budget")
                .arg(req("category", "Expense category"))
                .arg(req("amount", "Amount spent").allow_negative_numbers(true)),
        )
        .subcommand(with_json_flags(
            Command::new("list").about("List budgets with spent amounts"),
        ))
        .subcommand(with_json_flags(
            Command::new("status")
                .about("Budget usage and status per category")
                .arg(opt("category", "Only this category")),
        ))
}

fn loan_cmd() -> Command {
    Command::new("loan")
        .about("Loans and EMIs")
        .subcommand(
            Command::new("add")
                .about("Record a new loan; computes the EMI and posts the disbursement")
                .arg(req("source", "Lender"))
                .arg(req("principal", "Principal amount").allow_negative_numbers(true))
                .arg(req("rate", "Annual interest rate in percent"))
                .arg(
                    Arg::new("tenure")
                        .long("tenure")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Tenure in months"),
                )
                .arg(opt("start-date", "Start date YYYY-MM-DD (default: today)")),
        )
        .subcommand(with_json_flags(
            Command::new("list").about("List loans with EMI and next due date"),
        ))
        .subcommand(
            Command::new("pay")
                .about("Record an EMI payment against a loan")
                .arg(id_arg("Loan id"))
                .arg(opt("amount", "Payment amount (default: the EMI)").allow_negative_numbers(true))
                .arg(opt("date", "Payment date YYYY-MM-DD (default: today)")),
        )
}

fn reminder_cmd() -> Command {
    Command::new("reminder")
        .about("Payment and task reminders")
        .subcommand(
            Command::new("add")
                .about("Add a reminder")
                .arg(req("title", "Short title"))
                .arg(req("due", "Due date YYYY-MM-DD"))
                .arg(opt("description", "Longer note"))
                .arg(opt("amount", "Amount due, if any").allow_negative_numbers(true))
                .arg(opt("type", "emi|bill|recurring|custom (default: custom)"))
                .arg(opt("priority", "high|medium|low (default: medium)")),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List reminders by due date")
                .arg(opt("status", "pending|completed|overdue|all (default: all)")),
        ))
        .subcommand(
            Command::new("done")
                .about("Mark a reminder completed")
                .arg(id_arg("Reminder id")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a reminder")
                .arg(id_arg("Reminder id")),
        )
}

fn ledger_cmd() -> Command {
    Command::new("ledger")
        .about("The unified transaction ledger")
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List ledger rows with a running balance")
                .arg(opt("search", "Filter by description, category or reference"))
                .arg(opt(
                    "type",
                    "all|income|expense|loan_disbursement|loan_payment",
                ))
                .arg(opt("from", "Start date YYYY-MM-DD"))
                .arg(opt("to", "End date YYYY-MM-DD"))
                .arg(opt("month", "Only this month YYYY-MM"))
                .arg(limit_arg()),
        ))
        .subcommand(with_json_flags(
            Command::new("summary")
                .about("Inflow, outflow and net cash flow")
                .arg(opt("from", "Start date YYYY-MM-DD"))
                .arg(opt("to", "End date YYYY-MM-DD"))
                .arg(opt("month", "Only this month YYYY-MM")),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Financial reports")
        .subcommand(with_json_flags(
            Command::new("overview").about("The headline numbers at a glance"),
        ))
        .subcommand(with_json_flags(
            Command::new("monthly")
                .about("Income and expenses per month")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .help("Most recent N months (default: 12)"),
                ),
        ))
        .subcommand(with_json_flags(
            Command::new("spend-by-category")
                .about("Expense totals grouped by category")
                .arg(opt("month", "Only this month YYYY-MM")),
        ))
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Preferences, categories, import and export")
        .subcommand(with_json_flags(
            Command::new("show").about("Show current settings"),
        ))
        .subcommand(
            Command::new("set")
                .about("Change one or more preferences")
                .arg(opt("currency", "Currency code (INR|USD|EUR|GBP)"))
                .arg(opt("symbol", "Currency symbol override"))
                .arg(opt("fy-start", "Financial year start MM-DD"))
                .arg(opt("language", "Display language"))
                .arg(opt("date-format", "DD-MM-YYYY|MM-DD-YYYY|YYYY-MM-DD"))
                .arg(opt("backup", "daily|weekly|monthly")),
        )
        .subcommand(
            Command::new("notify")
                .about("Toggle notification channels")
                .arg(opt("email", "on|off"))
                .arg(opt("sms", "on|off"))
                .arg(opt("push", "on|off")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage income and expense categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(req("kind", "income|expense"))
                        .arg(req("name", "Category name")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(req("kind", "income|expense"))
                        .arg(req("name", "Category name")),
                )
                .subcommand(Command::new("list").about("List categories")),
        )
        .subcommand(
            Command::new("export")
                .about("Write settings to a JSON file")
                .arg(opt("out", "Output path (default: accounting-settings.json)")),
        )
        .subcommand(
            Command::new("import")
                .about("Replace settings from a JSON file (validated first)")
                .arg(req("file", "Settings JSON file")),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export data to CSV or JSON files")
        .subcommand(
            Command::new("ledger")
                .about("Export the ledger")
                .arg(req("format", "csv|json"))
                .arg(req("out", "Output path")),
        )
        .subcommand(
            Command::new("incomes")
                .about("Export income entries")
                .arg(req("format", "csv|json"))
                .arg(req("out", "Output path")),
        )
        .subcommand(
            Command::new("expenses")
                .about("Export expense entries")
                .arg(req("format", "csv|json"))
                .arg(req("out", "Output path")),
        )
}

pub fn build_cli() -> Command {
    command!()
        .subcommand(Command::new("init").about("Create the books file"))
        .subcommand(income_cmd())
        .subcommand(expense_cmd())
        .subcommand(budget_cmd())
        .subcommand(loan_cmd())
        .subcommand(reminder_cmd())
        .subcommand(ledger_cmd())
        .subcommand(report_cmd())
        .subcommand(settings_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check the books for inconsistencies"))
}
