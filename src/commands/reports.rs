// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::metrics::{
    budget_totals, expense_ratio, ledger_expenses, ledger_income, loan_summary, month_key,
    monthly_summary, net_profit, pending_expense_total, pending_income_total, percentage,
    profit_margin, reminder_summary, spend_by_category, total,
};
use crate::store::Books;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table, today};

pub fn handle(books: &Books, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("overview", sub)) => overview(books, sub)?,
        Some(("monthly", sub)) => monthly(books, sub)?,
        Some(("spend-by-category", sub)) => by_category(books, sub)?,
        _ => {}
    }
    Ok(())
}

fn overview(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let symbol = &books.settings.currency_symbol;
    let now = today();

    let total_income = total(books.incomes.iter().map(|i| &i.amount));
    let total_expenses = total(books.expenses.iter().map(|e| &e.amount));
    let net = net_profit(total_income, total_expenses);
    let margin = profit_margin(net, total_income);
    let ratio = expense_ratio(total_expenses, total_income);
    let pending_in = pending_income_total(books.incomes.items());
    let pending_out = pending_expense_total(books.expenses.items());

    let loans = loan_summary(books.loans.items(), now);
    let reminders = reminder_summary(books.reminders.items(), now);
    let budgets = budget_totals(books.budgets.items());

    let this_month = month_key(now);
    let month_rows: Vec<_> = books
        .ledger
        .iter()
        .filter(|t| month_key(t.date) == this_month)
        .collect();
    let month_income = ledger_income(month_rows.iter().copied());
    let month_expenses = ledger_expenses(month_rows.iter().copied());

    let data = vec![
        vec!["Total Income".to_string(), fmt_money(&total_income, symbol)],
        vec![
            "Total Expenses".to_string(),
            fmt_money(&total_expenses, symbol),
        ],
        vec!["Net Profit".to_string(), fmt_money(&net, symbol)],
        vec![
            "Profit Margin".to_string(),
            format!("{}%", margin.round_dp(1)),
        ],
        vec![
            "Expense Ratio".to_string(),
            format!("{}%", ratio.round_dp(1)),
        ],
        vec![
            "Pending Income".to_string(),
            fmt_money(&pending_in, symbol),
        ],
        vec![
            "Pending Expenses".to_string(),
            fmt_money(&pending_out, symbol),
        ],
        vec![
            format!("Income ({})", this_month),
            fmt_money(&month_income, symbol),
        ],
        vec![
            format!("Expenses ({})", this_month),
            fmt_money(&month_expenses, symbol),
        ],
        vec![
            "Budget Used".to_string(),
            format!(
                "{} of {} ({}%)",
                fmt_money(&budgets.spent, symbol),
                fmt_money(&budgets.budgeted, symbol),
                budgets.used_pct.round_dp(1)
            ),
        ],
        vec!["Active Loans".to_string(), loans.active.to_string()],
        vec!["Overdue Loans".to_string(), loans.overdue.to_string()],
        vec![
            "Outstanding Debt".to_string(),
            fmt_money(&loans.outstanding, symbol),
        ],
        vec![
            "Monthly EMI Load".to_string(),
            fmt_money(&loans.monthly_emi, symbol),
        ],
        vec![
            "Reminders Due This Week".to_string(),
            reminders.upcoming_week.to_string(),
        ],
        vec![
            "Overdue Reminders".to_string(),
            reminders.overdue.to_string(),
        ],
        vec![
            "Amount Due On Reminders".to_string(),
            fmt_money(&reminders.pending_amount, symbol),
        ],
    ];

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Metric", "Value"], data));
    }
    Ok(())
}

fn monthly(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: usize = *sub.get_one::<usize>("months").unwrap_or(&12);

    let flows = monthly_summary(books.ledger.items());
    let mut data = Vec::new();
    for f in flows.iter().rev().take(months) {
        data.push(vec![
            f.month.clone(),
            f.income.to_string(),
            f.expenses.to_string(),
            f.net.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], data)
        );
    }
    Ok(())
}

fn by_category(books: &Books, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;

    let scoped: Vec<_> = books
        .expenses
        .iter()
        .filter(|e| month.as_ref().is_none_or(|m| month_key(e.date) == *m))
        .collect();
    let groups = spend_by_category(scoped.iter().copied());
    let overall: Decimal = groups.iter().map(|g| g.total).sum();

    let mut data = Vec::new();
    for g in &groups {
        data.push(vec![
            g.category.clone(),
            g.total.to_string(),
            format!("{}%", percentage(g.total, overall).round_dp(1)),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    }
    Ok(())
}
