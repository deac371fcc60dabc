// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    Budget, ExpenseRecord, ExpenseStatus, IncomeRecord, IncomeStatus, LedgerTransaction, Loan,
    LoanStatus, Reminder, ReminderStatus,
};

/// Classification of a budget line by how much of it is used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::Warning => "Warning",
            BudgetStatus::OverBudget => "Over Budget",
        })
    }
}

/// Income and expense flow for one calendar month.
#[derive(Debug, Clone)]
pub struct MonthlyFlow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone)]
pub struct CategorySpend {
    pub category: String,
    pub total: Decimal,
}

/// Sum of a stream of amounts. Addition over Decimal is exact, so the
/// result does not depend on iteration order.
pub fn total<'a, I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a Decimal>,
{
    amounts.into_iter().copied().sum()
}

/// Income still marked pending, summed.
pub fn pending_income_total<'a, I>(incomes: I) -> Decimal
where
    I: IntoIterator<Item = &'a IncomeRecord>,
{
    incomes
        .into_iter()
        .filter(|i| i.status == IncomeStatus::Pending)
        .map(|i| i.amount)
        .sum()
}

/// Expenses still marked pending, summed.
pub fn pending_expense_total<'a, I>(expenses: I) -> Decimal
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    expenses
        .into_iter()
        .filter(|e| e.status == ExpenseStatus::Pending)
        .map(|e| e.amount)
        .sum()
}

/// part/whole as a percentage, 0 when the whole is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

pub fn budget_percentage(spent: Decimal, budgeted: Decimal) -> Decimal {
    percentage(spent, budgeted)
}

/// <70 on track, 70..90 warning, >=90 over budget. Boundary values
/// fall into the higher band.
pub fn budget_status(pct: Decimal) -> BudgetStatus {
    if pct < Decimal::from(70) {
        BudgetStatus::OnTrack
    } else if pct < Decimal::from(90) {
        BudgetStatus::Warning
    } else {
        BudgetStatus::OverBudget
    }
}

pub fn net_profit(income: Decimal, expenses: Decimal) -> Decimal {
    income - expenses
}

pub fn profit_margin(net: Decimal, income: Decimal) -> Decimal {
    percentage(net, income)
}

pub fn expense_ratio(expenses: Decimal, income: Decimal) -> Decimal {
    percentage(expenses, income)
}

/// Equated monthly installment, rounded to the nearest whole unit with
/// halves away from zero. Zero rate degrades to straight division,
/// zero tenure to zero.
pub fn emi(principal: Decimal, annual_rate_pct: Decimal, tenure_months: u32) -> Decimal {
    if tenure_months == 0 {
        return Decimal::ZERO;
    }
    let round = |d: Decimal| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if annual_rate_pct.is_zero() {
        return round(principal / Decimal::from(tenure_months));
    }
    let monthly = annual_rate_pct / Decimal::from(1200);
    // (1 + r)^n by repeated multiplication; n is small (loan tenures).
    let growth = Decimal::ONE + monthly;
    let mut factor = Decimal::ONE;
    for _ in 0..tenure_months {
        factor *= growth;
    }
    round(principal * monthly * factor / (factor - Decimal::ONE))
}

/// Money that came in: absolute sum over income and loan disbursements.
pub fn ledger_income<'a, I>(rows: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    rows.into_iter()
        .filter(|t| t.r#type.is_credit())
        .map(|t| t.amount.abs())
        .sum()
}

/// Money that went out: absolute sum over expenses and loan payments.
pub fn ledger_expenses<'a, I>(rows: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    rows.into_iter()
        .filter(|t| !t.r#type.is_credit())
        .map(|t| t.amount.abs())
        .sum()
}

/// Signed sum; the stored signs already encode direction, so this
/// equals ledger_income minus ledger_expenses.
pub fn net_cash_flow<'a, I>(rows: I) -> Decimal
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    rows.into_iter().map(|t| t.amount).sum()
}

/// Cumulative signed balance after each row, in the order given.
pub fn running_balances<'a, I>(rows: I) -> Vec<Decimal>
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    let mut balance = Decimal::ZERO;
    rows.into_iter()
        .map(|t| {
            balance += t.amount;
            balance
        })
        .collect()
}

/// Signed day count from `today` to `due`: 0 today, negative once past.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// One month later, clamped to the last day when the next month is
/// shorter (Jan 31 -> Feb 28/29).
pub fn next_due_date(from: NaiveDate) -> NaiveDate {
    from.checked_add_months(Months::new(1)).unwrap_or(from)
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Overdue is derived at read time, never written back: an active loan
/// whose next due date has passed shows as overdue.
pub fn effective_loan_status(loan: &Loan, today: NaiveDate) -> LoanStatus {
    match loan.status {
        LoanStatus::Active if loan.next_due_date < today => LoanStatus::Overdue,
        other => other,
    }
}

/// Same derivation for reminders: pending past its due date is overdue.
pub fn effective_reminder_status(reminder: &Reminder, today: NaiveDate) -> ReminderStatus {
    match reminder.status {
        ReminderStatus::Pending if reminder.due_date < today => ReminderStatus::Overdue,
        other => other,
    }
}

/// Per-month inflow/outflow/net over the ledger, oldest month first.
pub fn monthly_summary<'a, I>(rows: I) -> Vec<MonthlyFlow>
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    let mut months: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in rows {
        let entry = months.entry(month_key(t.date)).or_default();
        if t.r#type.is_credit() {
            entry.0 += t.amount.abs();
        } else {
            entry.1 += t.amount.abs();
        }
    }
    months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyFlow {
            month,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}

/// The loan book at a glance. Outstanding and monthly EMI cover every
/// loan that is not closed; the counts split by effective status.
#[derive(Debug, Clone, Default)]
pub struct LoanSummary {
    pub outstanding: Decimal,
    pub monthly_emi: Decimal,
    pub active: usize,
    pub overdue: usize,
}

pub fn loan_summary<'a, I>(loans: I, today: NaiveDate) -> LoanSummary
where
    I: IntoIterator<Item = &'a Loan>,
{
    let mut s = LoanSummary::default();
    for l in loans {
        match effective_loan_status(l, today) {
            LoanStatus::Active => s.active += 1,
            LoanStatus::Overdue => s.overdue += 1,
            LoanStatus::Closed => continue,
        }
        s.outstanding += l.remaining_amount;
        s.monthly_emi += l.emi;
    }
    s
}

/// Reminder workload: what is coming up inside a week, what slipped,
/// and how much money the open ones ask for.
#[derive(Debug, Clone, Default)]
pub struct ReminderSummary {
    pub upcoming_week: usize,
    pub overdue: usize,
    pub completed: usize,
    pub pending_amount: Decimal,
}

pub fn reminder_summary<'a, I>(reminders: I, today: NaiveDate) -> ReminderSummary
where
    I: IntoIterator<Item = &'a Reminder>,
{
    let mut s = ReminderSummary::default();
    for r in reminders {
        match effective_reminder_status(r, today) {
            ReminderStatus::Completed => {
                s.completed += 1;
                continue;
            }
            ReminderStatus::Overdue => s.overdue += 1,
            ReminderStatus::Pending => {
                if (0..=7).contains(&days_until_due(r.due_date, today)) {
                    s.upcoming_week += 1;
                }
            }
        }
        if let Some(a) = r.amount {
            s.pending_amount += a;
        }
    }
    s
}

#[derive(Debug, Clone, Default)]
pub struct BudgetTotals {
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub used_pct: Decimal,
}

pub fn budget_totals<'a, I>(budgets: I) -> BudgetTotals
where
    I: IntoIterator<Item = &'a Budget>,
{
    let mut t = BudgetTotals::default();
    for b in budgets {
        t.budgeted += b.budgeted;
        t.spent += b.spent;
    }
    t.remaining = t.budgeted - t.spent;
    t.used_pct = percentage(t.spent, t.budgeted);
    t
}

/// Expense totals grouped by category, largest first; ties break on
/// category name.
pub fn spend_by_category<'a, I>(expenses: I) -> Vec<CategorySpend>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut groups: BTreeMap<&str, Decimal> = BTreeMap::new();
    for e in expenses {
        *groups.entry(e.category.as_str()).or_default() += e.amount;
    }
    let mut out: Vec<CategorySpend> = groups
        .into_iter()
        .map(|(category, total)| CategorySpend {
            category: category.to_string(),
            total,
        })
        .collect();
    out.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn row(r#type: TransactionType, amount: &str) -> LedgerTransaction {
        LedgerTransaction {
            id: 0,
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            r#type,
            description: String::new(),
            category: String::new(),
            amount: d(amount),
            reference: None,
        }
    }

    #[test]
    fn emi_standard_loan() {
        // 5L at 7.5% over 60 months
        assert_eq!(emi(d("500000"), d("7.5"), 60), d("10019"));
    }

    #[test]
    fn emi_zero_rate_is_straight_division() {
        assert_eq!(emi(d("120000"), d("0"), 12), d("10000"));
    }

    #[test]
    fn emi_zero_tenure_is_zero() {
        assert_eq!(emi(d("500000"), d("7.5"), 0), Decimal::ZERO);
    }

    #[test]
    fn budget_status_bands() {
        assert_eq!(budget_status(d("69.9")), BudgetStatus::OnTrack);
        assert_eq!(budget_status(d("70.0")), BudgetStatus::Warning);
        assert_eq!(budget_status(d("89.9")), BudgetStatus::Warning);
        assert_eq!(budget_status(d("90.0")), BudgetStatus::OverBudget);
        assert_eq!(budget_status(d("135")), BudgetStatus::OverBudget);
    }

    #[test]
    fn percentage_guards_zero_whole() {
        assert_eq!(budget_percentage(d("500"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(profit_margin(d("10"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(expense_ratio(d("10"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(budget_percentage(d("45"), d("60")), d("75"));
    }

    #[test]
    fn running_balances_accumulate_in_order() {
        let rows = vec![
            row(TransactionType::Income, "15000"),
            row(TransactionType::Expense, "-8500"),
            row(TransactionType::LoanDisbursement, "22000"),
        ];
        assert_eq!(
            running_balances(&rows),
            vec![d("15000"), d("6500"), d("28500")]
        );
    }

    #[test]
    fn ledger_totals_use_absolute_amounts() {
        let rows = vec![
            row(TransactionType::Income, "15000"),
            row(TransactionType::Expense, "-8500"),
            row(TransactionType::LoanDisbursement, "22000"),
            row(TransactionType::LoanPayment, "-2000"),
        ];
        assert_eq!(ledger_income(&rows), d("37000"));
        assert_eq!(ledger_expenses(&rows), d("10500"));
        assert_eq!(net_cash_flow(&rows), d("26500"));
    }

    #[test]
    fn total_is_order_independent() {
        let a = [d("10.50"), d("-3.25"), d("92.75")];
        let b = [d("92.75"), d("10.50"), d("-3.25")];
        assert_eq!(total(a.iter()), total(b.iter()));
        assert_eq!(total(a.iter()), d("100.00"));
    }

    #[test]
    fn days_until_due_signs() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(days_until_due(today, today), 0);
        assert_eq!(days_until_due(today.pred_opt().unwrap(), today), -1);
        assert_eq!(days_until_due(today.succ_opt().unwrap(), today), 1);
    }

    #[test]
    fn next_due_date_clamps_short_months() {
        let jan31 = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            next_due_date(jan31),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        let jan31_leap = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            next_due_date(jan31_leap),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        let mid = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(
            next_due_date(mid),
            NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
        );
    }

    fn loan(status: LoanStatus, remaining: &str, emi_amount: &str, due: NaiveDate) -> Loan {
        Loan {
            id: 0,
            source: String::new(),
            principal: d("100000"),
            interest_rate: d("8"),
            tenure_months: 12,
            start_date: due,
            emi: d(emi_amount),
            remaining_amount: d(remaining),
            status,
            next_due_date: due,
        }
    }

    #[test]
    fn loan_summary_splits_by_effective_status() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let future = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let loans = vec![
            loan(LoanStatus::Active, "40000", "3500", future),
            loan(LoanStatus::Active, "20000", "1500", past), // derived overdue
            loan(LoanStatus::Closed, "0", "900", future),
        ];
        let s = loan_summary(&loans, today);
        assert_eq!(s.active, 1);
        assert_eq!(s.overdue, 1);
        assert_eq!(s.outstanding, d("60000"));
        // Closed loans stop counting toward the monthly load
        assert_eq!(s.monthly_emi, d("5000"));
    }

    fn reminder(status: ReminderStatus, due: NaiveDate, amount: Option<&str>) -> Reminder {
        Reminder {
            id: 0,
            title: String::new(),
            description: String::new(),
            due_date: due,
            amount: amount.map(d),
            r#type: crate::models::ReminderType::Custom,
            status,
            priority: crate::models::Priority::Medium,
        }
    }

    #[test]
    fn reminder_summary_counts_the_week_ahead() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let reminders = vec![
            reminder(ReminderStatus::Pending, today, Some("500")),
            reminder(
                ReminderStatus::Pending,
                NaiveDate::from_ymd_opt(2025, 6, 17).unwrap(),
                Some("1200"),
            ),
            reminder(
                ReminderStatus::Pending,
                NaiveDate::from_ymd_opt(2025, 6, 18).unwrap(), // 8 days out
                None,
            ),
            reminder(
                ReminderStatus::Pending,
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), // derived overdue
                Some("300"),
            ),
            reminder(ReminderStatus::Completed, today, Some("9999")),
        ];
        let s = reminder_summary(&reminders, today);
        assert_eq!(s.upcoming_week, 2);
        assert_eq!(s.overdue, 1);
        assert_eq!(s.completed, 1);
        // Completed money no longer counts as owed
        assert_eq!(s.pending_amount, d("2000"));
    }

    #[test]
    fn budget_totals_guard_an_empty_book() {
        let totals = budget_totals(&[]);
        assert_eq!(totals.used_pct, Decimal::ZERO);

        let budgets = vec![
            Budget {
                id: 0,
                category: "Seeds".to_string(),
                budgeted: d("1000"),
                spent: d("400"),
            },
            Budget {
                id: 0,
                category: "Labor".to_string(),
                budgeted: d("3000"),
                spent: d("600"),
            },
        ];
        let totals = budget_totals(&budgets);
        assert_eq!(totals.budgeted, d("4000"));
        assert_eq!(totals.spent, d("1000"));
        assert_eq!(totals.remaining, d("3000"));
        assert_eq!(totals.used_pct, d("25"));
    }

    #[test]
    fn pending_totals_follow_the_stored_status() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let incomes = vec![
            IncomeRecord {
                id: 0,
                description: String::new(),
                amount: d("5000"),
                source: String::new(),
                date,
                status: IncomeStatus::Received,
            },
            IncomeRecord {
                id: 0,
                description: String::new(),
                amount: d("2500"),
                source: String::new(),
                date,
                status: IncomeStatus::Pending,
            },
        ];
        assert_eq!(pending_income_total(&incomes), d("2500"));

        let expenses = vec![ExpenseRecord {
            id: 0,
            description: String::new(),
            amount: d("800"),
            category: String::new(),
            date,
            status: ExpenseStatus::Pending,
        }];
        assert_eq!(pending_expense_total(&expenses), d("800"));
    }
}
