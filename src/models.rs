// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub source: String,
    pub date: NaiveDate,
    pub status: IncomeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub status: ExpenseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub source: String,
    pub principal: Decimal,
    pub interest_rate: Decimal, // annual %
    pub tenure_months: u32,
    pub start_date: NaiveDate,
    pub emi: Decimal,
    pub remaining_amount: Decimal,
    pub status: LoanStatus,
    pub next_due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub amount: Option<Decimal>,
    pub r#type: ReminderType,
    pub status: ReminderStatus,
    pub priority: Priority,
}

/// One row of the unified ledger. `amount` is signed: credits positive,
/// debits negative. The running balance is derived at render time and
/// never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerTransaction {
    pub id: i64,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeStatus {
    Received,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseStatus {
    Paid,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Closed,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    Emi,
    Bill,
    Recurring,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
    Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
    LoanDisbursement,
    LoanPayment,
}

impl TransactionType {
    /// Income and loan disbursements add to the running balance.
    pub fn is_credit(self) -> bool {
        matches!(
            self,
            TransactionType::Income | TransactionType::LoanDisbursement
        )
    }

    /// Table label ("Loan Disbursement" rather than the wire form).
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::LoanDisbursement => "Loan Disbursement",
            TransactionType::LoanPayment => "Loan Payment",
        }
    }
}

impl fmt::Display for IncomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IncomeStatus::Received => "Received",
            IncomeStatus::Pending => "Pending",
        })
    }
}

impl FromStr for IncomeStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "received" => Ok(IncomeStatus::Received),
            "pending" => Ok(IncomeStatus::Pending),
            other => bail!("Unknown income status '{}' (use received|pending)", other),
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExpenseStatus::Paid => "Paid",
            ExpenseStatus::Pending => "Pending",
        })
    }
}

impl FromStr for ExpenseStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(ExpenseStatus::Paid),
            "pending" => Ok(ExpenseStatus::Pending),
            other => bail!("Unknown expense status '{}' (use paid|pending)", other),
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LoanStatus::Active => "Active",
            LoanStatus::Closed => "Closed",
            LoanStatus::Overdue => "Overdue",
        })
    }
}

impl fmt::Display for ReminderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReminderType::Emi => "emi",
            ReminderType::Bill => "bill",
            ReminderType::Recurring => "recurring",
            ReminderType::Custom => "custom",
        })
    }
}

impl FromStr for ReminderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "emi" => Ok(ReminderType::Emi),
            "bill" => Ok(ReminderType::Bill),
            "recurring" => Ok(ReminderType::Recurring),
            "custom" => Ok(ReminderType::Custom),
            other => bail!(
                "Unknown reminder type '{}' (use emi|bill|recurring|custom)",
                other
            ),
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReminderStatus::Pending => "pending",
            ReminderStatus::Completed => "completed",
            ReminderStatus::Overdue => "overdue",
        })
    }
}

impl FromStr for ReminderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ReminderStatus::Pending),
            "completed" => Ok(ReminderStatus::Completed),
            "overdue" => Ok(ReminderStatus::Overdue),
            other => bail!(
                "Unknown reminder status '{}' (use pending|completed|overdue)",
                other
            ),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => bail!("Unknown priority '{}' (use high|medium|low)", other),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::LoanDisbursement => "loan_disbursement",
            TransactionType::LoanPayment => "loan_payment",
        })
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            "loan_disbursement" => Ok(TransactionType::LoanDisbursement),
            "loan_payment" => Ok(TransactionType::LoanPayment),
            other => bail!(
                "Unknown transaction type '{}' (use income|expense|loan_disbursement|loan_payment)",
                other
            ),
        }
    }
}
