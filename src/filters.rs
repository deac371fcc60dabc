// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::str::FromStr;

use anyhow::bail;
use chrono::NaiveDate;

use crate::models::{
    ExpenseRecord, IncomeRecord, LedgerTransaction, Loan, Reminder, TransactionType,
};

/// Free-text matching. `needle` arrives trimmed and lowercased.
pub trait Searchable {
    fn matches(&self, needle: &str) -> bool;
}

/// Anything that sits on a date axis.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Searchable for IncomeRecord {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.description, needle) || contains(&self.source, needle)
    }
}

impl Searchable for ExpenseRecord {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.description, needle) || contains(&self.category, needle)
    }
}

impl Searchable for Reminder {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.description, needle)
    }
}

impl Searchable for LedgerTransaction {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.description, needle)
            || contains(&self.category, needle)
            || self
                .reference
                .as_deref()
                .is_some_and(|r| contains(r, needle))
    }
}

impl Dated for IncomeRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for ExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Reminder {
    fn date(&self) -> NaiveDate {
        self.due_date
    }
}

impl Dated for LedgerTransaction {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for Loan {
    fn date(&self) -> NaiveDate {
        self.start_date
    }
}

/// Case-insensitive substring filter. A blank term keeps everything,
/// order is preserved either way.
pub fn search<'a, T, I>(items: I, term: &str) -> Vec<&'a T>
where
    T: Searchable,
    I: IntoIterator<Item = &'a T>,
{
    let needle = term.trim().to_lowercase();
    let items = items.into_iter();
    if needle.is_empty() {
        return items.collect();
    }
    items.filter(|it| it.matches(&needle)).collect()
}

/// Inclusive on both ends; an inverted range simply matches nothing.
pub fn filter_by_date_range<'a, T, I>(
    items: I,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a T>
where
    T: Dated,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|it| {
            let d = it.date();
            start.is_none_or(|s| d >= s) && end.is_none_or(|e| d <= e)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(TransactionType),
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        match trimmed.parse::<TransactionType>() {
            Ok(t) => Ok(TypeFilter::Only(t)),
            Err(_) => bail!(
                "Unknown type filter '{}' (use all|income|expense|loan_disbursement|loan_payment)",
                trimmed
            ),
        }
    }
}

pub fn filter_by_type<'a, I>(rows: I, filter: TypeFilter) -> Vec<&'a LedgerTransaction>
where
    I: IntoIterator<Item = &'a LedgerTransaction>,
{
    rows.into_iter()
        .filter(|t| match filter {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => t.r#type == wanted,
        })
        .collect()
}
