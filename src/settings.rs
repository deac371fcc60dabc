// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default file name for `settings export`.
pub const DEFAULT_EXPORT_FILE: &str = "accounting-settings.json";

/// Currencies the settings screen knows symbols for.
pub const KNOWN_CURRENCIES: &[(&str, &str)] = &[
    ("INR", "₹"),
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
];

pub fn symbol_for(code: &str) -> Option<&'static str> {
    KNOWN_CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, s)| *s)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("currency must not be blank")]
    BlankCurrency,
    #[error("currency symbol must not be blank")]
    BlankSymbol,
    #[error("language must not be blank")]
    BlankLanguage,
    #[error("financial year start '{0}' is not a valid MM-DD")]
    BadFinancialYearStart(String),
    #[error("{0} category list must not be empty")]
    EmptyCategories(&'static str),
    #[error("category names must not be blank")]
    BlankCategory,
    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),
}

/// Exported/imported verbatim as JSON with these key names, so the file
/// stays interchangeable with earlier exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    pub currency: String,
    pub currency_symbol: String,
    pub financial_year_start: String, // MM-DD
    pub language: String,
    pub date_format: DateFormat,
    pub backup_frequency: BackupFrequency,
    pub notifications: NotificationPrefs,
    pub categories: CategorySets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationPrefs {
    pub email_reminders: bool,
    pub sms_alerts: bool,
    pub push_notifications: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategorySets {
    pub income_categories: Vec<String>,
    pub expense_categories: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "DD-MM-YYYY")]
    DayMonthYear,
    #[serde(rename = "MM-DD-YYYY")]
    MonthDayYear,
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            financial_year_start: "04-01".to_string(),
            language: "english".to_string(),
            date_format: DateFormat::DayMonthYear,
            backup_frequency: BackupFrequency::Weekly,
            notifications: NotificationPrefs {
                email_reminders: true,
                sms_alerts: false,
                push_notifications: true,
            },
            categories: CategorySets {
                income_categories: [
                    "Crop Sales",
                    "Dairy",
                    "Livestock",
                    "Services",
                    "Government Subsidy",
                    "Other",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                expense_categories: [
                    "Seeds",
                    "Fertilizers",
                    "Pesticides",
                    "Equipment",
                    "Labor",
                    "Utilities",
                    "Transport",
                    "Other",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.currency.trim().is_empty() {
            return Err(SettingsError::BlankCurrency);
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(SettingsError::BlankSymbol);
        }
        if self.language.trim().is_empty() {
            return Err(SettingsError::BlankLanguage);
        }
        if !valid_month_day(&self.financial_year_start) {
            return Err(SettingsError::BadFinancialYearStart(
                self.financial_year_start.clone(),
            ));
        }
        if self.categories.income_categories.is_empty() {
            return Err(SettingsError::EmptyCategories("income"));
        }
        if self.categories.expense_categories.is_empty() {
            return Err(SettingsError::EmptyCategories("expense"));
        }
        if self
            .categories
            .income_categories
            .iter()
            .chain(self.categories.expense_categories.iter())
            .any(|c| c.trim().is_empty())
        {
            return Err(SettingsError::BlankCategory);
        }
        for list in [
            &self.categories.income_categories,
            &self.categories.expense_categories,
        ] {
            if let Some(dup) = first_duplicate(list) {
                return Err(SettingsError::DuplicateCategory(dup.to_string()));
            }
        }
        Ok(())
    }

    pub fn categories(&self, kind: CategoryKind) -> &[String] {
        match kind {
            CategoryKind::Income => &self.categories.income_categories,
            CategoryKind::Expense => &self.categories.expense_categories,
        }
    }

    pub fn categories_mut(&mut self, kind: CategoryKind) -> &mut Vec<String> {
        match kind {
            CategoryKind::Income => &mut self.categories.income_categories,
            CategoryKind::Expense => &mut self.categories.expense_categories,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serialize settings")
    }

    /// Parses and validates. The caller only replaces its settings on
    /// `Ok`, so a malformed file can never clobber a working setup.
    pub fn from_json(raw: &str) -> anyhow::Result<Settings> {
        let parsed: Settings =
            serde_json::from_str(raw).context("settings file is not valid settings JSON")?;
        parsed.validate()?;
        Ok(parsed)
    }
}

/// Case-insensitive duplicate scan, first offender wins.
fn first_duplicate(names: &[String]) -> Option<&str> {
    for (i, name) in names.iter().enumerate() {
        if names[..i].iter().any(|n| n.eq_ignore_ascii_case(name)) {
            return Some(name);
        }
    }
    None
}

/// "MM-DD" with a real month and a day that month can hold.
fn valid_month_day(s: &str) -> bool {
    let Some((m, d)) = s.split_once('-') else {
        return false;
    };
    if m.len() != 2 || d.len() != 2 {
        return false;
    }
    let (Ok(month), Ok(day)) = (m.parse::<u32>(), d.parse::<u32>()) else {
        return false;
    };
    // Checked against a leap year so 02-29 stays importable.
    chrono::NaiveDate::from_ymd_opt(2024, month, day).is_some()
}

impl DateFormat {
    pub fn chrono_format(self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "%d-%m-%Y",
            DateFormat::MonthDayYear => "%m-%d-%Y",
            DateFormat::YearMonthDay => "%Y-%m-%d",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateFormat::DayMonthYear => "DD-MM-YYYY",
            DateFormat::MonthDayYear => "MM-DD-YYYY",
            DateFormat::YearMonthDay => "YYYY-MM-DD",
        })
    }
}

impl FromStr for DateFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DD-MM-YYYY" => Ok(DateFormat::DayMonthYear),
            "MM-DD-YYYY" => Ok(DateFormat::MonthDayYear),
            "YYYY-MM-DD" => Ok(DateFormat::YearMonthDay),
            other => bail!(
                "Unknown date format '{}' (use DD-MM-YYYY|MM-DD-YYYY|YYYY-MM-DD)",
                other
            ),
        }
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BackupFrequency::Daily => "daily",
            BackupFrequency::Weekly => "weekly",
            BackupFrequency::Monthly => "monthly",
        })
    }
}

impl FromStr for BackupFrequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(BackupFrequency::Daily),
            "weekly" => Ok(BackupFrequency::Weekly),
            "monthly" => Ok(BackupFrequency::Monthly),
            other => bail!("Unknown backup frequency '{}' (use daily|weekly|monthly)", other),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CategoryKind::Income => "income",
            CategoryKind::Expense => "expense",
        })
    }
}

impl FromStr for CategoryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(CategoryKind::Income),
            "expense" => Ok(CategoryKind::Expense),
            other => bail!("Unknown category kind '{}' (use income|expense)", other),
        }
    }
}
