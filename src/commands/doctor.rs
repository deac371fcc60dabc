// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::commands::{expenses, incomes, loans};
use crate::models::LoanStatus;
use crate::settings::CategoryKind;
use crate::store::Books;
use crate::utils::pretty_table;

pub fn handle(books: &Books) -> Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::new();

    // 1) Settings must still validate
    if let Err(e) = books.settings.validate() {
        rows.push(vec!["invalid_settings".into(), e.to_string()]);
    }

    // 2) Every entry should carry its ledger posting
    for i in books.incomes.iter() {
        let r = incomes::reference(i.id);
        if !has_reference(books, &r) {
            rows.push(vec!["missing_posting".into(), r]);
        }
    }
    for e in books.expenses.iter() {
        let r = expenses::reference(e.id);
        if !has_reference(books, &r) {
            rows.push(vec!["missing_posting".into(), r]);
        }
    }
    for l in books.loans.iter() {
        let r = loans::disbursement_reference(l.id);
        if !has_reference(books, &r) {
            rows.push(vec!["missing_posting".into(), r]);
        }
    }

    // 3) Ledger references must point at live records
    for t in books.ledger.iter() {
        if let Some(refr) = &t.reference {
            if !reference_resolves(books, refr) {
                rows.push(vec!["dangling_reference".into(), refr.clone()]);
            }
        }
    }

    // 4) Sign discipline: credits positive, debits negative
    for t in books.ledger.iter() {
        let bad = if t.r#type.is_credit() {
            t.amount < Decimal::ZERO
        } else {
            t.amount > Decimal::ZERO
        };
        if bad {
            rows.push(vec!["bad_sign".into(), format!("ledger #{}", t.id)]);
        }
    }

    // 5) Loan bookkeeping
    for l in books.loans.iter() {
        if l.remaining_amount < Decimal::ZERO {
            rows.push(vec!["negative_remaining".into(), format!("loan #{}", l.id)]);
        }
        if l.status == LoanStatus::Closed && l.remaining_amount > Decimal::ZERO {
            rows.push(vec!["closed_with_balance".into(), format!("loan #{}", l.id)]);
        }
        if l.status != LoanStatus::Closed && l.remaining_amount.is_zero() {
            rows.push(vec!["repaid_but_open".into(), format!("loan #{}", l.id)]);
        }
    }

    // 6) Budgets: known categories, one budget per category
    for (i, b) in books.budgets.iter().enumerate() {
        if !books
            .settings
            .categories(CategoryKind::Expense)
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&b.category))
        {
            rows.push(vec!["unknown_budget_category".into(), b.category.clone()]);
        }
        if books
            .budgets
            .items()
            .iter()
            .take(i)
            .any(|other| other.category.eq_ignore_ascii_case(&b.category))
        {
            rows.push(vec!["duplicate_budget".into(), b.category.clone()]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

fn has_reference(books: &Books, r: &str) -> bool {
    books.ledger.iter().any(|t| t.reference.as_deref() == Some(r))
}

/// Structured references (INV-001 and friends) must resolve to a live
/// record; anything free-form passes.
fn reference_resolves(books: &Books, r: &str) -> bool {
    let Some((prefix, id_str)) = r.split_once('-') else {
        return true;
    };
    let Ok(id) = id_str.parse::<i64>() else {
        return true;
    };
    match prefix {
        "INV" => books.incomes.get(id).is_some(),
        "EXP" => books.expenses.get(id).is_some(),
        "LOAN" | "EMI" => books.loans.get(id).is_some(),
        _ => true,
    }
}
