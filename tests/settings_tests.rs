// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cropledger::{
    cli,
    commands::settings as settings_cmd,
    settings::{Settings, SettingsError},
    store::Books,
};
use tempfile::tempdir;

fn run(books: &mut Books, argv: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["cropledger", "settings"];
    full.extend_from_slice(argv);
    let matches = cli::build_cli().get_matches_from(full);
    if let Some(("settings", m)) = matches.subcommand() {
        settings_cmd::handle(books, m)
    } else {
        panic!("no settings subcommand");
    }
}

#[test]
fn json_round_trip_is_lossless() {
    let original = Settings::default();
    let exported = original.to_json().unwrap();
    let reimported = Settings::from_json(&exported).unwrap();
    assert_eq!(reimported.to_json().unwrap(), exported);
}

#[test]
fn export_then_import_through_files() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("settings.json");
    let out_str = out_path.to_string_lossy().to_string();

    let mut books = Books::default();
    run(&mut books, &["set", "--currency", "usd"]).unwrap();
    run(&mut books, &["export", "--out", &out_str]).unwrap();

    let mut other = Books::default();
    run(&mut other, &["import", "--file", &out_str]).unwrap();
    assert_eq!(other.settings.currency, "USD");
    assert_eq!(other.settings.currency_symbol, "$");
}

#[test]
fn malformed_import_leaves_settings_untouched() {
    let dir = tempdir().unwrap();
    let bad_path = dir.path().join("broken.json");
    std::fs::write(&bad_path, "{ not json at all").unwrap();
    let bad_str = bad_path.to_string_lossy().to_string();

    let mut books = Books::default();
    let before = books.settings.to_json().unwrap();

    assert!(run(&mut books, &["import", "--file", &bad_str]).is_err());
    assert_eq!(books.settings.to_json().unwrap(), before);
}

#[test]
fn import_rejects_unknown_keys() {
    let mut doctored: serde_json::Value =
        serde_json::from_str(&Settings::default().to_json().unwrap()).unwrap();
    doctored["favouriteTractor"] = serde_json::json!("red");
    assert!(Settings::from_json(&doctored.to_string()).is_err());
}

#[test]
fn import_rejects_a_file_that_fails_validation() {
    let mut settings = Settings::default();
    settings.categories.expense_categories.push("seeds".to_string());
    // Serializes fine, but duplicates 'Seeds' case-insensitively
    let raw = settings.to_json().unwrap();
    let err = Settings::from_json(&raw).unwrap_err();
    assert!(err.to_string().contains("duplicate category"));
}

#[test]
fn validate_names_the_offending_field() {
    let mut settings = Settings::default();
    settings.language = "  ".to_string();
    assert_eq!(settings.validate(), Err(SettingsError::BlankLanguage));

    let mut settings = Settings::default();
    settings.financial_year_start = "13-01".to_string();
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFinancialYearStart("13-01".to_string()))
    );

    // A leap-day start is a real date
    let mut settings = Settings::default();
    settings.financial_year_start = "02-29".to_string();
    assert_eq!(settings.validate(), Ok(()));

    let mut settings = Settings::default();
    settings.categories.income_categories.clear();
    assert_eq!(
        settings.validate(),
        Err(SettingsError::EmptyCategories("income"))
    );
}

#[test]
fn set_currency_picks_the_matching_symbol() {
    let mut books = Books::default();
    run(&mut books, &["set", "--currency", "eur"]).unwrap();
    assert_eq!(books.settings.currency, "EUR");
    assert_eq!(books.settings.currency_symbol, "€");

    let err = run(&mut books, &["set", "--currency", "XYZ"]).unwrap_err();
    assert!(err.to_string().contains("Unknown currency 'XYZ'"));

    let err = run(&mut books, &["set"]).unwrap_err();
    assert!(err.to_string().contains("Nothing to change"));
}

#[test]
fn set_validates_before_replacing() {
    let mut books = Books::default();
    let before = books.settings.to_json().unwrap();

    assert!(run(&mut books, &["set", "--fy-start", "31-12"]).is_err());
    assert_eq!(books.settings.to_json().unwrap(), before);

    run(&mut books, &["set", "--fy-start", "07-01", "--backup", "monthly"]).unwrap();
    assert_eq!(books.settings.financial_year_start, "07-01");
}

#[test]
fn category_add_and_rm_guard_the_lists() {
    let mut books = Books::default();
    run(&mut books, &["category", "add", "--kind", "expense", "--name", "Irrigation"]).unwrap();
    assert!(
        books
            .settings
            .categories
            .expense_categories
            .iter()
            .any(|c| c == "Irrigation")
    );

    let err = run(&mut books, &["category", "add", "--kind", "expense", "--name", "irrigation"])
        .unwrap_err();
    assert!(err.to_string().contains("already exists"));

    run(&mut books, &["category", "rm", "--kind", "expense", "--name", "Irrigation"]).unwrap();

    let err = run(&mut books, &["category", "rm", "--kind", "income", "--name", "Tourism"])
        .unwrap_err();
    assert!(err.to_string().contains("No income category 'Tourism'"));
}

#[test]
fn the_last_category_cannot_be_removed() {
    let mut books = Books::default();
    let keep = books.settings.categories.income_categories[0].clone();
    books.settings.categories.income_categories = vec![keep.clone()];

    let err = run(&mut books, &["category", "rm", "--kind", "income", "--name", &keep])
        .unwrap_err();
    assert!(err.to_string().contains("last income category"));
}

#[test]
fn notify_flips_individual_channels() {
    let mut books = Books::default();
    run(&mut books, &["notify", "--email", "off", "--sms", "on"]).unwrap();
    assert!(!books.settings.notifications.email_reminders);
    assert!(books.settings.notifications.sms_alerts);
    // Untouched channel keeps its default
    assert!(books.settings.notifications.push_notifications);

    let err = run(&mut books, &["notify", "--email", "maybe"]).unwrap_err();
    assert!(err.to_string().contains("Expected on|off"));
}
