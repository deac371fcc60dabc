// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use cropledger::{cli, commands, session};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = session::books_path()?;
    let mut books = session::load_or_init(&path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let fresh = !path.exists();
            session::save(&path, &books)?;
            if fresh {
                println!("Books initialized at {}", path.display());
            } else {
                println!("Books already exist at {}", path.display());
            }
            return Ok(());
        }
        Some(("income", sub)) => commands::incomes::handle(&mut books, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut books, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut books, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&mut books, sub)?,
        Some(("reminder", sub)) => commands::reminders::handle(&mut books, sub)?,
        Some(("ledger", sub)) => commands::ledger::handle(&books, sub)?,
        Some(("report", sub)) => commands::reports::handle(&books, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut books, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&books, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&books)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
    }

    // Only a command that succeeded gets to touch the file.
    session::save(&path, &books)?;
    Ok(())
}
