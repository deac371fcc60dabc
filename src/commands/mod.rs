// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod incomes;
pub mod expenses;
pub mod budgets;
pub mod loans;
pub mod reminders;
pub mod ledger;
pub mod reports;
pub mod settings;
pub mod exporter;
pub mod doctor;
