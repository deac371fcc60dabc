// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Budget, ExpenseRecord, IncomeRecord, LedgerTransaction, Loan, Reminder, TransactionType,
};
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(i64),
}

/// Anything the store can hold: carries its own id, assigned on insert.
pub trait Record {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_record {
    ($($t:ty),+) => {
        $(impl Record for $t {
            fn id(&self) -> i64 {
                self.id
            }
            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })+
    };
}

impl_record!(
    IncomeRecord,
    ExpenseRecord,
    Budget,
    Loan,
    Reminder,
    LedgerTransaction
);

/// Where new records land: entry collections show newest first, the
/// ledger and budgets keep arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertOrder {
    Front,
    Back,
}

/// An ordered in-memory collection with monotonically increasing ids.
/// Ids are never reused, even after removals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T: Record> {
    items: Vec<T>,
    next_id: i64,
    order: InsertOrder,
}

impl<T: Record> Collection<T> {
    pub fn new(order: InsertOrder) -> Self {
        Collection {
            items: Vec::new(),
            next_id: 1,
            order,
        }
    }

    /// Assigns the next id, inserts per the collection's order and
    /// returns the assigned id.
    pub fn add(&mut self, mut item: T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        item.set_id(id);
        match self.order {
            InsertOrder::Front => self.items.insert(0, item),
            InsertOrder::Back => self.items.push(item),
        }
        id
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.items.iter().find(|it| it.id() == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.items.iter_mut().find(|it| it.id() == id)
    }

    pub fn remove(&mut self, id: i64) -> Result<T, StoreError> {
        match self.items.iter().position(|it| it.id() == id) {
            Some(pos) => Ok(self.items.remove(pos)),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Applies `f` to the record in place and passes its return value
    /// through.
    pub fn update<R>(
        &mut self,
        id: i64,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, StoreError> {
        match self.get_mut(id) {
            Some(item) => Ok(f(item)),
            None => Err(StoreError::NotFound(id)),
        }
    }

    /// Drops every item failing the predicate, returns how many went.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The whole book of record: every entry collection plus settings.
/// Serialized as one JSON document per session snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Books {
    pub incomes: Collection<IncomeRecord>,
    pub expenses: Collection<ExpenseRecord>,
    pub budgets: Collection<Budget>,
    pub loans: Collection<Loan>,
    pub reminders: Collection<Reminder>,
    pub ledger: Collection<LedgerTransaction>,
    pub settings: Settings,
}

impl Default for Books {
    fn default() -> Self {
        Books {
            incomes: Collection::new(InsertOrder::Front),
            expenses: Collection::new(InsertOrder::Front),
            budgets: Collection::new(InsertOrder::Back),
            loans: Collection::new(InsertOrder::Front),
            reminders: Collection::new(InsertOrder::Front),
            ledger: Collection::new(InsertOrder::Back),
            settings: Settings::default(),
        }
    }
}

impl Books {
    /// Appends a ledger row. `amount` is a magnitude; the sign is applied
    /// here from the transaction type so callers cannot get it wrong.
    pub fn post(
        &mut self,
        date: NaiveDate,
        r#type: TransactionType,
        description: &str,
        category: &str,
        amount: Decimal,
        reference: Option<String>,
    ) -> i64 {
        let signed = if r#type.is_credit() {
            amount.abs()
        } else {
            -amount.abs()
        };
        self.ledger.add(LedgerTransaction {
            id: 0,
            date,
            r#type,
            description: description.to_string(),
            category: category.to_string(),
            amount: signed,
            reference,
        })
    }

    /// Removes every ledger row carrying the given reference. Used when
    /// the originating income or expense entry is deleted.
    pub fn remove_postings(&mut self, reference: &str) -> usize {
        self.ledger
            .retain(|t| t.reference.as_deref() != Some(reference))
    }
}
