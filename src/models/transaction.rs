use chrono::NaiveDate;

use crate::models::{Tier, ValidationError};
use crate::types::{Monetary, MonetaryError, TransactionId};

/// Identity of a purchase across syncs. Derived fields never take part in it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct NaturalKey {
    pub date: NaiveDate,
    pub item: String,
    pub category: String,
    pub quantity: u32,
    pub unit_cost: Monetary
}

/// One normalized row of the incoming sheet.
///
/// `item` is expected title-cased and trimmed, `category` lower-cased and
/// trimmed, and `unit_cost` already quantized to two places.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BatchRow {
    pub date: NaiveDate,
    pub item: String,
    pub category: String,
    pub quantity: u32,
    pub unit_cost: Monetary
}

impl BatchRow {
    pub fn key(&self) -> NaturalKey {
        NaturalKey {
            date: self.date,
            item: self.item.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            unit_cost: self.unit_cost
        }
    }

    pub fn amount_spent(&self) -> Result<Monetary, MonetaryError> {
        self.unit_cost.checked_times(self.quantity)
    }

    /// Shape checks applied to every row before a sync touches the store.
    /// `row` is the 1-based position of the row in its batch.
    pub fn validate(&self, row: usize) -> Result<(), ValidationError> {
        if self.item.trim().is_empty() {
            return Err(ValidationError::missing_field(row, "Item"));
        }

        if self.category.trim().is_empty() {
            return Err(ValidationError::missing_field(row, "Category"));
        }

        if self.quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity { row, quantity: 0 });
        }

        if self.unit_cost.is_negative() {
            return Err(ValidationError::NegativeCost { row, cost: self.unit_cost });
        }

        Ok(())
    }
}

/// A ledger row with every derived field populated.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub item: String,
    pub category: String,
    pub quantity: u32,
    pub unit_cost: Monetary,
    pub tier: Tier,
    pub amount_spent: Monetary,
    pub remaining_balance: Monetary
}

impl Transaction {
    pub fn key(&self) -> NaturalKey {
        NaturalKey {
            date: self.date,
            item: self.item.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            unit_cost: self.unit_cost
        }
    }

    pub fn matches(&self, key: &NaturalKey) -> bool {
        self.date == key.date
            && self.quantity == key.quantity
            && self.unit_cost == key.unit_cost
            && self.item == key.item
            && self.category == key.category
    }
}

/// A persisted ledger row together with the identifier the store assigned it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StoredTransaction {
    pub id: TransactionId,
    pub transaction: Transaction
}
