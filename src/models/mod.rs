mod errors;
mod summary;
#[cfg(test)]
mod tests;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::types::Monetary;

pub use errors::ValidationError;
pub use summary::SyncSummary;
pub use transaction::{BatchRow, NaturalKey, StoredTransaction, Transaction};

/// The closed set of spending categories the tier bands are defined for.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Category {
    Meal,
    Beverage
}

impl Category {
    /// Matches an already normalized (trimmed, lower-case) category name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "meal" => Some(Category::Meal),
            "beverage" => Some(Category::Beverage),
            _ => None
        }
    }

    /// Highest cost still classified as `saving`.
    pub fn saving_ceiling(&self) -> Monetary {
        match self {
            Category::Meal => Monetary::from_cents(600),
            Category::Beverage => Monetary::from_cents(200)
        }
    }

    /// Lowest cost classified as `luxury`.
    pub fn luxury_floor(&self) -> Monetary {
        match self {
            Category::Meal => Monetary::from_cents(1500),
            Category::Beverage => Monetary::from_cents(700)
        }
    }
}

/// Budget classification of a single purchase.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Tier {
    Saving,
    Balance,
    Luxury
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Saving => "saving",
            Tier::Balance => "balance",
            Tier::Luxury => "luxury"
        }
    }
}

impl Display for Tier {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "saving" => Ok(Tier::Saving),
            "balance" => Ok(Tier::Balance),
            "luxury" => Ok(Tier::Luxury),
            other => Err(format!("Unknown tier [{other}]"))
        }
    }
}
