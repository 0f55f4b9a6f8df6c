use crate::types::{Monetary, MonetaryError};
use thiserror::Error;

/// A batch row, or the sheet it came from, does not have the expected shape.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Sheet is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        columns: Vec<String>
    },
    #[error("Row [{row}] is missing required field [{field}]")]
    MissingField {
        row: usize,
        field: &'static str
    },
    #[error("Row [{row}] has an invalid date [{value}]")]
    InvalidDate {
        row: usize,
        value: String
    },
    #[error("Row [{row}] has an invalid quantity [{value}]")]
    InvalidQuantity {
        row: usize,
        value: String
    },
    #[error("Row [{row}] has a non-positive quantity [{quantity}]")]
    NonPositiveQuantity {
        row: usize,
        quantity: i64
    },
    #[error("Row [{row}] has an invalid cost [{value}]: {source}")]
    InvalidCost {
        row: usize,
        value: String,
        #[source]
        source: MonetaryError
    },
    #[error("Row [{row}] has a negative cost [{cost}]")]
    NegativeCost {
        row: usize,
        cost: Monetary
    }
}

impl ValidationError {
    pub fn missing_field(row: usize, field: &'static str) -> Self {
        Self::MissingField { row, field }
    }

    pub fn invalid_date(row: usize, value: &str) -> Self {
        Self::InvalidDate { row, value: value.to_string() }
    }

    pub fn invalid_quantity(row: usize, value: &str) -> Self {
        Self::InvalidQuantity { row, value: value.to_string() }
    }

    pub fn invalid_cost(row: usize, value: &str, source: MonetaryError) -> Self {
        Self::InvalidCost { row, value: value.to_string(), source }
    }
}
