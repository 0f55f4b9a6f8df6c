use crate::models::ValidationError;
use crate::storage::StoreError;
use crate::types::MonetaryError;
use thiserror::Error;

/// Any reason a reconciliation or balance adjustment did not commit.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Unsupported category [{category}]")]
    UnsupportedCategory {
        category: String
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Monetary(#[from] MonetaryError)
}

impl ReconcileError {
    pub fn unsupported_category(category: &str) -> Self {
        Self::UnsupportedCategory { category: category.to_string() }
    }
}
