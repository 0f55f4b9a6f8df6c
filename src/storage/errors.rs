use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Storage error: balance record is missing")]
    MissingBalance,
    #[error("Storage error: column [{column}] holds an unreadable value [{value}]")]
    CorruptValue {
        column: &'static str,
        value: String
    }
}

impl StoreError {
    pub fn corrupt_value(column: &'static str, value: &str) -> Self {
        Self::CorruptValue { column, value: value.to_string() }
    }
}
