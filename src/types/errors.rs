use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonetaryError {
    #[error("Amount is empty")]
    Empty,
    #[error("Amount [{value}] is not a decimal number: {source}")]
    NotDecimal {
        value: String,
        #[source]
        source: rust_decimal::Error
    },
    #[error("Amount is out of range")]
    Overflow
}
