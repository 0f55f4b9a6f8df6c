mod errors;
mod monetary;

pub use errors::MonetaryError;
pub use monetary::{DECIMAL_PLACES, Monetary};

/// Store-assigned identifier of a ledger row. Increases with insertion order.
pub type TransactionId = i64;
