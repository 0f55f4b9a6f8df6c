mod errors;
mod memory_storage;
mod sqlite_storage;

use crate::models::{NaturalKey, StoredTransaction, Transaction};
use crate::types::{Monetary, TransactionId};

pub use errors::StoreError;
pub use memory_storage::MemoryLedgerStore;
pub use sqlite_storage::SqliteLedgerStore;

/// Operations available inside one atomic unit of work against the ledger.
pub trait LedgerSession {
    fn get_balance(&mut self) -> Result<Monetary, StoreError>;
    fn set_balance(&mut self, value: Monetary) -> Result<(), StoreError>;
    /// Every stored row, ordered by date and then by insertion.
    fn list_transactions(&mut self) -> Result<Vec<StoredTransaction>, StoreError>;
    fn delete_transactions(&mut self, ids: &[TransactionId]) -> Result<(), StoreError>;
    /// Inserts rows in the given order; later rows receive larger identifiers.
    fn insert_transactions(&mut self, rows: &[Transaction]) -> Result<(), StoreError>;
    /// Rewrites the derived amounts of every row whose natural key matches.
    fn update_transaction(&mut self, key: &NaturalKey, amount_spent: Monetary, remaining_balance: Monetary) -> Result<(), StoreError>;
}

pub trait LedgerStore {
    /// Runs `body` as a single unit: its writes commit together when it
    /// returns `Ok` and none of them are kept when it returns `Err`.
    fn run_atomically<T, E, F>(&mut self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn LedgerSession) -> Result<T, E>,
        E: From<StoreError>;
}
