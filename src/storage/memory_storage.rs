use std::collections::HashSet;

use crate::models::{NaturalKey, StoredTransaction, Transaction};
use crate::storage::{LedgerSession, LedgerStore, StoreError};
use crate::types::{Monetary, TransactionId};

#[derive(Debug, Clone)]
struct LedgerState {
    balance: Monetary,
    rows: Vec<StoredTransaction>,
    next_id: TransactionId
}

/// In-process ledger. Each atomic unit works on a copy of the state that
/// replaces the committed state only when the unit succeeds.
#[derive(Debug, Clone)]
pub struct MemoryLedgerStore {
    state: LedgerState
}

impl MemoryLedgerStore {
    pub fn new(initial_balance: Monetary) -> Self {
        Self {
            state: LedgerState {
                balance: initial_balance,
                rows: Vec::new(),
                next_id: 1
            }
        }
    }

    /// Seeds the store with rows that were persisted by an earlier run.
    pub fn with_transactions(initial_balance: Monetary, rows: Vec<Transaction>) -> Self {
        let mut store = Self::new(initial_balance);
        let mut session = MemorySession { state: &mut store.state };
        session.push_all(&rows);
        store
    }

    pub fn balance(&self) -> Monetary {
        self.state.balance
    }

    pub fn transactions(&self) -> Vec<StoredTransaction> {
        sorted_rows(&self.state.rows)
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn run_atomically<T, E, F>(&mut self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn LedgerSession) -> Result<T, E>,
        E: From<StoreError>
    {
        let mut working = self.state.clone();
        let value = body(&mut MemorySession { state: &mut working })?;
        self.state = working;
        Ok(value)
    }
}

struct MemorySession<'a> {
    state: &'a mut LedgerState
}

impl MemorySession<'_> {
    fn push_all(&mut self, rows: &[Transaction]) {
        for transaction in rows {
            let id = self.state.next_id;
            self.state.next_id += 1;
            self.state.rows.push(StoredTransaction { id, transaction: transaction.clone() });
        }
    }
}

impl LedgerSession for MemorySession<'_> {
    fn get_balance(&mut self) -> Result<Monetary, StoreError> {
        Ok(self.state.balance)
    }

    fn set_balance(&mut self, value: Monetary) -> Result<(), StoreError> {
        self.state.balance = value;
        Ok(())
    }

    fn list_transactions(&mut self) -> Result<Vec<StoredTransaction>, StoreError> {
        Ok(sorted_rows(&self.state.rows))
    }

    fn delete_transactions(&mut self, ids: &[TransactionId]) -> Result<(), StoreError> {
        let ids: HashSet<TransactionId> = ids.iter().copied().collect();
        self.state.rows.retain(|row| !ids.contains(&row.id));
        Ok(())
    }

    fn insert_transactions(&mut self, rows: &[Transaction]) -> Result<(), StoreError> {
        self.push_all(rows);
        Ok(())
    }

    fn update_transaction(&mut self, key: &NaturalKey, amount_spent: Monetary, remaining_balance: Monetary) -> Result<(), StoreError> {
        for row in self.state.rows.iter_mut().filter(|row| row.transaction.matches(key)) {
            row.transaction.amount_spent = amount_spent;
            row.transaction.remaining_balance = remaining_balance;
        }
        Ok(())
    }
}

fn sorted_rows(rows: &[StoredTransaction]) -> Vec<StoredTransaction> {
    let mut sorted = rows.to_vec();
    sorted.sort_by_key(|row| (row.transaction.date, row.id));
    sorted
}
