use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::engine::classifier::classify;
use crate::engine::errors::ReconcileError;
use crate::engine::projector::BalanceProjector;
use crate::models::{BatchRow, NaturalKey, StoredTransaction, SyncSummary, Transaction};
use crate::storage::{LedgerSession, LedgerStore};
use crate::types::{Monetary, TransactionId};

/// Brings a stored ledger in line with a freshly read batch of rows.
pub struct Reconciler<S: LedgerStore> {
    store: S
}

impl<S: LedgerStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn balance(&mut self) -> Result<Monetary, ReconcileError> {
        self.store.run_atomically(|session| -> Result<Monetary, ReconcileError> { Ok(session.get_balance()?) })
    }

    /// Applies a deposit (positive) or withdrawal (negative) to the stored
    /// balance and returns the new value.
    pub fn apply_adjustment(&mut self, delta: Monetary) -> Result<Monetary, ReconcileError> {
        let balance = self.store.run_atomically(|session| -> Result<Monetary, ReconcileError> {
            let mut projector = BalanceProjector::new(session.get_balance()?);
            let balance = projector.adjust(delta)?;
            session.set_balance(balance)?;
            Ok(balance)
        })?;

        info!("Applied adjustment of {delta}, balance is now {balance}");

        Ok(balance)
    }

    /// Deletes stored rows missing from `batch`, refreshes the derived amounts
    /// of rows present in both, and inserts the rest in date order while
    /// debiting the running balance.
    ///
    /// # Errors
    /// Returns `ReconcileError` if:
    /// - A row fails shape validation (nothing is read or written).
    /// - A new row has a category outside the tier bands.
    /// - The store fails.
    ///
    /// In the last two cases the whole unit is rolled back.
    pub fn reconcile(&mut self, batch: &[BatchRow]) -> Result<SyncSummary, ReconcileError> {
        for (index, row) in batch.iter().enumerate() {
            row.validate(index + 1)?;
        }

        let summary = self.store.run_atomically(|session| sync(session, batch))?;

        info!("Reconciled {} row(s): {summary}", batch.len());

        Ok(summary)
    }
}

fn sync(session: &mut dyn LedgerSession, batch: &[BatchRow]) -> Result<SyncSummary, ReconcileError> {
    let mut projector = BalanceProjector::new(session.get_balance()?);
    let existing = session.list_transactions()?;
    let batch_keys: HashSet<NaturalKey> = batch.iter().map(BatchRow::key).collect();

    let (kept, removed): (Vec<StoredTransaction>, Vec<StoredTransaction>) = existing
        .into_iter()
        .partition(|stored| batch_keys.contains(&stored.transaction.key()));

    let removed_ids: Vec<TransactionId> = removed.iter().map(|stored| stored.id).collect();

    if !removed_ids.is_empty() {
        session.delete_transactions(&removed_ids)?;

        for stored in &removed {
            debug!("Deleted [{}] {} x{} on {}", stored.id, stored.transaction.item, stored.transaction.quantity, stored.transaction.date);
        }
    }

    let mut surviving: HashMap<NaturalKey, Vec<(Monetary, Monetary)>> = HashMap::new();
    for stored in &kept {
        surviving
            .entry(stored.transaction.key())
            .or_default()
            .push((stored.transaction.amount_spent, stored.transaction.remaining_balance));
    }

    let mut ordered: Vec<&BatchRow> = batch.iter().collect();
    ordered.sort_by_key(|row| row.date);

    let mut staged = Vec::new();
    let mut staged_keys: HashSet<NaturalKey> = HashSet::new();
    let mut refreshed = 0;

    for row in ordered {
        let key = row.key();
        let amount_spent = row.amount_spent()?;

        if staged_keys.contains(&key) {
            debug!("Skipped repeated {} x{} on {}", row.item, row.quantity, row.date);
            refreshed += 1;
            continue;
        }

        if let Some(derived) = surviving.get(&key) {
            // Existing rows never move the balance; they only see where it currently stands.
            let remaining_balance = projector.current();

            if derived.iter().any(|stored| *stored != (amount_spent, remaining_balance)) {
                session.update_transaction(&key, amount_spent, remaining_balance)?;
                debug!("Updated {} x{} on {} to remaining {remaining_balance}", row.item, row.quantity, row.date);
            }

            refreshed += 1;
            continue;
        }

        let remaining_balance = projector.debit(amount_spent)?;
        let tier = classify(&row.category, row.unit_cost)?;

        debug!("Staged {} x{} on {} as {tier}, remaining {remaining_balance}", row.item, row.quantity, row.date);

        staged_keys.insert(key);
        staged.push(Transaction {
            date: row.date,
            item: row.item.clone(),
            category: row.category.clone(),
            quantity: row.quantity,
            unit_cost: row.unit_cost,
            tier,
            amount_spent,
            remaining_balance
        });
    }

    if !staged.is_empty() {
        session.insert_transactions(&staged)?;
    }

    let final_balance = projector.current();
    session.set_balance(final_balance)?;

    Ok(SyncSummary {
        deleted: removed_ids.len(),
        inserted: staged.len(),
        unchanged_or_updated: refreshed,
        final_balance
    })
}
