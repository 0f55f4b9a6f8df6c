use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use tracing::debug;

use crate::models::{NaturalKey, StoredTransaction, Tier, Transaction};
use crate::storage::{LedgerSession, LedgerStore, StoreError};
use crate::types::{Monetary, TransactionId};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS balance (
    id      INTEGER PRIMARY KEY CHECK (id = 1),
    current TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    date              TEXT    NOT NULL,
    item              TEXT    NOT NULL,
    category          TEXT    NOT NULL,
    quantity          INTEGER NOT NULL CHECK (quantity > 0),
    tier              TEXT    NOT NULL,
    unit_cost         TEXT    NOT NULL,
    amount_spent      TEXT    NOT NULL,
    remaining_balance TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_expenses_date_id ON expenses (date, id);
";

/// SQLite-backed ledger.
///
/// Currency columns hold canonical two-place text (`10.00`) so natural-key
/// comparisons in SQL are exact, and dates hold ISO text so `ORDER BY date`
/// is chronological.
pub struct SqliteLedgerStore {
    connection: Connection
}

impl SqliteLedgerStore {
    /// Opens (or creates) the database at `path`. `initial_balance` seeds the
    /// balance record only when it does not exist yet.
    pub fn open(path: &Path, initial_balance: Monetary) -> Result<Self, StoreError> {
        let connection = Connection::open(path)?;
        connection.busy_timeout(Duration::from_millis(250))?;
        Self::initialize(connection, initial_balance)
    }

    pub fn open_in_memory(initial_balance: Monetary) -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?, initial_balance)
    }

    fn initialize(connection: Connection, initial_balance: Monetary) -> Result<Self, StoreError> {
        connection.execute_batch(SCHEMA_SQL)?;
        let seeded = connection.execute(
            "INSERT OR IGNORE INTO balance (id, current) VALUES (1, ?1)",
            params![initial_balance.to_string()]
        )?;

        if seeded > 0 {
            debug!("Seeded balance record with {initial_balance}");
        }

        Ok(Self { connection })
    }
}

impl LedgerStore for SqliteLedgerStore {
    fn run_atomically<T, E, F>(&mut self, body: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn LedgerSession) -> Result<T, E>,
        E: From<StoreError>
    {
        // Takes the write lock up front so the balance read and write see one snapshot.
        let transaction = self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        let value = body(&mut SqliteSession { transaction: &transaction })?;

        transaction.commit().map_err(StoreError::from)?;

        Ok(value)
    }
}

struct SqliteSession<'a, 'conn> {
    transaction: &'a rusqlite::Transaction<'conn>
}

struct ExpenseRecord {
    id: TransactionId,
    date: NaiveDate,
    item: String,
    category: String,
    quantity: u32,
    tier: String,
    unit_cost: String,
    amount_spent: String,
    remaining_balance: String
}

impl ExpenseRecord {
    fn into_stored(self) -> Result<StoredTransaction, StoreError> {
        let tier = Tier::from_str(&self.tier)
            .map_err(|_| StoreError::corrupt_value("tier", &self.tier))?;

        Ok(StoredTransaction {
            id: self.id,
            transaction: Transaction {
                date: self.date,
                item: self.item,
                category: self.category,
                quantity: self.quantity,
                unit_cost: parse_monetary("unit_cost", &self.unit_cost)?,
                tier,
                amount_spent: parse_monetary("amount_spent", &self.amount_spent)?,
                remaining_balance: parse_monetary("remaining_balance", &self.remaining_balance)?
            }
        })
    }
}

fn parse_monetary(column: &'static str, value: &str) -> Result<Monetary, StoreError> {
    Monetary::from_str(value).map_err(|_| StoreError::corrupt_value(column, value))
}

impl LedgerSession for SqliteSession<'_, '_> {
    fn get_balance(&mut self) -> Result<Monetary, StoreError> {
        let current: Option<String> = self.transaction
            .query_row("SELECT current FROM balance WHERE id = 1", [], |row| row.get(0))
            .optional()?;

        let current = current.ok_or(StoreError::MissingBalance)?;

        parse_monetary("current", &current)
    }

    fn set_balance(&mut self, value: Monetary) -> Result<(), StoreError> {
        let updated = self.transaction.execute(
            "UPDATE balance SET current = ?1 WHERE id = 1",
            params![value.to_string()]
        )?;

        if updated == 0 {
            return Err(StoreError::MissingBalance);
        }

        Ok(())
    }

    fn list_transactions(&mut self) -> Result<Vec<StoredTransaction>, StoreError> {
        let mut statement = self.transaction.prepare(
            "SELECT id, date, item, category, quantity, tier, unit_cost, amount_spent, remaining_balance
               FROM expenses
              ORDER BY date, id"
        )?;

        let records = statement
            .query_map([], |row| {
                Ok(ExpenseRecord {
                    id: row.get(0)?,
                    date: row.get(1)?,
                    item: row.get(2)?,
                    category: row.get(3)?,
                    quantity: row.get(4)?,
                    tier: row.get(5)?,
                    unit_cost: row.get(6)?,
                    amount_spent: row.get(7)?,
                    remaining_balance: row.get(8)?
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        records.into_iter().map(ExpenseRecord::into_stored).collect()
    }

    fn delete_transactions(&mut self, ids: &[TransactionId]) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("DELETE FROM expenses WHERE id IN ({placeholders})");

        self.transaction.execute(&sql, params_from_iter(ids))?;

        Ok(())
    }

    fn insert_transactions(&mut self, rows: &[Transaction]) -> Result<(), StoreError> {
        let mut statement = self.transaction.prepare_cached(
            "INSERT INTO expenses
                (date, item, category, quantity, tier, unit_cost, amount_spent, remaining_balance)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
        )?;

        for row in rows {
            statement.execute(params![
                row.date,
                &row.item,
                &row.category,
                row.quantity,
                row.tier.as_str(),
                row.unit_cost.to_string(),
                row.amount_spent.to_string(),
                row.remaining_balance.to_string()
            ])?;
        }

        Ok(())
    }

    fn update_transaction(&mut self, key: &NaturalKey, amount_spent: Monetary, remaining_balance: Monetary) -> Result<(), StoreError> {
        self.transaction.execute(
            "UPDATE expenses
                SET amount_spent = ?1,
                    remaining_balance = ?2
              WHERE date = ?3
                AND item = ?4
                AND category = ?5
                AND quantity = ?6
                AND unit_cost = ?7",
            params![
                amount_spent.to_string(),
                remaining_balance.to_string(),
                key.date,
                &key.item,
                &key.category,
                key.quantity,
                key.unit_cost.to_string()
            ]
        )?;

        Ok(())
    }
}
