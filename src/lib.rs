pub mod config;
pub mod engine;
pub mod ingest;
pub mod models;
pub mod storage;
pub mod types;

pub use engine::{ReconcileError, Reconciler};
pub use models::{BatchRow, SyncSummary};
pub use storage::{LedgerStore, MemoryLedgerStore, SqliteLedgerStore};
pub use types::Monetary;
