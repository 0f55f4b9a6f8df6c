use std::fmt;
use std::fmt::{Display, Formatter};

use crate::types::Monetary;

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SyncSummary {
    pub deleted: usize,
    pub inserted: usize,
    pub unchanged_or_updated: usize,
    pub final_balance: Monetary
}

impl Display for SyncSummary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "deleted={} inserted={} unchanged_or_updated={} final_balance={}",
            self.deleted, self.inserted, self.unchanged_or_updated, self.final_balance
        )
    }
}
