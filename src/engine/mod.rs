mod classifier;
mod errors;
mod projector;
mod reconciler;
#[cfg(test)]
mod tests;

pub use classifier::classify;
pub use errors::ReconcileError;
pub use projector::BalanceProjector;
pub use reconciler::Reconciler;
