//! Batch reconciliation settings.

use serde::{Deserialize, Serialize};

/// How [`reconcile_batch`](crate::batch::reconcile_batch) spreads contracts
/// over threads.
///
/// Every contract is reconciled on its own, so the setting changes only
/// wall-clock time: outcomes and their order are the same either way.
/// Without the `parallel` feature every batch runs on the calling thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Allow batches to run on the rayon pool.
    pub parallel: bool,

    /// Smallest batch, in contracts, handed to the rayon pool.
    pub min_parallel_contracts: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_parallel_contracts: 64,
        }
    }
}

impl ReconcileConfig {
    /// Same as [`ReconcileConfig::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps every batch on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    #[must_use]
    pub fn with_min_parallel_contracts(mut self, contracts: usize) -> Self {
        self.min_parallel_contracts = contracts;
        self
    }

    /// Whether a batch of `contracts` contracts goes to the rayon pool.
    #[must_use]
    pub fn runs_in_parallel(&self, contracts: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && contracts >= self.min_parallel_contracts
    }
}
