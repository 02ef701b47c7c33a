use std::sync::Arc;

use crate::{
    ledger::ContinuousResourceAllocation,
    resource::ResourceId,
    store::{error::StoreError, types::VersionedLedger},
};

/// Versioned key/value backend holding one ledger per resource.
pub trait LedgerMapPort: Send + Sync {
    fn get(&self, resource_id: &ResourceId) -> Result<Option<VersionedLedger>, StoreError>;

    /// Replaces the ledger stored under `resource_id` only if its version is
    /// still `expected_version`. `None` inserts only when no ledger exists.
    /// Returns `Ok(false)` when another writer got there first.
    fn compare_and_set(
        &self,
        resource_id: &ResourceId,
        expected_version: Option<u64>,
        ledger: Arc<ContinuousResourceAllocation>,
    ) -> Result<bool, StoreError>;

    fn keys(&self) -> Result<Vec<ResourceId>, StoreError>;

    /// Number of successful swaps across all keys.
    fn version(&self) -> Result<u64, StoreError>;
}
