use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::{
    ledger::ContinuousResourceAllocation,
    resource::ResourceId,
    store::{
        error::{StoreError, internal_error},
        ports::LedgerMapPort,
        types::{Versioned, VersionedLedger},
    },
};

#[derive(Default)]
struct MapState {
    version: u64,
    entries: BTreeMap<ResourceId, VersionedLedger>,
}

#[derive(Default)]
pub struct InMemoryLedgerMap {
    state: RwLock<MapState>,
}

impl InMemoryLedgerMap {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MapState>, StoreError> {
        self.state
            .read()
            .map_err(|_| internal_error("ledger map lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MapState>, StoreError> {
        self.state
            .write()
            .map_err(|_| internal_error("ledger map lock poisoned"))
    }
}

impl LedgerMapPort for InMemoryLedgerMap {
    fn get(&self, resource_id: &ResourceId) -> Result<Option<VersionedLedger>, StoreError> {
        Ok(self.read()?.entries.get(resource_id).cloned())
    }

    fn compare_and_set(
        &self,
        resource_id: &ResourceId,
        expected_version: Option<u64>,
        ledger: Arc<ContinuousResourceAllocation>,
    ) -> Result<bool, StoreError> {
        let mut guard = self.write()?;
        let current_version = guard.entries.get(resource_id).map(|entry| entry.version);
        if current_version != expected_version {
            return Ok(false);
        }

        let next_version = current_version.map_or(1, |version| version.saturating_add(1));
        guard
            .entries
            .insert(resource_id.clone(), Versioned::new(ledger, next_version));
        guard.version = guard.version.saturating_add(1);
        Ok(true)
    }

    fn keys(&self) -> Result<Vec<ResourceId>, StoreError> {
        Ok(self.read()?.entries.keys().cloned().collect())
    }

    fn version(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.version)
    }
}
