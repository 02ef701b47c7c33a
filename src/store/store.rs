use std::sync::Arc;

use crate::{
    config::StoreConfig,
    ledger::ContinuousResourceAllocation,
    resource::{ContinuousResource, ResourceAllocation, ResourceConsumerId, ResourceId},
    store::{
        error::{
            StoreError, capacity_conflict, commit_conflict, invalid_request, unknown_resource,
        },
        memory::InMemoryLedgerMap,
        ports::LedgerMapPort,
        types::VersionedLedger,
    },
};

/// Keeps one ledger per continuous resource and serializes updates with
/// optimistic compare-and-set: read the current ledger, compute its successor,
/// swap, and retry from a fresh read when another writer won.
pub struct ContinuousResourceStore {
    map: Arc<dyn LedgerMapPort>,
    config: StoreConfig,
}

impl ContinuousResourceStore {
    pub fn new(map: Arc<dyn LedgerMapPort>, config: StoreConfig) -> Self {
        Self { map, config }
    }

    pub fn in_memory(config: StoreConfig) -> Self {
        Self::new(Arc::new(InMemoryLedgerMap::new()), config)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Declares the capacity of a resource. Returns `false` when the same
    /// descriptor is already registered.
    pub fn register(&self, original: ContinuousResource) -> Result<bool, StoreError> {
        if !original.is_valid_amount() {
            return Err(invalid_request(format!(
                "capacity of '{}' must be finite and non-negative, got {}",
                original.id(),
                original.value()
            )));
        }

        let resource_id = original.id().clone();
        let empty = Arc::new(ContinuousResourceAllocation::empty(original.clone()));
        if self.map.compare_and_set(&resource_id, None, empty)? {
            tracing::debug!(
                target: "store",
                resource_id = %resource_id,
                capacity = original.value(),
                "resource_registered"
            );
            return Ok(true);
        }

        let existing = self.current(&resource_id)?;
        if existing.value.original() != &original {
            return Err(capacity_conflict(format!(
                "resource '{}' already registered with capacity {}, got {}",
                resource_id,
                existing.value.original().value(),
                original.value()
            )));
        }
        Ok(false)
    }

    pub fn lookup(
        &self,
        resource_id: &ResourceId,
    ) -> Result<Option<Arc<ContinuousResourceAllocation>>, StoreError> {
        Ok(self.map.get(resource_id)?.map(|entry| entry.value))
    }

    pub fn is_available(&self, request: &ContinuousResource) -> Result<bool, StoreError> {
        validate_request(request)?;
        let current = self.current(request.id())?;
        Ok(ContinuousResourceAllocation::has_enough_resource(
            current.value.original(),
            request,
            Some(&current.value),
        ))
    }

    /// Grants `request` to `consumer_id` if capacity allows. `Ok(false)` means
    /// the admission test rejected the request; nothing was written.
    pub fn allocate(
        &self,
        consumer_id: &ResourceConsumerId,
        request: &ContinuousResource,
    ) -> Result<bool, StoreError> {
        validate_request(request)?;

        for attempt in 0..=self.config.max_commit_retries {
            let current = self.current(request.id())?;
            let ledger = &current.value;

            if !ContinuousResourceAllocation::has_enough_resource(
                ledger.original(),
                request,
                Some(ledger),
            ) {
                tracing::debug!(
                    target: "store",
                    resource_id = %request.id(),
                    consumer_id = %consumer_id,
                    requested = request.value(),
                    remaining = ledger.remaining_value(),
                    "allocation_rejected_insufficient_capacity"
                );
                return Ok(false);
            }

            let successor = ledger.with_allocation(ResourceAllocation::continuous(
                request.clone(),
                consumer_id.clone(),
            ));
            if self
                .map
                .compare_and_set(request.id(), Some(current.version), Arc::new(successor))?
            {
                tracing::debug!(
                    target: "store",
                    resource_id = %request.id(),
                    consumer_id = %consumer_id,
                    value = request.value(),
                    attempt,
                    "allocation_committed"
                );
                return Ok(true);
            }

            tracing::debug!(
                target: "store",
                resource_id = %request.id(),
                attempt,
                "commit_conflict_retry"
            );
        }

        Err(self.exhausted("allocate", request.id()))
    }

    /// Drops one allocation of exactly `request.value()` held by `consumer_id`.
    /// Releasing something that is not held, or a resource with no ledger,
    /// succeeds without writing.
    pub fn release(
        &self,
        consumer_id: &ResourceConsumerId,
        request: &ContinuousResource,
    ) -> Result<(), StoreError> {
        for attempt in 0..=self.config.max_commit_retries {
            let Some(current) = self.map.get(request.id())? else {
                return Ok(());
            };

            let successor = current.value.release(request, consumer_id);
            if successor.allocations().len() == current.value.allocations().len() {
                return Ok(());
            }

            if self
                .map
                .compare_and_set(request.id(), Some(current.version), Arc::new(successor))?
            {
                tracing::debug!(
                    target: "store",
                    resource_id = %request.id(),
                    consumer_id = %consumer_id,
                    value = request.value(),
                    attempt,
                    "allocation_released"
                );
                return Ok(());
            }

            tracing::debug!(
                target: "store",
                resource_id = %request.id(),
                attempt,
                "commit_conflict_retry"
            );
        }

        Err(self.exhausted("release", request.id()))
    }

    pub fn allocations(
        &self,
        resource_id: &ResourceId,
    ) -> Result<Vec<ResourceAllocation>, StoreError> {
        Ok(self
            .lookup(resource_id)?
            .map(|ledger| ledger.allocations().to_vec())
            .unwrap_or_default())
    }

    /// Allocations held by `consumer_id` across every registered resource,
    /// ordered by resource id and then grant order.
    pub fn allocations_of(
        &self,
        consumer_id: &ResourceConsumerId,
    ) -> Result<Vec<ResourceAllocation>, StoreError> {
        let mut held = Vec::new();
        for resource_id in self.map.keys()? {
            if let Some(ledger) = self.lookup(&resource_id)? {
                held.extend(ledger.allocations_of(consumer_id).cloned());
            }
        }
        Ok(held)
    }

    fn current(&self, resource_id: &ResourceId) -> Result<VersionedLedger, StoreError> {
        self.map.get(resource_id)?.ok_or_else(|| {
            unknown_resource(format!("resource '{}' is not registered", resource_id))
        })
    }

    fn exhausted(&self, operation: &str, resource_id: &ResourceId) -> StoreError {
        tracing::warn!(
            target: "store",
            resource_id = %resource_id,
            operation,
            max_commit_retries = self.config.max_commit_retries,
            "commit_retries_exhausted"
        );
        commit_conflict(format!(
            "{} on '{}' lost {} consecutive compare-and-set races",
            operation,
            resource_id,
            self.config.max_commit_retries.saturating_add(1)
        ))
    }
}

fn validate_request(request: &ContinuousResource) -> Result<(), StoreError> {
    if !request.is_valid_amount() {
        return Err(invalid_request(format!(
            "requested amount for '{}' must be finite and non-negative, got {}",
            request.id(),
            request.value()
        )));
    }
    Ok(())
}
