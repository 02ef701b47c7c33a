use std::sync::Arc;

use crate::resource::{ContinuousResource, ResourceAllocation, ResourceConsumerId};

/// Per-resource allocation history: the capacity descriptor plus the
/// outstanding allocations in grant order.
///
/// A ledger is a value. Every update produces a successor and leaves `self`
/// untouched, so the enclosing store can swap ledgers with compare-and-set and
/// any number of readers can alias the same allocation slice without locking.
///
/// Every allocation is expected to refer to `original`'s identity. That is the
/// caller's responsibility and is not checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousResourceAllocation {
    original: ContinuousResource,
    allocations: Arc<[ResourceAllocation]>,
}

impl ContinuousResourceAllocation {
    pub fn new(
        original: ContinuousResource,
        allocations: impl Into<Arc<[ResourceAllocation]>>,
    ) -> Self {
        Self {
            original,
            allocations: allocations.into(),
        }
    }

    pub fn empty(original: ContinuousResource) -> Self {
        Self::new(original, Vec::<ResourceAllocation>::new())
    }

    /// Checks whether `request` still fits into `original` given the current
    /// `allocation`. An absent ledger behaves as an empty one.
    ///
    /// Linear in the number of outstanding allocations.
    pub fn has_enough_resource(
        original: &ContinuousResource,
        request: &ContinuousResource,
        allocation: Option<&Self>,
    ) -> bool {
        let Some(allocation) = allocation else {
            return request.value() <= original.value();
        };

        let left = original.value() - allocation.allocated_value();
        request.value() <= left
    }

    pub fn original(&self) -> &ContinuousResource {
        &self.original
    }

    pub fn allocations(&self) -> &[ResourceAllocation] {
        &self.allocations
    }

    pub fn shared_allocations(&self) -> Arc<[ResourceAllocation]> {
        Arc::clone(&self.allocations)
    }

    /// Sum of granted amounts. Entries that are not continuous are skipped.
    pub fn allocated_value(&self) -> f64 {
        self.allocations
            .iter()
            .filter_map(|allocation| allocation.resource().as_continuous())
            .map(ContinuousResource::value)
            .sum()
    }

    pub fn remaining_value(&self) -> f64 {
        self.original.value() - self.allocated_value()
    }

    pub fn allocations_of<'a>(
        &'a self,
        consumer_id: &'a ResourceConsumerId,
    ) -> impl Iterator<Item = &'a ResourceAllocation> + 'a {
        self.allocations
            .iter()
            .filter(move |allocation| allocation.consumer_id() == consumer_id)
    }

    /// Successor ledger with `allocation` appended after every existing entry.
    pub fn with_allocation(&self, allocation: ResourceAllocation) -> Self {
        let mut allocations = Vec::with_capacity(self.allocations.len() + 1);
        allocations.extend(self.allocations.iter().cloned());
        allocations.push(allocation);
        Self::new(self.original.clone(), allocations)
    }

    /// Successor ledger with one allocation of exactly `resource.value()` held
    /// by `consumer_id` removed.
    ///
    /// When the consumer holds several allocations of that amount, only the
    /// oldest one is dropped. Non-matching entries keep their relative order
    /// and come first, followed by the surviving matches in their own order.
    /// Releasing an allocation that does not exist yields an equal ledger.
    pub fn release(&self, resource: &ContinuousResource, consumer_id: &ResourceConsumerId) -> Self {
        let (non_matched, mut matched): (Vec<ResourceAllocation>, Vec<ResourceAllocation>) = self
            .allocations
            .iter()
            .cloned()
            .partition(|allocation| !is_release_match(allocation, resource, consumer_id));

        if matched.is_empty() {
            tracing::trace!(
                target: "ledger",
                resource_id = %self.original.id(),
                consumer_id = %consumer_id,
                value = resource.value(),
                "ledger_release_no_match"
            );
            return self.clone();
        }

        matched.remove(0);

        let mut allocations = non_matched;
        allocations.extend(matched);
        Self::new(self.original.clone(), allocations)
    }
}

fn is_release_match(
    allocation: &ResourceAllocation,
    resource: &ContinuousResource,
    consumer_id: &ResourceConsumerId,
) -> bool {
    allocation.consumer_id() == consumer_id
        && allocation
            .resource()
            .as_continuous()
            .is_some_and(|granted| granted.value() == resource.value())
}
