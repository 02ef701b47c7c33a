use std::sync::Arc;

use crate::ledger::ContinuousResourceAllocation;

/// A value tagged with the version it was committed under.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub value: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }
}

pub type VersionedLedger = Versioned<Arc<ContinuousResourceAllocation>>;
