pub mod ledger;

pub use ledger::ContinuousResourceAllocation;
