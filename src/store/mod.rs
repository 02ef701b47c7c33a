pub mod error;
pub mod memory;
pub mod ports;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreErrorKind};
pub use memory::InMemoryLedgerMap;
pub use ports::LedgerMapPort;
pub use store::ContinuousResourceStore;
pub use types::{Versioned, VersionedLedger};
