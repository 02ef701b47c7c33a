pub mod config;
pub mod ledger;
pub mod logging;
pub mod resource;
pub mod store;
