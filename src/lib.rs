pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod store;
