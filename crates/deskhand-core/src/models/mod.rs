//! Data models for invoices, transactions, and configuration.

pub mod config;
pub mod invoice;
pub mod transaction;

pub use config::DeskhandConfig;
pub use invoice::{CustomerInfo, InvoiceData, JobRecord};
pub use transaction::Transaction;
