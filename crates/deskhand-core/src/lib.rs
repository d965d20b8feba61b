//! Core library for deskhand document processing.
//!
//! This crate provides:
//! - PDF text acquisition (whole document and per page)
//! - Job order parsing (service address and catalog-coded item records)
//! - Card statement parsing (wrapped-row recombination and purchase extraction)
//! - Invoice, transaction, and configuration data models

pub mod catalog;
pub mod error;
pub mod joborder;
pub mod models;
pub mod pdf;
pub mod scan;
pub mod statement;

pub use catalog::Catalog;
pub use error::{DeskhandError, Result};
pub use joborder::JobOrderParser;
pub use models::config::DeskhandConfig;
pub use models::invoice::{CustomerInfo, InvoiceData, JobRecord};
pub use models::transaction::Transaction;
pub use pdf::{PdfExtractor, PdfSource};
pub use statement::StatementParser;
