//! Configuration structures for the deskhand pipeline.

use serde::{Deserialize, Serialize};

use crate::models::invoice::CustomerInfo;

/// Main configuration for the deskhand pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskhandConfig {
    /// Billed company on generated invoices.
    pub company: CompanyConfig,

    /// Working folder names.
    pub folders: FolderConfig,

    /// Invoice generation configuration.
    pub invoice: InvoiceConfig,
}

/// The company generated invoices are billed to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Legal company name.
    pub name: String,

    /// Street address.
    pub address: String,

    /// City name.
    pub city: String,

    /// Province or state.
    pub province: String,

    /// Postal code.
    pub postal_code: String,

    /// Contact person. Empty means no attention line.
    pub attention: String,
}

impl CompanyConfig {
    /// Customer block for an invoice, with an empty attention field
    /// collapsed to none.
    pub fn customer_info(&self) -> CustomerInfo {
        CustomerInfo {
            company_name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            province: self.province.clone(),
            postal_code: self.postal_code.clone(),
            attention: if self.attention.trim().is_empty() {
                None
            } else {
                Some(self.attention.clone())
            },
        }
    }
}

/// Names of the working folders under the workspace root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderConfig {
    /// Incoming job order PDFs.
    pub unprocessed_jobs: String,

    /// Job orders that produced invoice records.
    pub processed_jobs: String,

    /// Incoming card statement PDFs.
    pub unprocessed_statements: String,

    /// Statements that produced a report.
    pub processed_statements: String,

    /// Generated invoice files.
    pub invoices: String,

    /// Generated transaction reports.
    pub reports: String,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            unprocessed_jobs: "unprocessed_jobs".to_string(),
            processed_jobs: "processed_jobs".to_string(),
            unprocessed_statements: "unprocessed_statements".to_string(),
            processed_statements: "processed_statements".to_string(),
            invoices: "invoices".to_string(),
            reports: "reports".to_string(),
        }
    }
}

/// Invoice numbering and payment terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Prefix for generated invoice numbers.
    pub number_prefix: String,

    /// Days between invoice date and due date.
    pub due_days: u32,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            number_prefix: "INV-".to_string(),
            due_days: 6,
        }
    }
}

impl DeskhandConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
