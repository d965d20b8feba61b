//! Invoice handoff data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One billable line tied to a service address.
///
/// Each item row on a job order produces two of these: one for the
/// bracket itself and one for its install charge, whose code is the
/// bracket code with an `I` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Catalog item code, e.g. `4S` or `4SI`.
    pub item_code: String,

    /// Service address the work was performed at.
    pub address: String,

    /// Quantity as printed on the job order.
    pub quantity: String,
}

/// The customer a generated invoice is billed to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Legal company name.
    pub company_name: String,

    /// Street address.
    pub address: String,

    /// City name.
    pub city: String,

    /// Province or state.
    pub province: String,

    /// Postal code.
    pub postal_code: String,

    /// Contact person, when one is on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention: Option<String>,
}

/// A complete invoice handoff: header fields, the billed customer, and
/// the job records collected from one batch of job orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceData {
    /// Human-readable invoice name, used for the output file.
    pub name: String,

    /// Invoice number printed on the invoice.
    pub invoice_number: String,

    /// Date the invoice is issued.
    pub invoice_date: NaiveDate,

    /// Payment due date.
    pub due_date: NaiveDate,

    /// Customer the invoice is billed to.
    pub customer: CustomerInfo,

    /// Billable records in job order, one bracket/install pair per item row.
    pub records: Vec<JobRecord>,
}

impl InvoiceData {
    /// Validate the invoice data and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.invoice_number.is_empty() {
            issues.push("Missing invoice number".to_string());
        }

        if self.customer.company_name.is_empty() {
            issues.push("Missing customer company name".to_string());
        }

        if self.records.is_empty() {
            issues.push("No job records".to_string());
        }

        if self.due_date < self.invoice_date {
            issues.push(format!(
                "Due date ({}) is before invoice date ({})",
                self.due_date, self.invoice_date
            ));
        }

        issues
    }

    /// Total quantity across all records, counting each bracket/install
    /// pair twice. Quantities that fail to parse count as zero.
    pub fn total_quantity(&self) -> u32 {
        self.records
            .iter()
            .filter_map(|r| r.quantity.parse::<u32>().ok())
            .sum()
    }
}
