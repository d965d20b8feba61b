//! Card statement transaction model.

use serde::{Deserialize, Serialize};

/// One purchase extracted from a card statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date as printed, e.g. `Sep 03`.
    pub date: String,

    /// Merchant / activity description.
    pub description: String,

    /// Charged amount in dollars.
    pub amount: f64,
}

impl Transaction {
    /// Format the amount the way it appears on the statement.
    pub fn amount_display(&self) -> String {
        format!("${:.2}", self.amount)
    }
}
