//! Domain types for the billing ledger.

use serde::{Deserialize, Serialize};

/// A customer row from the ledger.
///
/// `customer_id` is generated by the storage layer and never changes. The
/// name is the de-facto lookup key; lookups are case-insensitive but the
/// stored casing is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    /// Optional at creation; digits, 10-15 characters when present.
    pub phone: Option<String>,
}

/// A bill row from the ledger.
///
/// A bill always belongs to exactly one customer and is never updated or
/// deleted once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub bill_id: i64,
    /// Epoch seconds, set at insertion time rather than user-supplied.
    pub bill_date: i64,
    pub customer_id: i64,
    pub total_amount: f64,
    /// Free-text label, e.g. "Paid" or "Pending".
    pub payment_status: String,
}

/// A bill joined with its owning customer's name, for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillListing {
    pub bill_id: i64,
    pub customer_name: String,
    pub total_amount: f64,
    pub bill_date: i64,
}
