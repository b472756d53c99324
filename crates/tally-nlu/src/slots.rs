//! Typed slot extraction.
//!
//! One extractor per slot-bearing intent, each owning its grammar regex and
//! validation. Extractors work on the raw message (sanitized by
//! [`crate::normalize::for_slots`]), not the classifier-normalized form, so
//! names and digit runs survive intact.
//!
//! Failures are typed: a [`SlotError::Format`] means the message did not
//! match the expected shape and carries the format hint to echo back; a
//! [`SlotError::Validation`] means the shape matched but a captured value is
//! out of range.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::normalize;

// ============================================================================
// Errors
// ============================================================================

/// Why slot extraction failed, carrying the user-facing hint verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("{0}")]
    Format(&'static str),
    #[error("{0}")]
    Validation(&'static str),
}

impl SlotError {
    /// The hint text to send back to the user.
    pub fn hint(&self) -> &'static str {
        match self {
            SlotError::Format(hint) | SlotError::Validation(hint) => hint,
        }
    }
}

const ADD_BILL_HINT: &str = "Please provide the details in the format: Add a bill for [CustomerName], [TotalAmount], [PaymentStatus]";
const ADD_BILL_AMOUNT_HINT: &str = "TotalAmount must be numeric.";
const ADD_CUSTOMER_HINT: &str =
    "Please provide the customer details in the format: Add a customer [CustomerName], [Phone].";
const GET_CUSTOMER_HINT: &str = "Please specify a valid customer name.";
const UPDATE_PHONE_HINT: &str =
    "Please provide the details in the format: Update phone for [CustomerName], [NewPhone].";

// ============================================================================
// Grammars
// ============================================================================

// Grammars are anchored on a keyword ("for", "customer", "of") rather than
// the full carrier phrase, so any phrasing the classifier accepted can still
// yield slots.

static ADD_BILL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfor\s+([A-Za-z\s]+?)[,\s]+(\d[\d,]*(?:\.\d+)?)[,\s]+(\S.*)")
        .expect("Invalid add-bill grammar")
});

static ADD_CUSTOMER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcustomer\s+([A-Za-z\s]+?)(?:,\s*|\s+)(\d{10,15})\b")
        .expect("Invalid add-customer grammar")
});

static GET_CUSTOMER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bof\s+([A-Za-z\s]+)").expect("Invalid get-customer grammar"));

static UPDATE_PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:for|of)\s+([A-Za-z\s]+?)(?:,\s*|\s+)(\d{10,15})\b")
        .expect("Invalid update-phone grammar")
});

// ============================================================================
// Slot types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AddBillSlots {
    pub customer_name: String,
    pub total_amount: f64,
    pub payment_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCustomerSlots {
    pub customer_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCustomerSlots {
    pub customer_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePhoneSlots {
    pub customer_name: String,
    pub phone: String,
}

// ============================================================================
// Extractors
// ============================================================================

/// Extract `(name, amount, status)` from an add-bill message.
///
/// Thousands separators in the amount are accepted and stripped; the amount
/// must parse as a non-negative finite number.
pub fn extract_add_bill(raw: &str) -> Result<AddBillSlots, SlotError> {
    let sanitized = normalize::for_slots(raw, false);
    let caps = ADD_BILL_RE
        .captures(&sanitized)
        .ok_or(SlotError::Format(ADD_BILL_HINT))?;

    let customer_name = caps[1].trim().to_string();
    let amount_text = caps[2].replace(',', "");
    let total_amount: f64 = amount_text
        .parse()
        .map_err(|_| SlotError::Validation(ADD_BILL_AMOUNT_HINT))?;
    if !total_amount.is_finite() || total_amount < 0.0 {
        return Err(SlotError::Validation(ADD_BILL_AMOUNT_HINT));
    }
    let payment_status = caps[3].trim().to_string();

    if customer_name.is_empty() || payment_status.is_empty() {
        return Err(SlotError::Format(ADD_BILL_HINT));
    }

    Ok(AddBillSlots {
        customer_name,
        total_amount,
        payment_status,
    })
}

/// Extract `(name, phone)` from an add-customer message.
pub fn extract_add_customer(raw: &str) -> Result<AddCustomerSlots, SlotError> {
    let sanitized = normalize::for_slots(raw, true);
    let caps = ADD_CUSTOMER_RE
        .captures(&sanitized)
        .ok_or(SlotError::Format(ADD_CUSTOMER_HINT))?;

    let customer_name = caps[1].trim().to_string();
    if customer_name.is_empty() {
        return Err(SlotError::Format(ADD_CUSTOMER_HINT));
    }

    Ok(AddCustomerSlots {
        customer_name,
        phone: caps[2].to_string(),
    })
}

/// Extract the customer name from a get-customer message.
pub fn extract_get_customer(raw: &str) -> Result<GetCustomerSlots, SlotError> {
    let sanitized = normalize::for_slots(raw, false);
    let caps = GET_CUSTOMER_RE
        .captures(&sanitized)
        .ok_or(SlotError::Format(GET_CUSTOMER_HINT))?;

    let customer_name = caps[1].trim().to_string();
    if customer_name.is_empty() {
        return Err(SlotError::Format(GET_CUSTOMER_HINT));
    }

    Ok(GetCustomerSlots { customer_name })
}

/// Extract `(name, phone)` from an update-phone message.
pub fn extract_update_phone(raw: &str) -> Result<UpdatePhoneSlots, SlotError> {
    let sanitized = normalize::for_slots(raw, true);
    let caps = UPDATE_PHONE_RE
        .captures(&sanitized)
        .ok_or(SlotError::Format(UPDATE_PHONE_HINT))?;

    let customer_name = caps[1].trim().to_string();
    if customer_name.is_empty() {
        return Err(SlotError::Format(UPDATE_PHONE_HINT));
    }

    Ok(UpdatePhoneSlots {
        customer_name,
        phone: caps[2].to_string(),
    })
}
