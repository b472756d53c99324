//! Intent labels for the chat pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Intents the classifier can assign to an inbound message.
///
/// The set is closed: the dispatcher matches exhaustively over it, so adding
/// an intent is a compile-checked change. "Unrecognized" is not a variant;
/// the dispatcher decides that from the classification confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    GetBills,
    GetCustomer,
    AddBill,
    AddCustomer,
    UpdateCustomerPhone,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Greeting => write!(f, "greeting"),
            Intent::GetBills => write!(f, "get.bills"),
            Intent::GetCustomer => write!(f, "get.customer"),
            Intent::AddBill => write!(f, "add.bill"),
            Intent::AddCustomer => write!(f, "add.customer"),
            Intent::UpdateCustomerPhone => write!(f, "update.customer.phone"),
        }
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greeting" => Ok(Intent::Greeting),
            "get.bills" => Ok(Intent::GetBills),
            "get.customer" => Ok(Intent::GetCustomer),
            "add.bill" => Ok(Intent::AddBill),
            "add.customer" => Ok(Intent::AddCustomer),
            "update.customer.phone" => Ok(Intent::UpdateCustomerPhone),
            _ => Err(format!("Unknown intent label: {}", s)),
        }
    }
}

impl Intent {
    /// All intents, in corpus declaration order.
    pub const ALL: [Intent; 6] = [
        Intent::Greeting,
        Intent::GetBills,
        Intent::GetCustomer,
        Intent::AddBill,
        Intent::AddCustomer,
        Intent::UpdateCustomerPhone,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_roundtrip() {
        for intent in Intent::ALL {
            let label = intent.to_string();
            assert_eq!(Intent::from_str(&label).unwrap(), intent);
        }
    }

    #[test]
    fn test_from_str_unknown() {
        assert!(Intent::from_str("delete.bill").is_err());
    }

    #[test]
    fn test_all_is_exhaustive() {
        assert_eq!(Intent::ALL.len(), 6);
    }
}
