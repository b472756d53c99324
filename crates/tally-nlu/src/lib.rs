//! Tally NLU crate - message normalization, intent classification, and
//! slot extraction.
//!
//! The pipeline is: raw text -> [`normalize::for_classifier`] ->
//! [`IntentClassifier::classify`] -> per-intent slot extraction over a
//! separately sanitized copy of the raw message. The classifier is trained
//! once at startup from the fixed [`corpus::UtteranceCorpus`] and shared
//! read-only for the life of the process.

pub mod classifier;
pub mod corpus;
pub mod normalize;
pub mod slots;
pub mod types;

pub use classifier::{Classification, IntentClassifier};
pub use corpus::UtteranceCorpus;
pub use slots::{
    extract_add_bill, extract_add_customer, extract_get_customer, extract_update_phone,
    AddBillSlots, AddCustomerSlots, GetCustomerSlots, SlotError, UpdatePhoneSlots,
};
pub use types::Intent;
