//! Message dispatch: one message in, one reply out.
//!
//! Drives the pipeline for a single message: guard, normalize, classify,
//! extract slots, run the ledger operation. Stateless across messages; the
//! only shared state is the trained classifier (read-only) and the storage
//! behind [`LedgerOps`].

use std::sync::Arc;

use uuid::Uuid;

use tally_core::TallyError;
use tally_nlu::{normalize, slots, Intent, IntentClassifier};

use crate::error::ChatError;
use crate::operations::LedgerOps;

const CLARIFY_REPLY: &str =
    "Sorry, I didn't understand that. Can you please clarify your request?";
const DB_ERROR_REPLY: &str =
    "Sorry, I encountered an error while interacting with the database.";

/// Routes classified messages to ledger operations.
pub struct ChatDispatcher {
    classifier: Arc<IntentClassifier>,
    ops: LedgerOps,
    min_confidence: f32,
    max_message_length: usize,
}

impl ChatDispatcher {
    pub fn new(
        classifier: Arc<IntentClassifier>,
        ops: LedgerOps,
        min_confidence: f32,
        max_message_length: usize,
    ) -> Self {
        Self {
            classifier,
            ops,
            min_confidence,
            max_message_length,
        }
    }

    /// Handle one inbound message and produce the reply text.
    ///
    /// Only unprocessable messages (empty, over-long) error out; every
    /// domain outcome, including storage trouble, comes back as reply text.
    pub fn handle_message(&self, raw: &str) -> Result<String, ChatError> {
        if raw.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if raw.chars().count() > self.max_message_length {
            return Err(ChatError::MessageTooLong(self.max_message_length));
        }

        let message_id = Uuid::new_v4();
        let normalized = normalize::for_classifier(raw);
        let classification = self.classifier.classify(&normalized);

        tracing::info!(
            %message_id,
            intent = %classification.intent,
            confidence = classification.confidence,
            "Message classified"
        );

        if classification.confidence < self.min_confidence {
            return Ok(CLARIFY_REPLY.to_string());
        }

        let reply = match classification.intent {
            Intent::Greeting => classification.answer.to_string(),
            Intent::GetBills => self.run(message_id, self.ops.list_bills()),
            Intent::GetCustomer => match slots::extract_get_customer(raw) {
                Ok(s) => self.run(message_id, self.ops.get_customer(&s.customer_name)),
                Err(e) => e.hint().to_string(),
            },
            Intent::AddBill => match slots::extract_add_bill(raw) {
                Ok(s) => self.run(
                    message_id,
                    self.ops
                        .add_bill(&s.customer_name, s.total_amount, &s.payment_status),
                ),
                Err(e) => e.hint().to_string(),
            },
            Intent::AddCustomer => match slots::extract_add_customer(raw) {
                Ok(s) => self.run(message_id, self.ops.add_customer(&s.customer_name, &s.phone)),
                Err(e) => e.hint().to_string(),
            },
            Intent::UpdateCustomerPhone => match slots::extract_update_phone(raw) {
                Ok(s) => self.run(message_id, self.ops.update_phone(&s.customer_name, &s.phone)),
                Err(e) => e.hint().to_string(),
            },
        };

        Ok(reply)
    }

    /// Storage failures are logged with full detail and replaced with the
    /// fixed apology.
    fn run(&self, message_id: Uuid, result: Result<String, TallyError>) -> String {
        match result {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(%message_id, error = %e, "Ledger operation failed");
                DB_ERROR_REPLY.to_string()
            }
        }
    }
}
