//! The fixed utterance corpus.
//!
//! Maps example phrases to intent labels and intent labels to canonical
//! answer templates. Declared once, immutable; the trained classifier is
//! derived from it at process start.

use crate::types::Intent;

/// A single training utterance.
#[derive(Debug, Clone, Copy)]
pub struct Utterance {
    pub phrase: &'static str,
    pub intent: Intent,
}

/// The fixed training corpus plus canonical answers per intent.
#[derive(Debug, Clone)]
pub struct UtteranceCorpus {
    utterances: Vec<Utterance>,
    answers: Vec<(Intent, Vec<&'static str>)>,
}

impl Default for UtteranceCorpus {
    fn default() -> Self {
        Self::builtin()
    }
}

impl UtteranceCorpus {
    /// The built-in English corpus.
    ///
    /// The update-phone utterances are trained as keyword prefixes; the
    /// documentation placeholders ("[CustomerName], [NewPhone]") are not
    /// meaningful tokens and are left out of training.
    pub fn builtin() -> Self {
        let utterances = vec![
            // Greetings
            utter("Hello", Intent::Greeting),
            utter("Hey", Intent::Greeting),
            utter("Hi", Intent::Greeting),
            utter("sup", Intent::Greeting),
            utter("yo", Intent::Greeting),
            // Adding new bills
            utter("add a new bill", Intent::AddBill),
            utter("save a new bill", Intent::AddBill),
            utter("create a new bill", Intent::AddBill),
            // Displaying bills
            utter("display bills", Intent::GetBills),
            utter("show me bills", Intent::GetBills),
            // Customer details
            utter("get customer details", Intent::GetCustomer),
            utter("show me customer details", Intent::GetCustomer),
            // Adding new customers
            utter("add a new customer", Intent::AddCustomer),
            utter("create a new customer", Intent::AddCustomer),
            utter("save customer details", Intent::AddCustomer),
            // Updating a phone number
            utter("update phone for", Intent::UpdateCustomerPhone),
            utter("change phone for", Intent::UpdateCustomerPhone),
            utter("modify contact info for", Intent::UpdateCustomerPhone),
        ];

        let answers = vec![
            (
                Intent::Greeting,
                vec![
                    "I'm here to assist you. How can I help?",
                    "Hello! Ready to assist your business needs.",
                    "Hello! How can I help you today?",
                    "Hi there! What can I do for you?",
                ],
            ),
            (
                Intent::AddBill,
                vec!["Please provide the bill details in the format: [CustomerName], [TotalAmount], [PaymentStatus]"],
            ),
            (Intent::GetBills, vec!["Fetching your latest bills..."]),
            (Intent::GetCustomer, vec!["Fetching customer details..."]),
            (
                Intent::AddCustomer,
                vec!["Please provide the customer details in the format: [CustomerName], [Phone]"],
            ),
            (
                Intent::UpdateCustomerPhone,
                vec!["Updating the phone number..."],
            ),
        ];

        Self {
            utterances,
            answers,
        }
    }

    /// All training utterances.
    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    /// The canonical answer for an intent (first of its templates).
    pub fn answer(&self, intent: Intent) -> &'static str {
        self.answers
            .iter()
            .find(|(i, _)| *i == intent)
            .and_then(|(_, templates)| templates.first().copied())
            .unwrap_or("")
    }

    /// All answer templates for an intent.
    pub fn answer_templates(&self, intent: Intent) -> &[&'static str] {
        self.answers
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, templates)| templates.as_slice())
            .unwrap_or(&[])
    }
}

fn utter(phrase: &'static str, intent: Intent) -> Utterance {
    Utterance { phrase, intent }
}
