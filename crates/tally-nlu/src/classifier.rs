//! Statistical intent classification.
//!
//! A multinomial naive Bayes classifier with add-one smoothing over
//! lowercase word tokens, trained once at startup from the fixed corpus.
//! Training is deterministic: the same corpus always produces a classifier
//! with the same label set and the same decisions, and every training
//! utterance classifies back to its own intent (exact matches short-circuit
//! with full confidence).
//!
//! `classify` never fails: it always returns the best-ranked intent with a
//! confidence score. Deciding whether to trust a low-confidence label is the
//! dispatcher's job, not the classifier's.

use std::collections::HashMap;

use crate::corpus::UtteranceCorpus;
use crate::types::Intent;

/// The classifier's verdict for one message.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Best-ranked intent label.
    pub intent: Intent,
    /// Posterior probability of the best label, in `[0.0, 1.0]`.
    pub confidence: f32,
    /// The intent's canonical answer template.
    pub answer: &'static str,
}

/// Per-intent token statistics.
#[derive(Debug, Clone)]
struct ClassModel {
    intent: Intent,
    doc_count: usize,
    token_counts: HashMap<String, u32>,
    total_tokens: u32,
}

/// Naive Bayes intent classifier, built once and shared read-only.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    classes: Vec<ClassModel>,
    /// Token-joined training utterances for the exact-match shortcut.
    exact: HashMap<String, Intent>,
    answers: Vec<(Intent, &'static str)>,
    vocab_size: usize,
    total_docs: usize,
}

impl IntentClassifier {
    /// Train a classifier from the given corpus.
    pub fn train(corpus: &UtteranceCorpus) -> Self {
        let mut classes: Vec<ClassModel> = Intent::ALL
            .iter()
            .map(|&intent| ClassModel {
                intent,
                doc_count: 0,
                token_counts: HashMap::new(),
                total_tokens: 0,
            })
            .collect();

        let mut exact = HashMap::new();
        let mut vocab: HashMap<String, ()> = HashMap::new();

        for utterance in corpus.utterances() {
            let tokens = tokenize(utterance.phrase);
            exact.insert(tokens.join(" "), utterance.intent);

            // Intent::ALL covers every corpus intent, so this always finds.
            if let Some(class) = classes.iter_mut().find(|c| c.intent == utterance.intent) {
                class.doc_count += 1;
                for token in tokens {
                    vocab.insert(token.clone(), ());
                    *class.token_counts.entry(token).or_insert(0) += 1;
                    class.total_tokens += 1;
                }
            }
        }

        let total_docs = corpus.utterances().len();
        let answers = Intent::ALL
            .iter()
            .map(|&intent| (intent, corpus.answer(intent)))
            .collect();

        tracing::debug!(
            classes = classes.len(),
            vocab = vocab.len(),
            documents = total_docs,
            "Intent classifier trained"
        );

        Self {
            classes,
            exact,
            answers,
            vocab_size: vocab.len(),
            total_docs,
        }
    }

    /// Classify a normalized message.
    ///
    /// Always returns the best-ranked intent; a low confidence signals an
    /// unrecognized message to the caller.
    pub fn classify(&self, normalized: &str) -> Classification {
        let tokens = tokenize(normalized);

        // Exact training utterances always classify back to their own intent.
        if let Some(&intent) = self.exact.get(&tokens.join(" ")) {
            return Classification {
                intent,
                confidence: 1.0,
                answer: self.answer(intent),
            };
        }

        // Log-space scores: prior + smoothed token likelihoods. Tokens the
        // corpus has never seen carry no signal and are skipped.
        let scores: Vec<f64> = self
            .classes
            .iter()
            .map(|class| {
                let mut score = (class.doc_count as f64 / self.total_docs as f64).ln();
                for token in &tokens {
                    if !self.in_vocab(token) {
                        continue;
                    }
                    let count = class.token_counts.get(token).copied().unwrap_or(0);
                    let denom = class.total_tokens as f64 + self.vocab_size as f64;
                    score += ((count as f64 + 1.0) / denom).ln();
                }
                score
            })
            .collect();

        let (best_idx, confidence) = softmax_best(&scores);
        let intent = self.classes[best_idx].intent;

        Classification {
            intent,
            confidence,
            answer: self.answer(intent),
        }
    }

    /// Number of trained intent labels.
    pub fn label_count(&self) -> usize {
        self.classes.len()
    }

    fn answer(&self, intent: Intent) -> &'static str {
        self.answers
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, a)| *a)
            .unwrap_or("")
    }

    fn in_vocab(&self, token: &str) -> bool {
        self.classes
            .iter()
            .any(|c| c.token_counts.contains_key(token))
    }
}

/// Lowercase word tokens; splits on anything non-alphanumeric.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Index of the highest score plus its softmax probability.
fn softmax_best(scores: &[f64]) -> (usize, f32) {
    let mut best_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, &s) in scores.iter().enumerate() {
        if s > best {
            best = s;
            best_idx = i;
        }
    }

    let sum: f64 = scores.iter().map(|&s| (s - best).exp()).sum();
    let confidence = if sum > 0.0 { (1.0 / sum) as f32 } else { 0.0 };
    (best_idx, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> IntentClassifier {
        IntentClassifier::train(&UtteranceCorpus::builtin())
    }

    // ---- Exact-match guarantee ----

    #[test]
    fn test_training_utterances_classify_exactly() {
        let corpus = UtteranceCorpus::builtin();
        let clf = IntentClassifier::train(&corpus);
        for utterance in corpus.utterances() {
            let result = clf.classify(utterance.phrase);
            assert_eq!(
                result.intent, utterance.intent,
                "'{}' misclassified as {}",
                utterance.phrase, result.intent
            );
            assert!((result.confidence - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let clf = trained();
        let result = clf.classify("Display Bills");
        assert_eq!(result.intent, Intent::GetBills);
        assert!((result.confidence - 1.0).abs() < f32::EPSILON);
    }

    // ---- Training idempotence ----

    #[test]
    fn test_training_is_idempotent() {
        let corpus = UtteranceCorpus::builtin();
        let a = IntentClassifier::train(&corpus);
        let b = IntentClassifier::train(&corpus);
        assert_eq!(a.label_count(), b.label_count());
        for message in [
            "Display Bills",
            "Add a bill for John Doe, 150.50, Paid",
            "get customer details of John Doe",
            "asdkjasd",
        ] {
            let ra = a.classify(message);
            let rb = b.classify(message);
            assert_eq!(ra.intent, rb.intent);
            assert!((ra.confidence - rb.confidence).abs() < 1e-6);
        }
    }

    // ---- Generalization beyond training phrases ----

    #[test]
    fn test_add_bill_with_slots() {
        let result = trained().classify("Add a bill for John Doe, 150.50, Paid");
        assert_eq!(result.intent, Intent::AddBill);
        assert!(result.confidence >= 0.5, "confidence {}", result.confidence);
    }

    #[test]
    fn test_get_customer_with_name() {
        let result = trained().classify("get customer details of John Doe");
        assert_eq!(result.intent, Intent::GetCustomer);
        assert!(result.confidence >= 0.5, "confidence {}", result.confidence);
    }

    #[test]
    fn test_update_phone_with_slots() {
        let result = trained().classify("Update phone for Jane Roe, 9876543210");
        assert_eq!(result.intent, Intent::UpdateCustomerPhone);
        assert!(result.confidence >= 0.5, "confidence {}", result.confidence);
    }

    #[test]
    fn test_add_customer_with_slots() {
        let result = trained().classify("Add a customer Jane Roe, 9876543210");
        assert_eq!(result.intent, Intent::AddCustomer);
        assert!(result.confidence >= 0.5, "confidence {}", result.confidence);
    }

    #[test]
    fn test_greeting() {
        let result = trained().classify("Hello");
        assert_eq!(result.intent, Intent::Greeting);
        assert_eq!(result.answer, "I'm here to assist you. How can I help?");
    }

    // ---- Unrecognized input stays below threshold ----

    #[test]
    fn test_gibberish_has_low_confidence() {
        let result = trained().classify("asdkjasd");
        assert!(result.confidence < 0.5, "confidence {}", result.confidence);
    }

    #[test]
    fn test_empty_input_has_low_confidence() {
        let result = trained().classify("");
        assert!(result.confidence < 0.5);
    }

    #[test]
    fn test_unrelated_sentence_has_low_confidence() {
        let result = trained().classify("quantum flux capacitor raspberry");
        assert!(result.confidence < 0.5, "confidence {}", result.confidence);
    }

    // ---- Never panics ----

    #[test]
    fn test_unicode_input() {
        let result = trained().classify("qu'est-ce que c'est \u{00e9}trange");
        assert!(result.confidence <= 1.0);
    }

    #[test]
    fn test_very_long_input() {
        let long = "bills ".repeat(500);
        let result = trained().classify(&long);
        assert_eq!(result.intent, Intent::GetBills);
    }

    // ---- Tokenizer ----

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Add a bill, for John!"),
            vec!["add", "a", "bill", "for", "john"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digits() {
        assert_eq!(tokenize("150.50"), vec!["150", "50"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("  ,.! ").is_empty());
    }

    // ---- Softmax helper ----

    #[test]
    fn test_softmax_best_picks_max() {
        let (idx, conf) = softmax_best(&[-3.0, -1.0, -2.0]);
        assert_eq!(idx, 1);
        assert!(conf > 0.3 && conf <= 1.0);
    }

    #[test]
    fn test_softmax_uniform_scores() {
        let (_, conf) = softmax_best(&[-1.0, -1.0, -1.0, -1.0]);
        assert!((conf - 0.25).abs() < 1e-6);
    }
}
