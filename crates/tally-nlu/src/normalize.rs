//! Message normalization.
//!
//! Two distinct canonicalizations of the same raw message: one feeding the
//! intent classifier, one feeding slot extraction. The raw message itself is
//! never mutated; slot extraction needs exact substrings (names, digit runs)
//! that the classifier-oriented normalization would corrupt.

use regex::Regex;
use std::sync::LazyLock;

/// Spoken-token substitution: voice input renders "," as the word "comma".
static SPOKEN_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*comma\s*").expect("Invalid spoken-comma regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Canonicalize a raw message for intent classification.
///
/// Collapses the spoken word "comma" into a literal comma, strips terminal
/// punctuation, and collapses whitespace runs. Case folding happens in the
/// classifier tokenizer.
pub fn for_classifier(raw: &str) -> String {
    let replaced = SPOKEN_COMMA_RE.replace_all(raw, ",");
    let collapsed = WHITESPACE_RE.replace_all(replaced.trim(), " ");
    collapsed
        .trim_end_matches(['.', '!', '?'])
        .trim()
        .to_string()
}

/// Sanitize a raw message for slot extraction.
///
/// Applies the spoken-comma substitution and strips terminal punctuation.
/// The phone-bearing grammars also strip a terminal `-` so that trailing
/// dashes from voice input don't break the digit-run match.
pub fn for_slots(raw: &str, strip_trailing_dash: bool) -> String {
    let replaced = SPOKEN_COMMA_RE.replace_all(raw, ",");
    let trimmed = replaced.trim();
    let stripped = if strip_trailing_dash {
        trimmed.trim_end_matches(['.', '!', '?', '-'])
    } else {
        trimmed.trim_end_matches(['.', '!', '?'])
    };
    stripped.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- for_classifier ----

    #[test]
    fn test_classifier_spoken_comma() {
        assert_eq!(
            for_classifier("add a bill for John comma 100 comma Paid"),
            "add a bill for John,100,Paid"
        );
    }

    #[test]
    fn test_classifier_spoken_comma_case_insensitive() {
        assert_eq!(for_classifier("a Comma b COMMA c"), "a,b,c");
    }

    #[test]
    fn test_classifier_terminal_punctuation() {
        assert_eq!(for_classifier("Display Bills!"), "Display Bills");
        assert_eq!(for_classifier("Display Bills?!."), "Display Bills");
    }

    #[test]
    fn test_classifier_interior_punctuation_preserved() {
        // Only terminal punctuation is stripped; "150.50" stays intact.
        assert_eq!(
            for_classifier("Add a bill for John, 150.50, Paid"),
            "Add a bill for John, 150.50, Paid"
        );
    }

    #[test]
    fn test_classifier_whitespace_collapse() {
        assert_eq!(for_classifier("  show   me    bills  "), "show me bills");
    }

    #[test]
    fn test_classifier_empty() {
        assert_eq!(for_classifier(""), "");
        assert_eq!(for_classifier("   "), "");
    }

    #[test]
    fn test_classifier_only_punctuation() {
        assert_eq!(for_classifier("?!."), "");
    }

    // ---- for_slots ----

    #[test]
    fn test_slots_keeps_interior_spacing() {
        assert_eq!(
            for_slots("Add a bill for John  Doe, 150.50, Paid.", false),
            "Add a bill for John  Doe, 150.50, Paid"
        );
    }

    #[test]
    fn test_slots_spoken_comma() {
        assert_eq!(
            for_slots("Add a customer Jane comma 9876543210", true),
            "Add a customer Jane,9876543210"
        );
    }

    #[test]
    fn test_slots_strips_trailing_dash_when_asked() {
        assert_eq!(for_slots("Update phone for Jane, 987-", true), "Update phone for Jane, 987");
        assert_eq!(for_slots("amount 100-", false), "amount 100-");
    }

    #[test]
    fn test_slots_decimal_preserved() {
        assert_eq!(for_slots("for John, 150.50, Paid", false), "for John, 150.50, Paid");
    }

    #[test]
    fn test_slots_raw_untouched() {
        let raw = "Get customer details of John Doe?";
        let _ = for_slots(raw, false);
        assert_eq!(raw, "Get customer details of John Doe?");
    }
}
