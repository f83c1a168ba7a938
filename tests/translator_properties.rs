//! Property tests for the jargon translator
//!
//! Uses quickcheck to check pass-through and second-pass stability over
//! arbitrary text, with the built-in term table.

use quickcheck_macros::quickcheck;
use std::sync::LazyLock;

use medlite::terms::{TermMap, TermTranslator};

static TRANSLATOR: LazyLock<TermTranslator> = LazyLock::new(|| {
    TermTranslator::new(TermMap::builtin().expect("builtin table loads")).expect("matcher compiles")
});

#[quickcheck]
fn prop_text_without_terms_is_unchanged(text: String) -> bool {
    if !TRANSLATOR.find_terms(&text).is_empty() {
        return true;
    }
    TRANSLATOR.translate(&text) == text
}

#[quickcheck]
fn prop_translation_is_deterministic(text: String) -> bool {
    TRANSLATOR.translate(&text) == TRANSLATOR.translate(&text)
}

#[quickcheck]
fn prop_second_pass_is_stable_without_nested_terms(text: String) -> bool {
    let once = TRANSLATOR.translate(&text).into_owned();
    if !TRANSLATOR.find_terms(&once).is_empty() {
        return true;
    }
    TRANSLATOR.translate(&once) == once
}

#[quickcheck]
fn prop_wrapped_term_always_replaced(prefix: u8) -> bool {
    let filler = "x".repeat(prefix as usize % 5);
    let text = format!("{} hypertension {}", filler, filler);
    let translated = TRANSLATOR.translate(&text);
    translated.contains("high blood pressure") && !translated.contains("hypertension")
}

#[test]
fn test_longest_match_with_kidney_terms() {
    let translator = TermTranslator::new(
        TermMap::from_pairs([
            ("kidney", "bean-shaped organ"),
            ("kidney function", "how well your kidneys work"),
        ])
        .unwrap(),
    )
    .unwrap();

    assert_eq!(
        translator.translate("kidney function test"),
        "how well your kidneys work test"
    );
}

#[test]
fn test_builtin_multiword_terms() {
    assert_eq!(
        TRANSLATOR.translate("History of myocardial infarction and chronic kidney disease."),
        "History of heart attack and long-term kidney disease."
    );
    assert_eq!(
        TRANSLATOR.translate("Acute kidney injury resolved."),
        "Sudden kidney damage resolved."
    );
}

#[test]
fn test_nested_value_not_rescanned() {
    // "lung infection" contains the key "infection"
    assert_eq!(TRANSLATOR.translate("pneumonia"), "lung infection");
}
