//! Property-based invariant tests for canonicalization and lookup.
//!
//! Verifies:
//! 1. canonical_tag is idempotent
//! 2. canonical_tag is case- and separator-insensitive
//! 3. Lookup never panics for arbitrary keys, args, or counts
//! 4. A plain key with no entry anywhere renders itself verbatim
//! 5. string_x equals string on the synthesized suffixed key
//! 6. number always returns one of the source's literal variants
//! 7. parse_accept_language yields canonical tags in header order

use glossia::{I18n, canonical_tag, parse_accept_language};
use proptest::prelude::*;

// A key with no template marker, no variant separator, and no context
// suffix: lookup must round-trip it unchanged.
fn plain_key() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.!?'-]{1,40}"
}

fn context_token() -> impl Strategy<Value = String> {
    "[a-z]{1,10}"
}

// ═════════════════════════════════════════════════════════════════════════
// 1. canonical_tag is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn canonical_tag_idempotent(raw in ".{0,60}") {
        let once = canonical_tag(&raw);
        prop_assert_eq!(canonical_tag(&once), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. canonical_tag is case- and separator-insensitive
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn canonical_tag_folds_case_and_separators(tag in "[a-z]{2}[-_][a-z]{2}") {
        let upper = tag.to_uppercase();
        let dashed = tag.replace('_', "-");
        prop_assert_eq!(canonical_tag(&tag), canonical_tag(&upper));
        prop_assert_eq!(canonical_tag(&tag), canonical_tag(&dashed));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Lookup never panics
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn lookup_never_panics(
        key in ".{0,80}",
        arg in "[a-z]{0,10}",
        value in ".{0,20}",
        count in any::<i64>(),
    ) {
        let i18n = I18n::new("en");
        let locale = i18n.locale(["en"]);
        let _ = locale.string(&key, &[(arg.as_str(), value.as_str())]);
        let _ = locale.number(&key, count, &[]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. A plain key with no entry anywhere renders itself
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unmatched_plain_key_round_trips(key in plain_key()) {
        let i18n = I18n::new("en");
        let locale = i18n.locale(["en"]);
        prop_assert_eq!(locale.string(&key, &[]), key);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. string_x equals string on the synthesized key
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn string_x_matches_suffixed_string(key in plain_key(), context in context_token()) {
        let i18n = I18n::new("en");
        let locale = i18n.locale(["en"]);
        let synthesized = format!("{key} <{context}>");
        prop_assert_eq!(
            locale.string_x(&key, &context, &[]),
            locale.string(&synthesized, &[])
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. number returns one of the source's literal variants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn number_selects_an_existing_variant(
        segments in proptest::collection::vec("[a-zA-Z0-9 ,.!?'-]{1,12}", 1..5),
        count in any::<i64>(),
    ) {
        let source = segments.join(" | ");
        let i18n = I18n::new("en");
        let locale = i18n.locale(["en"]);
        let rendered = locale.number(&source, count, &[]);
        prop_assert!(
            segments.contains(&rendered),
            "rendered {:?} is not a variant of {:?}",
            rendered,
            source
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. parse_accept_language yields canonical tags in header order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn accept_language_tags_are_canonical(
        tags in proptest::collection::vec("[a-zA-Z]{2}(-[a-zA-Z]{2})?", 1..6),
    ) {
        let header = tags
            .iter()
            .map(|tag| format!("{tag};q=0.9"))
            .collect::<Vec<_>>()
            .join(",");
        let parsed = parse_accept_language(&header);
        prop_assert_eq!(parsed.len(), tags.len());
        for (parsed_tag, raw) in parsed.iter().zip(&tags) {
            prop_assert_eq!(parsed_tag, &canonical_tag(raw));
            prop_assert_eq!(&canonical_tag(parsed_tag), parsed_tag);
        }
    }
}
