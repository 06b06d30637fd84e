#![forbid(unsafe_code)]

//! Locale-tag canonicalization.
//!
//! Tags arrive in many shapes: translation file names (`zh_TW.music.json`),
//! header tokens (`ZH-TW`), or plain configuration strings. [`canonical_tag`]
//! folds all of them into one comparable form, and every store key,
//! fallback-map key, and selection candidate is compared only in that form.

use std::path::Path;

/// Canonical form of a locale tag or translation file name.
///
/// Takes the basename, the text before the first `.`, lowercases it, and
/// replaces `_` with `-`: `canonical_tag("locales/zh_TW.music.json")`,
/// `canonical_tag("ZH-TW")`, and `canonical_tag("zh-tw")` all yield
/// `"zh-tw"`. Idempotent.
#[must_use]
pub fn canonical_tag(raw: &str) -> String {
    // Degenerate paths ("..", "/", "a/..") have no basename; they fold to
    // the empty tag rather than leaking separators into the output.
    let base = Path::new(raw)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    let stem = base.split('.').next().unwrap_or(base);
    stem.to_lowercase().replace('_', "-")
}
