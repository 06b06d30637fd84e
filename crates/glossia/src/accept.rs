#![forbid(unsafe_code)]

//! `Accept-Language` header parsing.

use crate::tag::canonical_tag;

/// Parse an `Accept-Language` header into ordered selection candidates.
///
/// Quality parameters are dropped and each tag is canonicalized; the
/// header's order is preserved. The result is a candidate list for
/// [`I18n::locale`](crate::I18n::locale), not a fallback configuration.
///
/// ```
/// use glossia::parse_accept_language;
///
/// assert_eq!(
///     parse_accept_language("zh-TW,zh;q=0.9,en-US;q=0.8,en;q=0.7,ja;q=0.6"),
///     ["zh-tw", "zh", "en-us", "en", "ja"],
/// );
/// ```
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<String> {
    header
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| canonical_tag(part.split(';').next().unwrap_or(part)))
        .collect()
}
