#![forbid(unsafe_code)]

//! Plural-variant selection.
//!
//! A [`Pluralizor`] maps a quantity and the number of available variants to
//! the index of the variant to render. The default covers the common
//! singular/plural and zero/one/many shapes; locales with richer plural
//! grammar register their own via `I18n::with_pluralizor`.

/// Selects a variant index from a quantity and the number of variants.
///
/// The returned index must be strictly less than `variants`; anything else
/// is treated as a pluralizor bug and clamped (see the catalog docs).
pub type Pluralizor = fn(quantity: i64, variants: usize) -> usize;

/// Default variant selection.
///
/// With exactly two variants, quantities 0 and 1 both select variant 0 and
/// everything else selects variant 1 (singular/plural collapse). With any
/// other variant count: 0 → 0, 1 → 1, everything else → 2 (zero/one/many).
#[must_use]
pub fn default_pluralizor(quantity: i64, variants: usize) -> usize {
    match variants {
        2 => match quantity {
            0 | 1 => 0,
            _ => 1,
        },
        _ => match quantity {
            0 => 0,
            1 => 1,
            _ => 2,
        },
    }
}

/// Run `pluralizor` and bound the result to a valid variant index.
///
/// An out-of-range index is clamped to the last variant and reported via
/// `tracing::warn!`, so a misbehaving pluralizor is detectable without
/// turning every render into a fallible call.
pub(crate) fn select_variant(pluralizor: Pluralizor, quantity: i64, variants: usize) -> usize {
    let index = pluralizor(quantity, variants);
    if index >= variants {
        tracing::warn!(
            index,
            variants,
            quantity,
            "pluralizor returned an out-of-range variant index"
        );
        return variants.saturating_sub(1);
    }
    index
}
