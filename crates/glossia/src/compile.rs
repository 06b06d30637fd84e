#![forbid(unsafe_code)]

//! Translation compilation: raw source text into reusable compiled form.
//!
//! Source text splits on `" | "` into ordered variants; a variant
//! containing the `{{` marker compiles as a template, anything else is
//! stored as a literal. Compilation is a pure function of its inputs plus
//! the pluralizor attached by the caller.

use smallvec::SmallVec;

use crate::plural::Pluralizor;
use crate::template::{TEMPLATE_OPEN, Template};

/// Separator between ordered plural variants in source text.
pub(crate) const VARIANT_SEPARATOR: &str = " | ";

/// A translation compiled once and rendered many times.
///
/// `texts` always holds at least one variant; any selected variant index
/// is bounded by `texts.len()` before use.
#[derive(Debug, Clone)]
pub(crate) struct CompiledTranslation {
    pub(crate) locale: String,
    pub(crate) name: String,
    pub(crate) pluralizor: Pluralizor,
    pub(crate) texts: SmallVec<[CompiledText; 3]>,
}

/// One variant: a literal string or a compiled template, never both.
#[derive(Debug, Clone)]
pub(crate) enum CompiledText {
    Literal(String),
    Template(Template),
}

pub(crate) fn compile(
    locale: &str,
    name: &str,
    text: &str,
    pluralizor: Pluralizor,
) -> CompiledTranslation {
    let texts = text
        .split(VARIANT_SEPARATOR)
        .map(|segment| {
            if segment.contains(TEMPLATE_OPEN) {
                CompiledText::Template(Template::parse(segment))
            } else {
                CompiledText::Literal(segment.to_owned())
            }
        })
        .collect();
    CompiledTranslation {
        locale: locale.to_owned(),
        name: name.to_owned(),
        pluralizor,
        texts,
    }
}

/// Strip one trailing `" <context>"` group, if present.
///
/// The group must sit at the very end of the key and its interior must be
/// a plain token (no nested `<` or `>`). Bounded parsing; no patterns.
pub(crate) fn trim_context(name: &str) -> &str {
    if !name.ends_with('>') {
        return name;
    }
    let Some(start) = name.rfind(" <") else {
        return name;
    };
    let interior = &name[start + 2..name.len() - 1];
    if interior.contains('<') || interior.contains('>') {
        return name;
    }
    &name[..start]
}
