#![forbid(unsafe_code)]

//! A bound locale view over the catalog.
//!
//! [`Locale`] ties a catalog reference to one resolved tag and exposes the
//! four lookup entry points. Lookup consults the store, then the runtime
//! cache, then compiles the name itself, so every call produces a string.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::catalog::I18n;
use crate::compile::{CompiledText, CompiledTranslation};
use crate::plural::select_variant;

/// A locale bound to its catalog.
///
/// Obtained from [`I18n::locale`]. Cheap to create and clone; holds a
/// reference to the catalog and the resolved canonical tag.
#[derive(Debug, Clone)]
pub struct Locale<'a> {
    i18n: &'a I18n,
    tag: String,
}

impl<'a> Locale<'a> {
    pub(crate) fn new(i18n: &'a I18n, tag: String) -> Self {
        Self { i18n, tag }
    }

    /// The bound locale tag, in canonical form.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Translate `name`, rendering the first variant.
    #[must_use]
    pub fn string(&self, name: &str, args: &[(&str, &str)]) -> String {
        let translation = self.lookup(name);
        render(&translation.texts[0], args)
    }

    /// [`string`](Self::string) with a context suffix for homograph keys.
    ///
    /// Looks up `"{name} <{context}>"`; with no matching entry anywhere,
    /// the suffix is stripped again before self-rendering, so an unmatched
    /// context degrades to the plain name.
    #[must_use]
    pub fn string_x(&self, name: &str, context: &str, args: &[(&str, &str)]) -> String {
        self.string(&format!("{name} <{context}>"), args)
    }

    /// Translate `name`, selecting the plural variant for `count`.
    ///
    /// A `("count", …)` argument is always supplied to the template, ahead
    /// of any caller args, so `{{ count }}` renders without caller data.
    #[must_use]
    pub fn number(&self, name: &str, count: i64, args: &[(&str, &str)]) -> String {
        let translation = self.lookup(name);
        let index = select_variant(translation.pluralizor, count, translation.texts.len());
        let count_text = count.to_string();
        let mut all: SmallVec<[(&str, &str); 6]> = SmallVec::with_capacity(args.len() + 1);
        all.push(("count", count_text.as_str()));
        all.extend_from_slice(args);
        render(&translation.texts[index], &all)
    }

    /// [`number`](Self::number) with a context suffix for homograph keys.
    #[must_use]
    pub fn number_x(&self, name: &str, context: &str, count: i64, args: &[(&str, &str)]) -> String {
        self.number(&format!("{name} <{context}>"), count, args)
    }

    /// Store entry for this locale, else the runtime cache (compiling the
    /// name itself on a first miss).
    fn lookup(&self, name: &str) -> Arc<CompiledTranslation> {
        match self.i18n.store_lookup(&self.tag, name) {
            Some(translation) => translation,
            None => self.i18n.runtime_lookup(name),
        }
    }
}

/// Execute a compiled variant: templates render against `args`, literals
/// are returned unchanged with no engine invoked.
fn render(text: &CompiledText, args: &[(&str, &str)]) -> String {
    match text {
        CompiledText::Literal(text) => text.clone(),
        CompiledText::Template(template) => template.render(args),
    }
}
