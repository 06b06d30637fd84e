#![forbid(unsafe_code)]

//! The translation catalog: compiled store, fallback backfill, runtime cache.
//!
//! # Invariants
//!
//! 1. **Variant count**: every compiled entry holds at least one variant,
//!    and any selected variant index is bounded before use.
//!
//! 2. **Canonical keys**: store slots, fallback-map keys, pluralizor-map
//!    keys, and selection candidates are compared only in canonical form
//!    (see [`crate::tag::canonical_tag`]).
//!
//! 3. **Direct wins**: the backfill pass never overwrites an explicitly
//!    loaded entry; a later explicit load overwrites both direct and
//!    backfilled entries.
//!
//! 4. **Walks terminate**: every fallback walk carries a visited set, so
//!    cyclic configuration cannot recurse forever.
//!
//! 5. **Lookup never fails**: an unmatched name compiles to its own
//!    translation (context suffix stripped) and is memoized.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing name | No entry in any locale | Renders the name itself |
//! | Missing locale | Candidate has no slot | Binds the default locale |
//! | Cyclic fallback map | Configuration error | Walk skips revisits |
//! | Bad pluralizor index | Custom pluralizor bug | Clamped, `tracing::warn!` |
//!
//! Loading takes `&mut self` and lookups take `&self`, so the load phase
//! and the read-many phase cannot race. The runtime cache is the one piece
//! of interior mutability; first-time compilation of a key happens under
//! its write lock, exactly once.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::compile::{CompiledTranslation, compile, trim_context};
use crate::loader::{Decoder, default_decoder};
use crate::locale::Locale;
use crate::plural::{Pluralizor, default_pluralizor};
use crate::tag::canonical_tag;

/// How an entry got into a locale slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Explicitly loaded into this locale.
    Direct,
    /// Copied in by the fallback backfill pass.
    Backfilled,
}

#[derive(Debug, Clone)]
struct Entry {
    translation: Arc<CompiledTranslation>,
    origin: Origin,
}

/// The internationalization core.
///
/// Owns the compiled translation store, the fallback graph, per-locale
/// pluralizors, the source decoder, and the runtime cache for ad hoc keys.
///
/// # Example
///
/// ```
/// use glossia::I18n;
///
/// let mut i18n = I18n::new("zh-tw").with_fallback("ja-jp", &["zh-tw"]);
/// i18n.load_map(vec![
///     ("zh-tw", vec![
///         ("hello", "你好，{{ name }}！"),
///         ("apples", "沒有蘋果 | 1 顆蘋果 | 有 {{ count }} 顆蘋果"),
///     ]),
///     ("ja-jp", vec![("hello", "こんにちは、{{ name }}！")]),
/// ]);
///
/// let locale = i18n.locale(["ja-jp"]);
/// assert_eq!(locale.string("hello", &[("name", "世界")]), "こんにちは、世界！");
/// // "apples" is backfilled from zh-tw along the fallback chain.
/// assert_eq!(locale.number("apples", 2, &[]), "有 2 顆蘋果");
/// ```
pub struct I18n {
    default_locale: String,
    decoder: Decoder,
    pluralizors: FxHashMap<String, Pluralizor>,
    fallbacks: FxHashMap<String, Vec<String>>,
    /// locale → name → compiled entry. Slots are created only by loading.
    entries: FxHashMap<String, FxHashMap<String, Entry>>,
    /// Ad hoc keys compiled lazily at lookup time, keyed by the original
    /// (unstripped) name. Unbounded, but bounded in practice by the
    /// program's fixed set of literal keys.
    runtime: RwLock<FxHashMap<String, Arc<CompiledTranslation>>>,
}

impl I18n {
    /// Create a catalog rooted at `default_locale`.
    ///
    /// The default locale is the root of every fallback chain and the
    /// locale ad hoc keys are compiled under.
    #[must_use]
    pub fn new(default_locale: &str) -> Self {
        Self {
            default_locale: canonical_tag(default_locale),
            decoder: default_decoder(),
            pluralizors: FxHashMap::default(),
            fallbacks: FxHashMap::default(),
            entries: FxHashMap::default(),
            runtime: RwLock::new(FxHashMap::default()),
        }
    }

    /// Set the ordered fallback chain consulted when `locale` lacks a name.
    ///
    /// Chains may reference locales with chains of their own; walks follow
    /// them recursively. Cycles are tolerated and defused at walk time.
    #[must_use]
    pub fn with_fallback(mut self, locale: &str, chain: &[&str]) -> Self {
        self.fallbacks.insert(
            canonical_tag(locale),
            chain.iter().map(|tag| canonical_tag(tag)).collect(),
        );
        self
    }

    /// Replace the pluralizor for `locale`.
    ///
    /// The pluralizor is attached to entries at compile time, so register
    /// it before loading that locale's translations.
    #[must_use]
    pub fn with_pluralizor(mut self, locale: &str, pluralizor: Pluralizor) -> Self {
        self.pluralizors.insert(canonical_tag(locale), pluralizor);
        self
    }

    /// Replace the source decoder used by the file and byte loaders.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Decoder) -> Self {
        self.decoder = decoder;
        self
    }

    /// The canonical default locale tag.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// All locales with a store slot, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Merge a locale → name → raw text batch into the store.
    ///
    /// Locale keys are canonicalized and every entry is compiled on entry.
    /// A later load overwrites the same (locale, name), including entries
    /// a previous backfill pass copied in. One fallback-compilation pass
    /// runs after the whole batch is merged.
    pub fn load_map<B, T, K, N, V>(&mut self, translations: B)
    where
        B: IntoIterator<Item = (K, T)>,
        T: IntoIterator<Item = (N, V)>,
        K: AsRef<str>,
        N: Into<String>,
        V: AsRef<str>,
    {
        let mut batch_locales = 0usize;
        let mut batch_names = 0usize;
        for (locale, texts) in translations {
            let locale = canonical_tag(locale.as_ref());
            let pluralizor = self.pluralizor_for(&locale);
            batch_locales += 1;
            let slot = self.entries.entry(locale.clone()).or_default();
            for (name, text) in texts {
                let name = name.into();
                let compiled = compile(&locale, &name, text.as_ref(), pluralizor);
                slot.insert(
                    name,
                    Entry {
                        translation: Arc::new(compiled),
                        origin: Origin::Direct,
                    },
                );
                batch_names += 1;
            }
        }
        tracing::debug!(
            locales = batch_locales,
            names = batch_names,
            "merged translation batch"
        );
        self.compile_fallbacks();
    }

    /// Bind a locale view, picking the first candidate with a store slot.
    ///
    /// Candidates are canonicalized in caller order; slot presence alone
    /// decides (any translation, even a backfilled one, keeps a slot
    /// alive), independent of fallback configuration or whether any
    /// specific name exists. No candidate matches → the default locale.
    #[must_use]
    pub fn locale<I, S>(&self, candidates: I) -> Locale<'_>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for candidate in candidates {
            let tag = canonical_tag(candidate.as_ref());
            if self.entries.contains_key(&tag) {
                return Locale::new(self, tag);
            }
        }
        Locale::new(self, self.default_locale.clone())
    }

    pub(crate) fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    fn pluralizor_for(&self, locale: &str) -> Pluralizor {
        self.pluralizors
            .get(locale)
            .copied()
            .unwrap_or(default_pluralizor)
    }

    /// Store entry for `(locale, name)`, direct or backfilled.
    pub(crate) fn store_lookup(&self, locale: &str, name: &str) -> Option<Arc<CompiledTranslation>> {
        self.entries
            .get(locale)
            .and_then(|slot| slot.get(name))
            .map(|entry| Arc::clone(&entry.translation))
    }

    /// Ad hoc compilation for names absent from the store.
    ///
    /// The result is cached under the original name, context suffix and
    /// all, so repeat lookups with identical context short-circuit. The
    /// compile runs inside the write lock: concurrent first lookups of one
    /// key produce a single compilation.
    pub(crate) fn runtime_lookup(&self, name: &str) -> Arc<CompiledTranslation> {
        if let Some(hit) = self
            .runtime
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(hit);
        }
        let mut cache = self.runtime.write().unwrap_or_else(PoisonError::into_inner);
        let entry = cache.entry(name.to_owned()).or_insert_with(|| {
            let compiled = compile(
                &self.default_locale,
                name,
                trim_context(name),
                self.pluralizor_for(&self.default_locale),
            );
            tracing::debug!(
                name = %compiled.name,
                locale = %compiled.locale,
                variants = compiled.texts.len(),
                "compiled ad hoc translation"
            );
            Arc::new(compiled)
        });
        Arc::clone(entry)
    }

    /// Backfill pass: give every other locale slot the names the default
    /// locale defines, resolved through that locale's fallback chain.
    ///
    /// The first chain entry that directly defines the name (checked
    /// recursively through its own chain) wins and is shared by reference.
    /// A locale with no chain, or a chain with no match, takes the default
    /// locale's entry unconditionally. Names already present in a slot are
    /// left alone.
    fn compile_fallbacks(&mut self) {
        let Some(defaults) = self.entries.get(&self.default_locale) else {
            return;
        };
        let names: Vec<(String, Arc<CompiledTranslation>)> = defaults
            .iter()
            .map(|(name, entry)| (name.clone(), Arc::clone(&entry.translation)))
            .collect();
        let locales: Vec<String> = self
            .entries
            .keys()
            .filter(|tag| **tag != self.default_locale)
            .cloned()
            .collect();

        for locale in &locales {
            for (name, default_translation) in &names {
                let present = self
                    .entries
                    .get(locale)
                    .is_some_and(|slot| slot.contains_key(name));
                if present {
                    continue;
                }
                let resolved = self
                    .resolve_chain(locale, name)
                    .unwrap_or_else(|| Arc::clone(default_translation));
                if let Some(slot) = self.entries.get_mut(locale) {
                    slot.insert(
                        name.clone(),
                        Entry {
                            translation: resolved,
                            origin: Origin::Backfilled,
                        },
                    );
                }
            }
        }
    }

    /// Walk `locale`'s configured chain for `name`.
    ///
    /// Only explicitly loaded entries count as matches, so results do not
    /// depend on what earlier passes backfilled, and the default locale is
    /// never consulted mid-walk; the caller applies it as the last resort.
    fn resolve_chain<'a>(&'a self, locale: &'a str, name: &str) -> Option<Arc<CompiledTranslation>> {
        let mut visited = FxHashSet::default();
        visited.insert(locale);
        self.walk_chain(locale, name, &mut visited)
    }

    fn walk_chain<'a>(
        &'a self,
        locale: &str,
        name: &str,
        visited: &mut FxHashSet<&'a str>,
    ) -> Option<Arc<CompiledTranslation>> {
        let chain = self.fallbacks.get(locale)?;
        for candidate in chain {
            if !visited.insert(candidate.as_str()) {
                continue;
            }
            if let Some(entry) = self
                .entries
                .get(candidate.as_str())
                .and_then(|slot| slot.get(name))
            {
                if entry.origin == Origin::Direct {
                    return Some(Arc::clone(&entry.translation));
                }
            }
            if let Some(found) = self.walk_chain(candidate, name, visited) {
                return Some(found);
            }
        }
        None
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("default_locale", &self.default_locale)
            .field("locales", &self.locales())
            .field("fallbacks", &self.fallbacks)
            .finish_non_exhaustive()
    }
}
