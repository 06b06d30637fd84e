#![forbid(unsafe_code)]

//! Compiled string catalogs with locale fallback, pluralization, and
//! template interpolation.
//!
//! Raw per-locale text compiles once into reusable form: ordered plural
//! variants separated by `" | "`, each a literal or a `{{ field }}`
//! template. A backfill pass fills gaps across locales along configured
//! fallback chains, and lookup never fails: an unmatched key renders as
//! its own translation, memoized for repeat use.
//!
//! Keys are either symbolic tokens (`"greeting"`) or literal
//! source-language sentences (`"Hello, world!"`); homographs are told
//! apart with a `" <context>"` suffix.
//!
//! ```
//! use glossia::I18n;
//!
//! let mut i18n = I18n::new("zh-tw");
//! i18n.load_map(vec![(
//!     "zh-tw",
//!     vec![
//!         ("hello", "你好，{{ name }}！"),
//!         ("apples", "沒有蘋果 | 1 顆蘋果 | 有 {{ count }} 顆蘋果"),
//!     ],
//! )]);
//!
//! let locale = i18n.locale(["zh-tw"]);
//! assert_eq!(locale.string("hello", &[("name", "世界")]), "你好，世界！");
//! assert_eq!(locale.number("apples", 0, &[]), "沒有蘋果");
//! assert_eq!(locale.number("apples", 2, &[]), "有 2 顆蘋果");
//! ```

pub mod accept;
pub mod catalog;
mod compile;
pub mod loader;
pub mod locale;
pub mod plural;
pub mod tag;
mod template;

pub use accept::parse_accept_language;
pub use catalog::I18n;
pub use loader::{Decoder, LoadError};
pub use locale::Locale;
pub use plural::{Pluralizor, default_pluralizor};
pub use tag::canonical_tag;
