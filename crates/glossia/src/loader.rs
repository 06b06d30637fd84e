#![forbid(unsafe_code)]

//! Translation sources: files, directories, embedded bytes.
//!
//! Loaders are collaborators of the catalog: they read bytes, decode them
//! with the configured [`Decoder`], derive the canonical locale from the
//! file name, and hand the result to [`I18n::load_map`]. The catalog knows
//! nothing about storage media or encodings.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::catalog::I18n;
use crate::tag::canonical_tag;

/// Decodes one translation source into a name → raw text map.
///
/// The default decoder parses a JSON object of strings; replace it via
/// [`I18n::with_decoder`] for YAML, TOML, or any other format.
pub type Decoder = Box<
    dyn Fn(&[u8]) -> Result<FxHashMap<String, String>, Box<dyn StdError + Send + Sync>>
        + Send
        + Sync,
>;

pub(crate) fn default_decoder() -> Decoder {
    Box::new(|bytes| serde_json::from_slice(bytes).map_err(Into::into))
}

/// Failure while loading translation sources.
///
/// Previously loaded batches are unaffected; the failing batch is dropped
/// before any of it is merged.
#[derive(Debug)]
pub enum LoadError {
    /// A source could not be read.
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// A source could not be decoded into a name → text map.
    Decode {
        path: PathBuf,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => {
                write!(f, "failed to read translation source {}", path.display())
            }
            Self::Decode { path, .. } => {
                write!(f, "failed to decode translation source {}", path.display())
            }
        }
    }
}

impl StdError for LoadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source.as_ref()),
        }
    }
}

impl I18n {
    /// Load translation files as one batch.
    ///
    /// The canonical locale of each file comes from its name, so
    /// `zh-tw.json`, `zh_TW.json`, and `zh_tw.hello.json` all merge into
    /// the `zh-tw` slot, later files overwriting earlier names. Any read
    /// or decode failure drops the whole batch before merging; one
    /// fallback pass runs after a successful merge.
    pub fn load_files<P>(&mut self, paths: impl IntoIterator<Item = P>) -> Result<(), LoadError>
    where
        P: AsRef<Path>,
    {
        let mut batch: FxHashMap<String, FxHashMap<String, String>> = FxHashMap::default();
        for path in paths {
            let path = path.as_ref();
            let bytes = fs::read(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let texts = (self.decoder())(&bytes).map_err(|source| LoadError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
            let locale = canonical_tag(&path.to_string_lossy());
            batch.entry(locale).or_default().extend(texts);
        }
        self.load_map(batch);
        Ok(())
    }

    /// Load every regular file in `dir`, sorted by name, non-recursive.
    ///
    /// Hidden files are skipped. Sorting keeps the later-overwrites rule
    /// deterministic when several files feed the same locale.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<(), LoadError> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let hidden = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with('.'));
            if path.is_file() && !hidden {
                paths.push(path);
            }
        }
        paths.sort();
        self.load_files(paths)
    }

    /// Load one in-memory source.
    ///
    /// `filename` only supplies the locale, canonicalized the same way as
    /// on-disk sources; pair with `include_bytes!` for embedded catalogs.
    pub fn load_bytes(&mut self, filename: &str, bytes: &[u8]) -> Result<(), LoadError> {
        let texts = (self.decoder())(bytes).map_err(|source| LoadError::Decode {
            path: PathBuf::from(filename),
            source,
        })?;
        let mut batch: FxHashMap<String, FxHashMap<String, String>> = FxHashMap::default();
        batch.insert(canonical_tag(filename), texts);
        self.load_map(batch);
        Ok(())
    }
}
