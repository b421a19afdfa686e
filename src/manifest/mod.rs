//! Asset manifests (`META.txt` and its cached copy).
//!
//! # Files
//!
//! ```text
//! <source_dir>/
//! ├── META.txt         # current descriptions, edited by hand
//! └── .cachedMETA.txt  # byte copy of META.txt from the previous run
//! ```

mod descriptor;
mod parse;

pub use descriptor::{AssetDescriptor, Sizing};
pub use parse::{LineError, parse_line};

use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::log;

/// Manifest file name inside a project's source directory.
pub const MANIFEST_FILE: &str = "META.txt";
/// Cached manifest written after each run.
pub const CACHED_MANIFEST_FILE: &str = ".cachedMETA.txt";

/// Suffix stripped from source names.
pub const SOURCE_SUFFIX: &str = ".svg";
/// Suffix stripped from target names.
pub const TARGET_SUFFIX: &str = ".png";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to open META file: {}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

/// Target name -> descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: FxHashMap<String, AssetDescriptor>,
}

impl Manifest {
    /// Parse manifest text. Malformed lines are returned alongside.
    pub fn parse(content: &str) -> (Self, Vec<LineError>) {
        let mut manifest = Self::default();
        let errors = content
            .split('\n')
            .enumerate()
            .filter_map(|(idx, line)| parse_line(line, idx + 1, &mut manifest).err())
            .collect();
        (manifest, errors)
    }

    /// Insert a descriptor under its target key, replacing any previous entry.
    pub fn insert(&mut self, descriptor: AssetDescriptor) {
        self.entries.insert(descriptor.target.clone(), descriptor);
    }

    pub fn get(&self, target: &str) -> Option<&AssetDescriptor> {
        self.entries.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetDescriptor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A manifest together with the exact bytes it was parsed from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub raw: Vec<u8>,
}

/// Read and parse a manifest file.
///
/// Malformed lines are logged and skipped. I/O failure yields
/// `ManifestError::Io`; callers decide whether that is an error (the primary
/// manifest) or an empty cache.
pub fn load(path: &Path) -> Result<LoadedManifest, ManifestError> {
    let raw = fs::read(path).map_err(|err| ManifestError::Io(path.to_path_buf(), err))?;
    let (manifest, errors) = Manifest::parse(&String::from_utf8_lossy(&raw));
    for err in errors {
        log!("error"; "{}", err);
    }
    Ok(LoadedManifest { manifest, raw })
}

/// Load the cached manifest, treating any failure as an empty cache.
///
/// Malformed lines were already reported when the cache was the primary
/// manifest, so they are dropped silently here.
pub fn load_cached(path: &Path) -> Manifest {
    match fs::read(path) {
        Ok(raw) => Manifest::parse(&String::from_utf8_lossy(&raw)).0,
        Err(_) => Manifest::default(),
    }
}
