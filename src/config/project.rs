//! `[[projects]]` entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Target platform of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    Android,
    /// Any other value. Accepted, but produces no output.
    #[serde(other)]
    Unsupported,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::Unsupported => "unsupported",
        })
    }
}

/// One source directory of SVGs converted into one resource directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    /// Directory holding the SVGs and `META.txt`.
    pub source_dir: PathBuf,
    /// Resource directory PNGs are written into.
    pub target_dir: PathBuf,
    pub platform: Platform,
}

#[cfg(test)]
impl Project {
    pub fn new(
        name: impl Into<String>,
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        platform: Platform,
    ) -> Self {
        Self {
            name: name.into(),
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            platform,
        }
    }
}
