//! Tool configuration management for `svgres.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError
//! ├── project    # [[projects]] entries and Platform
//! ├── util       # config discovery, path resolution
//! └── mod.rs     # Config (this file)
//! ```
//!
//! # Example
//!
//! ```toml
//! force = false
//!
//! [convert]
//! backend = "builtin"   # builtin | magick
//! jobs = 1
//!
//! [[projects]]
//! name = "ios-demo"
//! source_dir = "./ios_demo/_kitchen"
//! target_dir = "./ios_demo"
//! platform = "iOS"
//! ```
//!
//! A sibling `svgres.local.toml` may add or replace projects by name, which
//! keeps machine-specific paths out of the shared file.

mod error;
mod project;
mod util;

pub use error::ConfigError;
pub use project::{Platform, Project};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::log;

/// Default config file name.
pub const CONFIG_FILE: &str = "svgres.toml";
/// Optional per-machine overlay next to the config file.
pub const LOCAL_CONFIG_FILE: &str = "svgres.local.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing svgres.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory of the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Reconvert everything regardless of cache and timestamps.
    pub force: bool,

    /// Rasterization settings
    pub convert: ConvertConfig,

    /// Configured projects, in file order
    pub projects: Vec<Project>,
}

/// Rasterization backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// resvg, in process.
    #[default]
    Builtin,
    /// ImageMagick (`magick` command).
    Magick,
}

/// `[convert]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub backend: Backend,
    /// Worker threads used to drain the queue. `1` drains sequentially.
    pub jobs: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Builtin,
            jobs: 1,
        }
    }
}

impl Config {
    /// Load configuration from a file, merging the local overlay if present.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let mut config = Self::from_path(path)?;
        config.config_path = path.to_path_buf();
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let local_path = config.root.join(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            let local = Self::from_path(&local_path)?;
            config.merge_projects(local.projects);
        }

        config.normalize_paths();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        for field in ignored {
            log!("warn"; "unknown field `{}` in {} ignored", field, path.display());
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Overlay projects: same name replaces, new names append.
    fn merge_projects(&mut self, local: Vec<Project>) {
        for project in local {
            match self.projects.iter_mut().find(|p| p.name == project.name) {
                Some(existing) => *existing = project,
                None => self.projects.push(project),
            }
        }
    }

    fn normalize_paths(&mut self) {
        for project in &mut self.projects {
            project.source_dir = util::resolve_dir(&self.root, &project.source_dir);
            project.target_dir = util::resolve_dir(&self.root, &project.target_dir);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.convert.jobs == 0 {
            return Err(ConfigError::Validation(
                "`convert.jobs` must be at least 1".into(),
            ));
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.name.trim().is_empty() {
                return Err(ConfigError::Validation("project name is empty".into()));
            }
            if !seen.insert(project.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate project name `{}`",
                    project.name
                )));
            }
            if project.platform == Platform::Unsupported {
                log!(
                    "warn";
                    "project `{}` has an unsupported platform and will produce no output",
                    project.name
                );
            }
        }
        Ok(())
    }

    /// Look up a project by name.
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
force = true

[convert]
backend = "magick"
jobs = 4

[[projects]]
name = "ios-demo"
source_dir = "./ios_demo/_kitchen"
target_dir = "./ios_demo/"
platform = "iOS"

[[projects]]
name = "android-demo"
source_dir = "/abs/svg"
target_dir = "/abs/res"
platform = "Android"
"#;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_sample() {
        let config = Config::from_str(SAMPLE).unwrap();
        assert!(config.force);
        assert_eq!(config.convert.backend, Backend::Magick);
        assert_eq!(config.convert.jobs, 4);
        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.projects[0].platform, Platform::Ios);
        assert_eq!(config.projects[1].platform, Platform::Android);
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_str("").unwrap();
        assert!(!config.force);
        assert_eq!(config.convert, ConvertConfig::default());
        assert!(config.projects.is_empty());
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);

        let config = Config::load(&path).unwrap();
        let ios = config.project("ios-demo").unwrap();
        assert_eq!(ios.source_dir, dir.path().join("./ios_demo/_kitchen"));
        assert_eq!(
            config.project("android-demo").unwrap().target_dir,
            Path::new("/abs/res")
        );
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(&dir.path().join(CONFIG_FILE));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_duplicate_names() {
        let dir = TempDir::new().unwrap();
        let content = r#"
[[projects]]
name = "a"
source_dir = "s"
target_dir = "t"
platform = "iOS"

[[projects]]
name = "a"
source_dir = "s2"
target_dir = "t2"
platform = "Android"
"#;
        let path = write_config(&dir, content);
        assert!(matches!(Config::load(&path), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_rejects_zero_jobs() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[convert]\njobs = 0\n");
        assert!(matches!(Config::load(&path), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_local_overlay_replaces_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, SAMPLE);
        fs::write(
            dir.path().join(LOCAL_CONFIG_FILE),
            r#"
[[projects]]
name = "ios-demo"
source_dir = "/mine/kitchen"
target_dir = "/mine/res"
platform = "iOS"

[[projects]]
name = "extra"
source_dir = "extra_svg"
target_dir = "extra_res"
platform = "Android"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        let names: Vec<_> = config.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["ios-demo", "android-demo", "extra"]);
        assert_eq!(
            config.project("ios-demo").unwrap().source_dir,
            Path::new("/mine/kitchen")
        );
        // Local settings other than projects are ignored
        assert_eq!(config.convert.jobs, 4);
    }

    #[test]
    fn test_unknown_platform_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[[projects]]\nname = \"w\"\nsource_dir = \"s\"\ntarget_dir = \"t\"\nplatform = \"Windows\"\n",
        );
        let config = Config::load(&path).unwrap();
        assert_eq!(config.projects[0].platform, Platform::Unsupported);
    }
}
