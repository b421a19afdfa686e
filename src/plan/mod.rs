//! Fan-out of one descriptor into per-density conversion tasks.
//!
//! ```text
//! icon 2x  ──► iOS      icon.png        (x1)
//!                       icon@2x.png     (x2)
//!                       icon@3x.png     (x3)
//!
//!          ──► Android  drawable-ldpi/icon.png    (x0.75)
//!                       drawable-mdpi/icon.png    (x1)
//!                       drawable-hdpi/icon.png    (x1.5)
//!                       drawable-xhdpi/icon.png   (x2)
//!                       drawable-xxhdpi/icon.png  (x3)
//! ```

mod name;

pub use name::normalize_android_name;

use std::path::{Component, Path, PathBuf};

use crate::config::{Platform, Project};
use crate::manifest::{AssetDescriptor, SOURCE_SUFFIX, Sizing};
use crate::queue::ConversionTask;

/// iOS variants: file name suffix and multiplier.
pub const IOS_VARIANTS: [(&str, f64); 3] = [("", 1.0), ("@2x", 2.0), ("@3x", 3.0)];

/// Android density buckets: resource directory and multiplier.
pub const ANDROID_DENSITIES: [(&str, f64); 5] = [
    ("drawable-ldpi", 0.75),
    ("drawable-mdpi", 1.0),
    ("drawable-hdpi", 1.5),
    ("drawable-xhdpi", 2.0),
    ("drawable-xxhdpi", 3.0),
];

const OUTPUT_EXTENSION: &str = "png";

/// Expand a descriptor into the tasks for `project`'s platform.
///
/// Unsupported platforms produce no tasks.
pub fn fan_out(descriptor: &AssetDescriptor, must_run: bool, project: &Project) -> Vec<ConversionTask> {
    let source = project
        .source_dir
        .join(relative(&format!("{}{}", descriptor.source, SOURCE_SUFFIX)));

    let variants: Vec<(PathBuf, f64)> = match project.platform {
        Platform::Ios => IOS_VARIANTS
            .iter()
            .map(|(suffix, factor)| (relative(&format!("{}{suffix}", descriptor.target)), *factor))
            .collect(),
        Platform::Android => {
            let name = relative(&normalize_android_name(&descriptor.target));
            ANDROID_DENSITIES
                .iter()
                .map(|(dir, factor)| (Path::new(dir).join(&name), *factor))
                .collect()
        }
        Platform::Unsupported => Vec::new(),
    };

    variants
        .into_iter()
        .map(|(name, factor)| ConversionTask {
            source: source.clone(),
            target: target_path(&project.target_dir, &name),
            sizing: scaled(descriptor.sizing, factor),
            must_run,
        })
        .collect()
}

/// Drop root and prefix components so a later `join` always stays below
/// the project directory it is joined onto.
fn relative(name: &str) -> PathBuf {
    Path::new(name)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}

/// `<target_dir>/<relative>.png`, keeping any dots already in the name.
fn target_path(target_dir: &Path, relative: &Path) -> PathBuf {
    let mut file = relative.as_os_str().to_owned();
    file.push(".");
    file.push(OUTPUT_EXTENSION);
    target_dir.join(file)
}

fn scaled(sizing: Sizing, factor: f64) -> Sizing {
    if factor == 1.0 { sizing } else { sizing.times(factor) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(platform: Platform) -> Project {
        Project::new("demo", "/src", "/res", platform)
    }

    fn descriptor(line: &str) -> AssetDescriptor {
        let (manifest, errors) = crate::manifest::Manifest::parse(line);
        assert!(errors.is_empty());
        manifest.iter().next().unwrap().clone()
    }

    #[test]
    fn test_ios_scale() {
        let tasks = fan_out(&descriptor("icon 0.8x"), false, &project(Platform::Ios));
        assert_eq!(tasks.len(), 3);

        let targets: Vec<_> = tasks.iter().map(|t| t.target.clone()).collect();
        assert_eq!(
            targets,
            [
                PathBuf::from("/res/icon.png"),
                PathBuf::from("/res/icon@2x.png"),
                PathBuf::from("/res/icon@3x.png"),
            ]
        );

        let scales: Vec<_> = tasks.iter().map(|t| t.sizing.scale().unwrap()).collect();
        assert_eq!(scales, [0.8, 0.8 * 2.0, 0.8 * 3.0]);
        assert!((scales[1] - 1.6).abs() < 1e-9);
        assert!((scales[2] - 2.4).abs() < 1e-9);

        for task in &tasks {
            assert_eq!(task.source, Path::new("/src/icon.svg"));
            assert!(!task.must_run);
        }
    }

    #[test]
    fn test_ios_dimensions() {
        let tasks = fan_out(&descriptor("logo 64 32 brand.png"), true, &project(Platform::Ios));
        let sizes: Vec<_> = tasks
            .iter()
            .map(|t| (t.sizing.width().unwrap(), t.sizing.height().unwrap()))
            .collect();
        assert_eq!(sizes, [(64.0, 32.0), (128.0, 64.0), (192.0, 96.0)]);
        assert_eq!(tasks[2].target, Path::new("/res/brand@3x.png"));
        assert_eq!(tasks[0].source, Path::new("/src/logo.svg"));
        assert!(tasks.iter().all(|t| t.must_run));
    }

    #[test]
    fn test_android_dimensions() {
        let tasks = fan_out(&descriptor("logo 200 100"), true, &project(Platform::Android));
        assert_eq!(tasks.len(), 5);

        let mut widths: Vec<_> = tasks.iter().map(|t| t.sizing.width().unwrap()).collect();
        widths.sort_by(f64::total_cmp);
        assert_eq!(widths, [150.0, 200.0, 300.0, 400.0, 600.0]);

        for (dir, factor) in ANDROID_DENSITIES {
            let task = tasks
                .iter()
                .find(|t| t.target == Path::new("/res").join(dir).join("logo.png"))
                .unwrap();
            assert_eq!(task.sizing.height(), Some(100.0 * factor));
        }
    }

    #[test]
    fn test_android_scale_uses_normalized_name() {
        let tasks = fan_out(&descriptor("src 2x Big-Icon"), false, &project(Platform::Android));
        let scales: Vec<_> = tasks.iter().map(|t| t.sizing.scale().unwrap()).collect();
        assert_eq!(scales, [1.5, 2.0, 3.0, 4.0, 6.0]);
        assert_eq!(tasks[0].target, Path::new("/res/drawable-ldpi/big_icon.png"));
    }

    #[test]
    fn test_dotted_target_keeps_dots() {
        let tasks = fan_out(&descriptor("src 1x target.File"), false, &project(Platform::Ios));
        assert_eq!(tasks[0].target, Path::new("/res/target.File.png"));
        assert_eq!(tasks[1].target, Path::new("/res/target.File@2x.png"));
    }

    #[test]
    fn test_relative_target_path() {
        let tasks = fan_out(&descriptor("src 1x ../other/icon"), false, &project(Platform::Ios));
        assert_eq!(tasks[0].target, Path::new("/res/../other/icon.png"));
    }

    #[test]
    fn test_absolute_target_stays_in_target_dir() {
        let tasks = fan_out(&descriptor("icon 1x /tmp/evil"), false, &project(Platform::Ios));
        assert_eq!(tasks[0].target, Path::new("/res/tmp/evil.png"));
        assert_eq!(tasks[2].target, Path::new("/res/tmp/evil@3x.png"));
        assert!(tasks.iter().all(|t| t.target.starts_with("/res")));

        let tasks = fan_out(&descriptor("icon 1x /tmp/Evil"), false, &project(Platform::Android));
        assert_eq!(tasks[1].target, Path::new("/res/drawable-mdpi/tmp/evil.png"));
        assert!(tasks.iter().all(|t| t.target.starts_with("/res")));
    }

    #[test]
    fn test_absolute_source_stays_in_source_dir() {
        let tasks = fan_out(&descriptor("/etc/icon 1x out"), false, &project(Platform::Ios));
        assert!(tasks.iter().all(|t| t.source == Path::new("/src/etc/icon.svg")));
        assert_eq!(tasks[0].target, Path::new("/res/out.png"));
    }

    #[test]
    fn test_unsupported_platform_is_noop() {
        let tasks = fan_out(&descriptor("icon"), true, &project(Platform::Unsupported));
        assert!(tasks.is_empty());
    }
}
