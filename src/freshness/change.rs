//! Manifest diff against the cached copy from the previous run.

use crate::manifest::{AssetDescriptor, Manifest};

/// Whether `current` must be regenerated given the previous manifest.
///
/// True when the target key is new, or when source or sizing changed.
/// Numeric fields compare with exact equality.
pub fn must_run(current: &AssetDescriptor, cached: &Manifest) -> bool {
    match cached.get(&current.target) {
        Some(previous) => !current.same_render(previous),
        None => true,
    }
}

/// Change detection for one project run.
pub struct ChangeDetector<'a> {
    cached: &'a Manifest,
    force: bool,
}

impl<'a> ChangeDetector<'a> {
    /// `force` marks every descriptor as changed.
    pub fn new(cached: &'a Manifest, force: bool) -> Self {
        Self { cached, force }
    }

    pub fn must_run(&self, current: &AssetDescriptor) -> bool {
        self.force || must_run(current, self.cached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Sizing;

    fn manifest(text: &str) -> Manifest {
        let (manifest, errors) = Manifest::parse(text);
        assert!(errors.is_empty());
        manifest
    }

    #[test]
    fn test_new_descriptor_must_run() {
        let current = manifest("icon 2x");
        let empty = Manifest::default();
        let detector = ChangeDetector::new(&empty, false);
        assert!(detector.must_run(current.get("icon").unwrap()));
    }

    #[test]
    fn test_identical_descriptor_is_clean() {
        let current = manifest("icon 2x\nlogo 64 32");
        let cached = manifest("logo 64 32\nicon 2.0x");
        let detector = ChangeDetector::new(&cached, false);
        for desc in current.iter() {
            assert!(!detector.must_run(desc), "{}", desc.target);
        }
    }

    #[test]
    fn test_width_change_only_affects_that_descriptor() {
        let current = manifest("icon 2x\nlogo 65 32");
        let cached = manifest("icon 2x\nlogo 64 32");
        let detector = ChangeDetector::new(&cached, false);
        assert!(detector.must_run(current.get("logo").unwrap()));
        assert!(!detector.must_run(current.get("icon").unwrap()));
    }

    #[test]
    fn test_source_change_must_run() {
        let current = manifest("new_icon 1x icon");
        let cached = manifest("old_icon 1x icon");
        assert!(must_run(current.get("icon").unwrap(), &cached));
    }

    #[test]
    fn test_sizing_mode_change_must_run() {
        let current = manifest("icon 64 64");
        let cached = manifest("icon");
        let desc = current.get("icon").unwrap();
        assert_eq!(cached.get("icon").unwrap().sizing, Sizing::Scale(1.0));
        assert!(must_run(desc, &cached));
    }

    #[test]
    fn test_force_overrides_cache() {
        let current = manifest("icon 2x");
        let detector = ChangeDetector::new(&current, true);
        assert!(detector.must_run(current.get("icon").unwrap()));
    }
}
