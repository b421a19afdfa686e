//! Per-project stage: manifest -> change detection -> fan-out -> cache.

use std::fs;

use crate::config::Project;
use crate::freshness::ChangeDetector;
use crate::manifest::{self, CACHED_MANIFEST_FILE, MANIFEST_FILE};
use crate::plan::fan_out;
use crate::queue::WorkQueue;
use crate::{debug, log};

/// Queue every output of `project` and refresh its cached manifest.
///
/// Returns the number of descriptors processed. A missing `META.txt` is
/// reported and counts as zero; the cache is left untouched in that case.
pub fn process_project(project: &Project, queue: &mut WorkQueue, force: bool) -> usize {
    let manifest_path = project.source_dir.join(MANIFEST_FILE);
    let loaded = match manifest::load(&manifest_path) {
        Ok(loaded) => loaded,
        Err(err) => {
            log!("error"; "{}", err);
            return 0;
        }
    };

    let cached_path = project.source_dir.join(CACHED_MANIFEST_FILE);
    let cached = manifest::load_cached(&cached_path);
    let detector = ChangeDetector::new(&cached, force);

    let mut changed = 0;
    for descriptor in loaded.manifest.iter() {
        let must_run = detector.must_run(descriptor);
        if must_run {
            changed += 1;
            debug!("changed"; "{} ({})", descriptor.target, descriptor.sizing);
        }
        for task in fan_out(descriptor, must_run, project) {
            queue.enqueue(task);
        }
    }
    if loaded.manifest.is_empty() {
        debug!("project"; "{}: {} has no descriptors", project.name, manifest_path.display());
    }

    if let Err(err) = fs::write(&cached_path, &loaded.raw) {
        log!("error"; "failed to write {}: {}", cached_path.display(), err);
    }

    log!(
        "project";
        "{} [{}]: {} descriptors, {} changed",
        project.name,
        project.platform,
        loaded.manifest.len(),
        changed
    );
    loaded.manifest.len()
}
