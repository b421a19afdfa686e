//! Batch conversion pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────── per project ─────────────┐
//! │ META.txt ─► Manifest ─┐              │
//! │ .cachedMETA.txt ──────┴► ChangeDetector ─► fan_out ─┐
//! │ META.txt bytes ─► .cachedMETA.txt    │               │
//! └──────────────────────────────────────┘               ▼
//!                                               shared WorkQueue
//!                                                        │
//!                                                  drain (once)
//!                                                        │
//!                                                   Rasterizer
//! ```

mod project;

pub use project::process_project;

use anyhow::Result;
use std::fmt;

use crate::config::Project;
use crate::image::svg::Rasterizer;
use crate::logger::ProgressLine;
use crate::queue::{DrainStats, WorkQueue};
use crate::{debug, log};

/// Batch-level switches.
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Reconvert everything regardless of cache and timestamps.
    pub force: bool,
    /// Drain worker count.
    pub jobs: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            force: false,
            jobs: 1,
        }
    }
}

/// Totals reported at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Descriptors read across all projects.
    pub descriptors: usize,
    pub stats: DrainStats,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} source files processed; {} output files generated.",
            self.descriptors, self.stats.completed
        )
    }
}

/// Plan every project into `queue`, then drain it once.
///
/// The queue is reset first, so tasks left over from an earlier batch are
/// never converted. A project without a manifest contributes zero
/// descriptors; the rest of the batch still runs.
pub fn process_projects(
    projects: &[&Project],
    queue: &mut WorkQueue,
    rasterizer: &dyn Rasterizer,
    options: BatchOptions,
) -> Result<BatchSummary> {
    queue.clear();
    let descriptors = projects
        .iter()
        .map(|project| process_project(project, queue, options.force))
        .sum();

    let progress = (!queue.is_empty()).then(|| ProgressLine::new("convert", queue.len()));
    let stats = queue.drain(rasterizer, options.jobs, |_| {
        if let Some(progress) = &progress {
            progress.inc();
        }
    })?;
    if let Some(progress) = progress {
        progress.finish();
    }

    debug!(
        "drain";
        "{} tasks: {} up to date, {} without source",
        stats.total(),
        stats.up_to_date,
        stats.source_missing
    );
    if stats.failed > 0 {
        log!("error"; "{} conversions failed", stats.failed);
    }

    let summary = BatchSummary { descriptors, stats };
    log!("done"; "{}", summary);
    Ok(summary)
}
