//! Pending conversion work.
//!
//! Projects fill one shared [`WorkQueue`]; the batch runner drains it once.
//! Draining runs sequentially or on a bounded rayon pool; tasks that share a
//! target path always run one after another.

mod task;

pub use task::{ConversionTask, TaskOutcome};

use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use crate::image::svg::Rasterizer;

/// Per-drain counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainStats {
    /// PNGs successfully written.
    pub completed: usize,
    /// Skipped: target at least as new as source and no change recorded.
    pub up_to_date: usize,
    /// Skipped: SVG not on disk.
    pub source_missing: usize,
    /// Rasterizer reported an error.
    pub failed: usize,
}

impl DrainStats {
    fn record(mut self, outcome: &TaskOutcome) -> Self {
        match outcome {
            TaskOutcome::Converted => self.completed += 1,
            TaskOutcome::UpToDate => self.up_to_date += 1,
            TaskOutcome::SourceMissing => self.source_missing += 1,
            TaskOutcome::Failed(_) => self.failed += 1,
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            completed: self.completed + other.completed,
            up_to_date: self.up_to_date + other.up_to_date,
            source_missing: self.source_missing + other.source_missing,
            failed: self.failed + other.failed,
        }
    }

    /// Tasks attempted in total.
    pub fn total(&self) -> usize {
        self.completed + self.up_to_date + self.source_missing + self.failed
    }
}

/// Conversion tasks waiting to be drained.
#[derive(Debug, Default)]
pub struct WorkQueue {
    tasks: Vec<ConversionTask>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, task: ConversionTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Pending tasks, in enqueue order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &ConversionTask> {
        self.tasks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop all pending tasks.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Drain on the calling thread, most recently enqueued first.
    ///
    /// `on_done` runs after every task.
    pub fn drain_all<F>(&mut self, rasterizer: &dyn Rasterizer, on_done: F) -> DrainStats
    where
        F: Fn(&TaskOutcome),
    {
        let mut stats = DrainStats::default();
        while let Some(task) = self.tasks.pop() {
            let outcome = task.run(rasterizer);
            on_done(&outcome);
            stats = stats.record(&outcome);
        }
        stats
    }

    /// Drain with `jobs` workers, calling `on_done` after every task.
    ///
    /// `jobs <= 1` is [`drain_all`](Self::drain_all). With more workers,
    /// tasks sharing a target path are kept together and run in the same
    /// LIFO order as a sequential drain, so the file left on disk is the
    /// same either way. The queue is empty afterwards in both cases.
    pub fn drain<F>(&mut self, rasterizer: &dyn Rasterizer, jobs: usize, on_done: F) -> Result<DrainStats>
    where
        F: Fn(&TaskOutcome) + Sync,
    {
        if jobs <= 1 {
            return Ok(self.drain_all(rasterizer, on_done));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("Failed to start conversion workers")?;

        let groups = group_by_target(std::mem::take(&mut self.tasks));
        let stats = pool.install(|| {
            groups
                .par_iter()
                .map(|group| {
                    group.iter().rev().fold(DrainStats::default(), |stats, task| {
                        let outcome = task.run(rasterizer);
                        on_done(&outcome);
                        stats.record(&outcome)
                    })
                })
                .reduce(DrainStats::default, DrainStats::merge)
        });
        Ok(stats)
    }
}

/// Bucket tasks by target path, keeping enqueue order inside each bucket.
fn group_by_target(tasks: Vec<ConversionTask>) -> Vec<Vec<ConversionTask>> {
    let mut index: FxHashMap<PathBuf, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<ConversionTask>> = Vec::new();
    for task in tasks {
        match index.get(&task.target) {
            Some(&slot) => groups[slot].push(task),
            None => {
                index.insert(task.target.clone(), groups.len());
                groups.push(vec![task]);
            }
        }
    }
    groups
}
