//! A single SVG -> PNG conversion.

use std::path::PathBuf;

use crate::freshness::source_is_newer;
use crate::image::svg::Rasterizer;
use crate::manifest::Sizing;
use crate::{debug, log};

/// One output variant of one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTask {
    pub source: PathBuf,
    pub target: PathBuf,
    pub sizing: Sizing,
    /// Convert even if the target looks up to date.
    pub must_run: bool,
}

/// Result of running one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    SourceMissing,
    UpToDate,
    Converted,
    Failed(String),
}

impl ConversionTask {
    /// Check freshness and rasterize if needed.
    ///
    /// A missing target counts as infinitely old. Rasterizer errors are
    /// logged and returned as [`TaskOutcome::Failed`].
    pub fn run(&self, rasterizer: &dyn Rasterizer) -> TaskOutcome {
        if !self.source.exists() {
            debug!("skip"; "source missing: {}", self.source.display());
            return TaskOutcome::SourceMissing;
        }

        if !self.must_run && !source_is_newer(&self.source, &self.target) {
            return TaskOutcome::UpToDate;
        }

        match rasterizer.rasterize(&self.source, &self.target, self.sizing) {
            Ok(()) => {
                log!(
                    "convert";
                    "{} --> {} ({})",
                    self.source.display(),
                    self.target.display(),
                    self.sizing
                );
                TaskOutcome::Converted
            }
            Err(err) => {
                log!("error"; "{} --> {}: {:#}", self.source.display(), self.target.display(), err);
                TaskOutcome::Failed(format!("{err:#}"))
            }
        }
    }
}
