//! Freshness detection: manifest diff for descriptors, mtime for outputs.
//!
//! Two independent checks decide whether a target PNG is regenerated:
//!
//! - **change**: a descriptor that is new or differs from the cached manifest
//!   must be rendered regardless of timestamps.
//! - **mtime**: otherwise, a target is rebuilt only when its source SVG is
//!   newer.

mod change;
pub mod mtime;

pub use change::ChangeDetector;
pub use mtime::source_is_newer;
