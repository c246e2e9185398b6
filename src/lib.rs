//! Duplicate classification and reconciliation for media libraries.
//!
//! Takes per-title version/file records for each library section and produces
//! a report of titles that exist in more than one version, after dropping
//! bonus content, applying the duplicate policy and counting ghost files.

pub mod config;
pub mod engine;
pub mod error;
pub mod extras;
pub mod format;
pub mod model;
pub mod policy;
pub mod progress;
pub mod report;
pub mod resolution;
pub mod source;
pub mod verify;

pub use config::AppConfig;
pub use engine::{EngineOptions, ReconcileEngine, TitleOutcome};
pub use error::Error;
pub use extras::is_extra;
pub use policy::{should_exclude, DuplicatePolicy};
pub use progress::{ProgressReporter, SilentReporter};
pub use report::{IgnoreReason, Report};
pub use resolution::{classify, ResolutionBucket};
