/// Trait for reporting reconciliation progress.
///
/// CLI implements it with indicatif. Sections are reconciled in parallel, so
/// callbacks may arrive from several threads and in any order.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_start(&self, _total_sections: usize) {}
    fn on_section_start(&self, _section_title: &str, _titles: usize) {}
    fn on_section_complete(&self, _section_title: &str, _duplicate_items: usize) {}
    fn on_section_skipped(&self, _section_title: &str, _reason: &str) {}
    fn on_complete(&self, _duplicate_items: usize) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
