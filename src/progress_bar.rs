use indicatif::{ProgressBar, ProgressStyle};
use reel_duper::ProgressReporter;
use std::sync::Mutex;

/// CLI progress reporter: one bar ticking once per finished or skipped
/// section. Drawn on stderr so it never mixes with a report on stdout.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_start(&self, total_sections: usize) {
        let pb = ProgressBar::new(total_sections as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "  {spinner:.cyan} Reconciling [{bar:30.cyan/dim}] {pos}/{len} sections {msg}",
        ) {
            pb.set_style(style.progress_chars("━╸─").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.enable_steady_tick(std::time::Duration::from_millis(80));

        let mut guard = self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn on_section_start(&self, section_title: &str, titles: usize) {
        self.with_bar(|pb| pb.set_message(format!("{} ({} titles)", section_title, titles)));
    }

    fn on_section_complete(&self, _section_title: &str, _duplicate_items: usize) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_section_skipped(&self, _section_title: &str, _reason: &str) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_complete(&self, duplicate_items: usize) {
        let mut guard = self.bar.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "  \x1b[32m✓\x1b[0m Reconciliation complete: {} duplicate items",
            duplicate_items
        );
    }
}
