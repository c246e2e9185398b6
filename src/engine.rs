use crate::config::AppConfig;
use crate::error::Error;
use crate::extras;
use crate::model::{FilePart, Section, SectionFetch, SectionInput, TitleEntry, TitleRecord, Variant};
use crate::policy::{self, DuplicatePolicy};
use crate::progress::ProgressReporter;
use crate::report::{
    ClassifiedPart, ClassifiedTitle, ClassifiedVariant, IgnoreReason, IgnoredItem,
    LibrarySummary, Report, SectionResult, Summary, Tally,
};
use crate::resolution;
use crate::verify;
use rayon::prelude::*;
use tracing::{debug, info, trace, warn};

/// Switches that shape a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineOptions {
    pub verify: bool,
    pub ignore_extras: bool,
    pub policy: DuplicatePolicy,
    pub audit_variant_exclusions: bool,
}

impl From<&AppConfig> for EngineOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            verify: config.verify,
            ignore_extras: config.ignore_extras,
            policy: config.duplicate_policy(),
            audit_variant_exclusions: config.audit_variant_exclusions,
        }
    }
}

/// What happened to one title.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleOutcome {
    /// Reported as a duplicate.
    Kept(ClassifiedTitle),
    /// Fewer than two versions survived extras filtering.
    NotDuplicate(ClassifiedTitle),
    /// Dropped by the duplicate policy.
    Excluded(ClassifiedTitle, IgnoreReason),
}

/// Per-section partial result, combined in section order.
#[derive(Debug, Clone)]
struct SectionOutcome {
    result: SectionResult,
    summary: LibrarySummary,
    ignored: Vec<IgnoredItem>,
}

/// Classifies titles and folds them into a [`Report`].
///
/// The engine holds no state between runs; reconciling the same input twice
/// gives identical reports.
pub struct ReconcileEngine {
    options: EngineOptions,
}

impl ReconcileEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Run the full reconciliation:
    /// 1. Reconcile every fetched section in parallel (failed fetches are skipped)
    /// 2. Combine section results in input order
    /// 3. Build the global summary
    pub fn reconcile(
        &self,
        server: Option<String>,
        sections: Vec<SectionInput>,
        reporter: &dyn ProgressReporter,
    ) -> Result<Report, Error> {
        if sections.is_empty() {
            return Err(Error::NoSections);
        }
        info!(
            "Reconciling {} sections (policy: {}, verify: {}, ignore extras: {})",
            sections.len(),
            self.options.policy,
            self.options.verify,
            self.options.ignore_extras,
        );
        reporter.on_start(sections.len());

        let outcomes: Vec<Option<SectionOutcome>> = sections
            .into_par_iter()
            .map(|input| match input.fetch {
                SectionFetch::Fetched(titles) => {
                    reporter.on_section_start(&input.section.title, titles.len());
                    let outcome = self.reconcile_section(input.section, titles);
                    reporter.on_section_complete(
                        &outcome.result.section_title,
                        outcome.summary.tally.duplicate_items,
                    );
                    Some(outcome)
                }
                SectionFetch::Failed(reason) => {
                    warn!(
                        "Skipping section '{}' ({}): {}",
                        input.section.title, input.section.key, reason
                    );
                    reporter.on_section_skipped(&input.section.title, &reason);
                    None
                }
            })
            .collect();

        let libraries_skipped = outcomes.iter().filter(|o| o.is_none()).count();
        let mut sections = Vec::new();
        let mut libraries = Vec::new();
        let mut ignored = Vec::new();
        for outcome in outcomes.into_iter().flatten() {
            sections.push(outcome.result);
            libraries.push(outcome.summary);
            ignored.extend(outcome.ignored);
        }

        let totals: Tally = libraries.iter().map(|l| &l.tally).sum();
        reporter.on_complete(totals.duplicate_items);
        info!(
            "{} duplicate items across {} libraries ({} skipped), {} ghost parts",
            totals.duplicate_items,
            libraries.len(),
            libraries_skipped,
            totals.ghost_parts,
        );

        Ok(Report {
            server,
            sections,
            summary: Summary {
                verification_performed: self.options.verify,
                extras_ignored: self.options.ignore_extras,
                duplicate_policy: self.options.policy,
                total_libraries: libraries.len(),
                libraries_skipped,
                totals,
                libraries,
            },
            ignored,
        })
    }

    fn reconcile_section(&self, section: Section, titles: Vec<TitleEntry>) -> SectionOutcome {
        let mut tally = Tally::default();
        let mut items = Vec::new();
        let mut ignored = Vec::new();

        for entry in titles {
            match self.classify_title(entry.resolve()) {
                TitleOutcome::Kept(title) => {
                    tally.add_kept(&title);
                    items.push(title);
                }
                TitleOutcome::NotDuplicate(title) => {
                    tally.variants_excluded += 1;
                    if self.options.audit_variant_exclusions {
                        ignored.push(ignored_item(
                            &section,
                            IgnoreReason::FewerThanTwoVariants,
                            title,
                        ));
                    }
                }
                TitleOutcome::Excluded(title, reason) => {
                    tally.policy_excluded += 1;
                    ignored.push(ignored_item(&section, reason, title));
                }
            }
        }

        debug!(
            "Section '{}': {} duplicates, {} versions, {} ghost parts, {} below two versions, {} excluded by policy",
            section.title,
            tally.duplicate_items,
            tally.total_versions,
            tally.ghost_parts,
            tally.variants_excluded,
            tally.policy_excluded,
        );

        SectionOutcome {
            summary: LibrarySummary {
                section_id: section.key.clone(),
                section_title: section.title.clone(),
                kind: section.kind.clone(),
                tally,
            },
            result: SectionResult {
                section_id: section.key,
                section_title: section.title,
                kind: section.kind,
                items,
            },
            ignored,
        }
    }

    /// Classifies a single (already merged) title.
    pub fn classify_title(&self, record: TitleRecord) -> TitleOutcome {
        let TitleRecord {
            rating_key,
            title,
            year,
            guid,
            variants,
        } = record;

        let mut versions = Vec::with_capacity(variants.len());
        let mut ghost_parts = 0;
        let mut total_bytes: u64 = 0;
        for variant in variants {
            if self.options.ignore_extras && is_extra_variant(&variant) {
                trace!("Dropping extra version of '{}'", rating_key);
                continue;
            }
            let (classified, ghosts) = self.classify_variant(variant);
            ghost_parts += ghosts;
            let variant_bytes = classified
                .parts
                .iter()
                .map(|p| p.size)
                .fold(0u64, u64::saturating_add);
            total_bytes = total_bytes.saturating_add(variant_bytes);
            versions.push(classified);
        }

        let classified = ClassifiedTitle {
            rating_key,
            title,
            year,
            guid,
            versions,
            ghost_parts,
            total_bytes,
        };

        if classified.versions.len() < 2 {
            return TitleOutcome::NotDuplicate(classified);
        }
        if policy::should_exclude(&classified.buckets(), self.options.policy) {
            return TitleOutcome::Excluded(classified, IgnoreReason::FourKPlus1080Pair);
        }
        TitleOutcome::Kept(classified)
    }

    fn classify_variant(&self, variant: Variant) -> (ClassifiedVariant, usize) {
        let bucket = resolution::classify(&variant.video_resolution, variant.width, variant.height);
        let mut ghosts = 0;
        let parts = variant
            .parts
            .into_iter()
            .map(|part| {
                let status = verify::evaluate(&part, self.options.verify);
                if status.ghost {
                    ghosts += 1;
                }
                classified_part(part, status)
            })
            .collect();

        let classified = ClassifiedVariant {
            id: variant.id,
            container: variant.container,
            video_codec: variant.video_codec,
            audio_codec: variant.audio_codec,
            video_resolution: variant.video_resolution,
            bucket,
            bitrate: variant.bitrate,
            width: variant.width,
            height: variant.height,
            parts,
        };
        (classified, ghosts)
    }
}

/// A version is an extra as soon as any of its files is.
pub fn is_extra_variant(variant: &Variant) -> bool {
    variant.parts.iter().any(|part| extras::is_extra(&part.file))
}

fn classified_part(part: FilePart, status: verify::PartStatus) -> ClassifiedPart {
    ClassifiedPart {
        id: part.id,
        file: part.file,
        size: part.size,
        duration: part.duration,
        verified_on_disk: status.verified,
        exists: status.exists,
        accessible: status.accessible,
    }
}

fn ignored_item(section: &Section, reason: IgnoreReason, item: ClassifiedTitle) -> IgnoredItem {
    IgnoredItem {
        section_id: section.key.clone(),
        section_title: section.title.clone(),
        reason,
        item,
    }
}
