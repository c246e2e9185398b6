//! Classified output of a reconciliation run and its aggregates.

use crate::error::Error;
use crate::model::SectionKind;
use crate::policy::DuplicatePolicy;
use crate::resolution::ResolutionBucket;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::iter::Sum;
use std::ops::AddAssign;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub file: String,
    pub size: u64,
    pub duration: u64,
    pub verified_on_disk: bool,
    pub exists: bool,
    pub accessible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedVariant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub container: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub video_resolution: String,
    pub bucket: ResolutionBucket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    pub width: u32,
    pub height: u32,
    pub parts: Vec<ClassifiedPart>,
}

/// A title with the versions that survived extras filtering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedTitle {
    pub rating_key: String,
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    pub versions: Vec<ClassifiedVariant>,
    pub ghost_parts: usize,
    pub total_bytes: u64,
}

impl ClassifiedTitle {
    pub fn buckets(&self) -> Vec<ResolutionBucket> {
        self.versions.iter().map(|v| v.bucket).collect()
    }
}

/// Kept duplicates of one library section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionResult {
    pub section_id: String,
    pub section_title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    pub items: Vec<ClassifiedTitle>,
}

/// Counters shared by the per-section and global summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub duplicate_items: usize,
    pub total_versions: usize,
    pub ghost_parts: usize,
    pub items_with_ghosts: usize,
    /// Titles left with fewer than two versions after extras filtering.
    /// Consumers expecting a single exclusion count want
    /// `variants_excluded + policy_excluded`.
    pub variants_excluded: usize,
    /// Titles dropped by the duplicate policy.
    pub policy_excluded: usize,
    pub total_bytes: u64,
}

impl Tally {
    /// Folds one kept title into the counters.
    pub fn add_kept(&mut self, title: &ClassifiedTitle) {
        self.duplicate_items += 1;
        self.total_versions += title.versions.len();
        self.ghost_parts += title.ghost_parts;
        if title.ghost_parts > 0 {
            self.items_with_ghosts += 1;
        }
        self.total_bytes = self.total_bytes.saturating_add(title.total_bytes);
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.duplicate_items += other.duplicate_items;
        self.total_versions += other.total_versions;
        self.ghost_parts += other.ghost_parts;
        self.items_with_ghosts += other.items_with_ghosts;
        self.variants_excluded += other.variants_excluded;
        self.policy_excluded += other.policy_excluded;
        self.total_bytes = self.total_bytes.saturating_add(other.total_bytes);
    }
}

impl<'a> Sum<&'a Tally> for Tally {
    fn sum<I: Iterator<Item = &'a Tally>>(iter: I) -> Self {
        iter.fold(Tally::default(), |mut acc, t| {
            acc += *t;
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibrarySummary {
    pub section_id: String,
    pub section_title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    #[serde(flatten)]
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub verification_performed: bool,
    pub extras_ignored: bool,
    pub duplicate_policy: DuplicatePolicy,
    /// Sections that were fetched and reconciled.
    pub total_libraries: usize,
    /// Sections whose fetch failed.
    pub libraries_skipped: usize,
    #[serde(flatten)]
    pub totals: Tally,
    pub libraries: Vec<LibrarySummary>,
}

/// Machine-readable reason a multi-version title was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IgnoreReason {
    #[serde(rename = "4k+1080_pair")]
    FourKPlus1080Pair,
    #[serde(rename = "fewer_than_2_variants")]
    FewerThanTwoVariants,
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IgnoredItem {
    pub section_id: String,
    pub section_title: String,
    pub reason: IgnoreReason,
    pub item: ClassifiedTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    pub sections: Vec<SectionResult>,
    pub summary: Summary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<IgnoredItem>,
}

impl Report {
    pub fn ignored_for(&self, reason: IgnoreReason) -> impl Iterator<Item = &IgnoredItem> {
        self.ignored.iter().filter(move |item| item.reason == reason)
    }
}

/// Serializes the report as JSON to any writer.
pub fn write_report<W: Write>(report: &Report, writer: W, pretty: bool) -> Result<(), Error> {
    if pretty {
        serde_json::to_writer_pretty(writer, report)?;
    } else {
        serde_json::to_writer(writer, report)?;
    }
    Ok(())
}

/// Writes the report as JSON to `output_path`, creating or truncating it.
pub fn write_json(report: &Report, output_path: &Path, pretty: bool) -> Result<(), Error> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_report(report, &mut writer, pretty)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(versions: usize, ghost_parts: usize, total_bytes: u64) -> ClassifiedTitle {
        let variant = ClassifiedVariant {
            id: None,
            container: "mkv".to_string(),
            video_codec: "hevc".to_string(),
            audio_codec: "eac3".to_string(),
            video_resolution: "1080".to_string(),
            bucket: ResolutionBucket::Hd1080,
            bitrate: None,
            width: 1920,
            height: 1080,
            parts: Vec::new(),
        };
        ClassifiedTitle {
            rating_key: "1".to_string(),
            title: Some("Heat".to_string()),
            year: None,
            guid: None,
            versions: vec![variant; versions],
            ghost_parts,
            total_bytes,
        }
    }

    #[test]
    fn add_kept_counts_versions_and_ghosts() {
        let mut tally = Tally::default();
        tally.add_kept(&title(2, 0, 100));
        tally.add_kept(&title(3, 2, 50));
        assert_eq!(tally.duplicate_items, 2);
        assert_eq!(tally.total_versions, 5);
        assert_eq!(tally.ghost_parts, 2);
        assert_eq!(tally.items_with_ghosts, 1);
        assert_eq!(tally.total_bytes, 150);
    }

    #[test]
    fn tallies_sum_field_by_field() {
        let a = Tally {
            duplicate_items: 1,
            variants_excluded: 2,
            ..Default::default()
        };
        let b = Tally {
            duplicate_items: 3,
            policy_excluded: 1,
            total_bytes: 7,
            ..Default::default()
        };
        let total: Tally = [a, b].iter().sum();
        assert_eq!(total.duplicate_items, 4);
        assert_eq!(total.variants_excluded, 2);
        assert_eq!(total.policy_excluded, 1);
        assert_eq!(total.total_bytes, 7);
    }

    #[test]
    fn byte_totals_saturate() {
        let mut tally = Tally::default();
        tally.add_kept(&title(2, 0, u64::MAX / 2 + 1));
        tally.add_kept(&title(2, 0, u64::MAX / 2 + 1));
        assert_eq!(tally.total_bytes, u64::MAX);

        let total: Tally = [tally, tally].iter().sum();
        assert_eq!(total.total_bytes, u64::MAX);
        assert_eq!(total.duplicate_items, 4);
    }

    #[test]
    fn reason_codes_serialize() {
        let json = serde_json::to_string(&IgnoreReason::FourKPlus1080Pair).unwrap();
        assert_eq!(json, "\"4k+1080_pair\"");
        let json = serde_json::to_string(&IgnoreReason::FewerThanTwoVariants).unwrap();
        assert_eq!(json, "\"fewer_than_2_variants\"");
    }

    #[test]
    fn library_summary_flattens_tally() {
        let summary = LibrarySummary {
            section_id: "1".to_string(),
            section_title: "Movies".to_string(),
            kind: SectionKind::Movie,
            tally: Tally {
                duplicate_items: 2,
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["duplicate_items"], 2);
        assert_eq!(value["type"], "movie");
        assert!(value.get("tally").is_none());
    }
}
