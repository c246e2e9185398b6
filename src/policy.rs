//! Duplicate policies and the exact 4K+1080 pair rule.

use crate::resolution::ResolutionBucket;
use serde::{Serialize, Serializer};
use std::fmt;

/// How multi-version titles are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Every title with two or more versions is a duplicate (the server's view).
    #[default]
    KeepAll,
    /// Titles that are exactly one 2160 plus one 1080 version are intentional
    /// and get ignored.
    Ignore4k1080Pair,
}

impl DuplicatePolicy {
    pub const KEEP_ALL_NAME: &'static str = "plex";
    pub const IGNORE_4K_1080_NAME: &'static str = "ignore-4k-1080";

    /// Parses a configured policy name. Unknown or empty names fall back to
    /// `KeepAll`; this never fails.
    pub fn parse(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case(Self::IGNORE_4K_1080_NAME) {
            DuplicatePolicy::Ignore4k1080Pair
        } else {
            DuplicatePolicy::KeepAll
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DuplicatePolicy::KeepAll => Self::KEEP_ALL_NAME,
            DuplicatePolicy::Ignore4k1080Pair => Self::IGNORE_4K_1080_NAME,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DuplicatePolicy::KeepAll => "all multi-version titles",
            DuplicatePolicy::Ignore4k1080Pair => "ignore exact 4K+1080 pairs",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for DuplicatePolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Decides whether a title's surviving versions should be left out of the
/// duplicate report. Under `Ignore4k1080Pair` only the exact pair qualifies:
/// a third version, or any other bucket combination, keeps the title.
pub fn should_exclude(buckets: &[ResolutionBucket], policy: DuplicatePolicy) -> bool {
    match policy {
        DuplicatePolicy::KeepAll => false,
        DuplicatePolicy::Ignore4k1080Pair => {
            let count = |wanted: ResolutionBucket| buckets.iter().filter(|b| **b == wanted).count();
            buckets.len() == 2
                && count(ResolutionBucket::Uhd2160) == 1
                && count(ResolutionBucket::Hd1080) == 1
        }
    }
}
