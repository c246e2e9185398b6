//! Resolution bucketing for media variants.
//!
//! The server-provided resolution label wins when it is recognizable. Otherwise
//! the pixel dimensions decide, using OR-thresholds on the long and short side.
//! The dimension fallback is a coarse heuristic: scope/cinemascope masters
//! (e.g. 3840x1600) land in the higher bucket because either side alone is
//! enough to promote them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Long-side threshold for the 2160 bucket.
pub const TH_4K_LONG: u32 = 3200;
/// Short-side threshold for the 2160 bucket. Below 2160 to catch 2.40:1 framings.
pub const TH_4K_SHORT: u32 = 1580;
pub const TH_1080_LONG: u32 = 1700;
pub const TH_1080_SHORT: u32 = 900;
pub const TH_720_LONG: u32 = 1200;
pub const TH_720_SHORT: u32 = 650;

/// Canonical resolution classification of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResolutionBucket {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "480")]
    Sd480,
    #[serde(rename = "720")]
    Hd720,
    #[serde(rename = "1080")]
    Hd1080,
    #[serde(rename = "2160")]
    Uhd2160,
}

impl ResolutionBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionBucket::Uhd2160 => "2160",
            ResolutionBucket::Hd1080 => "1080",
            ResolutionBucket::Hd720 => "720",
            ResolutionBucket::Sd480 => "480",
            ResolutionBucket::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResolutionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a variant from its resolution label, falling back to dimensions.
pub fn classify(label: &str, width: u32, height: u32) -> ResolutionBucket {
    classify_label(label).unwrap_or_else(|| classify_dimensions(width, height))
}

fn classify_label(label: &str) -> Option<ResolutionBucket> {
    let label = label.trim().to_lowercase();
    if label == "4k" || label.contains("2160") || label.contains("uhd") {
        Some(ResolutionBucket::Uhd2160)
    } else if label.contains("1080") {
        Some(ResolutionBucket::Hd1080)
    } else if label.contains("720") {
        Some(ResolutionBucket::Hd720)
    } else if label == "sd" || label.contains("480") {
        Some(ResolutionBucket::Sd480)
    } else {
        None
    }
}

/// Dimension-only classification. Orientation does not matter.
pub fn classify_dimensions(width: u32, height: u32) -> ResolutionBucket {
    let long = width.max(height);
    let short = width.min(height);

    if long >= TH_4K_LONG || short >= TH_4K_SHORT {
        ResolutionBucket::Uhd2160
    } else if long >= TH_1080_LONG || short >= TH_1080_SHORT {
        ResolutionBucket::Hd1080
    } else if long >= TH_720_LONG || short >= TH_720_SHORT {
        ResolutionBucket::Hd720
    } else if long > 0 {
        ResolutionBucket::Sd480
    } else {
        ResolutionBucket::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_takes_precedence() {
        assert_eq!(classify("4K", 0, 0), ResolutionBucket::Uhd2160);
        assert_eq!(classify("2160", 0, 0), ResolutionBucket::Uhd2160);
        assert_eq!(classify(" UHD ", 0, 0), ResolutionBucket::Uhd2160);
        assert_eq!(classify("1080", 0, 0), ResolutionBucket::Hd1080);
        assert_eq!(classify("1080p", 0, 0), ResolutionBucket::Hd1080);
        assert_eq!(classify("720", 0, 0), ResolutionBucket::Hd720);
        assert_eq!(classify("SD", 0, 0), ResolutionBucket::Sd480);
        assert_eq!(classify("480", 0, 0), ResolutionBucket::Sd480);
        // label beats dimensions even when they disagree
        assert_eq!(classify("1080", 3840, 2160), ResolutionBucket::Hd1080);
    }

    #[test]
    fn sd_label_is_exact_match_only() {
        // "sdr" is not "sd"; falls through to dimensions
        assert_eq!(classify("sdr", 1920, 1080), ResolutionBucket::Hd1080);
    }

    #[test]
    fn dimension_fallback() {
        assert_eq!(classify("", 3840, 2160), ResolutionBucket::Uhd2160);
        assert_eq!(classify("", 1920, 1080), ResolutionBucket::Hd1080);
        assert_eq!(classify("", 1280, 720), ResolutionBucket::Hd720);
        assert_eq!(classify("", 640, 360), ResolutionBucket::Sd480);
        assert_eq!(classify("", 0, 0), ResolutionBucket::Unknown);
        assert_eq!(classify("weird", 0, 0), ResolutionBucket::Unknown);
    }

    #[test]
    fn ultrawide_framings_promote() {
        assert_eq!(classify("", 3840, 1600), ResolutionBucket::Uhd2160);
        assert_eq!(classify("", 1920, 800), ResolutionBucket::Hd1080);
        // short side alone
        assert_eq!(classify("", 1600, 1600), ResolutionBucket::Uhd2160);
    }

    #[test]
    fn orientation_is_ignored() {
        assert_eq!(classify("", 1080, 1920), ResolutionBucket::Hd1080);
        assert_eq!(classify("", 2160, 3840), ResolutionBucket::Uhd2160);
    }

    #[test]
    fn threshold_edges() {
        assert_eq!(classify_dimensions(3199, 0), ResolutionBucket::Hd1080);
        assert_eq!(classify_dimensions(3200, 0), ResolutionBucket::Uhd2160);
        assert_eq!(classify_dimensions(1699, 899), ResolutionBucket::Hd720);
        assert_eq!(classify_dimensions(1199, 649), ResolutionBucket::Sd480);
        assert_eq!(classify_dimensions(1, 0), ResolutionBucket::Sd480);
    }

    #[test]
    fn sd_label_with_scope_dimensions_stays_480() {
        assert_eq!(classify("sd", 720, 388), ResolutionBucket::Sd480);
        assert_eq!(classify("", 720, 388), ResolutionBucket::Sd480);
    }

    #[test]
    fn classification_is_total() {
        let labels = ["", "4k", "1080i", "720p", "sd", "hdr", "8k"];
        let dims = [0u32, 1, 480, 720, 1080, 1600, 2160, 3840, u32::MAX];
        for label in labels {
            for &w in &dims {
                for &h in &dims {
                    let bucket = classify(label, w, h);
                    assert!(!bucket.as_str().is_empty());
                }
            }
        }
    }

    #[test]
    fn bucket_serializes_as_key() {
        let json = serde_json::to_string(&ResolutionBucket::Uhd2160).unwrap();
        assert_eq!(json, "\"2160\"");
        assert_eq!(ResolutionBucket::Unknown.to_string(), "unknown");
    }
}
