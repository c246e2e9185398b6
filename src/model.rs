//! Raw library records as handed over by the fetch collaborator.

use serde::{Deserialize, Serialize};

/// Kind of library section. Anything the server reports besides movies and
/// shows is kept as `Other` and never auto-selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionKind {
    Movie,
    Show,
    Other,
}

impl From<String> for SectionKind {
    fn from(kind: String) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "movie" => SectionKind::Movie,
            "show" => SectionKind::Show,
            _ => SectionKind::Other,
        }
    }
}

impl From<SectionKind> for String {
    fn from(kind: SectionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Movie => "movie",
            SectionKind::Show => "show",
            SectionKind::Other => "other",
        }
    }
}

/// A library section (e.g. "Movies").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
}

/// One physical file backing a variant.
///
/// `exists` and `accessible` are only present when the server was asked to
/// check files on disk. Absent flags read as false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePart {
    pub id: Option<String>,
    pub file: String,
    pub size: u64,
    pub duration: u64,
    pub exists: Option<bool>,
    pub accessible: Option<bool>,
}

/// One encoded version of a title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub id: Option<String>,
    pub container: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub video_resolution: String,
    pub bitrate: Option<u32>,
    pub width: u32,
    pub height: u32,
    pub parts: Vec<FilePart>,
}

/// A title record. Every field besides the key is optional because shallow
/// listings and deep fetches populate different subsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleRecord {
    pub rating_key: String,
    pub title: Option<String>,
    pub year: Option<u16>,
    pub guid: Option<String>,
    pub variants: Vec<Variant>,
}

/// A title as listed in a section, plus its deep-fetched detail when one was
/// retrieved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleEntry {
    pub listing: TitleRecord,
    #[serde(default)]
    pub detail: Option<TitleRecord>,
}

impl TitleEntry {
    pub fn shallow(listing: TitleRecord) -> Self {
        Self {
            listing,
            detail: None,
        }
    }

    /// Merges detail over listing. The detail record wins wholesale when
    /// present; only the display name falls back to the listing's.
    pub fn resolve(self) -> TitleRecord {
        let TitleEntry { listing, detail } = self;
        match detail {
            Some(detail) => TitleRecord {
                title: prefer(detail.title, listing.title),
                ..detail
            },
            None => listing,
        }
    }
}

/// Returns `primary` when it holds a value, otherwise `fallback`.
pub fn prefer<T>(primary: Option<T>, fallback: Option<T>) -> Option<T> {
    primary.or(fallback)
}

/// Outcome of fetching one section's duplicate listing.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionFetch {
    Fetched(Vec<TitleEntry>),
    Failed(String),
}

/// A section together with whatever the fetch collaborator got for it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionInput {
    pub section: Section,
    pub fetch: SectionFetch,
}

impl SectionInput {
    pub fn fetched(section: Section, titles: Vec<TitleEntry>) -> Self {
        Self {
            section,
            fetch: SectionFetch::Fetched(titles),
        }
    }

    pub fn failed(section: Section, reason: impl Into<String>) -> Self {
        Self {
            section,
            fetch: SectionFetch::Failed(reason.into()),
        }
    }
}
