//! Detection of bonus content (trailers, featurettes, deleted scenes, ...).
//!
//! Two conventions are recognized, both case-insensitive:
//! - the file lives under a folder named after an extras category, e.g.
//!   `Movie (2020)/Featurettes/Making Of.mkv`;
//! - the file name ends in a hyphen-introduced category token, optionally
//!   followed by one separator and an index, e.g. `Movie-trailer.mkv` or
//!   `Movie-trailer_02.mkv`.
//!
//! A token embedded in a longer word (`-trailerized`) or followed by more
//! words (`-trailer cut`) is not an extra.

use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Folder names that hold extras. Compared against whole path segments.
    static ref EXTRA_DIR_NAMES: HashSet<&'static str> = [
        "extras",
        "featurettes",
        "interviews",
        "shorts",
        "deleted",
        "deleted scenes",
        "trailers",
        "behind the scenes",
        "behind-the-scenes",
        "other",
        "scenes",
    ]
    .into_iter()
    .collect();

    /// Filename suffix tokens, matched after the last hyphen of the stem.
    static ref EXTRA_TOKENS: HashSet<&'static str> = [
        "trailer",
        "featurette",
        "behindthescenes",
        "deleted",
        "deletedscene",
        "deletedscenes",
        "interview",
        "interviews",
        "scene",
        "short",
        "other",
    ]
    .into_iter()
    .collect();
}

const INDEX_SEPARATORS: [char; 4] = ['-', '_', '.', ' '];

/// Longest trailing `-<digits>` still read as an index after a token.
const MAX_INDEX_DIGITS: usize = 3;

/// Returns true if `path` points at bonus content, by folder or by file name.
pub fn is_extra(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }

    let normalized = path.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').collect();
    let Some((file_name, parents)) = segments.split_last() else {
        return false;
    };

    let in_extras_dir = parents.iter().any(|segment| {
        let segment = segment.trim().to_lowercase();
        !segment.is_empty() && EXTRA_DIR_NAMES.contains(segment.as_str())
    });

    in_extras_dir || is_extra_file_name(file_name)
}

/// Checks only the file name (extension optional) for an extras suffix.
pub fn is_extra_file_name(name: &str) -> bool {
    let stem = strip_extension(name).trim();

    let Some(hyphen) = stem.rfind('-') else {
        return false;
    };
    if hyphen == stem.len() - 1 {
        return false;
    }

    if suffix_matches(&stem[hyphen + 1..]) {
        return true;
    }

    // `-trailer-2`: the last hyphen introduces the index, so the token sits
    // behind the hyphen before it. Four or more digits read as a release year.
    let index = &stem[hyphen + 1..];
    let is_index = (1..=MAX_INDEX_DIGITS).contains(&index.len())
        && index.chars().all(|c| c.is_ascii_digit());
    if is_index {
        if let Some(prev) = stem[..hyphen].rfind('-') {
            return suffix_matches(&stem[prev + 1..]);
        }
    }
    false
}

fn suffix_matches(raw: &str) -> bool {
    let suffix = raw.trim().to_lowercase();
    if suffix.is_empty() {
        return false;
    }
    if EXTRA_TOKENS.contains(suffix.as_str()) {
        return true;
    }

    EXTRA_TOKENS.iter().any(|token| {
        suffix
            .strip_prefix(token)
            .is_some_and(is_empty_or_indexed)
    })
}

/// `""`, or one separator followed by at least one digit and nothing else.
fn is_empty_or_indexed(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        None => true,
        Some(sep) if INDEX_SEPARATORS.contains(&sep) => {
            let digits = chars.as_str();
            !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
        }
        Some(_) => false,
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_tokens_match() {
        let cases = [
            "My Movies (1993)-featurette.mkv",
            "My Movies-deleted.mkv",
            "My Movies-featurette",
            "My Movies-interview.mov",
            "My Movies-scene.mkv",
            "My Movies-short.mkv",
            "My Movies-trailer.mkv",
            "My Movies-other.mkv",
            "My Movies-TRAILER",
            "My Movies-TRaiLeR.mkv",
            "My Movies-deletedscenes.mkv",
            "My Movies-behindthescenes.mkv",
        ];
        for name in cases {
            assert!(is_extra_file_name(name), "expected extra: {name}");
        }
    }

    #[test]
    fn indexed_tokens_match() {
        assert!(is_extra_file_name("My Movies-trailer-2.mkv"));
        assert!(is_extra_file_name("My Movies-featurette-12.mkv"));
        assert!(is_extra_file_name("My Movies-trailer_02"));
        assert!(is_extra_file_name("My Movies-trailer.3"));
        assert!(is_extra_file_name("My Movies-trailer 3.mkv"));
        assert!(is_extra_file_name("My Movies-featurette_10.mp4"));
    }

    #[test]
    fn near_misses_do_not_match() {
        let cases = [
            "Some -other freakin movie.mkv",
            "My Movies trailer.mkv",
            "My Movies-trailerized.mkv",
            "My Movies-othe.mkv",
            "My Movies-trailer cut.mkv",
            "My Movies-trailer-.mkv",
            "My Movies-trailer-2b.mkv",
            "My Movies-.mkv",
            "My Movies-",
            "Spider-Man (2002).mkv",
            "Kill Bill-2.mkv",
            "Movie-Part-2.mkv",
            "/m/The Big-Short-2015.mkv",
            "Movie-Other-1999.mkv",
            "Movie-trailer-2015.mkv",
        ];
        for name in cases {
            assert!(!is_extra_file_name(name), "expected feature: {name}");
        }
    }

    #[test]
    fn last_hyphen_wins() {
        assert!(is_extra_file_name(
            "My Movies are awesome-behindthescenes but maybe its not-trailer.mkv"
        ));
        assert!(!is_extra_file_name("Movie-trailer-final cut.mkv"));
    }

    #[test]
    fn folder_names_match_whole_segments() {
        assert!(is_extra("/media/Movies/Extras/My.mkv"));
        assert!(is_extra("/mnt/Movies/Featurettes/Foo.mp4"));
        assert!(is_extra("/mnt/Movies/Behind-the-Scenes/Foo.mkv"));
        assert!(is_extra("/mnt/Movies/Deleted Scenes/Foo.mkv"));
        assert!(is_extra("/mnt/Movies/trailers/foo.mkv"));
        assert!(is_extra("/mnt/Movies/other/foo.mkv"));
        assert!(is_extra(r"D:\Movies\Heat (1995)\Interviews\Mann.mkv"));

        assert!(!is_extra("/mnt/Extras Collection/Heat (1995).mkv"));
        assert!(!is_extra("/mnt/Movies/Trailers Park Boys (2006).mkv"));
    }

    #[test]
    fn folder_rule_ignores_file_name_segment() {
        // the final segment is only checked by the suffix rule
        assert!(!is_extra("/media/Movies/Extras"));
        assert!(!is_extra("trailers"));
    }

    #[test]
    fn file_name_rule_applies_inside_regular_folders() {
        assert!(is_extra("/media/Movies/My Movies (2019)-featurette.mkv"));
        assert!(is_extra("/media/Movies/My Movies-trailer"));
        assert!(!is_extra("/media/Movies/My Movie (2020).mkv"));
        assert!(!is_extra("/media/Movies/Some -other freakin movie.mkv"));
    }

    #[test]
    fn empty_input_is_not_extra() {
        assert!(!is_extra(""));
        assert!(!is_extra_file_name(""));
        assert!(!is_extra("/"));
    }
}
