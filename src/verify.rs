//! On-disk verification status of file parts.

use crate::model::FilePart;

/// Derived verification flags for one file part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartStatus {
    pub exists: bool,
    pub accessible: bool,
    pub verified: bool,
    /// Missing or unreachable while verification was requested.
    pub ghost: bool,
}

/// Evaluates a part's raw flags. Ghosts are only reported when `verify` is
/// set, since the server leaves the flags unset unless asked to check files.
pub fn evaluate(part: &FilePart, verify: bool) -> PartStatus {
    let exists = part.exists.unwrap_or(false);
    let accessible = part.accessible.unwrap_or(false);
    let verified = exists && accessible;

    PartStatus {
        exists,
        accessible,
        verified,
        ghost: verify && !verified,
    }
}
