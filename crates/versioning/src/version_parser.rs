//! Scanner for the Semantic Versioning 2.0.0 grammar
//!
//! ```text
//! version    := numeric "." numeric "." numeric ["-" prerelease] ["+" build]
//! numeric    := "0" | [1-9][0-9]*
//! prerelease := prid ("." prid)*
//! prid       := numeric | [0-9A-Za-z-]* with at least one non-digit
//! build      := [0-9A-Za-z-]+ ("." [0-9A-Za-z-]+)*
//! ```

use crate::error::VersionError;

/// Fields of a version string that matched the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParsedVersion<'a> {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<&'a str>,
    pub build: Option<&'a str>,
}

/// Match `version` against the full grammar, anchored at both ends.
pub(crate) fn parse_version(version: &str) -> Result<ParsedVersion<'_>, VersionError> {
    scan(version).ok_or_else(|| VersionError::MalformedVersion {
        version: version.to_string(),
    })
}

fn scan(version: &str) -> Option<ParsedVersion<'_>> {
    // Build metadata never contains '+', and the numeric core never contains '-',
    // so splitting on the first occurrence of each is unambiguous.
    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (version, None),
    };
    let (core, prerelease) = match rest.split_once('-') {
        Some((core, prerelease)) => (core, Some(prerelease)),
        None => (rest, None),
    };

    let mut parts = core.split('.');
    let major = parse_numeric(parts.next()?)?;
    let minor = parse_numeric(parts.next()?)?;
    let patch = parse_numeric(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }

    if let Some(prerelease) = prerelease {
        if !is_valid_prerelease(prerelease) {
            return None;
        }
    }
    if let Some(build) = build {
        if !is_valid_build(build) {
            return None;
        }
    }

    Some(ParsedVersion {
        major,
        minor,
        patch,
        prerelease,
        build,
    })
}

/// `"0" | [1-9][0-9]*`, rejecting values that overflow `u64`
fn parse_numeric(part: &str) -> Option<u64> {
    if !is_numeric_identifier(part) {
        return None;
    }
    if has_leading_zero(part) {
        return None;
    }
    part.parse().ok()
}

/// True if the identifier is non-empty and made of ASCII digits only.
pub(crate) fn is_numeric_identifier(identifier: &str) -> bool {
    !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit())
}

fn has_leading_zero(digits: &str) -> bool {
    digits.len() > 1 && digits.starts_with('0')
}

fn is_identifier(identifier: &str) -> bool {
    !identifier.is_empty()
        && identifier
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Dot-separated pre-release identifiers; numeric ones must not carry a leading zero.
pub(crate) fn is_valid_prerelease(prerelease: &str) -> bool {
    prerelease.split('.').all(|identifier| {
        is_identifier(identifier)
            && !(is_numeric_identifier(identifier) && has_leading_zero(identifier))
    })
}

/// Dot-separated build identifiers, leading zeros allowed.
pub(crate) fn is_valid_build(build: &str) -> bool {
    build.split('.').all(is_identifier)
}
