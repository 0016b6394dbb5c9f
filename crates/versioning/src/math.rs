//! Reductions and sorting over collections of versions

use std::cmp::Ordering;

use crate::error::VersionError;
use crate::version::Version;

/// Precedence-based helpers for slices of versions
pub struct VersionMath;

impl VersionMath {
    /// Find the version with the lowest precedence.
    ///
    /// On ties the first version wins.
    pub fn min(versions: &[Version]) -> Result<&Version, VersionError> {
        Self::fold(versions, "minimum", Ordering::Greater)
    }

    /// Find the version with the highest precedence.
    ///
    /// On ties the first version wins.
    pub fn max(versions: &[Version]) -> Result<&Version, VersionError> {
        Self::fold(versions, "maximum", Ordering::Less)
    }

    /// Sort versions in ascending precedence. The sort is stable, so versions
    /// differing only in build metadata keep their relative order.
    pub fn sort(versions: &mut [Version]) {
        versions.sort_by(Version::cmp_precedence);
    }

    /// Sort versions in descending precedence (reverse sort)
    pub fn rsort(versions: &mut [Version]) {
        versions.sort_by(|a, b| b.cmp_precedence(a));
    }

    /// Keep the current pick unless it compares `replace_when` against a candidate
    fn fold<'a>(
        versions: &'a [Version],
        operation: &'static str,
        replace_when: Ordering,
    ) -> Result<&'a Version, VersionError> {
        let (first, rest) = versions
            .split_first()
            .ok_or(VersionError::EmptyInput { operation })?;
        Ok(rest.iter().fold(first, |current, candidate| {
            if current.cmp_precedence(candidate) == replace_when {
                candidate
            } else {
                current
            }
        }))
    }
}
