//! Version ranges with inclusive or exclusive boundaries

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;
use crate::version::Version;

/// An interval of versions such as `[1.0.0, 2.0.0)`.
///
/// A range always has a lower boundary: leaving it out at construction time
/// puts an excluded `0.0.0` in its place. The upper boundary may be absent,
/// which leaves the range unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RangeWire")]
pub struct VersionRange {
    minimum: Version,
    minimum_included: bool,
    maximum: Option<Version>,
    maximum_included: bool,
}

impl VersionRange {
    /// Create a new range.
    ///
    /// An absent boundary cannot be included; such ranges fail with
    /// [`VersionError::InvalidRangeBoundary`].
    pub fn new(
        minimum: Option<Version>,
        minimum_included: bool,
        maximum: Option<Version>,
        maximum_included: bool,
    ) -> Result<Self, VersionError> {
        let (minimum, minimum_included) = match minimum {
            Some(minimum) => (minimum, minimum_included),
            None if minimum_included => {
                return Err(VersionError::InvalidRangeBoundary { boundary: "lower" })
            }
            None => (Version::new(0, 0, 0), false),
        };
        if maximum.is_none() && maximum_included {
            return Err(VersionError::InvalidRangeBoundary { boundary: "upper" });
        }
        Ok(VersionRange {
            minimum,
            minimum_included,
            maximum,
            maximum_included,
        })
    }

    /// `[minimum, )`
    pub fn at_least(minimum: Version) -> Self {
        VersionRange {
            minimum,
            minimum_included: true,
            maximum: None,
            maximum_included: false,
        }
    }

    /// `(0.0.0, maximum)`
    pub fn below(maximum: Version) -> Self {
        VersionRange {
            minimum: Version::new(0, 0, 0),
            minimum_included: false,
            maximum: Some(maximum),
            maximum_included: false,
        }
    }

    pub fn minimum(&self) -> &Version {
        &self.minimum
    }

    pub fn is_minimum_included(&self) -> bool {
        self.minimum_included
    }

    pub fn maximum(&self) -> Option<&Version> {
        self.maximum.as_ref()
    }

    pub fn is_maximum_included(&self) -> bool {
        self.maximum_included
    }

    /// Check if the version lies within this range, by precedence
    pub fn includes(&self, version: &Version) -> bool {
        match self.minimum.cmp_precedence(version) {
            Ordering::Greater => return false,
            Ordering::Equal if !self.minimum_included => return false,
            _ => {}
        }
        if let Some(maximum) = &self.maximum {
            match maximum.cmp_precedence(version) {
                Ordering::Less => return false,
                Ordering::Equal if !self.maximum_included => return false,
                _ => {}
            }
        }
        true
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.minimum_included { "[" } else { "(" })?;
        write!(f, "{}, ", self.minimum)?;
        if let Some(maximum) = &self.maximum {
            write!(f, "{}", maximum)?;
        }
        f.write_str(if self.maximum_included { "]" } else { ")" })
    }
}

impl FromStr for VersionRange {
    type Err = VersionError;

    /// Parse the interval notation produced by `Display`, e.g. `[1.0.0, 2.0.0)`
    /// or `(1.0.0, )`. An empty lower boundary stands for the implicit floor.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || VersionError::MalformedRange {
            range: s.to_string(),
        };

        let trimmed = s.trim();
        let minimum_included = match trimmed.as_bytes().first().copied() {
            Some(b'[') => true,
            Some(b'(') => false,
            _ => return Err(malformed()),
        };
        let maximum_included = match trimmed.as_bytes().last().copied() {
            Some(b']') if trimmed.len() > 1 => true,
            Some(b')') if trimmed.len() > 1 => false,
            _ => return Err(malformed()),
        };

        let inner = &trimmed[1..trimmed.len() - 1];
        let (minimum, maximum) = inner.split_once(',').ok_or_else(malformed)?;
        if maximum.contains(',') {
            return Err(malformed());
        }

        VersionRange::new(
            parse_boundary(minimum)?,
            minimum_included,
            parse_boundary(maximum)?,
            maximum_included,
        )
    }
}

fn parse_boundary(text: &str) -> Result<Option<Version>, VersionError> {
    match text.trim() {
        "" => Ok(None),
        version => Version::parse(version).map(Some),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RangeWire {
    minimum: Option<Version>,
    #[serde(default)]
    minimum_included: bool,
    maximum: Option<Version>,
    #[serde(default)]
    maximum_included: bool,
}

impl TryFrom<RangeWire> for VersionRange {
    type Error = VersionError;

    fn try_from(wire: RangeWire) -> Result<Self, Self::Error> {
        VersionRange::new(
            wire.minimum,
            wire.minimum_included,
            wire.maximum,
            wire.maximum_included,
        )
    }
}
