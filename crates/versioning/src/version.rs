//! Semantic version value type
//!
//! A [`Version`] has two distinct notions of sameness: value equality (`==`,
//! `Hash`), which includes build metadata, and precedence
//! ([`Version::cmp_precedence`]), which ignores it. `Version` implements no
//! `Ord`, so sorting has to name the precedence relation explicitly.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VersionError;
use crate::version_parser::{self, is_numeric_identifier, is_valid_build, is_valid_prerelease};

const PRERELEASE_LABEL: &str = "pre-release information";
const BUILD_LABEL: &str = "build metadata";

/// A Semantic Versioning 2.0.0 version: `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "VersionWire", into = "SerializedVersion")]
pub struct Version {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<String>,
    build: Option<String>,
}

impl Version {
    /// Create a release version without labels
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Create a version with optional pre-release information and build metadata.
    ///
    /// Empty labels are treated as absent. Labels that violate the identifier
    /// rules are rejected with [`VersionError::InvalidIdentifier`].
    pub fn with_labels(
        major: u64,
        minor: u64,
        patch: u64,
        prerelease: Option<&str>,
        build: Option<&str>,
    ) -> Result<Self, VersionError> {
        Ok(Version {
            major,
            minor,
            patch,
            prerelease: validate_label(prerelease, PRERELEASE_LABEL, is_valid_prerelease)?,
            build: validate_label(build, BUILD_LABEL, is_valid_build)?,
        })
    }

    /// Create a version from signed fields, as found in serialized data.
    ///
    /// Negative numbers, and numbers beyond `u64::MAX`, fail with
    /// [`VersionError::InvalidField`].
    pub fn from_fields(
        major: i128,
        minor: i128,
        patch: i128,
        prerelease: Option<&str>,
        build: Option<&str>,
    ) -> Result<Self, VersionError> {
        Self::with_labels(
            non_negative("major", major)?,
            non_negative("minor", minor)?,
            non_negative("patch", patch)?,
            prerelease,
            build,
        )
    }

    /// Parse a version string. The whole string has to match the grammar.
    pub fn parse(version: &str) -> Result<Self, VersionError> {
        let parsed = version_parser::parse_version(version)?;
        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            prerelease: parsed.prerelease.map(str::to_string),
            build: parsed.build.map(str::to_string),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// Pre-release information without the leading `-`
    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    /// Build metadata without the leading `+`
    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// Dot-separated pre-release identifiers, empty for releases
    pub fn prerelease_identifiers(&self) -> impl Iterator<Item = &str> {
        self.prerelease.as_deref().into_iter().flat_map(|p| p.split('.'))
    }

    /// Dot-separated build identifiers
    pub fn build_identifiers(&self) -> impl Iterator<Item = &str> {
        self.build.as_deref().into_iter().flat_map(|b| b.split('.'))
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Versions 0.y.z are for initial development; anything may change.
    pub fn is_stable(&self) -> bool {
        self.major > 0
    }

    /// Compare two versions by Semantic Versioning precedence.
    ///
    /// Build metadata is ignored, so two versions that differ only in build
    /// metadata compare `Equal` while not being `==`.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(mine), Some(theirs)) => compare_prerelease(mine, theirs),
            })
    }

    /// Check if both versions have the same precedence (build metadata ignored)
    pub fn precedence_eq(&self, other: &Self) -> bool {
        self.cmp_precedence(other) == Ordering::Equal
    }
}

fn non_negative(field: &'static str, value: i128) -> Result<u64, VersionError> {
    u64::try_from(value).map_err(|_| VersionError::InvalidField { field, value })
}

fn validate_label(
    value: Option<&str>,
    label: &'static str,
    is_valid: fn(&str) -> bool,
) -> Result<Option<String>, VersionError> {
    match value {
        None | Some("") => Ok(None),
        Some(value) if is_valid(value) => Ok(Some(value.to_string())),
        Some(value) => Err(VersionError::InvalidIdentifier {
            label,
            value: value.to_string(),
        }),
    }
}

fn compare_prerelease(mine: &str, theirs: &str) -> Ordering {
    let mut mine = mine.split('.');
    let mut theirs = theirs.split('.');
    loop {
        match (mine.next(), theirs.next()) {
            (Some(a), Some(b)) => match compare_identifier(a, b) {
                Ordering::Equal => continue,
                other => return other,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

fn compare_identifier(a: &str, b: &str) -> Ordering {
    match (is_numeric_identifier(a), is_numeric_identifier(b)) {
        // No leading zeros, so the longer number is the larger one.
        (true, true) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.cmp(b),
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(prerelease) = &self.prerelease {
            write!(f, "-{}", prerelease)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

/// Serialized form accepted on input; numbers are signed and wider than `u64`
/// so that negative values reach the validating constructor instead of failing
/// inside serde, while every `u64` still decodes.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionWire {
    major: i128,
    minor: i128,
    patch: i128,
    #[serde(default)]
    pre_release_information: Option<String>,
    #[serde(default)]
    build_metadata: Option<String>,
}

impl TryFrom<VersionWire> for Version {
    type Error = VersionError;

    fn try_from(wire: VersionWire) -> Result<Self, Self::Error> {
        Version::from_fields(
            wire.major,
            wire.minor,
            wire.patch,
            wire.pre_release_information.as_deref(),
            wire.build_metadata.as_deref(),
        )
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SerializedVersion {
    major: u64,
    minor: u64,
    patch: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pre_release_information: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_metadata: Option<String>,
}

impl From<Version> for SerializedVersion {
    fn from(version: Version) -> Self {
        SerializedVersion {
            major: version.major,
            minor: version.minor,
            patch: version.patch,
            pre_release_information: version.prerelease,
            build_metadata: version.build,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(version: &str) -> Version {
        Version::parse(version).unwrap()
    }

    #[test]
    fn test_legal_versions() {
        assert!(Version::with_labels(0, 0, 1, Some(""), Some("")).is_ok());
        assert!(Version::with_labels(0, 0, 1, Some("a.a.a"), Some("b.b.b")).is_ok());
        assert!(Version::with_labels(0, 0, 1, Some("AA.2-3"), Some("BB.4-5")).is_ok());
        assert!(Version::with_labels(0, 0, 1, None, None).is_ok());
        assert!(Version::from_fields(0, 0, 0, None, None).is_ok());
    }

    #[test]
    fn test_empty_labels_are_absent() {
        let version = Version::with_labels(1, 0, 0, Some(""), Some("")).unwrap();
        assert_eq!(version, Version::new(1, 0, 0));
        assert_eq!(version.prerelease(), None);
        assert_eq!(version.build(), None);
    }

    #[test]
    fn test_negative_fields() {
        assert_eq!(
            Version::from_fields(-1, 0, 0, None, None),
            Err(VersionError::InvalidField { field: "major", value: -1 })
        );
        assert_eq!(
            Version::from_fields(0, -1, 0, None, None),
            Err(VersionError::InvalidField { field: "minor", value: -1 })
        );
        assert_eq!(
            Version::from_fields(0, 0, -1, None, None),
            Err(VersionError::InvalidField { field: "patch", value: -1 })
        );
    }

    #[test]
    fn test_fields_beyond_u64() {
        let max = i128::from(u64::MAX);
        assert_eq!(
            Version::from_fields(max, max, max, None, None).unwrap(),
            Version::new(u64::MAX, u64::MAX, u64::MAX)
        );
        assert_eq!(
            Version::from_fields(0, max + 1, 0, None, None),
            Err(VersionError::InvalidField { field: "minor", value: max + 1 })
        );
    }

    #[test]
    fn test_invalid_labels() {
        assert_eq!(
            Version::with_labels(0, 0, 1, Some("a.2-3.1#"), None),
            Err(VersionError::InvalidIdentifier {
                label: PRERELEASE_LABEL,
                value: "a.2-3.1#".to_string()
            })
        );
        assert_eq!(
            Version::with_labels(0, 0, 1, None, Some("a.2-3.1#")),
            Err(VersionError::InvalidIdentifier {
                label: BUILD_LABEL,
                value: "a.2-3.1#".to_string()
            })
        );
        assert!(Version::with_labels(1, 0, 0, Some("1.02"), None).is_err());
        assert!(Version::with_labels(1, 0, 0, Some("alpha..1"), None).is_err());
        // Build identifiers may start with zero
        assert!(Version::with_labels(1, 0, 0, None, Some("001.02")).is_ok());
    }

    #[test]
    fn test_parse() {
        let version = v("1.2.3-pre+build");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.prerelease(), Some("pre"));
        assert_eq!(version.build(), Some("build"));

        let version = v("1.2.3-alpha.1+001");
        assert_eq!((version.major(), version.minor(), version.patch()), (1, 2, 3));
        assert_eq!(version.prerelease(), Some("alpha.1"));
        assert_eq!(version.build(), Some("001"));

        let version = v("1.0.0-0.3.7");
        assert_eq!(version.prerelease(), Some("0.3.7"));
        assert_eq!(version.build(), None);

        let version = v("1.0.0+20130313144700");
        assert_eq!(version.prerelease(), None);
        assert_eq!(version.build(), Some("20130313144700"));
    }

    #[test]
    fn test_parse_rejects_leading_zeros() {
        for version in ["01.2.3", "1.02.3", "1.2.03", "1.2.3-1.02"] {
            assert!(matches!(
                Version::parse(version),
                Err(VersionError::MalformedVersion { .. })
            ));
        }
    }

    #[test]
    fn test_identifier_iterators() {
        let version = v("1.0.0-x.7.z.92+exp.sha");
        assert_eq!(
            version.prerelease_identifiers().collect::<Vec<_>>(),
            vec!["x", "7", "z", "92"]
        );
        assert_eq!(version.build_identifiers().collect::<Vec<_>>(), vec!["exp", "sha"]);
        assert_eq!(Version::new(1, 0, 0).prerelease_identifiers().count(), 0);
    }

    #[test]
    fn test_to_string() {
        assert_eq!(Version::new(1, 0, 0).to_string(), "1.0.0");
        assert_eq!(Version::new(0, 2, 0).to_string(), "0.2.0");
        assert_eq!(Version::new(0, 0, 3).to_string(), "0.0.3");

        let labelled = |pre: &str, build: &str| {
            Version::with_labels(1, 0, 0, Some(pre), Some(build))
                .unwrap()
                .to_string()
        };
        assert_eq!(labelled("alpha", ""), "1.0.0-alpha");
        assert_eq!(labelled("x.7.z.92", ""), "1.0.0-x.7.z.92");
        assert_eq!(labelled("alpha", "001"), "1.0.0-alpha+001");
        assert_eq!(labelled("", "20130313144700"), "1.0.0+20130313144700");
        assert_eq!(labelled("beta", "exp.sha.5114f85"), "1.0.0-beta+exp.sha.5114f85");
    }

    #[test]
    fn test_to_string_parses_back() {
        for text in ["0.0.0", "1.2.3-alpha.1+001", "1.0.0-0A.is.legal", "2.0.0+build.007"] {
            let version = v(text);
            assert_eq!(version.to_string(), text);
            assert_eq!(v(&version.to_string()), version);
        }
    }

    #[test]
    fn test_is_stable() {
        assert!(!v("0.9.9").is_stable());
        assert!(v("1.0.0").is_stable());
        assert!(v("1.0.0-alpha").is_stable());
        assert!(v("1.0.0-alpha").is_prerelease());
    }

    #[test]
    fn test_simple_precedence() {
        let ordered = ["1.0.0", "2.0.0", "2.1.0", "2.1.1"];
        for pair in ordered.windows(2) {
            let (lower, higher) = (v(pair[0]), v(pair[1]));
            assert_eq!(lower.cmp_precedence(&higher), Ordering::Less);
            assert_eq!(higher.cmp_precedence(&lower), Ordering::Greater);
            assert_eq!(lower.cmp_precedence(&lower), Ordering::Equal);
        }
    }

    #[test]
    fn test_prerelease_precedence() {
        let ordered = [
            "1.0.0-alpha",
            "1.0.0-alpha.1",
            "1.0.0-alpha.beta",
            "1.0.0-beta",
            "1.0.0-beta.2",
            "1.0.0-beta.11",
            "1.0.0-rc.1",
            "1.0.0",
        ];
        for (i, a) in ordered.iter().enumerate() {
            for (j, b) in ordered.iter().enumerate() {
                assert_eq!(v(a).cmp_precedence(&v(b)), i.cmp(&j), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_numeric_identifiers_compare_numerically() {
        assert_eq!(
            v("1.0.0-99999999999999999999999").cmp_precedence(&v("1.0.0-100000000000000000000000")),
            Ordering::Less
        );
        assert_eq!(v("1.0.0-2").cmp_precedence(&v("1.0.0-10")), Ordering::Less);
        // Numeric identifiers sort before alphanumeric ones
        assert_eq!(v("1.0.0-999").cmp_precedence(&v("1.0.0-a")), Ordering::Less);
        // ASCII order: uppercase before lowercase
        assert_eq!(v("1.0.0-Beta").cmp_precedence(&v("1.0.0-alpha")), Ordering::Less);
    }

    #[test]
    fn test_build_metadata_ignored_by_precedence_only() {
        let a = v("1.0.0-alpha+001");
        let b = v("1.0.0-alpha+002");
        assert_eq!(a.cmp_precedence(&b), Ordering::Equal);
        assert!(a.precedence_eq(&b));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
