//! Error type shared by versions, ranges and reducers

use thiserror::Error;

/// Grammar accepted by [`crate::Version::parse`], quoted in error messages.
pub const VERSION_GRAMMAR: &str = "MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]";

/// Errors raised while building or parsing versions and ranges
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version string \"{version}\", expected {}", VERSION_GRAMMAR)]
    MalformedVersion { version: String },
    #[error("The {field} version must not be negative or exceed {}, but was {value}", u64::MAX)]
    InvalidField { field: &'static str, value: i128 },
    #[error("Invalid {label} \"{value}\"")]
    InvalidIdentifier { label: &'static str, value: String },
    #[error("If there is no {boundary} boundary, it cannot be included")]
    InvalidRangeBoundary { boundary: &'static str },
    #[error("Invalid version range \"{range}\", expected [MIN, MAX] with ( or ) for excluded boundaries")]
    MalformedRange { range: String },
    #[error("At least one version needs to be provided for {operation} calculation")]
    EmptyInput { operation: &'static str },
}
