//! Semantic Versioning 2.0.0 library
//!
//! This crate provides version parsing, precedence comparison and version
//! ranges as described on <https://semver.org>.
//!
//! Value equality of a [`Version`] includes build metadata while precedence
//! ignores it; use [`Version::cmp_precedence`] for every ordering decision.

mod error;
mod math;
mod range;
mod version;
mod version_parser;

pub use error::{VersionError, VERSION_GRAMMAR};
pub use math::VersionMath;
pub use range::VersionRange;
pub use version::Version;
