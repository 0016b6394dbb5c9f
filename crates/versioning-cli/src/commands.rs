//! Command implementations. Each command renders its result into a
//! [`CommandOutput`] so `main` only has to print it.

use anyhow::{Context, Result};
use serde_json::json;
use std::cmp::Ordering;
use std::fmt::Write as _;

use versioning::{Version, VersionMath, VersionRange};

use crate::config::OutputFormat;

/// Exit code of `includes` when at least one version lies outside the range
pub const OUTSIDE_RANGE_EXIT_CODE: u8 = 1;

/// Exit code for invalid arguments or configuration
pub const ERROR_EXIT_CODE: u8 = 2;

/// Rendered result of a command and the exit code it asks for
#[derive(Debug, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub exit_code: u8,
}

impl CommandOutput {
    fn success(stdout: String) -> Self {
        CommandOutput { stdout, exit_code: 0 }
    }
}

fn parse_version(text: &str) -> Result<Version> {
    Version::parse(text).with_context(|| format!("Could not parse version argument {:?}", text))
}

fn parse_versions(texts: &[String]) -> Result<Vec<Version>> {
    texts.iter().map(|text| parse_version(text)).collect()
}

fn to_json(value: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn ordering_name(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "less",
        Ordering::Equal => "equal",
        Ordering::Greater => "greater",
    }
}

fn ordering_symbol(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    }
}

pub fn parse(text: &str, format: OutputFormat) -> Result<CommandOutput> {
    let version = parse_version(text)?;
    log::debug!("Parsed {} into {:?}", text, version);

    let stdout = match format {
        OutputFormat::Json => to_json(&serde_json::to_value(&version)?)?,
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "version:    {}", version)?;
            writeln!(out, "major:      {}", version.major())?;
            writeln!(out, "minor:      {}", version.minor())?;
            writeln!(out, "patch:      {}", version.patch())?;
            writeln!(out, "prerelease: {}", version.prerelease().unwrap_or("-"))?;
            writeln!(out, "build:      {}", version.build().unwrap_or("-"))?;
            write!(out, "stable:     {}", if version.is_stable() { "yes" } else { "no" })?;
            out
        }
    };
    Ok(CommandOutput::success(stdout))
}

pub fn compare(left: &str, right: &str, format: OutputFormat) -> Result<CommandOutput> {
    let left = parse_version(left)?;
    let right = parse_version(right)?;
    let ordering = left.cmp_precedence(&right);
    let identical = left == right;

    let stdout = match format {
        OutputFormat::Json => to_json(&json!({
            "left": left.to_string(),
            "right": right.to_string(),
            "ordering": ordering_name(ordering),
            "identical": identical,
        }))?,
        OutputFormat::Text => {
            let mut out = format!("{} {} {}", left, ordering_symbol(ordering), right);
            if ordering == Ordering::Equal && !identical {
                out.push_str(" (build metadata differs)");
            }
            out
        }
    };
    Ok(CommandOutput::success(stdout))
}

pub fn sort(texts: &[String], reverse: bool, format: OutputFormat) -> Result<CommandOutput> {
    let mut versions = parse_versions(texts)?;
    if reverse {
        VersionMath::rsort(&mut versions);
    } else {
        VersionMath::sort(&mut versions);
    }
    log::debug!("Sorted {} versions", versions.len());

    let rendered: Vec<String> = versions.iter().map(ToString::to_string).collect();
    let stdout = match format {
        OutputFormat::Json => to_json(&json!(rendered))?,
        OutputFormat::Text => rendered.join("\n"),
    };
    Ok(CommandOutput::success(stdout))
}

pub fn min(texts: &[String], format: OutputFormat) -> Result<CommandOutput> {
    let versions = parse_versions(texts)?;
    let minimum = VersionMath::min(&versions)?;
    Ok(CommandOutput::success(render_single(minimum, format)?))
}

pub fn max(texts: &[String], format: OutputFormat) -> Result<CommandOutput> {
    let versions = parse_versions(texts)?;
    let maximum = VersionMath::max(&versions)?;
    Ok(CommandOutput::success(render_single(maximum, format)?))
}

fn render_single(version: &Version, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&json!(version.to_string())),
        OutputFormat::Text => Ok(version.to_string()),
    }
}

/// Check every version against the range; exits with [`OUTSIDE_RANGE_EXIT_CODE`]
/// if any falls outside.
pub fn includes(range: &str, texts: &[String], format: OutputFormat) -> Result<CommandOutput> {
    let range: VersionRange = range
        .parse()
        .with_context(|| format!("Could not parse range argument {:?}", range))?;
    let versions = parse_versions(texts)?;
    log::debug!("Checking {} versions against {}", versions.len(), range);

    let results: Vec<(&Version, bool)> = versions
        .iter()
        .map(|version| (version, range.includes(version)))
        .collect();
    let all_included = results.iter().all(|(_, included)| *included);

    let stdout = match format {
        OutputFormat::Json => to_json(&json!({
            "range": range.to_string(),
            "results": results
                .iter()
                .map(|(version, included)| json!({ "version": version.to_string(), "included": included }))
                .collect::<Vec<_>>(),
        }))?,
        OutputFormat::Text => results
            .iter()
            .map(|(version, included)| format!("{}: {}", version, if *included { "yes" } else { "no" }))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    Ok(CommandOutput {
        stdout,
        exit_code: if all_included { 0 } else { OUTSIDE_RANGE_EXIT_CODE },
    })
}
