use std::{
    cmp::Ordering,
    fmt::{self, Display},
    str::FromStr,
};

use thiserror::Error;

/// The key of a release in the changelog, e.g. `1.10.0`.
///
/// Versions are compared as tuples of integers, so `1.10.0` is newer than `1.9.0`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Version {
    segments: Vec<u64>,
    raw: String,
}

impl Version {
    #[must_use]
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(ParseError(s.to_string()));
        }
        let segments = raw
            .split('.')
            .map(str::parse::<u64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseError(s.to_string()))?;
        Ok(Self {
            segments,
            raw: raw.to_string(),
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments
            .cmp(&other.segments)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
#[error("`{0}` is not a version made of dot-separated numbers")]
#[cfg_attr(
    feature = "miette",
    diagnostic(
        code(prlog_changelog::version),
        help("Every key under `releases` must look like `1.2.3`")
    )
)]
pub struct ParseError(pub String);
