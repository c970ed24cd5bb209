//! The YAML changelog document.
//!
//! `serde_yaml` doesn't preserve formatting or comments, so the document is only parsed to
//! understand it. Writing replaces just the lines of the current release and leaves every other
//! byte of the file alone.

use std::str::FromStr;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::{version, ReleaseSection, Version};

#[derive(Clone, Debug, PartialEq)]
pub struct ChangelogDocument {
    content: String,
    releases: Mapping,
    current: Version,
}

impl ChangelogDocument {
    pub const RELEASES: &'static str = "releases";

    /// Parse the document and pick out the current (highest) version.
    ///
    /// # Errors
    ///
    /// If the content is not YAML, has no `releases` mapping, has no releases at all, or any
    /// release key isn't a version.
    pub fn new(content: String) -> Result<Self, Error> {
        if content.trim().is_empty() {
            return Err(Error::MissingReleases);
        }
        let parsed: Value = serde_yaml::from_str(&content).map_err(Error::Parse)?;
        let releases = match parsed.get(Self::RELEASES) {
            Some(Value::Mapping(releases)) => releases.clone(),
            Some(_) => return Err(Error::ReleasesNotMapping),
            None => return Err(Error::MissingReleases),
        };
        let current = releases
            .keys()
            .map(version_of_key)
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .max()
            .ok_or(Error::NoReleases)?;
        Ok(Self {
            content,
            releases,
            current,
        })
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The numerically highest version, the only release that is ever changed.
    #[must_use]
    pub fn current_version(&self) -> &Version {
        &self.current
    }

    /// Open the current release for editing.
    ///
    /// # Errors
    ///
    /// If the release or its `changes` aren't shaped like a changelog.
    pub fn current_release(&self) -> Result<ReleaseSection, Error> {
        let value = self
            .releases
            .iter()
            .find(|(key, _)| version_of_key(key).is_ok_and(|version| version == self.current))
            .map_or(&Value::Null, |(_, value)| value);
        ReleaseSection::from_yaml(self.current.clone(), value)
    }

    /// Replace the current release with `section`, returning the new text of that release.
    ///
    /// # Errors
    ///
    /// If the release can't be located in the text, or the section can't be serialized.
    pub fn with_release(&mut self, section: &ReleaseSection) -> Result<String, Error> {
        let lines: Vec<&str> = self.content.split_inclusive('\n').collect();
        let block = find_release(&lines, section.version())
            .ok_or_else(|| Error::Layout(section.version().clone()))?;
        let newline = if lines
            .get(block.start)
            .is_some_and(|line| line.ends_with("\r\n"))
        {
            "\r\n"
        } else {
            "\n"
        };

        let rendered = serde_yaml::to_string(&section.to_yaml()).map_err(Error::Serialize)?;
        let child_indent = " ".repeat(block.child_indent.unwrap_or(block.indent + 2));
        let mut new_section = format!(
            "{indent}{key}:{newline}",
            indent = " ".repeat(block.indent),
            key = block.key
        );
        for line in rendered.lines() {
            if !line.is_empty() {
                new_section.push_str(&child_indent);
                new_section.push_str(line);
            }
            new_section.push_str(newline);
        }

        let ends_without_newline = block.end == lines.len()
            && lines.last().is_some_and(|line| !line.ends_with('\n'));
        let mut new_content = String::with_capacity(self.content.len() + new_section.len());
        for line in lines.iter().take(block.start) {
            new_content.push_str(line);
        }
        if ends_without_newline {
            new_content.push_str(new_section.trim_end_matches(newline));
        } else {
            new_content.push_str(&new_section);
        }
        for line in lines.iter().skip(block.end) {
            new_content.push_str(line);
        }

        *self = Self::new(new_content)?;
        Ok(new_section)
    }
}

impl FromStr for ChangelogDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

fn version_of_key(key: &Value) -> Result<Version, Error> {
    match key {
        Value::String(key) => Ok(Version::from_str(key)?),
        Value::Number(key) if key.is_u64() => Ok(Version::from_str(&key.to_string())?),
        // `1.10` is read as the float 1.1, so the version as written is lost.
        Value::Number(key) => Err(Error::UnquotedNumber(key.to_string())),
        _ => Err(Error::InvalidKey),
    }
}

/// Where a release lives in the text, as line indices.
#[derive(Debug, Eq, PartialEq)]
struct Block {
    /// The line with the version key.
    start: usize,
    /// One past the last line belonging to the release, trailing blank and comment lines excluded.
    end: usize,
    indent: usize,
    /// The key exactly as written, quotes included.
    key: String,
    child_indent: Option<usize>,
}

fn find_release(lines: &[&str], version: &Version) -> Option<Block> {
    let releases_line = lines.iter().position(|line| {
        line.strip_prefix(ChangelogDocument::RELEASES)
            .and_then(|rest| rest.strip_prefix(':'))
            .is_some_and(|rest| {
                let rest = rest.trim();
                rest.is_empty() || rest.starts_with('#')
            })
    })?;

    let mut indent = None;
    let mut found: Option<Block> = None;
    for (index, line) in lines.iter().enumerate().skip(releases_line + 1) {
        let text = line.trim_end();
        if text.is_empty() {
            continue;
        }
        let line_indent = indentation(text);
        let is_comment = text.trim_start().starts_with('#');
        let release_indent = match indent {
            Some(release_indent) => release_indent,
            None if is_comment => continue,
            None if line_indent == 0 => return None,
            None => {
                indent = Some(line_indent);
                line_indent
            }
        };

        if let Some(block) = found.as_mut() {
            if is_comment {
                continue;
            }
            if line_indent <= release_indent {
                block.end = index;
                break;
            }
            if block.child_indent.is_none() {
                block.child_indent = Some(line_indent);
            }
            continue;
        }

        if line_indent < release_indent && !is_comment {
            return None;
        }
        if line_indent != release_indent || is_comment {
            continue;
        }
        let key = split_key(text.trim_start())?;
        let matches = Version::from_str(unquote(key))
            .is_ok_and(|candidate| candidate.segments() == version.segments());
        if matches {
            found = Some(Block {
                start: index,
                end: lines.len(),
                indent: release_indent,
                key: key.to_string(),
                child_indent: None,
            });
        }
    }

    let mut block = found?;
    while block.end > block.start + 1
        && lines.get(block.end - 1).is_some_and(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        })
    {
        block.end -= 1;
    }
    Some(block)
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// The key of a `key: value` line, quotes included.
fn split_key(line: &str) -> Option<&str> {
    let key_len = match line.chars().next()? {
        quote @ ('"' | '\'') => line.get(1..)?.find(quote)? + 2,
        _ => line.find(':')?,
    };
    let key = line.get(..key_len)?;
    let rest = line.get(key_len..)?;
    rest.starts_with(':').then(|| key.trim_end())
}

fn unquote(key: &str) -> &str {
    key.trim_matches(|c| c == '"' || c == '\'')
}

#[derive(Debug, Error)]
#[cfg_attr(feature = "miette", derive(miette::Diagnostic))]
pub enum Error {
    #[error("The changelog is not valid YAML: {0}")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(code(prlog_changelog::parse), help("Fix the YAML syntax and try again"))
    )]
    Parse(#[source] serde_yaml::Error),
    #[error("The changelog has no `releases` key")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(prlog_changelog::missing_releases),
            help("Add the release you're preparing under a top-level `releases` key")
        )
    )]
    MissingReleases,
    #[error("`releases` must be a mapping from version to release")]
    #[cfg_attr(feature = "miette", diagnostic(code(prlog_changelog::releases_not_mapping)))]
    ReleasesNotMapping,
    #[error("The changelog has no releases, so there is no current version to add changes to")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(prlog_changelog::no_releases),
            help("Add the release you're preparing under `releases` first")
        )
    )]
    NoReleases,
    #[error("Every key under `releases` must be a version")]
    #[cfg_attr(feature = "miette", diagnostic(code(prlog_changelog::invalid_key)))]
    InvalidKey,
    #[error("The release key read as {0} is a number, not a version")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(prlog_changelog::unquoted_number),
            help("Quote version keys with only two parts, like `\"1.10\":`")
        )
    )]
    UnquotedNumber(String),
    #[error(transparent)]
    #[cfg_attr(feature = "miette", diagnostic(transparent))]
    Version(#[from] version::ParseError),
    #[error("Release {0} must be a mapping")]
    #[cfg_attr(feature = "miette", diagnostic(code(prlog_changelog::section_not_mapping)))]
    SectionNotMapping(Version),
    #[error("`changes` of release {0} must be a mapping from category to entries")]
    #[cfg_attr(feature = "miette", diagnostic(code(prlog_changelog::changes_not_mapping)))]
    ChangesNotMapping(Version),
    #[error("Category {category} of release {version} must be a list")]
    #[cfg_attr(feature = "miette", diagnostic(code(prlog_changelog::category_not_list)))]
    CategoryNotList { version: Version, category: String },
    #[error("Category {category} of release {version} contains an entry that isn't text")]
    #[cfg_attr(feature = "miette", diagnostic(code(prlog_changelog::entry_not_text)))]
    EntryNotText { version: Version, category: String },
    #[error("Could not find where release {0} starts in the changelog")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(prlog_changelog::layout),
            help(
                "Releases must be written in block style directly under a top-level `releases:` line"
            )
        )
    )]
    Layout(Version),
    #[error("Failed to serialize release: {0}")]
    #[cfg_attr(
        feature = "miette",
        diagnostic(
            code(prlog_changelog::serialize),
            help("This is probably a bug, please report it")
        )
    )]
    Serialize(#[source] serde_yaml::Error),
}
