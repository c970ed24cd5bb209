use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::{document::Error, CategoryName, ChangelogEntry, Classified, PullRequest, Version};

/// The contents of one release in the changelog, opened up for editing.
///
/// Only the `changes` key is interpreted; every other key of the release is carried through as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct ReleaseSection {
    version: Version,
    categories: IndexMap<CategoryName, Vec<ChangelogEntry>>,
    fields: Mapping,
}

/// What [`ReleaseSection::reconcile`] did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Reconciled {
    pub added: usize,
    pub removed: usize,
}

impl ReleaseSection {
    pub const CHANGES: &'static str = "changes";

    pub(crate) fn from_yaml(version: Version, value: &Value) -> Result<Self, Error> {
        let fields = match value {
            Value::Null => Mapping::new(),
            Value::Mapping(fields) => fields.clone(),
            _ => return Err(Error::SectionNotMapping(version)),
        };
        let changes = match fields.get(Self::CHANGES) {
            None | Some(Value::Null) => Mapping::new(),
            Some(Value::Mapping(changes)) => changes.clone(),
            Some(_) => return Err(Error::ChangesNotMapping(version)),
        };

        let mut categories = IndexMap::with_capacity(changes.len());
        for (name, entries) in changes {
            let Value::String(name) = name else {
                return Err(Error::ChangesNotMapping(version));
            };
            let entries = match entries {
                Value::Null => Vec::new(),
                Value::Sequence(entries) => entries
                    .iter()
                    .map(|entry| match entry {
                        Value::String(text) => Ok(ChangelogEntry::parse(text)),
                        _ => Err(Error::EntryNotText {
                            version: version.clone(),
                            category: name.clone(),
                        }),
                    })
                    .collect::<Result<_, _>>()?,
                _ => {
                    return Err(Error::CategoryNotList {
                        version,
                        category: name,
                    })
                }
            };
            categories.insert(CategoryName::from(name), entries);
        }

        Ok(Self {
            version,
            categories,
            fields,
        })
    }

    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn categories(&self) -> impl Iterator<Item = (&CategoryName, &[ChangelogEntry])> {
        self.categories
            .iter()
            .map(|(name, entries)| (name, entries.as_slice()))
    }

    #[must_use]
    pub fn entries(&self, category: &str) -> Option<&[ChangelogEntry]> {
        self.categories
            .get(&CategoryName::from(category))
            .map(Vec::as_slice)
    }

    /// Merge freshly classified pull requests into this release.
    ///
    /// First, every existing line which points at one of `pull_requests` but no longer matches
    /// its current title is removed, from whichever category it was in. Then each new entry is
    /// appended to its category unless that exact line is already there.
    pub fn reconcile(
        &mut self,
        pull_requests: &[PullRequest],
        classified: Classified<'_>,
    ) -> Reconciled {
        let mut result = Reconciled::default();

        for pull_request in pull_requests {
            let current = ChangelogEntry::from(pull_request);
            for (category, entries) in &mut self.categories {
                let before = entries.len();
                entries.retain(|entry| !entry.is_stale_for(pull_request, &current));
                let removed = before - entries.len();
                if removed > 0 {
                    debug!(
                        "Removed {removed} outdated entries for #{number} from {category}",
                        number = pull_request.number
                    );
                    result.removed += removed;
                }
            }
        }

        let Classified {
            buckets, leftover, ..
        } = classified;
        let trivial = leftover.into_iter().map(|pull_request| {
            (CategoryName::trivial(), ChangelogEntry::from(pull_request))
        });
        let new_entries = buckets
            .into_iter()
            .flat_map(|(category, entries)| {
                entries
                    .into_iter()
                    .map(move |entry| (category.clone(), entry))
            })
            .chain(trivial);
        for (category, entry) in new_entries {
            if self.insert(category, entry) {
                result.added += 1;
            }
        }

        result
    }

    /// Add `entry` to `category` unless the identical line is already there.
    pub fn insert(&mut self, category: CategoryName, entry: ChangelogEntry) -> bool {
        let entries = self.categories.entry(category).or_default();
        if entries.contains(&entry) {
            false
        } else {
            entries.push(entry);
            true
        }
    }

    /// Sort every category so the newest pull request (highest number) comes first.
    pub fn sequence(&mut self) {
        for entries in self.categories.values_mut() {
            entries.sort_by(|a, b| b.number().cmp(&a.number()));
        }
    }

    pub(crate) fn to_yaml(&self) -> Value {
        let changes: Mapping = self
            .categories
            .iter()
            .map(|(name, entries)| {
                (
                    Value::String(name.to_string()),
                    Value::Sequence(
                        entries
                            .iter()
                            .map(|entry| Value::String(entry.to_string()))
                            .collect(),
                    ),
                )
            })
            .collect();
        let changes = Value::Mapping(changes);

        let mut section = Mapping::with_capacity(self.fields.len() + 1);
        if !self.fields.contains_key(Self::CHANGES) {
            section.insert(Value::String(Self::CHANGES.to_string()), changes.clone());
        }
        for (key, value) in &self.fields {
            if key.as_str() == Some(Self::CHANGES) {
                section.insert(key.clone(), changes.clone());
            } else {
                section.insert(key.clone(), value.clone());
            }
        }
        Value::Mapping(section)
    }
}
