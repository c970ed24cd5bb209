use std::fmt::{self, Display};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// The span of merge dates which count as "new" for this run. Both ends are inclusive.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Window {
    pub since: Option<OffsetDateTime>,
    pub until: Option<OffsetDateTime>,
}

impl Window {
    #[must_use]
    pub const fn new(since: Option<OffsetDateTime>, until: Option<OffsetDateTime>) -> Self {
        Self { since, until }
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    /// The `merged:` search qualifier for this window, `None` if there are no bounds at all.
    #[must_use]
    pub fn merged_qualifier(&self) -> Option<String> {
        match (self.since, self.until) {
            (Some(since), Some(until)) => Some(format!(
                "merged:{since}..{until}",
                since = Timestamp(since),
                until = Timestamp(until)
            )),
            (Some(since), None) => Some(format!("merged:>={}", Timestamp(since))),
            (None, Some(until)) => Some(format!("merged:<={}", Timestamp(until))),
            (None, None) => None,
        }
    }
}

struct Timestamp(OffsetDateTime);

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}
