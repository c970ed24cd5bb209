//! Sort merged pull requests into changelog categories by their labels, and merge them into the
//! current release of a YAML changelog.

mod classifier;
pub mod document;
mod entry;
mod pull_request;
mod rules;
mod section;
pub mod version;
mod window;

pub use classifier::{classify, Classified};
pub use document::ChangelogDocument;
pub use entry::ChangelogEntry;
pub use pull_request::PullRequest;
pub use rules::{CategoryName, CategoryRule, Classification, Rules};
pub use section::{Reconciled, ReleaseSection};
use tracing::debug;
pub use version::Version;
pub use window::Window;

/// The result of [`update`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Update {
    /// The current release.
    pub version: Version,
    pub reconciled: Reconciled,
    /// How many pull requests were left out because of the skip rule.
    pub skipped: usize,
    /// The new text of the current release, `None` if it already listed everything.
    pub section: Option<String>,
}

impl Update {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.section.is_some()
    }
}

/// Classify `pull_requests`, merge them into the current release of `document`, and order every
/// category of that release newest-first.
///
/// The release is only rewritten if an entry was added, removed, or moved, so running this again
/// with the same pull requests leaves the document exactly as it was.
///
/// # Errors
///
/// If the document isn't shaped like a changelog. Nothing is changed in that case.
pub fn update(
    document: &mut ChangelogDocument,
    pull_requests: &[PullRequest],
    rules: &Rules,
) -> Result<Update, document::Error> {
    let before = document.current_release()?;
    let mut section = before.clone();
    let classified = classify(pull_requests, rules);
    let skipped = classified.skipped.len();
    if classified.is_empty() {
        debug!("Nothing to add to {}, {skipped} skipped", section.version());
    } else {
        debug!(
            "{count} pull requests to add to {version}, {skipped} skipped",
            count = classified.len(),
            version = section.version()
        );
    }

    let reconciled = section.reconcile(pull_requests, classified);
    section.sequence();

    let new_section = if section == before {
        None
    } else {
        Some(document.with_release(&section)?)
    };
    Ok(Update {
        version: section.version().clone(),
        reconciled,
        skipped,
        section: new_section,
    })
}
