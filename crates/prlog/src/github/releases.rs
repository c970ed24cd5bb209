use serde::Deserialize;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{debug, warn};

use super::{Error, GitHub};
use crate::config::ReleaseRef;

#[derive(Debug, Deserialize)]
struct Release {
    id: u64,
    tag_name: String,
    published_at: Option<String>,
}

impl Release {
    fn published_at(self) -> Result<OffsetDateTime, Error> {
        let Some(value) = self.published_at else {
            return Err(Error::Unpublished { tag: self.tag_name });
        };
        OffsetDateTime::parse(&value, &Rfc3339).map_err(|source| Error::PublishedAt {
            tag: self.tag_name,
            value,
            source,
        })
    }
}

impl GitHub {
    /// When `release` was published, `None` if it's unset or can't be resolved.
    pub async fn release_date(&self, release: &ReleaseRef) -> Option<OffsetDateTime> {
        let found = match release {
            ReleaseRef::Unset => return None,
            ReleaseRef::Latest => self.latest_release().await,
            ReleaseRef::Tag(tag) => self.tagged_release(tag).await,
        };
        match found.and_then(Release::published_at) {
            Ok(published_at) => {
                debug!("{release} was published at {published_at}");
                Some(published_at)
            }
            Err(err) => {
                warn!(
                    "Could not find {release} of {repository}: {err}",
                    repository = self.repository
                );
                None
            }
        }
    }

    async fn latest_release(&self) -> Result<Release, Error> {
        self.get_json(
            &format!("/repos/{}/releases/latest", self.repository),
            &[],
            "fetching the latest release",
        )
        .await
    }

    /// Look up the release id by tag, then fetch the release itself.
    async fn tagged_release(&self, tag: &str) -> Result<Release, Error> {
        let by_tag: Release = self
            .get_json(
                &format!("/repos/{}/releases/tags/{tag}", self.repository),
                &[],
                "looking up the release id",
            )
            .await?;
        self.get_json(
            &format!("/repos/{}/releases/{}", self.repository, by_tag.id),
            &[],
            "fetching the release",
        )
        .await
    }
}
