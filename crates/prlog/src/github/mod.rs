//! The small slice of the GitHub REST API needed to find merged pull requests.
//!
//! Nothing in here is fatal: a release which can't be resolved means an open-ended window, and a
//! failed search means nothing to add. Both are logged as warnings.

use miette::Diagnostic;
use reqwest::{header::ACCEPT, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::config::Repository;

mod pull_requests;
mod releases;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("prlog/", env!("CARGO_PKG_VERSION"));

pub struct GitHub {
    client: Client,
    api_url: String,
    token: Option<String>,
    repository: Repository,
}

impl GitHub {
    /// ## Errors
    ///
    /// If no HTTP client can be built on this system.
    pub fn new(
        repository: Repository,
        api_url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Client { source })?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token,
            repository,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .client
            .get(format!("{}{path}", self.api_url))
            .header(ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        activity: &'static str,
    ) -> Result<T, Error> {
        trace!("GET {path} {query:?}");
        let response = self
            .get(path)
            .query(query)
            .send()
            .await
            .map_err(|source| Error::ApiRequest { source, activity })?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound { activity }),
            status if !status.is_success() => Err(Error::Status { status, activity }),
            _ => response
                .json()
                .await
                .map_err(|source| Error::ApiResponse { source, activity }),
        }
    }
}

#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum Error {
    #[error("Could not create an HTTP client: {source}")]
    #[diagnostic(code(github::client))]
    Client {
        #[source]
        source: reqwest::Error,
    },
    #[error("Trouble communicating with GitHub while {activity}: {source}")]
    #[diagnostic(
        code(github::api_request_error),
        help("There was a problem communicating with GitHub, this may be a network issue.")
    )]
    ApiRequest {
        #[source]
        source: reqwest::Error,
        activity: &'static str,
    },
    #[error("Nothing was found while {activity}")]
    #[diagnostic(
        code(github::not_found),
        help("Check the repository and release names. Private repositories need a token.")
    )]
    NotFound { activity: &'static str },
    #[error("GitHub responded with {status} while {activity}")]
    #[diagnostic(
        code(github::status),
        help("This may be a permissions issue or a rate limit.")
    )]
    Status {
        status: StatusCode,
        activity: &'static str,
    },
    #[error("Trouble decoding the response from GitHub while {activity}: {source}")]
    #[diagnostic(code(github::api_response_error))]
    ApiResponse {
        #[source]
        source: reqwest::Error,
        activity: &'static str,
    },
    #[error("Release {tag} has not been published")]
    #[diagnostic(
        code(github::unpublished_release),
        help("Draft releases have no publication date to filter by.")
    )]
    Unpublished { tag: String },
    #[error("Release {tag} has an invalid publication date {value}: {source}")]
    #[diagnostic(code(github::published_at))]
    PublishedAt {
        tag: String,
        value: String,
        #[source]
        source: time::error::Parse,
    },
}
