//! Remote slot fetchers
//!
//! Content is served as static files, either over HTTP or straight from the
//! site's directory on disk.

use futures_util::future::BoxFuture;
use std::path::{Component, Path, PathBuf};
use url::Url;

use crate::cache_bust::FetchRequest;
use crate::error::FetchError;
use crate::Result;

pub trait Fetcher: Send + Sync {
    /// Read the plain-text body behind `request`.
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>>;
}

/// Fetches slot text over HTTP(S)
pub struct HttpFetcher {
    client: reqwest::Client,
    /// Relative paths are joined onto this; absolute URLs pass through
    base: Option<Url>,
}

impl HttpFetcher {
    pub fn new(base: Option<Url>, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// The URL actually requested, cache-busting pair included
    pub fn request_url(&self, request: &FetchRequest) -> Result<Url> {
        let parsed = match &self.base {
            Some(base) => base.join(&request.path),
            None => Url::parse(&request.path),
        };

        let mut url = parsed.map_err(|e| FetchError::InvalidPath {
            path: request.path.clone(),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FetchError::InvalidPath {
                path: request.path.clone(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }

        url.query_pairs_mut()
            .append_pair(&request.param, &request.stamp.to_string());
        Ok(url)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let url = self.request_url(request)?;

            tracing::debug!(url = %url, "Fetching slot");

            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("").to_string(),
                });
            }

            resp.text()
                .await
                .map_err(|e| FetchError::Network(e.to_string()))
        })
    }
}

/// Reads slot text from a site root directory
pub struct StaticDirFetcher {
    root: PathBuf,
}

impl StaticDirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a page path onto the site root. Query and fragment are dropped;
    /// paths that would leave the root are rejected.
    pub fn local_path(&self, path: &str) -> Result<PathBuf> {
        let trimmed = path.split(['?', '#']).next().unwrap_or("");
        let relative = Path::new(trimmed.trim_start_matches('/'));

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FetchError::InvalidPath {
                path: path.to_string(),
                reason: "path leaves the site root".to_string(),
            });
        }

        Ok(self.root.join(relative))
    }
}

impl Fetcher for StaticDirFetcher {
    fn fetch<'a>(&'a self, request: &'a FetchRequest) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            let local = self.local_path(&request.path)?;

            tracing::debug!(path = %local.display(), "Reading slot from site root");

            tokio::fs::read_to_string(&local)
                .await
                .map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => FetchError::NotFound(request.path.clone()),
                    _ => FetchError::Io(e),
                })
        })
    }
}
