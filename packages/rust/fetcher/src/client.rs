//! Single-shot HTTP fetching of documentation pages.
//!
//! Every failure (transport error, non-200 status, unreadable body) is
//! logged and then collapsed into `None` by [`Fetcher::fetch`]. There is no
//! retry.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};
use url::Url;

use cdpdocs_shared::{CdpDocsError, FetchConfig, Result};

/// User-Agent string for documentation requests.
pub const USER_AGENT: &str = concat!("cdpdocs/", env!("CARGO_PKG_VERSION"));

/// HTTP client for documentation pages.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5));

        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| CdpDocsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch `url`, returning the body only for a `200 OK` response.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_page(&self, url: &Url) -> Result<String> {
        debug!("fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| CdpDocsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CdpDocsError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CdpDocsError::Network(format!("{url}: body read failed: {e}")))?;

        debug!(body_len = body.len(), "page fetched");
        Ok(body)
    }

    /// Fetch `url`, collapsing every failure into `None`.
    pub async fn fetch(&self, url: &Url) -> Option<String> {
        match self.fetch_page(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(%url, error = %e, "documentation fetch failed");
                None
            }
        }
    }
}
