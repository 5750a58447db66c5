//! HTTP client for the pricing site's search and product pages.

use std::time::Duration;

use cardprice_core::{AppConfig, CardQuery};
use reqwest::{Client, StatusCode, Url};

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

/// Path prefix shared by every product page on the site.
const PRODUCT_PATH_PREFIX: &str = "/game/";

/// A fetched document after redirects have been followed.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    /// URL of the document actually served, which differs from the request
    /// URL when the site redirected.
    pub final_url: Url,
    pub body: String,
}

impl FetchedPage {
    /// True when the site sent us straight to a product page instead of a
    /// results list (it does this when a search has exactly one hit).
    #[must_use]
    pub fn is_product_page(&self) -> bool {
        is_product_url(&self.final_url)
    }
}

/// Whether `url` has the path shape of a product page.
#[must_use]
pub fn is_product_url(url: &Url) -> bool {
    url.path().starts_with(PRODUCT_PATH_PREFIX)
}

/// Client for search-results and product pages.
///
/// Every request is bounded by the configured timeout. Transient failures
/// (429, 5xx, timeouts, connection errors) are retried up to `max_retries`
/// additional times with exponential back-off.
#[derive(Debug, Clone)]
pub struct PriceClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl PriceClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if `base_url` does not parse, or
    /// [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let base_url = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from the run configuration.
    ///
    /// # Errors
    ///
    /// See [`PriceClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// URL of the price search for `query`: `search-products?q={name}+{id}&type=prices`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the base URL cannot take a path.
    pub fn search_url(&self, query: &CardQuery) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join("/search-products")
            .map_err(|e| ScraperError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", &format!("{} {}", query.name(), query.id()))
            .append_pair("type", "prices");
        Ok(url)
    }

    /// Fetches the search-results page for `query`.
    ///
    /// # Errors
    ///
    /// See [`PriceClient::fetch_page`].
    pub async fn search(&self, query: &CardQuery) -> Result<FetchedPage, ScraperError> {
        let url = self.search_url(query)?;
        self.fetch_page(url.as_str()).await
    }

    /// GETs `url`, following redirects, with automatic retry on transient errors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx (5xx retried).
    /// - [`ScraperError::Http`]: network failure or timeout after all retries.
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                )
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ScraperError::RateLimited {
                    domain: response
                        .url()
                        .host_str()
                        .map_or_else(|| url.to_owned(), str::to_owned),
                    retry_after_secs,
                });
            }

            if status == StatusCode::NOT_FOUND {
                return Err(ScraperError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let final_url = response.url().clone();
            let body = response.text().await?;
            Ok(FetchedPage {
                status: status.as_u16(),
                final_url,
                body,
            })
        })
        .await
    }
}

/// Turns an anchor `href` into an absolute URL, resolving relative hrefs
/// against the page they were found on.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the join fails.
pub fn absolute_link(page_url: &Url, href: &str) -> Result<String, ScraperError> {
    page_url
        .join(href.trim())
        .map(String::from)
        .map_err(|e| ScraperError::InvalidUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
