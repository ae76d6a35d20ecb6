//! Chrome-backed content fetcher.

use async_trait::async_trait;
use tracing::{debug, error, warn};

use summarizer_config::ChromeConfig;
use summarizer_protocols::{ContentFetcher, FetchError, FetchResult};

use crate::client::DevToolsClient;
use crate::error::CdpError;
use crate::script::{extraction_script, parse_extracted};
use crate::session::TabSession;

/// Fetches rendered page content through a remote Chrome instance.
///
/// Each attempt runs in its own tab. Transport failures and timeouts are
/// retried with a fixed delay; malformed protocol responses are not.
pub struct ChromeFetcher {
    client: DevToolsClient,
    config: ChromeConfig,
}

impl ChromeFetcher {
    pub fn new(config: &ChromeConfig) -> Result<Self, CdpError> {
        Ok(Self {
            client: DevToolsClient::new(&config.endpoint(), config.message_timeout())?,
            config: config.clone(),
        })
    }

    /// One bounded attempt. The tab is closed whatever the outcome.
    async fn attempt(&self, url: &str, selector: &str) -> Result<FetchResult, CdpError> {
        debug!("Fetching {} with selector {}", url, selector);
        let tab = self.client.new_tab().await?;
        debug!("Target ID: {}, WebSocket URL: {}", tab.id, tab.ws_url);

        let deadline = self.config.attempt_timeout();
        let result = match tokio::time::timeout(deadline, self.drive(&tab.ws_url, url, selector))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(CdpError::Timeout(format!(
                "Attempt exceeded {}s for {}",
                deadline.as_secs(),
                url
            ))),
        };

        debug!("Closing Chrome tab with ID: {}", tab.id);
        if let Err(e) = self.client.close_tab(&tab.id).await {
            error!("Error closing Chrome tab {}: {}", tab.id, e);
        }

        result
    }

    async fn drive(&self, ws_url: &str, url: &str, selector: &str) -> Result<FetchResult, CdpError> {
        let mut session = TabSession::connect(ws_url, self.config.message_timeout()).await?;
        let result = self.extract(&mut session, url, selector).await;
        session.close().await;
        result
    }

    async fn extract(
        &self,
        session: &mut TabSession,
        url: &str,
        selector: &str,
    ) -> Result<FetchResult, CdpError> {
        session.call("Page.enable", None).await?;
        session.navigate(url).await?;

        let settle = self.config.settle_delay();
        if !settle.is_zero() {
            debug!("Waiting {}s for scripts to settle", settle.as_secs());
            tokio::time::sleep(settle).await;
        }

        let value = session.evaluate(&extraction_script(selector)).await?;
        let result = parse_extracted(&value);
        debug!(
            "Extracted {} characters of text and {} of markup",
            result.text.chars().count(),
            result.html.chars().count()
        );
        Ok(result)
    }
}

#[async_trait]
impl ContentFetcher for ChromeFetcher {
    async fn fetch_content(&self, url: &str, selector: &str) -> Result<FetchResult, FetchError> {
        let max_attempts = self.config.max_retries.max(1);
        let mut attempt = 1;

        loop {
            debug!("Fetch attempt {} of {} for URL: {}", attempt, max_attempts, url);

            let err = match self.attempt(url, selector).await {
                Ok(result) => return Ok(result),
                Err(e) => FetchError::from(e),
            };

            if !err.is_retryable() {
                error!("Fetch failed for URL {}: {}", url, err);
                return Err(err);
            }

            warn!("Fetch attempt {} failed: {}", attempt, err);
            if attempt >= max_attempts {
                error!("All fetch attempts failed for URL: {}", url);
                return Err(err);
            }

            let delay = self.config.retry_delay();
            debug!("Waiting {}s before next attempt", delay.as_secs());
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod tests;
