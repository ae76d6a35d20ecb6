//! DevTools HTTP API client for tab lifecycle.

use std::time::Duration;

use tracing::debug;

use crate::error::CdpError;
use crate::protocol::PageInfo;

/// Tab closure must not hold up the caller for long.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// A freshly created tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTarget {
    pub id: String,
    pub ws_url: String,
}

/// Client for the `/json/*` endpoints of a Chrome remote-debugging port.
#[derive(Debug, Clone)]
pub struct DevToolsClient {
    endpoint: String,
    http: reqwest::Client,
}

impl DevToolsClient {
    /// `endpoint` is the HTTP base, e.g. `http://localhost:9222`.
    pub fn new(endpoint: &str, request_timeout: Duration) -> Result<Self, CdpError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Create a blank tab.
    pub async fn new_tab(&self) -> Result<TabTarget, CdpError> {
        // Chrome requires PUT for /json/new
        let create_url = format!("{}/json/new", self.endpoint);
        let response = self
            .http
            .put(&create_url)
            .send()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", self.endpoint, e)))?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Create new target response (HTTP {}): {}", status, body);

        if !status.is_success() {
            return Err(CdpError::Http(format!(
                "Could not create new tab in Chrome: HTTP {} - {}",
                status.as_u16(),
                body
            )));
        }

        let page: PageInfo = serde_json::from_str(&body).map_err(|e| {
            CdpError::InvalidResponse(format!("Failed to decode JSON response: {}", e))
        })?;

        let ws_url = page.web_socket_debugger_url.ok_or_else(|| {
            CdpError::InvalidResponse("No WebSocket URL in new target response".to_string())
        })?;

        debug!("Created new tab: {}", page.id);
        Ok(TabTarget {
            id: page.id,
            ws_url,
        })
    }

    /// Ask Chrome to close a tab.
    pub async fn close_tab(&self, target_id: &str) -> Result<(), CdpError> {
        let close_url = format!("{}/json/close/{}", self.endpoint, target_id);
        let response = self
            .http
            .get(&close_url)
            .timeout(CLOSE_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CdpError::Http(format!(
                "Closing tab {} returned HTTP {}",
                target_id,
                status.as_u16()
            )));
        }

        debug!("Chrome tab closed successfully (HTTP {})", status.as_u16());
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
