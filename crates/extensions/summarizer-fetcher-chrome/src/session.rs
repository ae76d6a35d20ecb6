//! Control channel for a single tab.
//!
//! Commands are issued one at a time and responses are matched by request id.
//! Every read is bounded by the message timeout.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, trace, warn};

use crate::error::CdpError;
use crate::protocol::{CdpRequest, CdpResponse, ExceptionDetails, LOAD_EVENT};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket session attached to one tab.
pub struct TabSession {
    ws: WsStream,
    next_id: u64,
    message_timeout: Duration,
}

impl TabSession {
    /// Connect to a tab's `webSocketDebuggerUrl`.
    pub async fn connect(ws_url: &str, message_timeout: Duration) -> Result<Self, CdpError> {
        url::Url::parse(ws_url)?;

        let connect = tokio_tungstenite::connect_async(ws_url);
        let (ws, _) = tokio::time::timeout(message_timeout, connect)
            .await
            .map_err(|_| CdpError::Timeout(format!("Connecting to {}", ws_url)))?
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        debug!("Connected to tab control channel {}", ws_url);
        Ok(Self {
            ws,
            next_id: 0,
            message_timeout,
        })
    }

    /// Send a command without waiting for its response. Returns its id.
    pub async fn send(&mut self, method: &str, params: Option<Value>) -> Result<u64, CdpError> {
        let id = self.next_id;
        self.next_id += 1;

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);
        self.ws.send(Message::Text(json.into())).await?;
        Ok(id)
    }

    /// Send a command and wait for its result.
    pub async fn call(&mut self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        let id = self.send(method, params).await?;
        loop {
            let message = self.next_message(method).await?;
            if message.id == Some(id) {
                return Self::into_result(message);
            }
        }
    }

    /// Navigate and wait for the page's load event.
    pub async fn navigate(&mut self, url: &str) -> Result<(), CdpError> {
        let id = self.send("Page.navigate", Some(json!({"url": url}))).await?;

        loop {
            let message = self.next_message(LOAD_EVENT).await?;

            if message.id == Some(id) {
                let result = Self::into_result(message)?;
                if let Some(error) = result.get("errorText").and_then(Value::as_str) {
                    return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
                }
                continue;
            }

            if message.method.as_deref() == Some(LOAD_EVENT) {
                debug!("Navigated to {}", url);
                return Ok(());
            }
        }
    }

    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&mut self, expression: &str) -> Result<Value, CdpError> {
        let mut result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let details: ExceptionDetails = serde_json::from_value(exception.clone())?;
            return Err(CdpError::JavaScript(details.message()));
        }

        Ok(result
            .get_mut("result")
            .and_then(|remote| remote.get_mut("value"))
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    /// Close the control channel. Errors are logged.
    pub async fn close(mut self) {
        debug!("Closing WebSocket connection");
        if let Err(e) = self.ws.close(None).await {
            debug!("WebSocket close: {}", e);
        }
    }

    /// Read the next protocol message. `waiting_for` only labels timeouts.
    async fn next_message(&mut self, waiting_for: &str) -> Result<CdpResponse, CdpError> {
        loop {
            let frame = tokio::time::timeout(self.message_timeout, self.ws.next())
                .await
                .map_err(|_| {
                    CdpError::Timeout(format!(
                        "No message within {}s while waiting for {}",
                        self.message_timeout.as_secs(),
                        waiting_for
                    ))
                })?;

            match frame {
                Some(Ok(Message::Text(text))) => {
                    trace!("CDP recv: {}", text.as_str());
                    match serde_json::from_str::<CdpResponse>(text.as_str()) {
                        Ok(message) => return Ok(message),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Some(Ok(Message::Close(_))) | None => return Err(CdpError::SessionClosed),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    fn into_result(message: CdpResponse) -> Result<Value, CdpError> {
        match message.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(message.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
