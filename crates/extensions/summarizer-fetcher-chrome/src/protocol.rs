//! CDP protocol types and message definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Any message received on the control channel: a command response when
/// `id` is set, an event when `method` is set.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
}

/// Target description returned by the `/json/new` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub id: String,
    pub web_socket_debugger_url: Option<String>,
}

/// The thrown value of an exception. Only its description is read.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteObject {
    pub description: Option<String>,
}

/// Exception details from Runtime.evaluate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub column_number: i64,
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// Description of the thrown value with its script position.
    pub fn message(&self) -> String {
        let description = self
            .exception
            .as_ref()
            .and_then(|e| e.description.as_deref())
            .unwrap_or(&self.text);
        format!(
            "{} (line {}, column {})",
            description, self.line_number, self.column_number
        )
    }
}

/// Event fired when the page's load event completes.
pub const LOAD_EVENT: &str = "Page.loadEventFired";

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
