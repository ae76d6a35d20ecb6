//! Loopback stand-in for a tab's control channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

/// How the fake tab answers.
#[derive(Debug, Clone)]
pub enum TabBehavior {
    /// Loads normally and returns this evaluation value.
    Serve(Value),
    /// Answers commands but never fires the load event.
    NeverLoads,
    /// Navigation fails with an error text.
    NavigationError(String),
    /// The evaluated script throws.
    ScriptThrows(String),
}

/// A WebSocket server that accepts any number of tab connections.
pub struct FakeTab {
    pub ws_url: String,
    connections: Arc<AtomicUsize>,
    expressions: Arc<Mutex<Vec<String>>>,
}

impl FakeTab {
    pub async fn start(behavior: TabBehavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicUsize::new(0));
        let expressions = Arc::new(Mutex::new(Vec::new()));

        {
            let connections = connections.clone();
            let expressions = expressions.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    connections.fetch_add(1, Ordering::SeqCst);
                    let behavior = behavior.clone();
                    let expressions = expressions.clone();
                    tokio::spawn(async move {
                        let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                            return;
                        };
                        while let Some(Ok(message)) = ws.next().await {
                            let Message::Text(text) = message else {
                                continue;
                            };
                            let request: Value = serde_json::from_str(text.as_str()).unwrap();
                            let id = request["id"].clone();
                            let method = request["method"].as_str().unwrap_or_default();

                            let mut replies = vec![json!({"method": "Network.dataReceived", "params": {}})];
                            match method {
                                "Page.navigate" => match &behavior {
                                    TabBehavior::NavigationError(error) => replies.push(json!({
                                        "id": id,
                                        "result": {"frameId": "F1", "errorText": error}
                                    })),
                                    TabBehavior::NeverLoads => {
                                        replies.push(json!({"id": id, "result": {"frameId": "F1"}}))
                                    }
                                    _ => {
                                        replies.push(json!({"id": id, "result": {"frameId": "F1"}}));
                                        replies.push(json!({"method": "Page.frameStoppedLoading", "params": {}}));
                                        replies.push(json!({"method": "Page.loadEventFired", "params": {"timestamp": 1.0}}));
                                    }
                                },
                                "Runtime.evaluate" => {
                                    expressions.lock().push(
                                        request["params"]["expression"]
                                            .as_str()
                                            .unwrap_or_default()
                                            .to_string(),
                                    );
                                    match &behavior {
                                        TabBehavior::ScriptThrows(description) => replies.push(json!({
                                            "id": id,
                                            "result": {
                                                "result": {"type": "object", "subtype": "error"},
                                                "exceptionDetails": {
                                                    "exceptionId": 1,
                                                    "text": "Uncaught",
                                                    "lineNumber": 0,
                                                    "columnNumber": 0,
                                                    "exception": {"type": "object", "description": description}
                                                }
                                            }
                                        })),
                                        TabBehavior::Serve(value) => replies.push(json!({
                                            "id": id,
                                            "result": {"result": {"type": "object", "value": value}}
                                        })),
                                        _ => replies.push(json!({"id": id, "result": {"result": {"type": "undefined"}}})),
                                    }
                                }
                                "Unknown.method" => replies.push(json!({
                                    "id": id,
                                    "error": {"code": -32601, "message": "'Unknown.method' wasn't found"}
                                })),
                                _ => replies.push(json!({"id": id, "result": {}})),
                            }

                            for reply in replies {
                                if ws.send(Message::Text(reply.to_string().into())).await.is_err() {
                                    return;
                                }
                            }
                        }
                    });
                }
            });
        }

        Self {
            ws_url: format!("ws://{}/devtools/page/T1", addr),
            connections,
            expressions,
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Expressions received by `Runtime.evaluate`, in order.
    pub fn expressions(&self) -> Vec<String> {
        self.expressions.lock().clone()
    }
}
