//! Fake chat-completion API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `POST /v1/chat/completions` from a script of canned
//! responses and records every request it receives.
//!
//! When the script is empty the server answers with [`CANNED_REPORT`].
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeChatApi::start().await.unwrap();
//! api.push(Scripted::Status(503, "overloaded".into())).await;
//! api.push(Scripted::Reply("## Summary".into())).await;
//!
//! // Point the client at api.endpoint()
//! ```

use super::fixtures::CANNED_REPORT;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// 200 with this markdown as the assistant message.
    Reply(String),
    /// 200 with this markdown, after sleeping.
    SlowReply(Duration, String),
    /// Non-success status with a plain-text body.
    Status(u16, String),
    /// 200 with an empty `choices` array.
    NoChoices,
}

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

impl RecordedRequest {
    /// Content of the message with the given role.
    pub fn message(&self, role: &str) -> Option<&str> {
        self.body["messages"]
            .as_array()?
            .iter()
            .find(|m| m["role"] == role)?["content"]
            .as_str()
    }
}

#[derive(Default)]
struct ApiState {
    script: VecDeque<Scripted>,
    requests: Vec<RecordedRequest>,
}

/// Handle to the running fake chat-completion server.
pub struct FakeChatApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeChatApi {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full endpoint URL (e.g. `http://127.0.0.1:PORT/v1/chat/completions`).
    pub fn endpoint(&self) -> String {
        format!("http://{}/v1/chat/completions", self.addr)
    }

    /// Queue a scripted response.
    pub async fn push(&self, response: Scripted) {
        self.state.lock().await.script.push_back(response);
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn chat_completions(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let next = {
        let mut state = state.lock().await;
        state.requests.push(RecordedRequest {
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
        state.script.pop_front()
    };

    match next.unwrap_or_else(|| Scripted::Reply(CANNED_REPORT.to_string())) {
        Scripted::Reply(md) => Json(completion_body(&md)).into_response(),
        Scripted::SlowReply(delay, md) => {
            tokio::time::sleep(delay).await;
            Json(completion_body(&md)).into_response()
        }
        Scripted::Status(code, text) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, text).into_response()
        }
        Scripted::NoChoices => Json(serde_json::json!({ "choices": [] })).into_response(),
    }
}
