use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendSms {
    pub sender: String,
    pub recipient: String,
    pub message: String,
}

/// A message the gateway accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentMessage {
    pub message_id: Uuid,
    #[serde(flatten)]
    pub sms: SendSms,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Accepted {
    pub status: String,
    pub message_id: String,
}

/// The single account the gateway accepts.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether `headers` carry `Authorization: Basic` for this account.
    pub fn authorizes(&self, headers: &HeaderMap) -> bool {
        let token = Base64::encode_string(format!("{}:{}", self.username, self.password).as_bytes());
        let expected = format!("Basic {token}");
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == expected)
    }
}

pub type Outbox = Arc<RwLock<Vec<SentMessage>>>;

#[derive(Clone)]
struct AppState {
    credentials: Arc<Credentials>,
    outbox: Outbox,
}

pub fn app(credentials: Credentials) -> Router {
    let state = AppState {
        credentials: Arc::new(credentials),
        outbox: Outbox::default(),
    };
    Router::new()
        .route("/send_sms", post(send_sms))
        .route("/messages", get(list_messages))
        .with_state(state)
}

pub async fn run(listener: TcpListener, credentials: Credentials) -> Result<(), std::io::Error> {
    axum::serve(listener, app(credentials)).await
}

async fn send_sms(
    State(state): State<AppState>,
    headers: HeaderMap,
    input: Result<Json<SendSms>, JsonRejection>,
) -> Response {
    if !state.credentials.authorizes(&headers) {
        let body = serde_json::json!({ "error": "Invalid credentials" });
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }
    let Json(sms) = match input {
        Ok(input) => input,
        Err(rejection) => return rejection.into_response(),
    };

    let sent = SentMessage {
        message_id: Uuid::new_v4(),
        sms,
    };
    let reply = Accepted {
        status: "success".to_string(),
        message_id: sent.message_id.to_string(),
    };
    state.outbox.write().await.push(sent);
    Json(reply).into_response()
}

async fn list_messages(State(state): State<AppState>) -> Json<Vec<SentMessage>> {
    Json(state.outbox.read().await.clone())
}
