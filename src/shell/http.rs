//! HTTP shell — JSON endpoints for a browser chat widget.
//!
//! Hosts exactly one conversation. Free-text requests release the
//! conversation lock while the remote call is outstanding, so option clicks
//! are still served in the meantime.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::engine::{Conversation, Message};
use crate::error::ShellError;
use crate::remote::QueryClient;
use crate::render::{LinkRenderer, Segment};

/// Axum handler state (cloneable).
#[derive(Clone)]
pub struct ChatState {
    conversation: Arc<Mutex<Conversation>>,
    client: Arc<dyn QueryClient>,
    renderer: Arc<LinkRenderer>,
}

impl ChatState {
    pub fn new(conversation: Conversation, client: Arc<dyn QueryClient>) -> Self {
        let renderer = Arc::new(LinkRenderer::new(&conversation.texts().link_text));
        Self {
            conversation: Arc::new(Mutex::new(conversation)),
            client,
            renderer,
        }
    }
}

// ── JSON Protocol ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub text: String,
}

/// A history entry plus its link segments (bot messages only).
#[derive(Debug, Serialize)]
pub struct RenderedMessage<'a> {
    #[serde(flatten)]
    pub message: &'a Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse<'a> {
    pub conversation_id: Uuid,
    pub messages: Vec<RenderedMessage<'a>>,
}

fn history_json(conversation: &Conversation, renderer: &LinkRenderer) -> serde_json::Value {
    let messages = conversation
        .history()
        .iter()
        .map(|message| RenderedMessage {
            message,
            segments: message.is_bot().then(|| renderer.segments(&message.text)),
        })
        .collect();

    let response = HistoryResponse {
        conversation_id: conversation.id(),
        messages,
    };
    serde_json::to_value(&response).unwrap_or_else(|e| {
        tracing::error!("Failed to serialize history: {}", e);
        serde_json::json!({ "conversation_id": conversation.id(), "messages": [] })
    })
}

// ── Handlers ────────────────────────────────────────────────────────────

async fn get_history(State(state): State<ChatState>) -> Json<serde_json::Value> {
    let conversation = state.conversation.lock().await;
    Json(history_json(&conversation, &state.renderer))
}

async fn post_select(
    State(state): State<ChatState>,
    Json(req): Json<SelectRequest>,
) -> Json<serde_json::Value> {
    let mut conversation = state.conversation.lock().await;
    conversation.select_option(&req.label);
    Json(history_json(&conversation, &state.renderer))
}

async fn post_back(State(state): State<ChatState>) -> Json<serde_json::Value> {
    let mut conversation = state.conversation.lock().await;
    conversation.go_back();
    Json(history_json(&conversation, &state.renderer))
}

async fn post_send(
    State(state): State<ChatState>,
    Json(req): Json<SendRequest>,
) -> Json<serde_json::Value> {
    let pending = state.conversation.lock().await.begin_free_text(&req.text);

    if let Some(pending) = pending {
        let outcome = state.client.ask(&pending.question).await;
        state
            .conversation
            .lock()
            .await
            .complete_free_text(&pending, outcome);
    }

    let conversation = state.conversation.lock().await;
    Json(history_json(&conversation, &state.renderer))
}

async fn post_reset(State(state): State<ChatState>) -> Json<serde_json::Value> {
    let mut conversation = state.conversation.lock().await;
    conversation.reset();
    tracing::info!(conversation_id = %conversation.id(), "Conversation reset via HTTP");
    Json(history_json(&conversation, &state.renderer))
}

/// Build the `/api/chat/*` router.
pub fn chat_routes(state: ChatState) -> Router {
    Router::new()
        .route("/api/chat/history", get(get_history))
        .route("/api/chat/select", post(post_select))
        .route("/api/chat/back", post(post_back))
        .route("/api/chat/send", post(post_send))
        .route("/api/chat/reset", post(post_reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until the process exits.
pub async fn serve(port: u16, state: ChatState) -> Result<(), ShellError> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ShellError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!(port, "Chat HTTP shell started");
    axum::serve(listener, chat_routes(state))
        .await
        .map_err(|e| ShellError::Serve(e.to_string()))
}
