use crate::agent::AIAgent;
use crate::error::AgentError;
use crate::models::chat::{ ChatRequest, ConversationResponse, ModelsResponse, TaskRequest };
use std::sync::Arc;
use axum::{
    routing::{ get, post },
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::{ IntoResponse, Response },
    http::{ StatusCode, Uri },
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{ Any, CorsLayer };
use log::{ debug, error };

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<AIAgent>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Failure of one API operation. `summary` is the operation-level error text.
pub struct ApiError {
    summary: &'static str,
    source: AgentError,
}

impl ApiError {
    fn new(summary: &'static str, source: AgentError) -> Self {
        Self { summary, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.source {
            AgentError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            other => {
                error!("{}: {}", self.summary, other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": self.summary, "details": other.to_string() })),
                ).into_response()
            }
        }
    }
}

fn bad_body(rejection: JsonRejection) -> Response {
    debug!("Rejected request body: {}", rejection);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Invalid request body", "details": rejection.body_text() })),
    ).into_response()
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/conversation", get(conversation_handler).delete(clear_conversation_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/models", get(models_handler))
        .route("/api/task", post(task_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .layer(cors)
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK",
        message: "AI Agent System is running",
    })
}

async fn conversation_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(ConversationResponse {
        history: state.agent.history().await,
    })
}

async fn clear_conversation_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.agent.clear_history().await;
    Json(MessageResponse {
        message: "Conversation history cleared",
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return bad_body(rejection),
    };

    match state.agent.chat(req.message.as_deref(), req.model.as_deref()).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => ApiError::new("Failed to get response from AI agent", e).into_response(),
    }
}

async fn models_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(ModelsResponse {
        models: state.agent.list_models().await,
    })
}

async fn task_handler(
    State(state): State<AppState>,
    body: Result<Json<TaskRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match body {
        Ok(b) => b,
        Err(rejection) => return bad_body(rejection),
    };

    match state.agent
        .execute_task(req.task.as_deref(), req.context.as_deref(), req.model.as_deref()).await
    {
        Ok(result) => Json(result).into_response(),
        Err(e) => ApiError::new("Failed to execute task", e).into_response(),
    }
}

async fn not_found_handler(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("Route {} not found", uri),
        })),
    )
}
