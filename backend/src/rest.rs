use axum::{
    extract::{rejection::JsonRejection, State},
    http::Method,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use shared::{LogRequest, LogResponse, SaveTicketResponse};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::domain::TicketLogService;
use crate::error::SaveTicketError;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub ticket_log: TicketLogService,
}

impl AppState {
    pub fn new(ticket_log: TicketLogService) -> Self {
        Self { ticket_log }
    }
}

/// Build the router: the two API endpoints, with static files for everything else
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    // CORS setup to allow the frontend dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/save-ticket", post(save_ticket))
        .route("/api/logs", post(log_message))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .with_state(app_state)
}

/// Axum handler function for POST /save-ticket
pub async fn save_ticket(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveTicketResponse>, SaveTicketError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("POST /save-ticket - unreadable body: {}", rejection.body_text());
        SaveTicketError::InvalidPayload(rejection.body_text())
    })?;

    match payload.as_array() {
        Some(items) => info!("POST /save-ticket - {} entries", items.len()),
        None => info!("POST /save-ticket - non-array body"),
    }
    debug!("Raw received body: {}", payload);

    state.ticket_log.save_ticket(&payload).await?;

    Ok(Json(SaveTicketResponse {
        message: "Ticket saved successfully".to_string(),
    }))
}

/// Axum handler function for POST /api/logs
pub async fn log_message(Json(request): Json<LogRequest>) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Json(LogResponse { success: true })
}
