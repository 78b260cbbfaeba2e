//! Error types for the ticket log service and their HTTP mapping.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::SaveTicketErrorResponse;
use tracing::error;

pub const SAVE_TICKET_FAILED: &str = "Failed to save ticket";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum SaveTicketError {
    #[error("{0}")]
    InvalidPayload(String),
    #[error("No valid ticket items received")]
    NoValidEntries,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SaveTicketError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SaveTicketError::InvalidPayload(_) | SaveTicketError::NoValidEntries => {
                StatusCode::BAD_REQUEST
            }
            SaveTicketError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SaveTicketError {
    fn into_response(self) -> Response {
        error!("Error saving ticket: {}", self);

        let status = self.status_code();
        let details = match &self {
            SaveTicketError::Storage(_) => None,
            other => Some(other.to_string()),
        };
        let body = SaveTicketErrorResponse {
            error: SAVE_TICKET_FAILED.to_string(),
            details,
        };
        (status, Json(body)).into_response()
    }
}
