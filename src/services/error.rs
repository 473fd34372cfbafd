use crate::database::StoreError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type PogResult<T> = Result<T, PogError>;

#[derive(Debug, Error)]
pub enum PogError {
    #[error("Ticker symbol already exists")]
    DuplicateTicker { ticker_symbol: String },

    #[error("Pog not found")]
    NotFound { id: Option<i64> },

    #[error("Pog not found or update failed")]
    UpdateFailed { id: i64 },

    // the message is what the client sees, the source only goes to the log
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },

    // the framework refused the request body
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl PogError {
    pub fn status(&self) -> StatusCode {
        match self {
            PogError::DuplicateTicker { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            PogError::NotFound { .. } | PogError::UpdateFailed { .. } => StatusCode::NOT_FOUND,
            PogError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            PogError::InvalidBody { status, .. } => *status,
        }
    }
}

impl IntoResponse for PogError {
    fn into_response(self) -> Response {
        match &self {
            PogError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
            }
            PogError::DuplicateTicker { ticker_symbol } => {
                tracing::debug!(%ticker_symbol, "rejected duplicate ticker");
            }
            PogError::NotFound { id } => tracing::debug!(?id, "pog not found"),
            PogError::UpdateFailed { id } => tracing::debug!(id, "update hit a missing pog"),
            PogError::InvalidBody { .. } => {}
        }

        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
