use crate::domain::PogFields;
use crate::services::PogError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;
use serde::Deserialize;

// request body for POST /pogs and PATCH /pogs/{id}
#[derive(Deserialize, Debug, Clone)]
pub struct PogPayload {
    pub name: String,
    pub ticker_symbol: String,
    pub price: f64,
    pub color: String,
}

impl From<PogPayload> for PogFields {
    fn from(payload: PogPayload) -> Self {
        PogFields {
            name: payload.name,
            ticker_symbol: payload.ticker_symbol,
            price: payload.price,
            color: payload.color,
        }
    }
}

/// `axum::Json`, but rejections come back in the `{"error": ...}` shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PogError))]
pub struct PogJson<T>(pub T);

impl From<JsonRejection> for PogError {
    fn from(rejection: JsonRejection) -> Self {
        PogError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Integer id from the path. Anything that doesn't parse can't name a pog, so it is a 404.
pub struct PogId(pub i64);

impl<S> FromRequestParts<S> for PogId
where
    S: Send + Sync,
{
    type Rejection = PogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| PogError::NotFound { id: None })?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| PogError::NotFound { id: None })
    }
}
