pub mod model;

use crate::AppState;
use crate::domain::Pog;
use crate::services::PogError;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use model::{PogId, PogJson, PogPayload};

pub fn pogs_router() -> Router<AppState> {
    Router::new()
        .route("/pogs", get(list_pogs_handler).post(create_pog_handler))
        .route(
            "/pogs/{id}",
            get(get_pog_handler)
                .patch(update_pog_handler)
                .delete(delete_pog_handler),
        )
}

async fn create_pog_handler(
    State(state): State<AppState>,
    PogJson(payload): PogJson<PogPayload>,
) -> Result<(StatusCode, Json<Pog>), PogError> {
    let pog = state.pog_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(pog)))
}

async fn list_pogs_handler(State(state): State<AppState>) -> Result<Json<Vec<Pog>>, PogError> {
    let pogs = state.pog_service.list().await?;
    Ok(Json(pogs))
}

async fn get_pog_handler(
    State(state): State<AppState>,
    PogId(id): PogId,
) -> Result<Json<Pog>, PogError> {
    let pog = state.pog_service.get(id).await?;
    Ok(Json(pog))
}

async fn update_pog_handler(
    State(state): State<AppState>,
    PogId(id): PogId,
    PogJson(payload): PogJson<PogPayload>,
) -> Result<Json<Pog>, PogError> {
    let pog = state.pog_service.update(id, payload.into()).await?;
    Ok(Json(pog))
}

async fn delete_pog_handler(
    State(state): State<AppState>,
    PogId(id): PogId,
) -> Result<StatusCode, PogError> {
    state.pog_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
