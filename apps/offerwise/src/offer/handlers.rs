use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Form,
};

use crate::errors::AppError;
use crate::offer::context::{load_or_resolve, submit_offer};
use crate::offer::intake::OfferForm;
use crate::render;
use crate::state::AppState;

/// POST /offer/new and POST /benchmarks
pub async fn handle_submit_offer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<OfferForm>,
) -> Result<Response, AppError> {
    let mut session = state.sessions.open(&headers).await?;
    let ctx = submit_offer(&mut session, &form, &state.bands);
    let page = render::benchmarks(&ctx).into_response();
    state.sessions.commit(&session, page).await
}

/// GET /benchmarks
pub async fn handle_benchmarks(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut session = state.sessions.open(&headers).await?;
    let ctx = load_or_resolve(&mut session, &state.bands);
    let page = render::benchmarks(&ctx).into_response();
    state.sessions.commit(&session, page).await
}

/// GET /api/v1/offer
pub async fn handle_get_offer(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut session = state.sessions.open(&headers).await?;
    let ctx = load_or_resolve(&mut session, &state.bands);
    let body = axum::Json(ctx).into_response();
    state.sessions.commit(&session, body).await
}
