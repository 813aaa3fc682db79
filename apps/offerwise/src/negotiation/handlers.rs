use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::negotiation::script::{compose, NegotiationScript};
use crate::negotiation::simulator::{simulate, SimulationAsk, SimulationOutcome, SimulationQuery};
use crate::offer::context::current;
use crate::offer::gate::{self, Gate, OFFER_INTAKE_PATH};
use crate::offer::models::OfferContext;
use crate::render;
use crate::state::AppState;

/// Reads the session's offer context; `None` when the gate is closed.
async fn gated_context(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<OfferContext>, AppError> {
    let session = state.sessions.open(headers).await?;
    let ctx = current(&session);
    match gate::check(&ctx) {
        Gate::Render => Ok(Some(ctx)),
        Gate::RedirectToIntake => {
            info!(session_id = %session.id(), "no offer in session, redirecting to intake");
            Ok(None)
        }
    }
}

fn no_offer() -> AppError {
    AppError::Validation(format!(
        "No offer in this session yet; submit one at {OFFER_INTAKE_PATH}"
    ))
}

/// GET /simulator
pub async fn handle_simulator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SimulationQuery>,
) -> Result<Response, AppError> {
    let Some(ctx) = gated_context(&state, &headers).await? else {
        return Ok(Redirect::to(OFFER_INTAKE_PATH).into_response());
    };
    let outcome = simulate(&ctx, &SimulationAsk::from(&query));
    Ok(render::simulator(&ctx, &outcome).into_response())
}

/// GET /script
pub async fn handle_script_studio(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(ctx) = gated_context(&state, &headers).await? else {
        return Ok(Redirect::to(OFFER_INTAKE_PATH).into_response());
    };
    Ok(render::script_studio(&ctx, &compose(&ctx)).into_response())
}

/// GET /api/v1/simulate
pub async fn handle_simulate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SimulationQuery>,
) -> Result<Json<SimulationOutcome>, AppError> {
    let ctx = gated_context(&state, &headers).await?.ok_or_else(no_offer)?;
    Ok(Json(simulate(&ctx, &SimulationAsk::from(&query))))
}

/// GET /api/v1/script
pub async fn handle_script(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<NegotiationScript>, AppError> {
    let ctx = gated_context(&state, &headers).await?.ok_or_else(no_offer)?;
    Ok(Json(compose(&ctx)))
}
