pub mod health;
pub mod pages;

use axum::{http::Uri, routing::get, Router};

use crate::errors::AppError;
use crate::negotiation::handlers as negotiation;
use crate::offer::handlers as offer;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/static/offerwise.css", get(pages::serve_stylesheet))
        // Pages
        .route("/", get(pages::handle_home))
        .route(
            "/offer/new",
            get(pages::handle_offer_form).post(offer::handle_submit_offer),
        )
        .route(
            "/benchmarks",
            get(offer::handle_benchmarks).post(offer::handle_submit_offer),
        )
        .route("/simulator", get(negotiation::handle_simulator))
        .route("/script", get(negotiation::handle_script_studio))
        .route("/review", get(pages::handle_review))
        .route("/learning", get(pages::handle_learning_hub))
        // JSON API
        .route("/api/v1/offer", get(offer::handle_get_offer))
        .route("/api/v1/simulate", get(negotiation::handle_simulate))
        .route("/api/v1/script", get(negotiation::handle_script))
        .fallback(not_found)
        .with_state(state)
}
