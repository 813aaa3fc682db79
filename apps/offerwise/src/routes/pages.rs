use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::render;

/// GET /
pub async fn handle_home() -> Html<String> {
    render::home()
}

/// GET /offer/new
pub async fn handle_offer_form() -> Html<String> {
    render::offer_form()
}

/// GET /review
pub async fn handle_review() -> Html<String> {
    render::review()
}

/// GET /learning
pub async fn handle_learning_hub() -> Html<String> {
    render::learning_hub()
}

/// GET /static/offerwise.css
pub async fn serve_stylesheet() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        render::STYLESHEET,
    )
        .into_response()
}
