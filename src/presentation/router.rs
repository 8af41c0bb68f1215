// Route table and middleware stack
use crate::infrastructure::http_response::panic_response;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    forecast, health_check, historical, predict, recommend, routes, service_info,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/healthz", get(health_check))
        .route("/predict", post(predict))
        .route("/historical", post(historical))
        .route("/forecast", post(forecast))
        .route("/recommend", post(recommend))
        .route("/routes", post(routes))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
