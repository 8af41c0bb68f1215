// HTTP request handlers
use crate::domain::error::AqiError;
use crate::presentation::app_state::AppState;
use crate::presentation::dto::{
    CityRequest, ForecastResponse, HistoryResponse, PredictResponse, RecommendationResponse,
    RouteRequest, RoutesResponse, ServiceInfo,
};
use axum::{extract::State, Json};
use std::sync::Arc;

/// A missing or unparsable body behaves like a request without a city.
fn city_of(body: Option<Json<CityRequest>>) -> Option<String> {
    body.and_then(|Json(request)| request.city)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn service_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "AQI Predictor API with OpenWeather is running!",
        model: state.aqi_service.model_name(),
    })
}

/// Current AQI estimate from live weather
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CityRequest>>,
) -> Result<Json<PredictResponse>, AqiError> {
    let city = city_of(body);
    let prediction = state.aqi_service.predict(city.as_deref()).await?;
    Ok(Json(prediction.into()))
}

/// Synthetic 24-hour history around the current readings
pub async fn historical(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CityRequest>>,
) -> Result<Json<HistoryResponse>, AqiError> {
    let city = city_of(body);
    let history = state.aqi_service.history(city.as_deref()).await?;
    Ok(Json(history.into()))
}

pub async fn forecast(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CityRequest>>,
) -> Result<Json<ForecastResponse>, AqiError> {
    let city = city_of(body);
    let forecast = state.aqi_service.forecast(city.as_deref()).await?;
    Ok(Json(forecast.into()))
}

/// Health tips for the provider's current pollution level
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    body: Option<Json<CityRequest>>,
) -> Result<Json<RecommendationResponse>, AqiError> {
    let city = city_of(body);
    let recommendation = state.aqi_service.recommend(city.as_deref()).await?;
    Ok(Json(recommendation.into()))
}

/// Up to three alternatives between two places, labeled by speed and air quality
pub async fn routes(
    State(state): State<Arc<AppState>>,
    body: Option<Json<RouteRequest>>,
) -> Result<Json<RoutesResponse>, AqiError> {
    let (start, end) = body
        .map(|Json(request)| (request.start, request.end))
        .unwrap_or_default();
    let routes = state
        .route_advisor
        .advise(start.as_deref(), end.as_deref())
        .await?;
    Ok(Json(routes.into()))
}
