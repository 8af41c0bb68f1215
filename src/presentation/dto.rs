// JSON request and response contracts
use crate::application::aqi_service::{CityForecast, CityHistory, CityPrediction, CityRecommendation};
use crate::application::synthesizer::round2;
use crate::domain::route::ScoredRoute;
use crate::domain::weather::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Clock labels as shown on the dashboard charts.
fn time_label(time: DateTime<Utc>) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Debug, Deserialize)]
pub struct CityRequest {
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub model: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub predicted_aqi: f64,
    pub health_message: &'static str,
}

impl From<CityPrediction> for PredictResponse {
    fn from(prediction: CityPrediction) -> Self {
        Self {
            city: prediction.city,
            temperature: prediction.observation.temperature,
            humidity: prediction.observation.humidity,
            wind_speed: prediction.observation.wind_speed,
            predicted_aqi: round2(prediction.current.estimate.value),
            health_message: prediction.current.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub lat: f64,
    pub lon: f64,
    pub timestamps: Vec<String>,
    pub temperature: Vec<f64>,
    pub humidity: Vec<f64>,
    pub wind_speed: Vec<f64>,
    pub aqi: Vec<f64>,
    pub peak_aqi: Option<f64>,
    pub peak_time: Option<String>,
}

impl From<CityHistory> for HistoryResponse {
    fn from(history: CityHistory) -> Self {
        let points = &history.series.points;
        Self {
            lat: history.coordinates.lat,
            lon: history.coordinates.lon,
            timestamps: points.iter().map(|p| time_label(p.timestamp)).collect(),
            temperature: points.iter().map(|p| p.temperature).collect(),
            humidity: points.iter().map(|p| p.humidity).collect(),
            wind_speed: points.iter().map(|p| p.wind_speed).collect(),
            aqi: points.iter().map(|p| p.aqi).collect(),
            peak_aqi: history.series.peak.map(|peak| peak.aqi),
            peak_time: history.series.peak.map(|peak| time_label(peak.timestamp)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ForecastEntry {
    pub time: String,
    pub predicted_aqi: f64,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub city: String,
    pub forecast: Vec<ForecastEntry>,
}

impl From<CityForecast> for ForecastResponse {
    fn from(forecast: CityForecast) -> Self {
        Self {
            city: forecast.city,
            forecast: forecast
                .forecast
                .into_iter()
                .map(|point| ForecastEntry {
                    time: time_label(point.time),
                    predicted_aqi: point.predicted_aqi,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CoordinatesBody {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinates> for CoordinatesBody {
    fn from(coordinates: Coordinates) -> Self {
        Self {
            lat: coordinates.lat,
            lon: coordinates.lon,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub city: String,
    pub aqi: f64,
    pub coordinates: CoordinatesBody,
    pub recommendations: Vec<&'static str>,
}

impl From<CityRecommendation> for RecommendationResponse {
    fn from(result: CityRecommendation) -> Self {
        Self {
            city: result.city,
            aqi: result.recommendation.aqi,
            coordinates: result.coordinates.into(),
            recommendations: result.recommendation.tips.to_vec(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteEntry {
    pub name: &'static str,
    /// Minutes
    pub eta: u64,
    /// Kilometres
    pub distance: u64,
    pub aqi: Option<u32>,
    pub overview_polyline: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteEntry>,
}

impl From<Vec<ScoredRoute>> for RoutesResponse {
    fn from(routes: Vec<ScoredRoute>) -> Self {
        Self {
            routes: routes
                .into_iter()
                .map(|route| RouteEntry {
                    name: route.label.as_str(),
                    eta: route.eta_minutes,
                    distance: route.distance_km,
                    aqi: route.aqi,
                    overview_polyline: route.overview_polyline,
                    summary: route.summary,
                })
                .collect(),
        }
    }
}
