// Google Directions provider implementation
use crate::application::directions_provider::DirectionsProvider;
use crate::application::weather_provider::ProviderError;
use crate::domain::route::{DirectionsRoute, RouteStep};
use crate::domain::weather::Coordinates;
use crate::infrastructure::config::DirectionsSettings;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const DIRECTIONS_FAILED: &str = "Error fetching directions";

#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    client: reqwest::Client,
    api_key: Option<String>,
    url: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<GoogleRoute>,
}

#[derive(Debug, Deserialize)]
struct GoogleRoute {
    #[serde(default)]
    summary: String,
    overview_polyline: GooglePolyline,
    #[serde(default)]
    legs: Vec<GoogleLeg>,
}

#[derive(Debug, Deserialize)]
struct GooglePolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct GoogleLeg {
    duration: GoogleValue,
    distance: GoogleValue,
    #[serde(default)]
    steps: Vec<GoogleStep>,
}

#[derive(Debug, Deserialize)]
struct GoogleValue {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct GoogleStep {
    start_location: GoogleLatLng,
    end_location: GoogleLatLng,
}

#[derive(Debug, Deserialize)]
struct GoogleLatLng {
    lat: f64,
    lng: f64,
}

impl From<GoogleLatLng> for Coordinates {
    fn from(location: GoogleLatLng) -> Self {
        Coordinates::new(location.lat, location.lng)
    }
}

impl GoogleRoute {
    /// Only the first leg is used; a route without legs is skipped.
    fn into_route(self) -> Option<DirectionsRoute> {
        let leg = self.legs.into_iter().next()?;
        Some(DirectionsRoute {
            duration_secs: leg.duration.value,
            distance_meters: leg.distance.value,
            steps: leg
                .steps
                .into_iter()
                .map(|step| RouteStep {
                    start: step.start_location.into(),
                    end: step.end_location.into(),
                })
                .collect(),
            overview_polyline: self.overview_polyline.points,
            summary: self.summary,
        })
    }
}

impl DirectionsResponse {
    fn into_routes(self) -> Result<Vec<DirectionsRoute>, ProviderError> {
        if self.status == "OK" {
            return Ok(self.routes.into_iter().filter_map(GoogleRoute::into_route).collect());
        }
        if self.status == "ZERO_RESULTS" {
            return Ok(Vec::new());
        }

        let reason = self.error_message.unwrap_or(self.status);
        tracing::warn!("Directions request rejected: {}", reason);
        Err(ProviderError::Unavailable {
            message: DIRECTIONS_FAILED.to_string(),
            details: Some(serde_json::Value::String(reason)),
        })
    }
}

impl GoogleDirectionsClient {
    pub fn new(settings: &DirectionsSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone().filter(|key| !key.trim().is_empty()),
            url: settings.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_directions_url(&self, api_key: &str, origin: &str, destination: &str) -> String {
        format!(
            "{}?origin={}&destination={}&alternatives=true&key={}",
            self.url,
            urlencoding::encode(origin),
            urlencoding::encode(destination),
            api_key
        )
    }
}

#[async_trait]
impl DirectionsProvider for GoogleDirectionsClient {
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<DirectionsRoute>, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::Unavailable {
                message: "Directions API key is not configured".to_string(),
                details: None,
            });
        };

        let url = self.build_directions_url(api_key, origin, destination);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Directions request failed: {}", e);
                ProviderError::Unavailable {
                    message: DIRECTIONS_FAILED.to_string(),
                    details: None,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Directions request returned {}: {}", status, body);
            return Err(ProviderError::Unavailable {
                message: DIRECTIONS_FAILED.to_string(),
                details: serde_json::from_str(&body).ok(),
            });
        }

        let parsed = response.json::<DirectionsResponse>().await.map_err(|e| {
            tracing::error!("Failed to parse directions response: {}", e);
            ProviderError::Unavailable {
                message: "Malformed directions response".to_string(),
                details: None,
            }
        })?;

        parsed.into_routes()
    }
}
