// Provider trait for weather, pollution and geocoding lookups
use crate::domain::error::AqiError;
use crate::domain::weather::{Coordinates, PollutionBaseline, WeatherObservation};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Unavailable {
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl From<ProviderError> for AqiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(message) => AqiError::NotFound(message),
            ProviderError::Unavailable { message, details } => {
                AqiError::UpstreamUnavailable { message, details }
            }
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city, metric units
    async fn current_weather(&self, city: &str) -> Result<WeatherObservation, ProviderError>;

    /// Latest pollution index at a location. `None` when the provider has no reading.
    async fn air_pollution(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<PollutionBaseline>, ProviderError>;

    /// First geocoding match for a city name
    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, ProviderError>;
}
