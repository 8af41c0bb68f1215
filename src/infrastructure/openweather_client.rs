// OpenWeatherMap provider implementation
use crate::application::weather_provider::{ProviderError, WeatherProvider};
use crate::domain::weather::{Coordinates, PollutionBaseline, WeatherObservation};
use crate::infrastructure::config::OpenWeatherSettings;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    weather_url: String,
    air_pollution_url: String,
    geo_url: String,
}

#[derive(Debug, Deserialize)]
struct OwmWeatherResponse {
    main: OwmMain,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmPollutionResponse {
    #[serde(default)]
    list: Vec<OwmPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct OwmPollutionEntry {
    main: OwmPollutionMain,
}

#[derive(Debug, Deserialize)]
struct OwmPollutionMain {
    aqi: u8,
}

#[derive(Debug, Deserialize)]
struct OwmGeoEntry {
    lat: f64,
    lon: f64,
}

impl From<OwmWeatherResponse> for WeatherObservation {
    fn from(response: OwmWeatherResponse) -> Self {
        WeatherObservation::new(response.main.temp, response.main.humidity, response.wind.speed)
    }
}

impl OwmPollutionResponse {
    fn into_baseline(self) -> Option<PollutionBaseline> {
        self.list
            .into_iter()
            .next()
            .map(|entry| PollutionBaseline::ProviderIndex(entry.main.aqi))
    }
}

fn first_match(entries: Vec<OwmGeoEntry>) -> Option<Coordinates> {
    entries
        .into_iter()
        .next()
        .map(|entry| Coordinates::new(entry.lat, entry.lon))
}

impl OpenWeatherClient {
    pub fn new(settings: &OpenWeatherSettings) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            weather_url: settings.weather_url.trim_end_matches('/').to_string(),
            air_pollution_url: settings.air_pollution_url.trim_end_matches('/').to_string(),
            geo_url: settings.geo_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_weather_url(&self, city: &str) -> String {
        format!(
            "{}?q={}&appid={}&units=metric",
            self.weather_url,
            urlencoding::encode(city),
            self.api_key
        )
    }

    fn build_pollution_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}?lat={}&lon={}&appid={}",
            self.air_pollution_url, coordinates.lat, coordinates.lon, self.api_key
        )
    }

    fn build_geo_url(&self, city: &str) -> String {
        format!(
            "{}?q={}&limit=1&appid={}",
            self.geo_url,
            urlencoding::encode(city),
            self.api_key
        )
    }

    /// GET a provider endpoint and decode its JSON body. Non-success
    /// statuses keep the provider's body as `details` when it is JSON.
    async fn execute_request<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, (StatusCode, ProviderError)> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request for {} failed: {}", what, e);
                (
                    StatusCode::BAD_GATEWAY,
                    unavailable(format!("Failed to fetch {}", what), None),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let details = serde_json::from_str::<serde_json::Value>(&body).ok();
            tracing::warn!("OpenWeatherMap {} request returned {}: {}", what, status, body);
            return Err((status, unavailable(format!("Failed to fetch {}", what), details)));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", what, e);
            (
                status,
                unavailable(format!("Malformed {} response", what), None),
            )
        })
    }
}

fn unavailable(message: String, details: Option<serde_json::Value>) -> ProviderError {
    ProviderError::Unavailable { message, details }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherObservation, ProviderError> {
        let url = self.build_weather_url(city);
        match self.execute_request::<OwmWeatherResponse>(&url, "weather").await {
            Ok(response) => Ok(response.into()),
            Err((status, _)) if status == StatusCode::NOT_FOUND => {
                Err(ProviderError::NotFound(format!("City {} not found", city)))
            }
            Err((_, e)) => Err(e),
        }
    }

    async fn air_pollution(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<PollutionBaseline>, ProviderError> {
        let url = self.build_pollution_url(coordinates);
        self.execute_request::<OwmPollutionResponse>(&url, "air pollution")
            .await
            .map(OwmPollutionResponse::into_baseline)
            .map_err(|(_, e)| e)
    }

    async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, ProviderError> {
        let url = self.build_geo_url(city);
        self.execute_request::<Vec<OwmGeoEntry>>(&url, "location")
            .await
            .map(first_match)
            .map_err(|(_, e)| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenWeatherClient {
        OpenWeatherClient::new(&OpenWeatherSettings {
            api_key: "secret".to_string(),
            weather_url: "https://api.example.test/data/2.5/weather/".to_string(),
            air_pollution_url: "https://api.example.test/data/2.5/air_pollution".to_string(),
            geo_url: "https://api.example.test/geo/1.0/direct".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_weather_url_encodes_city() {
        let url = client().build_weather_url("São Paulo");
        assert_eq!(
            url,
            "https://api.example.test/data/2.5/weather?q=S%C3%A3o%20Paulo&appid=secret&units=metric"
        );
    }

    #[test]
    fn test_pollution_and_geo_urls() {
        let client = client();
        assert_eq!(
            client.build_pollution_url(Coordinates::new(51.5, -0.12)),
            "https://api.example.test/data/2.5/air_pollution?lat=51.5&lon=-0.12&appid=secret"
        );
        assert_eq!(
            client.build_geo_url("Delhi"),
            "https://api.example.test/geo/1.0/direct?q=Delhi&limit=1&appid=secret"
        );
    }

    #[test]
    fn test_parse_weather_response() {
        let body = r#"{
            "coord": {"lon": 77.21, "lat": 28.61},
            "main": {"temp": 31.2, "feels_like": 33.0, "pressure": 1008, "humidity": 48},
            "wind": {"speed": 3.6, "deg": 290},
            "name": "Delhi"
        }"#;
        let response: OwmWeatherResponse = serde_json::from_str(body).unwrap();
        let observation = WeatherObservation::from(response);
        assert_eq!(observation, WeatherObservation::new(31.2, 48.0, 3.6));
    }

    #[test]
    fn test_parse_pollution_response() {
        let body = r#"{
            "coord": {"lon": 77.21, "lat": 28.61},
            "list": [{"main": {"aqi": 4}, "components": {"pm2_5": 61.3}, "dt": 1730640000}]
        }"#;
        let response: OwmPollutionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_baseline(), Some(PollutionBaseline::ProviderIndex(4)));

        let empty: OwmPollutionResponse = serde_json::from_str(r#"{"list": []}"#).unwrap();
        assert_eq!(empty.into_baseline(), None);
    }

    #[test]
    fn test_parse_geocode_response() {
        let body = r#"[{"name": "Delhi", "lat": 28.6517, "lon": 77.2219, "country": "IN"}]"#;
        let entries: Vec<OwmGeoEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(first_match(entries), Some(Coordinates::new(28.6517, 77.2219)));

        let none: Vec<OwmGeoEntry> = serde_json::from_str("[]").unwrap();
        assert_eq!(first_match(none), None);
    }
}
