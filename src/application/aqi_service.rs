// AQI service - City level use cases over the weather provider
use crate::application::estimation_service::{CurrentEstimate, EstimationService, Recommendation};
use crate::application::weather_provider::WeatherProvider;
use crate::domain::error::AqiError;
use crate::domain::series::{ForecastPoint, HistorySeries};
use crate::domain::weather::{Coordinates, WeatherObservation};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CityPrediction {
    pub city: String,
    pub observation: WeatherObservation,
    pub current: CurrentEstimate,
}

#[derive(Debug, Clone)]
pub struct CityHistory {
    pub coordinates: Coordinates,
    pub series: HistorySeries,
}

#[derive(Debug, Clone)]
pub struct CityForecast {
    pub city: String,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone)]
pub struct CityRecommendation {
    pub city: String,
    pub coordinates: Coordinates,
    pub recommendation: Recommendation,
}

#[derive(Clone)]
pub struct AqiService {
    provider: Arc<dyn WeatherProvider>,
    estimation: EstimationService,
}

impl AqiService {
    pub fn new(provider: Arc<dyn WeatherProvider>, estimation: EstimationService) -> Self {
        Self {
            provider,
            estimation,
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.estimation.model_name()
    }

    pub async fn predict(&self, city: Option<&str>) -> Result<CityPrediction, AqiError> {
        let city = require_city(city)?;
        let observation = self.provider.current_weather(city.query).await?;
        let current = self.estimation.estimate_current(&observation);

        tracing::debug!(
            "Predicted AQI {:.2} for {} at {}",
            current.estimate.value,
            city.query,
            current.estimate.computed_at
        );

        Ok(CityPrediction {
            city: city.requested.to_string(),
            observation,
            current,
        })
    }

    pub async fn history(&self, city: Option<&str>) -> Result<CityHistory, AqiError> {
        let city = require_city(city)?;
        let coordinates = self
            .provider
            .geocode(city.query)
            .await?
            .ok_or_else(|| AqiError::NotFound("Invalid city name".to_string()))?;

        let observation = self.provider.current_weather(city.query).await?;
        let pollution = self
            .provider
            .air_pollution(coordinates)
            .await?
            .ok_or_else(|| AqiError::upstream("Air pollution response contained no readings"))?;

        let series = self.estimation.estimate_history(&observation, pollution);
        tracing::debug!("Synthesized {} history points for {}", series.points.len(), city.query);

        Ok(CityHistory {
            coordinates,
            series,
        })
    }

    pub async fn forecast(&self, city: Option<&str>) -> Result<CityForecast, AqiError> {
        let city = require_city(city)?;
        let observation = self.provider.current_weather(city.query).await?;
        let forecast = self.estimation.estimate_forecast(&observation);

        Ok(CityForecast {
            city: city.requested.to_string(),
            forecast,
        })
    }

    pub async fn recommend(&self, city: Option<&str>) -> Result<CityRecommendation, AqiError> {
        let city = require_city(city)?;
        let not_found =
            || AqiError::NotFound(format!("Could not fetch AQI for {}.", city.requested));

        let coordinates = self.provider.geocode(city.query).await?.ok_or_else(not_found)?;
        let pollution = self
            .provider
            .air_pollution(coordinates)
            .await?
            .ok_or_else(not_found)?;

        Ok(CityRecommendation {
            city: city.requested.to_string(),
            coordinates,
            recommendation: self.estimation.estimate_recommendation(pollution),
        })
    }
}

/// City as the caller sent it, plus the trimmed form used for lookups.
#[derive(Debug, Clone, Copy)]
struct CityName<'a> {
    requested: &'a str,
    query: &'a str,
}

/// Rejects absent and blank city names before any provider call.
fn require_city(city: Option<&str>) -> Result<CityName<'_>, AqiError> {
    match city {
        Some(requested) if !requested.trim().is_empty() => Ok(CityName {
            requested,
            query: requested.trim(),
        }),
        _ => Err(AqiError::MissingInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prediction_strategy::FallbackModel;
    use crate::application::synthesizer::SynthesisMode;
    use crate::application::weather_provider::ProviderError;
    use crate::domain::aqi::ScalingPolicy;
    use crate::domain::weather::PollutionBaseline;
    use crate::infrastructure::config::SynthesisSettings;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        calls: AtomicUsize,
        queried: Mutex<Vec<String>>,
        unknown_city: bool,
        no_pollution: bool,
    }

    impl FakeProvider {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn queried(&self) -> Vec<String> {
            self.queried.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self, city: &str) -> Result<WeatherObservation, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queried.lock().unwrap().push(city.to_string());
            Ok(WeatherObservation::new(20.0, 50.0, 5.0))
        }

        async fn air_pollution(
            &self,
            _coordinates: Coordinates,
        ) -> Result<Option<PollutionBaseline>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.no_pollution {
                Ok(None)
            } else {
                Ok(Some(PollutionBaseline::ProviderIndex(3)))
            }
        }

        async fn geocode(&self, city: &str) -> Result<Option<Coordinates>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queried.lock().unwrap().push(city.to_string());
            if self.unknown_city {
                Ok(None)
            } else {
                Ok(Some(Coordinates::new(28.61, 77.21)))
            }
        }
    }

    struct DownProvider;

    #[async_trait]
    impl WeatherProvider for DownProvider {
        async fn current_weather(&self, _city: &str) -> Result<WeatherObservation, ProviderError> {
            Err(ProviderError::Unavailable {
                message: "Failed to fetch weather".to_string(),
                details: Some(serde_json::json!({"cod": 401})),
            })
        }

        async fn air_pollution(
            &self,
            _coordinates: Coordinates,
        ) -> Result<Option<PollutionBaseline>, ProviderError> {
            Ok(None)
        }

        async fn geocode(&self, _city: &str) -> Result<Option<Coordinates>, ProviderError> {
            Ok(None)
        }
    }

    fn service(provider: Arc<dyn WeatherProvider>) -> AqiService {
        let settings = SynthesisSettings {
            history_hours: 24,
            forecast_steps: 2,
            mode: SynthesisMode::Cumulative,
            history_scaling: ScalingPolicy::A,
        };
        AqiService::new(provider, EstimationService::new(Arc::new(FallbackModel), settings))
    }

    #[tokio::test]
    async fn test_missing_city_never_calls_provider() {
        let provider = Arc::new(FakeProvider::default());
        let service = service(provider.clone());

        for city in [None, Some(""), Some("   ")] {
            assert!(matches!(service.predict(city).await, Err(AqiError::MissingInput)));
            assert!(matches!(service.history(city).await, Err(AqiError::MissingInput)));
            assert!(matches!(service.forecast(city).await, Err(AqiError::MissingInput)));
            assert!(matches!(service.recommend(city).await, Err(AqiError::MissingInput)));
        }

        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_predict_for_city() {
        let service = service(Arc::new(FakeProvider::default()));
        let prediction = service.predict(Some("Delhi")).await.unwrap();

        assert_eq!(prediction.city, "Delhi");
        assert_eq!(prediction.current.estimate.value, 36.0);
        assert_eq!(prediction.current.message, "Air quality is good.");
    }

    #[tokio::test]
    async fn test_padded_city_is_echoed_but_queried_trimmed() {
        let provider = Arc::new(FakeProvider::default());
        let service = service(provider.clone());

        let prediction = service.predict(Some(" Delhi ")).await.unwrap();
        assert_eq!(prediction.city, " Delhi ");

        let forecast = service.forecast(Some("Delhi  ")).await.unwrap();
        assert_eq!(forecast.city, "Delhi  ");

        let recommendation = service.recommend(Some("  Delhi")).await.unwrap();
        assert_eq!(recommendation.city, "  Delhi");

        assert_eq!(provider.queried(), vec!["Delhi", "Delhi", "Delhi"]);
    }

    #[tokio::test]
    async fn test_history_for_city() {
        let service = service(Arc::new(FakeProvider::default()));
        let history = service.history(Some("Delhi")).await.unwrap();

        assert_eq!(history.coordinates, Coordinates::new(28.61, 77.21));
        assert_eq!(history.series.points.len(), 24);
        assert!(history.series.peak.is_some());
    }

    #[tokio::test]
    async fn test_history_unknown_city_is_not_found() {
        let provider = FakeProvider {
            unknown_city: true,
            ..Default::default()
        };
        let service = service(Arc::new(provider));

        assert!(matches!(service.history(Some("Atlantis")).await, Err(AqiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_history_without_pollution_reading_is_upstream_failure() {
        let provider = FakeProvider {
            no_pollution: true,
            ..Default::default()
        };
        let service = service(Arc::new(provider));

        assert!(matches!(
            service.history(Some("Delhi")).await,
            Err(AqiError::UpstreamUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_forecast_for_city() {
        let service = service(Arc::new(FakeProvider::default()));
        let forecast = service.forecast(Some("Delhi")).await.unwrap();
        assert_eq!(forecast.forecast.len(), 2);
    }

    #[tokio::test]
    async fn test_recommend_for_city() {
        let service = service(Arc::new(FakeProvider::default()));
        let result = service.recommend(Some("Delhi")).await.unwrap();

        assert_eq!(result.recommendation.aqi, 150.0);
        assert_eq!(result.recommendation.tips.len(), 3);
    }

    #[tokio::test]
    async fn test_recommend_without_reading_is_not_found() {
        let provider = FakeProvider {
            no_pollution: true,
            ..Default::default()
        };
        let service = service(Arc::new(provider));

        match service.recommend(Some("Delhi")).await {
            Err(AqiError::NotFound(message)) => {
                assert_eq!(message, "Could not fetch AQI for Delhi.")
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.city)),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_surfaced_without_retry() {
        let service = service(Arc::new(DownProvider));

        match service.predict(Some("Delhi")).await {
            Err(AqiError::UpstreamUnavailable { message, details }) => {
                assert_eq!(message, "Failed to fetch weather");
                assert_eq!(details, Some(serde_json::json!({"cod": 401})));
            }
            other => panic!("unexpected result: {:?}", other.map(|r| r.city)),
        }
    }
}
