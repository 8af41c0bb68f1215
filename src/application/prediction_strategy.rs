// Prediction strategies - Weather features to AQI
use crate::domain::weather::WeatherObservation;
use serde::Deserialize;

pub trait PredictionStrategy: Send + Sync {
    fn predict(&self, observation: &WeatherObservation) -> f64;

    /// Short label for logs and the service banner.
    fn name(&self) -> &'static str;
}

/// Linear formula used whenever no trained artifact is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackModel;

impl PredictionStrategy for FallbackModel {
    fn predict(&self, observation: &WeatherObservation) -> f64 {
        0.6 * observation.temperature + 0.3 * observation.humidity - 0.2 * observation.wind_speed
            + 10.0
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

/// Pre-fitted regressor loaded from a JSON artifact:
/// `{"intercept": 4.2, "coefficients": [0.7, 0.25, -0.4]}`
/// with coefficients ordered temperature, humidity, wind speed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainedModel {
    pub intercept: f64,
    pub coefficients: [f64; 3],
}

impl PredictionStrategy for TrainedModel {
    fn predict(&self, observation: &WeatherObservation) -> f64 {
        self.coefficients
            .iter()
            .zip(observation.features())
            .fold(self.intercept, |acc, (coefficient, feature)| acc + coefficient * feature)
    }

    fn name(&self) -> &'static str {
        "trained"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_formula() {
        let obs = WeatherObservation::new(20.0, 50.0, 5.0);
        assert_eq!(FallbackModel.predict(&obs), 36.0);
    }

    #[test]
    fn test_fallback_is_pure() {
        let obs = WeatherObservation::new(31.4, 77.0, 1.8);
        let first = FallbackModel.predict(&obs);
        for _ in 0..10 {
            assert_eq!(FallbackModel.predict(&obs), first);
        }
    }

    #[test]
    fn test_trained_model_applies_coefficients() {
        let model = TrainedModel {
            intercept: 2.0,
            coefficients: [1.0, 0.5, -2.0],
        };
        let obs = WeatherObservation::new(10.0, 40.0, 3.0);
        assert_eq!(model.predict(&obs), 2.0 + 10.0 + 20.0 - 6.0);
        assert_eq!(model.name(), "trained");
    }

    #[test]
    fn test_trained_model_deserializes() {
        let model: TrainedModel =
            serde_json::from_str(r#"{"intercept": 4.2, "coefficients": [0.7, 0.25, -0.4]}"#)
                .unwrap();
        assert_eq!(model.intercept, 4.2);
        assert_eq!(model.coefficients, [0.7, 0.25, -0.4]);
    }
}
