// Estimation service - Point, history, forecast and recommendation queries
use crate::application::prediction_strategy::PredictionStrategy;
use crate::application::synthesizer::TimeSeriesSynthesizer;
use crate::domain::aqi::{classify_message, classify_tips, AqiEstimate, ScalingPolicy};
use crate::domain::series::{ForecastPoint, HistorySeries};
use crate::domain::weather::{PollutionBaseline, WeatherObservation};
use crate::infrastructure::config::SynthesisSettings;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentEstimate {
    pub estimate: AqiEstimate,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub aqi: f64,
    pub tips: &'static [&'static str],
}

#[derive(Clone)]
pub struct EstimationService {
    strategy: Arc<dyn PredictionStrategy>,
    synthesizer: TimeSeriesSynthesizer,
    settings: SynthesisSettings,
}

impl EstimationService {
    pub fn new(strategy: Arc<dyn PredictionStrategy>, settings: SynthesisSettings) -> Self {
        Self {
            strategy,
            synthesizer: TimeSeriesSynthesizer::new(settings.mode),
            settings,
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn estimate_current(&self, observation: &WeatherObservation) -> CurrentEstimate {
        let value = self.strategy.predict(observation);
        CurrentEstimate {
            estimate: AqiEstimate::new(value, Utc::now()),
            message: classify_message(value),
        }
    }

    pub fn estimate_history(
        &self,
        observation: &WeatherObservation,
        pollution: PollutionBaseline,
    ) -> HistorySeries {
        self.estimate_history_at(observation, pollution, Utc::now(), &mut rand::thread_rng())
    }

    pub fn estimate_history_at<R: Rng + ?Sized>(
        &self,
        observation: &WeatherObservation,
        pollution: PollutionBaseline,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> HistorySeries {
        let baseline_aqi = self.settings.history_scaling.scale(pollution);
        self.synthesizer.synthesize_history(
            observation,
            baseline_aqi,
            self.settings.history_hours,
            now,
            rng,
        )
    }

    pub fn estimate_forecast(&self, observation: &WeatherObservation) -> Vec<ForecastPoint> {
        self.estimate_forecast_at(observation, Utc::now(), &mut rand::thread_rng())
    }

    pub fn estimate_forecast_at<R: Rng + ?Sized>(
        &self,
        observation: &WeatherObservation,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<ForecastPoint> {
        self.synthesizer.synthesize_forecast(
            observation,
            self.strategy.as_ref(),
            self.settings.forecast_steps,
            now,
            rng,
        )
    }

    /// Recommendations always use the lookup table, whatever the history policy is.
    pub fn estimate_recommendation(&self, pollution: PollutionBaseline) -> Recommendation {
        let aqi = ScalingPolicy::Table.scale(pollution);
        Recommendation {
            aqi,
            tips: classify_tips(aqi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::prediction_strategy::{FallbackModel, TrainedModel};
    use crate::application::synthesizer::SynthesisMode;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings(mode: SynthesisMode, history_scaling: ScalingPolicy) -> SynthesisSettings {
        SynthesisSettings {
            history_hours: 24,
            forecast_steps: 2,
            mode,
            history_scaling,
        }
    }

    fn fallback_service() -> EstimationService {
        EstimationService::new(
            Arc::new(FallbackModel),
            settings(SynthesisMode::Cumulative, ScalingPolicy::A),
        )
    }

    #[test]
    fn test_estimate_current_uses_three_buckets() {
        let service = fallback_service();

        let result = service.estimate_current(&WeatherObservation::new(20.0, 50.0, 5.0));
        assert_eq!(result.estimate.value, 36.0);
        assert_eq!(result.message, "Air quality is good.");

        // 0.6 * 40 + 0.3 * 95 - 0 + 10 = 62.5
        let result = service.estimate_current(&WeatherObservation::new(40.0, 95.0, 0.0));
        assert_eq!(result.message, "Air quality is moderate.");
    }

    #[test]
    fn test_estimate_current_uses_injected_strategy() {
        let model = TrainedModel {
            intercept: 150.0,
            coefficients: [0.0, 0.0, 0.0],
        };
        let service = EstimationService::new(
            Arc::new(model),
            settings(SynthesisMode::Cumulative, ScalingPolicy::A),
        );

        let result = service.estimate_current(&WeatherObservation::new(20.0, 50.0, 5.0));
        assert_eq!(result.estimate.value, 150.0);
        assert_eq!(result.message, "Air quality is poor. Limit outdoor activities.");
        assert_eq!(service.model_name(), "trained");
    }

    #[test]
    fn test_history_starts_from_scaled_baseline() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 14, 0, 0).unwrap();
        let observation = WeatherObservation::new(25.0, 60.0, 2.0);

        for (policy, baseline) in [(ScalingPolicy::A, 100.0), (ScalingPolicy::B, 80.0)] {
            let service = EstimationService::new(
                Arc::new(FallbackModel),
                settings(SynthesisMode::Cumulative, policy),
            );
            let mut rng = StdRng::seed_from_u64(5);
            let series = service.estimate_history_at(
                &observation,
                PollutionBaseline::ProviderIndex(4),
                now,
                &mut rng,
            );

            assert_eq!(series.points.len(), 24);
            // First point is one AQI draw away from the baseline.
            assert!((series.points[0].aqi - baseline).abs() <= 3.01);
        }
    }

    #[test]
    fn test_forecast_uses_configured_steps() {
        let now = Utc.with_ymd_and_hms(2024, 11, 3, 14, 0, 0).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let forecast = fallback_service().estimate_forecast_at(
            &WeatherObservation::new(20.0, 50.0, 5.0),
            now,
            &mut rng,
        );
        assert_eq!(forecast.len(), 2);
    }

    #[test]
    fn test_recommendation_uses_table_policy() {
        let recommendation =
            fallback_service().estimate_recommendation(PollutionBaseline::ProviderIndex(3));
        assert_eq!(recommendation.aqi, 150.0);
        assert_eq!(recommendation.tips[0], "Air quality is unhealthy for sensitive groups.");

        let recommendation =
            fallback_service().estimate_recommendation(PollutionBaseline::ProviderIndex(5));
        assert_eq!(recommendation.aqi, 300.0);
        assert_eq!(recommendation.tips[0], "Air quality is poor. Limit outdoor exposure.");
    }
}
