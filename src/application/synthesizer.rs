// Time series synthesis - Smoothed history and perturbed forecasts
use crate::application::prediction_strategy::PredictionStrategy;
use crate::domain::series::{ForecastPoint, HistorySeries, SeriesPoint};
use crate::domain::weather::WeatherObservation;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Deserialize;

const HISTORY_TEMPERATURE_BOUND: f64 = 0.4;
const HISTORY_HUMIDITY_BOUND: f64 = 1.2;
const HISTORY_WIND_BOUND: f64 = 0.3;
const HISTORY_AQI_BOUND: f64 = 3.0;

const FORECAST_TEMPERATURE_BOUND: f64 = 0.6;
const FORECAST_HUMIDITY_BOUND: f64 = 2.0;
const FORECAST_WIND_BOUND: f64 = 0.3;

/// Weather channels of the random walk are divided by this; AQI is not.
const WALK_DAMPING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisMode {
    /// Running sum of perturbations, rounded to 2 decimals.
    #[default]
    Cumulative,
    /// Legacy: fresh noise every hour, unrounded.
    Independent,
}

/// Perturbation draws for every channel of a history, one per hour.
#[derive(Debug, Clone)]
struct ChannelSamples {
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    wind: Vec<f64>,
    aqi: Vec<f64>,
}

impl ChannelSamples {
    fn draw<R: Rng + ?Sized>(rng: &mut R, hours: usize) -> Self {
        Self {
            temperature: draw_uniform(rng, HISTORY_TEMPERATURE_BOUND, hours),
            humidity: draw_uniform(rng, HISTORY_HUMIDITY_BOUND, hours),
            wind: draw_uniform(rng, HISTORY_WIND_BOUND, hours),
            aqi: draw_uniform(rng, HISTORY_AQI_BOUND, hours),
        }
    }

    fn len(&self) -> usize {
        self.aqi.len()
    }
}

fn draw_uniform<R: Rng + ?Sized>(rng: &mut R, bound: f64, count: usize) -> Vec<f64> {
    (0..count).map(|_| rng.gen_range(-bound..bound)).collect()
}

fn running_sum(samples: &[f64]) -> Vec<f64> {
    samples
        .iter()
        .scan(0.0, |total, sample| {
            *total += sample;
            Some(*total)
        })
        .collect()
}

/// Two decimals from the exact binary value, ties to even.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeSeriesSynthesizer {
    mode: SynthesisMode,
}

impl TimeSeriesSynthesizer {
    pub fn new(mode: SynthesisMode) -> Self {
        Self { mode }
    }

    /// Builds `hours` points ending one hour before `now`, oldest first.
    pub fn synthesize_history<R: Rng + ?Sized>(
        &self,
        baseline: &WeatherObservation,
        baseline_aqi: f64,
        hours: usize,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> HistorySeries {
        let samples = ChannelSamples::draw(rng, hours);
        self.history_from_samples(baseline, baseline_aqi, &samples, now)
    }

    fn history_from_samples(
        &self,
        baseline: &WeatherObservation,
        baseline_aqi: f64,
        samples: &ChannelSamples,
        now: DateTime<Utc>,
    ) -> HistorySeries {
        let hours = samples.len();

        let (temperature, humidity, wind, aqi) = match self.mode {
            SynthesisMode::Cumulative => {
                let damped = |channel: &[f64]| -> Vec<f64> {
                    running_sum(channel).into_iter().map(|s| s / WALK_DAMPING).collect()
                };
                (
                    damped(&samples.temperature[..]),
                    damped(&samples.humidity[..]),
                    damped(&samples.wind[..]),
                    running_sum(&samples.aqi),
                )
            }
            SynthesisMode::Independent => (
                samples.temperature.clone(),
                samples.humidity.clone(),
                samples.wind.clone(),
                samples.aqi.clone(),
            ),
        };

        let finish = |value: f64| match self.mode {
            SynthesisMode::Cumulative => round2(value),
            SynthesisMode::Independent => value,
        };

        let points = (0..hours)
            .map(|i| {
                let timestamp = now - Duration::hours((hours - i) as i64);
                SeriesPoint::new(
                    timestamp,
                    finish(baseline.temperature + temperature[i]),
                    finish(baseline.humidity + humidity[i]),
                    finish((baseline.wind_speed + wind[i]).max(0.0)),
                    finish(baseline_aqi + aqi[i]),
                )
            })
            .collect();

        HistorySeries::new(points)
    }

    /// Each step perturbs the *current* observation afresh; steps never
    /// accumulate.
    pub fn synthesize_forecast<R: Rng + ?Sized>(
        &self,
        current: &WeatherObservation,
        strategy: &dyn PredictionStrategy,
        steps: usize,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<ForecastPoint> {
        (1..=steps)
            .map(|step| {
                let perturbed = WeatherObservation::new(
                    current.temperature
                        + rng.gen_range(-FORECAST_TEMPERATURE_BOUND..FORECAST_TEMPERATURE_BOUND),
                    current.humidity
                        + rng.gen_range(-FORECAST_HUMIDITY_BOUND..FORECAST_HUMIDITY_BOUND),
                    (current.wind_speed + rng.gen_range(-FORECAST_WIND_BOUND..FORECAST_WIND_BOUND))
                        .max(0.0),
                );
                let predicted_aqi = round2(strategy.predict(&perturbed));
                ForecastPoint::new(now + Duration::hours(step as i64), predicted_aqi)
            })
            .collect()
    }
}
