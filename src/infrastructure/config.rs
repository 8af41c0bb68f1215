use crate::application::synthesizer::SynthesisMode;
use crate::domain::aqi::ScalingPolicy;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub openweather: OpenWeatherSettings,
    pub directions: DirectionsSettings,
    pub model: ModelSettings,
    pub synthesis: SynthesisSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenWeatherSettings {
    pub api_key: String,
    pub weather_url: String,
    pub air_pollution_url: String,
    pub geo_url: String,
    pub timeout_secs: u64,
}

/// Google Directions API. Without a key the route endpoint reports the
/// provider as unavailable; the rest of the service is unaffected.
#[derive(Debug, Deserialize, Clone)]
pub struct DirectionsSettings {
    pub api_key: Option<String>,
    pub url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelSettings {
    /// Trained model artifact. Absent or unusable means the fallback formula.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SynthesisSettings {
    pub history_hours: usize,
    pub forecast_steps: usize,
    #[serde(default)]
    pub mode: SynthesisMode,
    pub history_scaling: ScalingPolicy,
}

/// Defaults, then `config/aqi.*`, then `AQI__SECTION__KEY` variables.
/// `OPENWEATHER_API_KEY` and `GOOGLE_API_KEY` win over everything for the
/// API keys.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = base_builder()?
        .add_source(File::with_name("config/aqi").required(false))
        .add_source(Environment::with_prefix("AQI").separator("__").try_parsing(true))
        .set_override_option("openweather.api_key", std::env::var("OPENWEATHER_API_KEY").ok())?
        .set_override_option("directions.api_key", std::env::var("GOOGLE_API_KEY").ok())?
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

fn base_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("openweather.weather_url", "https://api.openweathermap.org/data/2.5/weather")?
        .set_default(
            "openweather.air_pollution_url",
            "https://api.openweathermap.org/data/2.5/air_pollution",
        )?
        .set_default("openweather.geo_url", "http://api.openweathermap.org/geo/1.0/direct")?
        .set_default("openweather.timeout_secs", 10)?
        .set_default("directions.url", "https://maps.googleapis.com/maps/api/directions/json")?
        .set_default("directions.timeout_secs", 10)?
        .set_default("model.path", "aqimodel.json")?
        .set_default("synthesis.history_hours", 24)?
        .set_default("synthesis.forecast_steps", 2)?
        .set_default("synthesis.mode", "cumulative")?
        .set_default("synthesis.history_scaling", "a")
}

impl AppConfig {
    fn validate(&self) -> anyhow::Result<()> {
        if self.openweather.api_key.trim().is_empty() {
            anyhow::bail!("OPENWEATHER_API_KEY is not set");
        }
        if self.synthesis.history_hours == 0 {
            anyhow::bail!("synthesis.history_hours must be at least 1");
        }
        if self.synthesis.forecast_steps == 0 {
            anyhow::bail!("synthesis.forecast_steps must be at least 1");
        }
        Ok(())
    }
}
