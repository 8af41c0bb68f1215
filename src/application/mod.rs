// Application layer - Prediction, synthesis and use cases
pub mod aqi_service;
pub mod directions_provider;
pub mod estimation_service;
pub mod prediction_strategy;
pub mod route_advisor;
pub mod synthesizer;
pub mod weather_provider;
