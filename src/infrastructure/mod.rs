// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod google_directions_client;
pub mod http_response;
pub mod model_loader;
pub mod openweather_client;
