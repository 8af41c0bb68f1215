// Provider trait for driving directions
use crate::application::weather_provider::ProviderError;
use crate::domain::route::DirectionsRoute;
use async_trait::async_trait;

#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Alternative routes between two free-form places, best first.
    /// An empty list means the provider found no route.
    async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<DirectionsRoute>, ProviderError>;
}
