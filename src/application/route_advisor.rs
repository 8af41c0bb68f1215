// Route advisor - Alternative routes ranked by travel time and air quality
use crate::application::directions_provider::DirectionsProvider;
use crate::application::weather_provider::WeatherProvider;
use crate::domain::error::AqiError;
use crate::domain::route::{label_routes, round_half_up, DirectionsRoute, ScoredRoute};
use crate::domain::weather::{Coordinates, PollutionBaseline};
use futures::future::join_all;
use std::sync::Arc;

const MAX_ROUTES: usize = 3;

#[derive(Clone)]
pub struct RouteAdvisor {
    directions: Arc<dyn DirectionsProvider>,
    pollution: Arc<dyn WeatherProvider>,
}

impl RouteAdvisor {
    pub fn new(directions: Arc<dyn DirectionsProvider>, pollution: Arc<dyn WeatherProvider>) -> Self {
        Self {
            directions,
            pollution,
        }
    }

    pub async fn advise(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<ScoredRoute>, AqiError> {
        let (start, end) = require_endpoints(start, end)?;
        let candidates = self.directions.directions(start, end).await?;
        if candidates.is_empty() {
            return Err(AqiError::NotFound("No routes found".to_string()));
        }

        let mut routes = join_all(
            candidates
                .into_iter()
                .take(MAX_ROUTES)
                .map(|route| self.score(route)),
        )
        .await;
        label_routes(&mut routes);

        tracing::debug!("Ranked {} routes from {} to {}", routes.len(), start, end);
        Ok(routes)
    }

    async fn score(&self, route: DirectionsRoute) -> ScoredRoute {
        let readings = join_all(
            route
                .sample_points()
                .into_iter()
                .map(|point| self.reading_at(point)),
        )
        .await;
        ScoredRoute::new(route, average_index(&readings))
    }

    /// A failed or empty lookup only loses this sample.
    async fn reading_at(&self, point: Coordinates) -> Option<f64> {
        match self.pollution.air_pollution(point).await {
            Ok(Some(PollutionBaseline::ProviderIndex(index))) => Some(f64::from(index)),
            Ok(Some(PollutionBaseline::Scaled(value))) => Some(value),
            Ok(None) => {
                tracing::debug!("No pollution reading at {:?}", point);
                None
            }
            Err(e) => {
                tracing::warn!("Pollution lookup at {:?} failed: {}", point, e);
                None
            }
        }
    }
}

fn require_endpoints<'a>(
    start: Option<&'a str>,
    end: Option<&'a str>,
) -> Result<(&'a str, &'a str), AqiError> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(AqiError::MissingEndpoints),
    }
}

/// Mean of the readings that exist, halves rounded up.
fn average_index(readings: &[Option<f64>]) -> Option<u32> {
    let valid: Vec<f64> = readings.iter().flatten().copied().collect();
    if valid.is_empty() {
        return None;
    }
    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    Some(round_half_up(mean) as u32)
}
