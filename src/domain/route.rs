// Route value objects and the route labeling rules
use crate::domain::weather::Coordinates;

const ETA_WEIGHT: f64 = 0.6;
const AQI_WEIGHT: f64 = 0.4;
/// Normalized AQI score for a route without a usable reading.
const MISSING_AQI_SCORE: f64 = 2.0;
/// Balanced labeling only applies once this many routes are compared.
const BALANCED_MIN_ROUTES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStep {
    pub start: Coordinates,
    pub end: Coordinates,
}

/// One alternative as returned by the directions provider (first leg only).
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRoute {
    pub duration_secs: f64,
    pub distance_meters: f64,
    pub steps: Vec<RouteStep>,
    pub overview_polyline: String,
    pub summary: String,
}

impl DirectionsRoute {
    /// Start of the first step, start of the middle step, end of the last step.
    pub fn sample_points(&self) -> Vec<Coordinates> {
        match (self.steps.first(), self.steps.last()) {
            (Some(first), Some(last)) => vec![
                first.start,
                self.steps[self.steps.len() / 2].start,
                last.end,
            ],
            _ => Vec::new(),
        }
    }

    pub fn eta_minutes(&self) -> u64 {
        round_half_up(self.duration_secs / 60.0) as u64
    }

    pub fn distance_km(&self) -> u64 {
        round_half_up(self.distance_meters / 1000.0) as u64
    }
}

/// Halves round toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteLabel {
    Fastest,
    CleanestAir,
    Balanced,
    Alternative,
}

impl RouteLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteLabel::Fastest => "Fastest Route",
            RouteLabel::CleanestAir => "Cleanest Air Route",
            RouteLabel::Balanced => "Balanced Route",
            RouteLabel::Alternative => "Alternative Route",
        }
    }
}

/// A route with its travel figures and sampled pollution index.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoute {
    pub eta_minutes: u64,
    pub distance_km: u64,
    /// Averaged provider index, `None` when no sample had a reading.
    pub aqi: Option<u32>,
    pub overview_polyline: String,
    pub summary: String,
    pub label: RouteLabel,
}

impl ScoredRoute {
    pub fn new(route: DirectionsRoute, aqi: Option<u32>) -> Self {
        let summary = if route.summary.is_empty() {
            "Route".to_string()
        } else {
            route.summary.clone()
        };
        Self {
            eta_minutes: route.eta_minutes(),
            distance_km: route.distance_km(),
            aqi,
            overview_polyline: route.overview_polyline,
            summary,
            label: RouteLabel::Alternative,
        }
    }

    /// A zero index counts as no reading.
    fn usable_aqi(&self) -> Option<u32> {
        self.aqi.filter(|aqi| *aqi != 0)
    }
}

/// Labels routes in place, keeping their order.
///
/// Every route with the minimum ETA is the fastest. Of the rest, those with
/// the minimum sampled index are the cleanest. When at least three routes
/// are compared and some are still unlabeled, the one with the lowest
/// `eta/min_eta * 0.6 + aqi/min_aqi * 0.4` score is the balanced route.
pub fn label_routes(routes: &mut [ScoredRoute]) {
    let Some(min_eta) = routes.iter().map(|r| r.eta_minutes).min() else {
        return;
    };
    let min_aqi = routes.iter().filter_map(|r| r.aqi).min();

    let mut scores: Vec<Option<f64>> = vec![None; routes.len()];
    for (route, score) in routes.iter_mut().zip(scores.iter_mut()) {
        if route.eta_minutes == min_eta {
            route.label = RouteLabel::Fastest;
        } else if route.usable_aqi().is_some() && route.aqi == min_aqi {
            route.label = RouteLabel::CleanestAir;
        } else if let Some(min_aqi) = min_aqi {
            let eta_score = route.eta_minutes as f64 / min_eta as f64;
            let aqi_score = route
                .usable_aqi()
                .map_or(MISSING_AQI_SCORE, |aqi| f64::from(aqi) / f64::from(min_aqi));
            *score = Some(eta_score * ETA_WEIGHT + aqi_score * AQI_WEIGHT);
        }
    }

    let unlabeled = routes.iter().any(|r| r.label == RouteLabel::Alternative);
    if !unlabeled || routes.len() < BALANCED_MIN_ROUTES {
        return;
    }

    let best = scores
        .iter()
        .enumerate()
        .filter_map(|(index, score)| score.filter(|s| *s > 0.0).map(|s| (index, s)))
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((index, _)) = best {
        routes[index].label = RouteLabel::Balanced;
    }
}
