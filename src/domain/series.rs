// Synthetic time series domain models
use chrono::{DateTime, Utc};

/// One hour of the synthetic history. All channels share the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub aqi: f64,
}

impl SeriesPoint {
    pub fn new(
        timestamp: DateTime<Utc>,
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        aqi: f64,
    ) -> Self {
        Self {
            timestamp,
            temperature,
            humidity,
            wind_speed,
            aqi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    pub aqi: f64,
    pub timestamp: DateTime<Utc>,
}

/// History ordered oldest to newest.
#[derive(Debug, Clone)]
pub struct HistorySeries {
    pub points: Vec<SeriesPoint>,
    pub peak: Option<Peak>,
}

impl HistorySeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        let peak = Self::find_peak(&points);
        Self { points, peak }
    }

    /// First occurrence of the highest AQI.
    fn find_peak(points: &[SeriesPoint]) -> Option<Peak> {
        let mut peak: Option<Peak> = None;
        for point in points {
            match peak {
                Some(current) if point.aqi <= current.aqi => {}
                _ => {
                    peak = Some(Peak {
                        aqi: point.aqi,
                        timestamp: point.timestamp,
                    })
                }
            }
        }
        peak
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    pub predicted_aqi: f64,
}

impl ForecastPoint {
    pub fn new(time: DateTime<Utc>, predicted_aqi: f64) -> Self {
        Self {
            time,
            predicted_aqi,
        }
    }
}
