// AQI estimates, health classification and provider-scale conversion
use super::weather::PollutionBaseline;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiEstimate {
    pub value: f64,
    pub computed_at: DateTime<Utc>,
}

impl AqiEstimate {
    pub fn new(value: f64, computed_at: DateTime<Utc>) -> Self {
        Self { value, computed_at }
    }
}

/// Health buckets used for recommendations.
///
/// Upper bounds are inclusive: 50, 100, 200, 300. Anything above 300
/// (and NaN, which fails every comparison) is `Hazardous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBucket {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Poor,
    Hazardous,
}

impl HealthBucket {
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            HealthBucket::Good
        } else if aqi <= 100.0 {
            HealthBucket::Moderate
        } else if aqi <= 200.0 {
            HealthBucket::UnhealthyForSensitive
        } else if aqi <= 300.0 {
            HealthBucket::Poor
        } else {
            HealthBucket::Hazardous
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            HealthBucket::Good => &[
                "Air quality is good. Enjoy outdoor activities!",
                "Keep windows open for fresh air.",
                "Maintain regular exercise.",
            ],
            HealthBucket::Moderate => &[
                "Air quality is moderate. Sensitive groups should be cautious.",
                "Avoid outdoor exercise if you feel irritation.",
                "Drink more water to stay hydrated.",
            ],
            HealthBucket::UnhealthyForSensitive => &[
                "Air quality is unhealthy for sensitive groups.",
                "Wear a mask when outdoors.",
                "Use an air purifier indoors.",
            ],
            HealthBucket::Poor => &[
                "Air quality is poor. Limit outdoor exposure.",
                "Avoid outdoor exercise.",
                "Keep doors and windows closed.",
            ],
            HealthBucket::Hazardous => &[
                "Air quality is hazardous!",
                "Stay indoors as much as possible.",
                "Use an N95 mask if you must go out.",
                "Consult a doctor if you have breathing issues.",
            ],
        }
    }
}

/// Three-bucket message for point predictions. Deliberately coarser than
/// [`HealthBucket`]; the two tables are not interchangeable.
pub fn classify_message(aqi: f64) -> &'static str {
    if aqi <= 50.0 {
        "Air quality is good."
    } else if aqi <= 100.0 {
        "Air quality is moderate."
    } else {
        "Air quality is poor. Limit outdoor activities."
    }
}

/// Five-bucket health tips for recommendations.
pub fn classify_tips(aqi: f64) -> &'static [&'static str] {
    HealthBucket::from_aqi(aqi).tips()
}

/// Conversion rules from the provider's 1-5 pollution index to AQI units.
///
/// Three rules are in use and they disagree (index 3 maps to 75, 60 or
/// 150). They are kept apart on purpose until product decides on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingPolicy {
    /// index × 25, used by the cumulative history synthesis.
    A,
    /// index × 20, used by the legacy history synthesis.
    B,
    /// Fixed lookup {1: 50, 2: 100, 3: 150, 4: 200, 5: 300}, used by
    /// recommendations. Unknown indices map to 100.
    Table,
}

impl ScalingPolicy {
    pub fn scale(self, baseline: PollutionBaseline) -> f64 {
        let index = match baseline {
            PollutionBaseline::Scaled(value) => return value,
            PollutionBaseline::ProviderIndex(index) => index,
        };

        match self {
            ScalingPolicy::A => f64::from(index) * 25.0,
            ScalingPolicy::B => f64::from(index) * 20.0,
            ScalingPolicy::Table => match index {
                1 => 50.0,
                2 => 100.0,
                3 => 150.0,
                4 => 200.0,
                5 => 300.0,
                _ => 100.0,
            },
        }
    }
}
