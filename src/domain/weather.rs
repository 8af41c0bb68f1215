// Weather and pollution value objects

/// A single weather reading for one city at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherObservation {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

impl WeatherObservation {
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
        }
    }

    /// Feature vector in the order the regression models expect.
    pub fn features(&self) -> [f64; 3] {
        [self.temperature, self.humidity, self.wind_speed]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Current pollution level as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollutionBaseline {
    /// Provider scale, 1 (good) to 5 (very poor).
    ProviderIndex(u8),
    /// Already expressed in AQI units.
    Scaled(f64),
}
