// Domain layer - Value objects, classification tables and errors
pub mod aqi;
pub mod error;
pub mod route;
pub mod series;
pub mod weather;
