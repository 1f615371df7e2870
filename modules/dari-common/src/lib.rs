pub mod config;
pub mod error;
pub mod geo;
pub mod types;

pub use config::Config;
pub use error::DariError;
pub use geo::{distance_meters, travel_minutes, TravelMode};
pub use types::*;
