use crate::types::GeoPoint;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Minutes to cover one kilometer on foot (2.5 km/h).
const WALK_MIN_PER_KM: f64 = 24.0;

/// Minutes to cover one kilometer driving in dense urban traffic (10 km/h).
const DRIVE_MIN_PER_KM: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walk,
    Drive,
}

impl TravelMode {
    fn minutes_per_km(self) -> f64 {
        match self {
            Self::Walk => WALK_MIN_PER_KM,
            Self::Drive => DRIVE_MIN_PER_KM,
        }
    }
}

/// Haversine great-circle distance between two points, rounded to the
/// nearest meter.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> u32 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    (EARTH_RADIUS_M * c).round() as u32
}

/// Estimated minutes to cover `distance_meters` in the given mode, rounded
/// to the nearest minute.
pub fn travel_minutes(distance_meters: u32, mode: TravelMode) -> u32 {
    let km = distance_meters as f64 / 1000.0;
    (km * mode.minutes_per_km()).round() as u32
}
