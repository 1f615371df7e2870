use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Geo types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the point lies in the valid WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

// --- Analysis constants ---

/// How long a cached analysis stays servable.
pub const ANALYSIS_TTL_DAYS: i64 = 30;

/// Radius queried against the POI index.
pub const SEARCH_RADIUS_M: u32 = 1200;

/// Amenities farther than this are not useful neighborhood context.
pub const MAX_RELEVANCE_RADIUS_M: u32 = 2000;

/// Ranked lists are capped at this many records.
pub const MAX_AMENITIES: usize = 50;

// --- Amenities ---

/// A normalized point of interest before ranking: name already resolved,
/// distance not yet computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityCandidate {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: GeoPoint,
}

/// One ranked point of interest near a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenityRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: GeoPoint,
    pub distance_meters: u32,
    pub walk_minutes: u32,
    pub drive_minutes: u32,
}

/// The cached analysis for one property. Replaced whole, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodAnalysis {
    pub property_id: Uuid,
    /// Free-text address as supplied by the caller, kept for re-geocoding and audit.
    pub address: String,
    pub location: GeoPoint,
    /// Closest first, capped at MAX_AMENITIES.
    pub amenities: Vec<AmenityRecord>,
    pub last_updated: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NeighborhoodAnalysis {
    /// Build a record stamped `now`, expiring after the standard TTL.
    pub fn fresh(
        property_id: Uuid,
        address: &str,
        location: GeoPoint,
        amenities: Vec<AmenityRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            property_id,
            address: address.to_string(),
            location,
            amenities,
            last_updated: now,
            expires_at: now + Duration::days(ANALYSIS_TTL_DAYS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// --- Category labels ---

/// Fallback display labels for amenity tags that carry no usable name.
pub fn label_for_category(tag: &str) -> Option<&'static str> {
    let label = match tag {
        "restaurant" => "Restaurant",
        "fast_food" => "Fast Food",
        "cafe" => "Cafe",
        "bar" => "Bar",
        "pharmacy" => "Pharmacy",
        "school" => "School",
        "kindergarten" => "Kindergarten",
        "college" | "university" => "University",
        "hospital" => "Hospital",
        "clinic" => "Clinic",
        "doctors" => "Doctor's Office",
        "dentist" => "Dentist",
        "bank" => "Bank",
        "atm" => "ATM",
        "marketplace" => "Market",
        "supermarket" => "Supermarket",
        "fuel" => "Fuel Station",
        "post_office" => "Post Office",
        "police" => "Police Station",
        "bus_station" => "Bus Station",
        "taxi" => "Taxi Stand",
        "parking" => "Parking",
        "place_of_worship" => "Place of Worship",
        "gym" | "fitness_centre" => "Gym",
        "library" => "Library",
        "cinema" => "Cinema",
        _ => return None,
    };
    Some(label)
}
