// Trait abstractions for the analyzer's collaborators.
//
// Geocoder and AmenitySource wrap the external HTTP providers; AnalysisStore
// is the per-property cache. These enable deterministic testing with
// MockGeocoder, MockSource and MemoryStore: no network, no database.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use dari_common::{AmenityCandidate, GeoPoint, NeighborhoodAnalysis};

// ---------------------------------------------------------------------------
// Geocoder
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a free-text address to its best-match coordinate.
    async fn resolve(&self, address: &str) -> Result<GeoPoint>;
}

#[async_trait]
impl Geocoder for nominatim_client::NominatimClient {
    async fn resolve(&self, address: &str) -> Result<GeoPoint> {
        let place = self.resolve(address).await?;
        Ok(GeoPoint::new(place.lat, place.lon))
    }
}

// ---------------------------------------------------------------------------
// AmenitySource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait AmenitySource: Send + Sync {
    /// Fetch normalized amenity candidates around a center point.
    async fn fetch_nearby(&self, center: GeoPoint) -> Result<Vec<AmenityCandidate>>;
}

// ---------------------------------------------------------------------------
// AnalysisStore
// ---------------------------------------------------------------------------

/// Cache of the most recent analysis per property.
///
/// Implemented by PgStore (postgres) and MemoryStore (tests, callers that can
/// afford to lose the cache on restart). `get` must treat an expired record
/// identically to a missing one.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn get(&self, property_id: Uuid) -> Result<Option<NeighborhoodAnalysis>>;

    /// Upsert keyed by property_id, replacing any prior record entirely.
    async fn put(&self, analysis: &NeighborhoodAnalysis) -> Result<()>;

    async fn delete(&self, property_id: Uuid) -> Result<()>;
}
