//! The analysis entry point: cache check, coordinate resolution, fetch,
//! rank, persist.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use dari_common::{AmenityRecord, DariError, GeoPoint, NeighborhoodAnalysis};

use crate::adapter::fallback_candidates;
use crate::ranker::rank;
use crate::traits::{AmenitySource, AnalysisStore, Geocoder};

/// Tunable knobs for the analyzer. The drift tolerance is deliberately a
/// config value: 0.001 degrees (~100 m) is a default, not a requirement.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Substituted when geocoding fails; analysis must never block on it.
    pub default_region_center: GeoPoint,
    /// Per-axis coordinate shift beyond which a cached analysis is stale.
    pub drift_tolerance_deg: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            default_region_center: dari_common::config::DEFAULT_REGION_CENTER,
            drift_tolerance_deg: 0.001,
        }
    }
}

/// Orchestrates one property's neighborhood analysis end to end.
///
/// Collaborators are constructor-injected so tests can substitute fakes; the
/// analyzer holds no other state. Transient provider failures degrade to the
/// documented fallbacks and are never surfaced to callers; only a caller
/// contract violation errors.
pub struct NeighborhoodAnalyzer {
    geocoder: Arc<dyn Geocoder>,
    source: Arc<dyn AmenitySource>,
    store: Arc<dyn AnalysisStore>,
    config: AnalyzerConfig,
}

impl NeighborhoodAnalyzer {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        source: Arc<dyn AmenitySource>,
        store: Arc<dyn AnalysisStore>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            geocoder,
            source,
            store,
            config,
        }
    }

    /// Analyze the neighborhood of one property.
    ///
    /// Serves from cache when an unexpired record exists and the supplied
    /// coordinates have not drifted beyond tolerance; otherwise recomputes
    /// and persists a replacement record.
    pub async fn analyze(
        &self,
        property_id: Uuid,
        address: &str,
        coordinates: Option<GeoPoint>,
    ) -> Result<Vec<AmenityRecord>, DariError> {
        if property_id.is_nil() {
            return Err(DariError::Validation(
                "property_id must not be nil".to_string(),
            ));
        }

        // 1-3. Cache check with drift invalidation.
        match self.store.get(property_id).await {
            Ok(Some(cached)) => match coordinates {
                Some(supplied) if self.drifted(cached.location, supplied) => {
                    info!(%property_id, "Coordinates drifted, invalidating cached analysis");
                    if let Err(e) = self.store.delete(property_id).await {
                        warn!(%property_id, error = %e, "Failed to delete stale analysis");
                    }
                }
                _ => {
                    debug!(%property_id, "Serving neighborhood analysis from cache");
                    return Ok(cached.amenities);
                }
            },
            Ok(None) => {}
            Err(e) => {
                // A broken cache read falls through to recompute
                warn!(%property_id, error = %e, "Cache lookup failed");
            }
        }

        // 4. Resolve a working coordinate.
        let center = self.resolve_center(address, coordinates).await;

        // 5. Fetch and rank.
        let candidates = match self.source.fetch_nearby(center).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(%property_id, error = %e, "POI fetch failed, using fallback amenity set");
                fallback_candidates(center)
            }
        };
        let amenities = rank(center, candidates);

        // 6. Persist. A write failure costs a redundant recompute later, not
        // the in-flight result.
        let analysis =
            NeighborhoodAnalysis::fresh(property_id, address, center, amenities, Utc::now());
        if let Err(e) = self.store.put(&analysis).await {
            warn!(%property_id, error = %e, "Failed to persist neighborhood analysis");
        }

        info!(
            %property_id,
            amenities = analysis.amenities.len(),
            "Neighborhood analysis complete"
        );
        Ok(analysis.amenities)
    }

    /// Cache contents for a property without triggering computation.
    pub async fn get_cached(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Vec<AmenityRecord>>, DariError> {
        let cached = self
            .store
            .get(property_id)
            .await
            .map_err(|e| DariError::Persistence(e.to_string()))?;
        Ok(cached.map(|a| a.amenities))
    }

    fn drifted(&self, stored: GeoPoint, supplied: GeoPoint) -> bool {
        (stored.lat - supplied.lat).abs() > self.config.drift_tolerance_deg
            || (stored.lng - supplied.lng).abs() > self.config.drift_tolerance_deg
    }

    async fn resolve_center(&self, address: &str, coordinates: Option<GeoPoint>) -> GeoPoint {
        if let Some(supplied) = coordinates {
            if supplied.is_valid() {
                return supplied;
            }
            warn!(
                lat = supplied.lat,
                lng = supplied.lng,
                "Supplied coordinates out of range, re-geocoding"
            );
        }

        match self.geocoder.resolve(address).await {
            Ok(point) if point.is_valid() => point,
            Ok(point) => {
                warn!(
                    lat = point.lat,
                    lng = point.lng,
                    "Geocoder returned out-of-range point, using region center"
                );
                self.config.default_region_center
            }
            Err(e) => {
                warn!(address, error = %e, "Geocoding failed, using region center");
                self.config.default_region_center
            }
        }
    }
}

/// Fire-and-forget analysis from the property write path. Failure is logged,
/// never propagated to the caller saving the property.
pub fn spawn_refresh(
    analyzer: Arc<NeighborhoodAnalyzer>,
    property_id: Uuid,
    address: String,
    coordinates: Option<GeoPoint>,
) {
    tokio::spawn(async move {
        if let Err(e) = analyzer.analyze(property_id, &address, coordinates).await {
            warn!(%property_id, error = %e, "Background neighborhood analysis failed");
        }
    });
}
