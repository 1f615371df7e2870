// Test mocks for the analysis pipeline.
//
// Two mocks matching the external trait boundaries:
// - MockGeocoder (Geocoder) — fixed answer or forced failure, call counter
// - MockSource (AmenitySource) — candidates at fixed offsets around whatever
//   center it is queried with, forced failure, call counter
//
// The cache side needs no mock: MemoryStore is the real in-memory
// implementation and failing_puts() covers the persistence-failure path.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;

use dari_common::{AmenityCandidate, GeoPoint};

use crate::traits::{AmenitySource, Geocoder};

/// Lac 2, Tunis — the subject coordinates most tests center on.
pub const LAC_2: GeoPoint = GeoPoint {
    lat: 36.8625,
    lng: 10.2297,
};

/// One degree of latitude in meters, for readable test offsets.
pub const LAT_DEG_M: f64 = 111_195.0;

// ---------------------------------------------------------------------------
// MockGeocoder
// ---------------------------------------------------------------------------

/// Fixed-answer geocoder. `failing()` makes every call error.
pub struct MockGeocoder {
    answer: Option<GeoPoint>,
    calls: AtomicUsize,
}

impl MockGeocoder {
    pub fn resolving_to(point: GeoPoint) -> Self {
        Self {
            answer: Some(point),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn resolve(&self, address: &str) -> Result<GeoPoint> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Some(point) => Ok(point),
            None => bail!("MockGeocoder: no match for '{address}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockSource
// ---------------------------------------------------------------------------

/// Spec for one mock candidate: (id, name, category, lat offset in degrees,
/// lng offset in degrees).
pub type CandidateSpec = (&'static str, &'static str, &'static str, f64, f64);

/// Amenity source that materializes candidates at fixed offsets around the
/// queried center — the shape of a radius query. The call counter lets tests
/// assert the cache fast path makes no fetch.
pub struct MockSource {
    offsets: Vec<CandidateSpec>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn with_offsets(offsets: &[CandidateSpec]) -> Self {
        Self {
            offsets: offsets.to_vec(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            offsets: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AmenitySource for MockSource {
    async fn fetch_nearby(&self, center: GeoPoint) -> Result<Vec<AmenityCandidate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            bail!("MockSource: forced fetch failure");
        }
        Ok(self
            .offsets
            .iter()
            .map(|(id, name, category, d_lat, d_lng)| AmenityCandidate {
                id: (*id).to_string(),
                name: (*name).to_string(),
                category: (*category).to_string(),
                location: GeoPoint::new(center.lat + d_lat, center.lng + d_lng),
            })
            .collect())
    }
}
