//! Normalization of raw POI elements into amenity candidates, and the fixed
//! fallback set used when the live index is unreachable.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use dari_common::{label_for_category, AmenityCandidate, GeoPoint, SEARCH_RADIUS_M};
use overpass_client::{Element, OverpassClient};

use crate::traits::AmenitySource;

/// Name fields tried in order before synthesizing a label from the tag.
const NAME_KEYS: &[&str] = &["name", "brand", "operator", "shop", "cuisine"];

/// Live amenity source backed by the Overpass POI index.
pub struct OverpassSource {
    client: OverpassClient,
}

impl OverpassSource {
    pub fn new(client: OverpassClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AmenitySource for OverpassSource {
    async fn fetch_nearby(&self, center: GeoPoint) -> Result<Vec<AmenityCandidate>> {
        let elements = self
            .client
            .amenities_around(center.lat, center.lng, SEARCH_RADIUS_M)
            .await?;

        let total = elements.len();
        let candidates: Vec<AmenityCandidate> = elements.iter().filter_map(normalize).collect();
        debug!(total, kept = candidates.len(), "Normalized POI elements");

        Ok(candidates)
    }
}

/// Turn one raw element into a candidate, or None when it has no position or
/// no presentable name can be derived.
fn normalize(element: &Element) -> Option<AmenityCandidate> {
    let category = element.tag("amenity")?.to_string();
    let (lat, lng) = element.position()?;
    let name = resolve_name(element, &category)?;

    Some(AmenityCandidate {
        id: element.source_id(),
        name,
        category,
        location: GeoPoint::new(lat, lng),
    })
}

/// Name policy: explicit name, then brand → operator → shop → cuisine, then a
/// synthesized label from the amenity tag. None means the candidate is
/// useless to a listing page and gets dropped.
fn resolve_name(element: &Element, category: &str) -> Option<String> {
    for key in NAME_KEYS {
        if let Some(value) = element.tag(key) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    label_for_category(category).map(String::from)
}

// ---------------------------------------------------------------------------
// Fallback set
// ---------------------------------------------------------------------------

/// (display name, category, lat offset, lng offset) — all within a few
/// hundred meters of the subject property.
const FALLBACK_SET: &[(&str, &str, f64, f64)] = &[
    ("Market", "marketplace", 0.001, 0.001),
    ("Pharmacy", "pharmacy", -0.002, 0.001),
    ("School", "school", 0.002, -0.002),
    ("Restaurant", "restaurant", -0.003, -0.001),
];

/// Deterministic substitute candidates used when the live index is
/// unavailable. Neighborhood data is supplementary: callers always get
/// something to rank rather than an error.
pub fn fallback_candidates(center: GeoPoint) -> Vec<AmenityCandidate> {
    FALLBACK_SET
        .iter()
        .map(|(name, category, d_lat, d_lng)| AmenityCandidate {
            id: format!("fallback/{category}"),
            name: (*name).to_string(),
            category: (*category).to_string(),
            location: GeoPoint::new(center.lat + d_lat, center.lng + d_lng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(id: i64, tags: &[(&str, &str)]) -> Element {
        Element {
            kind: "node".to_string(),
            id,
            lat: Some(36.8631),
            lon: Some(10.2304),
            center: None,
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn explicit_name_wins() {
        let el = element(1, &[("amenity", "cafe"), ("name", "Café des Nattes"), ("brand", "Big Chain")]);
        let c = normalize(&el).unwrap();
        assert_eq!(c.name, "Café des Nattes");
        assert_eq!(c.category, "cafe");
        assert_eq!(c.id, "node/1");
    }

    #[test]
    fn name_falls_through_brand_operator_shop_cuisine() {
        let brand = element(2, &[("amenity", "fast_food"), ("brand", "Baguette & Baguette")]);
        assert_eq!(normalize(&brand).unwrap().name, "Baguette & Baguette");

        let operator = element(3, &[("amenity", "bank"), ("operator", "BIAT")]);
        assert_eq!(normalize(&operator).unwrap().name, "BIAT");

        let shop = element(4, &[("amenity", "marketplace"), ("shop", "greengrocer")]);
        assert_eq!(normalize(&shop).unwrap().name, "greengrocer");

        let cuisine = element(5, &[("amenity", "restaurant"), ("cuisine", "tunisian")]);
        assert_eq!(normalize(&cuisine).unwrap().name, "tunisian");
    }

    #[test]
    fn label_synthesized_from_known_tag() {
        let el = element(6, &[("amenity", "pharmacy")]);
        assert_eq!(normalize(&el).unwrap().name, "Pharmacy");
    }

    #[test]
    fn unresolvable_name_drops_candidate() {
        // No name-ish tags and no label for this amenity value
        let el = element(7, &[("amenity", "waste_basket")]);
        assert!(normalize(&el).is_none());
    }

    #[test]
    fn blank_name_falls_through() {
        let el = element(8, &[("amenity", "school"), ("name", "   ")]);
        assert_eq!(normalize(&el).unwrap().name, "School");
    }

    #[test]
    fn element_without_amenity_tag_dropped() {
        let el = element(9, &[("name", "Somewhere")]);
        assert!(normalize(&el).is_none());
    }

    #[test]
    fn way_uses_centroid() {
        let el = Element {
            kind: "way".to_string(),
            id: 10,
            lat: None,
            lon: None,
            center: Some(overpass_client::Center {
                lat: 36.8610,
                lon: 10.2280,
            }),
            tags: [("amenity", "school"), ("name", "Lycée du Lac")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        let c = normalize(&el).unwrap();
        assert_eq!(c.id, "way/10");
        assert_eq!(c.location, GeoPoint::new(36.8610, 10.2280));
    }

    #[test]
    fn element_without_position_dropped() {
        let el = Element {
            kind: "way".to_string(),
            id: 11,
            lat: None,
            lon: None,
            center: None,
            tags: [("amenity", "school")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        assert!(normalize(&el).is_none());
    }

    #[test]
    fn fallback_set_is_deterministic_and_nearby() {
        let center = GeoPoint::new(36.8625, 10.2297);
        let first = fallback_candidates(center);
        let second = fallback_candidates(center);
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);

        let categories: Vec<&str> = first.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(
            categories,
            vec!["marketplace", "pharmacy", "school", "restaurant"]
        );
        for candidate in &first {
            assert!(candidate.id.starts_with("fallback/"));
            assert!(dari_common::distance_meters(center, candidate.location) < 500);
        }
    }
}
