use std::collections::HashMap;

use serde::Deserialize;

/// Top-level Overpass interpreter response.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Centroid returned for ways under `out center`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// One raw element: a node with its own coordinates, or a way with a centroid.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl Element {
    /// Point position: node coordinates, or the way centroid.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }

    /// Source-scoped identifier, e.g. `node/3425176893`.
    pub fn source_id(&self) -> String {
        format!("{}/{}", self.kind, self.id)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_interpreter_response() {
        let body = r#"{
            "version": 0.6,
            "generator": "Overpass API",
            "elements": [
                {"type": "node", "id": 3425176893, "lat": 36.8631, "lon": 10.2304,
                 "tags": {"amenity": "pharmacy", "name": "Pharmacie du Lac"}},
                {"type": "way", "id": 104231, "center": {"lat": 36.8610, "lon": 10.2280},
                 "tags": {"amenity": "school"}},
                {"type": "node", "id": 99, "lat": 36.86, "lon": 10.22}
            ]
        }"#;
        let resp: OverpassResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.elements.len(), 3);

        let node = &resp.elements[0];
        assert_eq!(node.source_id(), "node/3425176893");
        assert_eq!(node.position(), Some((36.8631, 10.2304)));
        assert_eq!(node.tag("name"), Some("Pharmacie du Lac"));

        let way = &resp.elements[1];
        assert_eq!(way.source_id(), "way/104231");
        assert_eq!(way.position(), Some((36.8610, 10.2280)));
        assert_eq!(way.tag("amenity"), Some("school"));

        assert!(resp.elements[2].tags.is_empty());
    }

    #[test]
    fn parses_empty_response() {
        let resp: OverpassResponse = serde_json::from_str(r#"{"elements": []}"#).unwrap();
        assert!(resp.elements.is_empty());
    }
}
