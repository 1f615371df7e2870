pub mod error;
pub mod types;

pub use error::{OverpassError, Result};
pub use types::{Center, Element, OverpassResponse};

use std::time::Duration;

pub struct OverpassClient {
    client: reqwest::Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(12))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch all amenity-tagged nodes and ways within `radius_m` of a point.
    /// Ways come back with their centroid (`out center`).
    pub async fn amenities_around(
        &self,
        lat: f64,
        lng: f64,
        radius_m: u32,
    ) -> Result<Vec<Element>> {
        let query = format!(
            "[out:json][timeout:10];\
             (node(around:{radius_m},{lat},{lng})[amenity];\
              way(around:{radius_m},{lat},{lng})[amenity];);\
             out center;"
        );

        let url = format!("{}/api/interpreter", self.base_url);
        let resp = self
            .client
            .post(&url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: OverpassResponse = resp.json().await?;
        tracing::debug!(
            count = body.elements.len(),
            lat,
            lng,
            radius_m,
            "Overpass query returned"
        );

        Ok(body.elements)
    }
}
