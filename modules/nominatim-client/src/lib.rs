pub mod error;

pub use error::{NominatimError, Result};

use std::time::Duration;

use serde::Deserialize;

const USER_AGENT: &str = "dari/1.0";

/// Upper bound on free-text queries forwarded to the provider.
const MAX_QUERY_LEN: usize = 200;

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// A resolved place: best-match coordinate plus the provider's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a free-text address to its best-match place. One attempt per
    /// call; the bounded timeout substitutes for cancellation.
    pub async fn resolve(&self, address: &str) -> Result<Place> {
        if address.trim().is_empty() {
            return Err(NominatimError::NoMatch(address.to_string()));
        }
        if address.len() > MAX_QUERY_LEN {
            return Err(NominatimError::QueryTooLong(address.len()));
        }

        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(NominatimError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let results: Vec<SearchResult> = resp.json().await?;
        let first = match results.into_iter().next() {
            Some(r) => r,
            None => return Err(NominatimError::NoMatch(address.to_string())),
        };

        let lat: f64 = first
            .lat
            .parse()
            .map_err(|_| NominatimError::Parse(format!("bad latitude '{}'", first.lat)))?;
        let lon: f64 = first
            .lon
            .parse()
            .map_err(|_| NominatimError::Parse(format!("bad longitude '{}'", first.lon)))?;

        tracing::debug!(address, lat, lon, "Geocoded address");

        Ok(Place {
            lat,
            lon,
            display_name: first.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response() {
        let body = r#"[
            {"place_id": 12345, "lat": "36.8625", "lon": "10.2297",
             "display_name": "Les Berges du Lac 2, Tunis, Tunisia", "importance": 0.6}
        ]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "36.8625");
        assert_eq!(results[0].display_name, "Les Berges du Lac 2, Tunis, Tunisia");
    }

    #[test]
    fn parses_empty_response() {
        let results: Vec<SearchResult> = serde_json::from_str("[]").unwrap();
        assert!(results.is_empty());
    }
}
