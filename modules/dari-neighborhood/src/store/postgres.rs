//! Durable cache store backed by Postgres.
//!
//! One row per property; the amenity list is stored as JSONB. Expiration is
//! enforced at read time. `reap_expired` exists for periodic garbage
//! collection, but correctness never depends on it running.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use dari_common::{AmenityRecord, GeoPoint, NeighborhoodAnalysis};

use crate::traits::AnalysisStore;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS neighborhood_analyses (
                property_id  UUID             PRIMARY KEY,
                address      TEXT             NOT NULL,
                lat          DOUBLE PRECISION NOT NULL,
                lng          DOUBLE PRECISION NOT NULL,
                amenities    JSONB            NOT NULL,
                last_updated TIMESTAMPTZ      NOT NULL,
                expires_at   TIMESTAMPTZ      NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete rows past their expiry. Returns the number removed.
    pub async fn reap_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM neighborhood_analyses WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_analysis(row: &PgRow) -> Result<NeighborhoodAnalysis> {
    let amenities: serde_json::Value = row.try_get("amenities")?;
    let amenities: Vec<AmenityRecord> = serde_json::from_value(amenities)?;
    Ok(NeighborhoodAnalysis {
        property_id: row.try_get("property_id")?,
        address: row.try_get("address")?,
        location: GeoPoint::new(row.try_get("lat")?, row.try_get("lng")?),
        amenities,
        last_updated: row.try_get("last_updated")?,
        expires_at: row.try_get("expires_at")?,
    })
}

#[async_trait]
impl AnalysisStore for PgStore {
    async fn get(&self, property_id: Uuid) -> Result<Option<NeighborhoodAnalysis>> {
        let row = sqlx::query(
            r#"
            SELECT property_id, address, lat, lng, amenities, last_updated, expires_at
            FROM neighborhood_analyses
            WHERE property_id = $1 AND expires_at > now()
            "#,
        )
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_analysis).transpose()
    }

    async fn put(&self, analysis: &NeighborhoodAnalysis) -> Result<()> {
        let amenities = serde_json::to_value(&analysis.amenities)?;
        sqlx::query(
            r#"
            INSERT INTO neighborhood_analyses
                (property_id, address, lat, lng, amenities, last_updated, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (property_id) DO UPDATE SET
                address = EXCLUDED.address,
                lat = EXCLUDED.lat,
                lng = EXCLUDED.lng,
                amenities = EXCLUDED.amenities,
                last_updated = EXCLUDED.last_updated,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(analysis.property_id)
        .bind(&analysis.address)
        .bind(analysis.location.lat)
        .bind(analysis.location.lng)
        .bind(amenities)
        .bind(analysis.last_updated)
        .bind(analysis.expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, property_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM neighborhood_analyses WHERE property_id = $1")
            .bind(property_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
