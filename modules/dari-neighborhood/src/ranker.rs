//! Distance ranking of amenity candidates.
//!
//! Pure functions: compute the distance from the subject property, drop
//! anything beyond the relevance radius or missing required fields, sort
//! closest-first, cap the list.

use dari_common::{
    distance_meters, travel_minutes, AmenityCandidate, AmenityRecord, GeoPoint, TravelMode,
    MAX_AMENITIES, MAX_RELEVANCE_RADIUS_M,
};

/// Rank candidates by straight-line distance from `center`.
///
/// The sort is stable: equal distances keep input order. Output is capped at
/// MAX_AMENITIES records, all within MAX_RELEVANCE_RADIUS_M.
pub fn rank(center: GeoPoint, candidates: Vec<AmenityCandidate>) -> Vec<AmenityRecord> {
    let mut records: Vec<AmenityRecord> = candidates
        .into_iter()
        .filter_map(|c| to_record(center, c))
        .collect();

    records.sort_by_key(|r| r.distance_meters);
    records.truncate(MAX_AMENITIES);
    records
}

/// The adapter guarantees well-formed candidates; this is the last gate
/// before persistence, so the field check is repeated here.
fn to_record(center: GeoPoint, candidate: AmenityCandidate) -> Option<AmenityRecord> {
    if candidate.id.is_empty()
        || candidate.name.trim().is_empty()
        || candidate.category.trim().is_empty()
        || !candidate.location.is_valid()
    {
        return None;
    }

    let distance = distance_meters(center, candidate.location);
    if distance > MAX_RELEVANCE_RADIUS_M {
        return None;
    }

    Some(AmenityRecord {
        walk_minutes: travel_minutes(distance, TravelMode::Walk),
        drive_minutes: travel_minutes(distance, TravelMode::Drive),
        distance_meters: distance,
        id: candidate.id,
        name: candidate.name,
        category: candidate.category,
        location: candidate.location,
    })
}
