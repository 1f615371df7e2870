pub mod adapter;
pub mod analyzer;
pub mod ranker;
pub mod store;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use adapter::{fallback_candidates, OverpassSource};
pub use analyzer::{spawn_refresh, AnalyzerConfig, NeighborhoodAnalyzer};
pub use ranker::rank;
pub use store::{MemoryStore, PgStore};
pub use traits::{AmenitySource, AnalysisStore, Geocoder};
