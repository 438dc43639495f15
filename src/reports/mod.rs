//! Neighborhood safety reports built on top of stored ratings.
//!
//! Everything here produces plain data (map markers, chart bars, sentiment
//! counts); drawing it is left to the view layer.

pub mod analytics;
pub mod danger;
pub mod records;
pub mod repository;
pub mod search;
pub mod seed;

pub use analytics::{SentimentDistribution, SentimentReport, TimelinePoint};
pub use danger::{
    average_danger, danger_chart, map_view, neighborhood_average, DangerBand, DangerBar,
    MapMarker, MapView, MAP_CENTER, MAP_ZOOM,
};
pub use records::{
    Comment, NewNeighborhood, NewRating, NewUser, Neighborhood, NeighborhoodForm, Rating,
    RatingForm, User,
};
pub use repository::{InMemoryRepository, SafetyRepository};
pub use search::search_neighborhoods;
pub use seed::{seed_if_empty, SeedSummary};
