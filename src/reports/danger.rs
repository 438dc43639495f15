//! Danger averages, color bands and the data behind the map and bar chart.

use serde::Serialize;

use super::records::{Neighborhood, Rating};
use super::repository::SafetyRepository;

/// Initial map view: Barranquilla.
pub const MAP_CENTER: (f64, f64) = (10.96854, -74.78132);
pub const MAP_ZOOM: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerBand {
    Green,
    Orange,
    Red,
}

impl DangerBand {
    /// `<= 2` green, `<= 4` orange, anything above red.
    pub fn from_average(average: f64) -> Self {
        if average <= 2.0 {
            DangerBand::Green
        } else if average <= 4.0 {
            DangerBand::Orange
        } else {
            DangerBand::Red
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DangerBand::Green => "green",
            DangerBand::Orange => "orange",
            DangerBand::Red => "red",
        }
    }
}

/// Mean danger level, `None` when there are no ratings.
pub fn average_danger(ratings: &[Rating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let total: u32 = ratings.iter().map(|r| u32::from(r.danger_level)).sum();
    Some(f64::from(total) / ratings.len() as f64)
}

pub fn neighborhood_average<R: SafetyRepository + ?Sized>(
    repo: &R,
    neighborhood_id: i64,
) -> Option<f64> {
    average_danger(&repo.ratings_for(neighborhood_id))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub neighborhood_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub average: Option<f64>,
    pub band: DangerBand,
    pub popup: String,
}

impl MapMarker {
    fn new(neighborhood: Neighborhood, average: Option<f64>) -> Self {
        // Unrated neighborhoods are drawn as level 0.
        let band = DangerBand::from_average(average.unwrap_or(0.0));
        let popup = match average {
            Some(avg) => format!("{}: {avg:.1}", neighborhood.name),
            None => format!("{}: Sin datos", neighborhood.name),
        };
        Self {
            neighborhood_id: neighborhood.id,
            name: neighborhood.name,
            latitude: neighborhood.latitude,
            longitude: neighborhood.longitude,
            average,
            band,
            popup,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<MapMarker>,
}

/// One marker per neighborhood, rated or not.
pub fn map_view<R: SafetyRepository + ?Sized>(repo: &R) -> MapView {
    let markers = repo
        .neighborhoods()
        .into_iter()
        .map(|n| {
            let average = neighborhood_average(repo, n.id);
            MapMarker::new(n, average)
        })
        .collect();
    MapView {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        markers,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DangerBar {
    pub name: String,
    pub average: f64,
    pub band: DangerBand,
}

/// Bars for the "average danger per neighborhood" chart. Unrated
/// neighborhoods are left out.
pub fn danger_chart<R: SafetyRepository + ?Sized>(repo: &R) -> Vec<DangerBar> {
    repo.neighborhoods()
        .into_iter()
        .filter_map(|n| {
            neighborhood_average(repo, n.id).map(|average| DangerBar {
                name: n.name,
                average,
                band: DangerBand::from_average(average),
            })
        })
        .collect()
}
