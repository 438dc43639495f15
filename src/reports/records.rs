//! Users, neighborhoods, ratings and the raw forms they are created from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::RecordError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighborhood {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A danger rating (1 = calm, 5 = very dangerous) with an optional comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub id: i64,
    pub user_id: i64,
    pub neighborhood_id: i64,
    pub danger_level: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored, non-empty comment and when it was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNeighborhood {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewNeighborhood {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    pub user_id: i64,
    pub neighborhood_id: i64,
    pub danger_level: i64,
    pub comment: Option<String>,
    /// Defaults to the insertion time.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewRating {
    pub fn new(user_id: i64, neighborhood_id: i64, danger_level: i64) -> Self {
        Self {
            user_id,
            neighborhood_id,
            danger_level,
            comment: None,
            created_at: None,
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Raw rating form fields as submitted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingForm {
    #[serde(rename = "usuario_id")]
    pub user_id: Option<String>,
    #[serde(rename = "barrio_id")]
    pub neighborhood_id: Option<String>,
    #[serde(rename = "nivel_peligrosidad")]
    pub danger_level: Option<String>,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
}

impl RatingForm {
    /// Check presence, then parse. A blank comment is dropped.
    pub fn parse(&self) -> Result<NewRating, RecordError> {
        let (Some(user_id), Some(neighborhood_id), Some(danger_level)) = (
            non_blank(&self.user_id),
            non_blank(&self.neighborhood_id),
            non_blank(&self.danger_level),
        ) else {
            return Err(RecordError::MissingFields);
        };

        Ok(NewRating {
            user_id: parse_field(user_id)?,
            neighborhood_id: parse_field(neighborhood_id)?,
            danger_level: parse_field(danger_level)?,
            comment: non_blank(&self.comment).map(str::to_string),
            created_at: None,
        })
    }
}

/// Raw "add neighborhood" form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeighborhoodForm {
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    #[serde(rename = "latitud")]
    pub latitude: Option<String>,
    #[serde(rename = "longitud")]
    pub longitude: Option<String>,
}

impl NeighborhoodForm {
    pub fn parse(&self) -> Result<NewNeighborhood, RecordError> {
        let (Some(name), Some(latitude), Some(longitude)) = (
            non_blank(&self.name),
            non_blank(&self.latitude),
            non_blank(&self.longitude),
        ) else {
            return Err(RecordError::MissingFields);
        };

        Ok(NewNeighborhood {
            name: name.to_string(),
            latitude: parse_field(latitude)?,
            longitude: parse_field(longitude)?,
        })
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_field<T: std::str::FromStr>(value: &str) -> Result<T, RecordError> {
    value
        .parse()
        .map_err(|_| RecordError::InvalidData(format!("`{value}` is not a valid number")))
}
