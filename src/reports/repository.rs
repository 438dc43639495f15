//! Storage seam for users, neighborhoods and ratings.
//!
//! The application keeps its records in an embedded relational database;
//! [`InMemoryRepository`] implements the same contract for tests and demos.

use chrono::Utc;

use super::records::{
    Comment, NewNeighborhood, NewRating, NewUser, Neighborhood, Rating, User,
};
use crate::core::RecordError;

pub const MIN_DANGER_LEVEL: i64 = 1;
pub const MAX_DANGER_LEVEL: i64 = 5;

pub trait SafetyRepository {
    /// Fails with [`RecordError::DuplicateEmail`] if the email is taken.
    fn add_user(&mut self, user: NewUser) -> Result<User, RecordError>;

    fn add_neighborhood(
        &mut self,
        neighborhood: NewNeighborhood,
    ) -> Result<Neighborhood, RecordError>;

    /// Fails if the danger level is outside 1..=5 or if the user or
    /// neighborhood does not exist.
    fn add_rating(&mut self, rating: NewRating) -> Result<Rating, RecordError>;

    fn user(&self, id: i64) -> Option<User>;

    fn neighborhood(&self, id: i64) -> Option<Neighborhood>;

    fn users(&self) -> Vec<User>;

    fn neighborhoods(&self) -> Vec<Neighborhood>;

    fn ratings_for(&self, neighborhood_id: i64) -> Vec<Rating>;

    /// Every non-empty comment, oldest insert first.
    fn comments(&self) -> Vec<Comment>;
}

/// Vec-backed repository with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    users: Vec<User>,
    neighborhoods: Vec<Neighborhood>,
    ratings: Vec<Rating>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(len: usize) -> i64 {
        len as i64 + 1
    }
}

impl SafetyRepository for InMemoryRepository {
    fn add_user(&mut self, user: NewUser) -> Result<User, RecordError> {
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(RecordError::DuplicateEmail(user.email));
        }
        let user = User {
            id: Self::next_id(self.users.len()),
            name: user.name,
            email: user.email,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn add_neighborhood(
        &mut self,
        neighborhood: NewNeighborhood,
    ) -> Result<Neighborhood, RecordError> {
        let neighborhood = Neighborhood {
            id: Self::next_id(self.neighborhoods.len()),
            name: neighborhood.name,
            latitude: neighborhood.latitude,
            longitude: neighborhood.longitude,
        };
        self.neighborhoods.push(neighborhood.clone());
        Ok(neighborhood)
    }

    fn add_rating(&mut self, rating: NewRating) -> Result<Rating, RecordError> {
        if !(MIN_DANGER_LEVEL..=MAX_DANGER_LEVEL).contains(&rating.danger_level) {
            return Err(RecordError::DangerLevelOutOfRange(rating.danger_level));
        }
        if self.user(rating.user_id).is_none() {
            return Err(RecordError::NotFound {
                kind: "user",
                id: rating.user_id,
            });
        }
        if self.neighborhood(rating.neighborhood_id).is_none() {
            return Err(RecordError::NotFound {
                kind: "neighborhood",
                id: rating.neighborhood_id,
            });
        }

        let rating = Rating {
            id: Self::next_id(self.ratings.len()),
            user_id: rating.user_id,
            neighborhood_id: rating.neighborhood_id,
            danger_level: rating.danger_level as u8,
            comment: rating.comment,
            created_at: rating.created_at.unwrap_or_else(Utc::now),
        };
        self.ratings.push(rating.clone());
        Ok(rating)
    }

    fn user(&self, id: i64) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    fn neighborhood(&self, id: i64) -> Option<Neighborhood> {
        self.neighborhoods.iter().find(|n| n.id == id).cloned()
    }

    fn users(&self) -> Vec<User> {
        self.users.clone()
    }

    fn neighborhoods(&self) -> Vec<Neighborhood> {
        self.neighborhoods.clone()
    }

    fn ratings_for(&self, neighborhood_id: i64) -> Vec<Rating> {
        self.ratings
            .iter()
            .filter(|r| r.neighborhood_id == neighborhood_id)
            .cloned()
            .collect()
    }

    fn comments(&self) -> Vec<Comment> {
        self.ratings
            .iter()
            .filter_map(|r| match &r.comment {
                Some(text) if !text.is_empty() => Some(Comment {
                    text: text.clone(),
                    created_at: r.created_at,
                }),
                _ => None,
            })
            .collect()
    }
}
