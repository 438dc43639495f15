//! Starter data: a few users and the Barranquilla neighborhoods.

use super::records::{NewNeighborhood, NewUser};
use super::repository::SafetyRepository;
use crate::core::RecordError;

const DEFAULT_USERS: &[(&str, &str)] = &[
    ("Carlos Pérez", "carlos@example.com"),
    ("Ana Gómez", "ana@example.com"),
    ("Luis Martínez", "luis@example.com"),
];

const BARRANQUILLA_NEIGHBORHOODS: &[(&str, f64, f64)] = &[
    ("El Prado", 10.9993, -74.8006),
    ("Alto Prado", 11.0041, -74.8068),
    ("Villa Country", 10.9936, -74.8134),
    ("Ciudad Jardín", 10.9948, -74.8062),
    ("Miramar", 11.0232, -74.8201),
    ("Boston", 10.9941, -74.7947),
    ("Porvenir", 10.9884, -74.7872),
    ("San Isidro", 10.9867, -74.7891),
    ("Simón Bolívar", 10.9675, -74.7842),
    ("Las Nieves", 10.9643, -74.7685),
    ("Rebolo", 10.9637, -74.7714),
    ("El Bosque", 10.9514, -74.8033),
    ("Los Andes", 10.9864, -74.7922),
    ("La Concepción", 10.9862, -74.7994),
    ("El Silencio", 10.9841, -74.8089),
    ("La Libertad", 10.9849, -74.8151),
    ("Las Mercedes", 10.9902, -74.8076),
];

pub fn default_users() -> Vec<NewUser> {
    DEFAULT_USERS
        .iter()
        .map(|(name, email)| NewUser::new(*name, *email))
        .collect()
}

pub fn barranquilla_neighborhoods() -> Vec<NewNeighborhood> {
    BARRANQUILLA_NEIGHBORHOODS
        .iter()
        .map(|(name, lat, lon)| NewNeighborhood::new(*name, *lat, *lon))
        .collect()
}

/// How many records [`seed_if_empty`] inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub neighborhoods: usize,
}

/// Insert the default users if there are none, and the default
/// neighborhoods if there are none. Safe to call on every startup.
pub fn seed_if_empty<R: SafetyRepository + ?Sized>(
    repo: &mut R,
) -> Result<SeedSummary, RecordError> {
    let mut summary = SeedSummary::default();

    if repo.users().is_empty() {
        for user in default_users() {
            repo.add_user(user)?;
            summary.users += 1;
        }
    }

    if repo.neighborhoods().is_empty() {
        for neighborhood in barranquilla_neighborhoods() {
            repo.add_neighborhood(neighborhood)?;
            summary.neighborhoods += 1;
        }
    }

    if summary != SeedSummary::default() {
        tracing::info!(
            users = summary.users,
            neighborhoods = summary.neighborhoods,
            "inserted seed data"
        );
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::repository::InMemoryRepository;

    #[test]
    fn test_seed_once() {
        let mut repo = InMemoryRepository::new();
        let first = seed_if_empty(&mut repo).unwrap();
        assert_eq!(
            first,
            SeedSummary {
                users: 3,
                neighborhoods: 17
            }
        );

        let second = seed_if_empty(&mut repo).unwrap();
        assert_eq!(second, SeedSummary::default());
        assert_eq!(repo.neighborhoods().len(), 17);
    }

    #[test]
    fn test_seed_keeps_existing_users() {
        let mut repo = InMemoryRepository::new();
        repo.add_user(NewUser::new("Admin", "admin@example.com"))
            .unwrap();
        let summary = seed_if_empty(&mut repo).unwrap();
        assert_eq!(summary.users, 0);
        assert_eq!(summary.neighborhoods, 17);
        assert_eq!(repo.users().len(), 1);
    }
}
