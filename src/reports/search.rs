use super::records::Neighborhood;
use super::repository::SafetyRepository;

/// Neighborhoods whose name contains `query`, ignoring case. The query is
/// not trimmed, and an empty query matches everything.
pub fn search_neighborhoods<R: SafetyRepository + ?Sized>(
    repo: &R,
    query: &str,
) -> Vec<Neighborhood> {
    let needle = query.to_lowercase();
    repo.neighborhoods()
        .into_iter()
        .filter(|n| n.name.to_lowercase().contains(&needle))
        .collect()
}
