//! Membership diff between a search page and a collection snapshot.

use std::collections::HashSet;

use catsync_provider::SearchResultItem;

/// Returns the item ids from `results` that are not in `existing`.
///
/// Search order is kept. Results without an id are ignored, and an id that
/// repeats within `results` is returned only once.
#[must_use]
pub fn diff_new_items(results: &[SearchResultItem], existing: &HashSet<String>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    results
        .iter()
        .filter_map(|item| item.asin.as_deref())
        .filter(|asin| !asin.is_empty())
        .filter(|asin| !existing.contains(*asin))
        .filter(|asin| seen.insert(*asin))
        .map(str::to_owned)
        .collect()
}
