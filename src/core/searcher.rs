/// Card searcher
///
/// Substring search goes straight through the inventory. When that comes up
/// empty, fuzzy matching offers a few "did you mean" candidates.

use crate::core::normalizer::normalize;
use crate::store::{Inventory, InventoryRecord, SearchResult};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Handles card searching
pub struct Searcher {
    matcher: SkimMatcherV2,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    /// Create a new searcher instance
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Items whose normalized name contains the query, in inventory order
    pub fn search<I: Inventory + ?Sized>(&self, inventory: &I, query: &str) -> Vec<InventoryRecord> {
        inventory.find(query)
    }

    /// Fuzzy-ranked near misses for a query
    ///
    /// # Arguments
    /// * `query` - What the user typed
    /// * `limit` - Maximum results to return
    ///
    /// # Returns
    /// * Matches sorted by score, best first. Empty for an empty query.
    pub fn suggest<I: Inventory + ?Sized>(
        &self,
        inventory: &I,
        query: &str,
        limit: usize,
    ) -> Vec<SearchResult> {
        let query = normalize(query);
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let mut results: Vec<SearchResult> = inventory
            .list_all()
            .into_iter()
            .filter_map(|record| {
                self.matcher
                    .fuzzy_match(&record.name, query)
                    .map(|score| SearchResult { record, score })
            })
            .collect();

        // Sort by score (highest first), stable for ties
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(limit);

        results
    }
}
