//! Candidate search: one query per (organization, platform) pair.

use serde::Serialize;
use tracing::{debug, warn};

use crate::search::{SearchResult, WebSearch};

pub const SOCIAL_MEDIA_SITES: [&str; 3] = ["LinkedIn", "Twitter", "Facebook"];
pub const MAX_ORGANIZATIONS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct QueryFailure {
    pub query: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateSearch {
    pub results: Vec<SearchResult>,
    pub failures: Vec<QueryFailure>,
}

impl CandidateSearch {
    /// Snippets of all results that carry one, in result order.
    pub fn snippets(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter_map(|r| r.snippet.as_deref())
            .collect()
    }
}

pub fn build_query(name: &str, organization: &str, site: &str) -> String {
    format!("{name} {organization} site:{}.com", site.to_lowercase())
}

/// Searches each platform for the candidate at each of their first three
/// organizations. Failed queries are recorded and skipped.
pub async fn search_candidate(
    search: &dyn WebSearch,
    name: &str,
    organizations: &[String],
) -> CandidateSearch {
    let mut outcome = CandidateSearch::default();

    for organization in organizations.iter().take(MAX_ORGANIZATIONS) {
        for site in SOCIAL_MEDIA_SITES {
            let query = build_query(name, organization, site);
            match search.search(&query).await {
                Ok(results) => {
                    debug!("Query {query:?} returned {} results", results.len());
                    outcome.results.extend(results);
                }
                Err(e) => {
                    warn!("Search query {query:?} failed: {e}");
                    outcome.failures.push(QueryFailure {
                        query,
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    outcome
}
