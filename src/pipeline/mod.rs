pub mod collector;

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::filter;
use crate::lead::Lead;
use crate::places::types::Place;
use crate::places::{DetailProvider, SearchProvider, extract_place_id};

pub struct PlanOptions {
    pub categories: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub city: String,
    pub country: String,
    pub max_per_query: usize,
    pub details_concurrency: usize,
    pub include_with_website: bool,
}

pub fn build_query(category: &str, neighborhood: &str, city: &str, country: &str) -> String {
    format!("{category} in {neighborhood}, {city}, {country}")
}

/// Runs the full discovery plan: for every (category, neighborhood) pair,
/// in order, collect candidates, then enrich and filter them with at most
/// `details_concurrency` detail fetches in flight. Pairs run strictly
/// sequentially; lead order within a pair follows completion order.
///
/// A failed search skips its query; a failed detail fetch skips its
/// candidate. Neither aborts the run. Each place id is enriched at most
/// once across the whole run, so the lead set is deduplicated even when
/// queries overlap.
pub async fn run_plan<P>(provider: &P, opts: &PlanOptions) -> Vec<Lead>
where
    P: SearchProvider + DetailProvider,
{
    let concurrency = opts.details_concurrency.max(1);
    let mut seen: HashSet<String> = HashSet::new();
    let mut leads: Vec<Lead> = Vec::new();

    for category in &opts.categories {
        for neighborhood in &opts.neighborhoods {
            let query = build_query(category, neighborhood, &opts.city, &opts.country);
            info!(%query, "searching");

            let candidates =
                match collector::collect_candidates(provider, &query, opts.max_per_query).await {
                    Ok(candidates) => candidates,
                    Err(e) => {
                        warn!(error = %e, %query, "search failed, skipping query");
                        continue;
                    }
                };

            // Candidates with no usable id are dropped here; ones already
            // dispatched under an earlier query are not enriched again.
            let jobs: Vec<(String, Place)> = candidates
                .into_iter()
                .filter_map(|place| {
                    let id = place
                        .id
                        .clone()
                        .or_else(|| extract_place_id(place.name.as_deref()))?;
                    seen.insert(id.clone()).then_some((id, place))
                })
                .collect();

            info!(candidates = jobs.len(), "fetching details");

            let batch: Vec<Option<Lead>> = stream::iter(jobs)
                .map(|(id, place)| enrich_one(provider, category, id, place, opts))
                .buffer_unordered(concurrency)
                .collect()
                .await;

            leads.extend(batch.into_iter().flatten());
        }
    }

    leads
}

async fn enrich_one(
    provider: &impl DetailProvider,
    category: &str,
    id: String,
    place: Place,
    opts: &PlanOptions,
) -> Option<Lead> {
    match provider.details(&id).await {
        Ok(details) => filter::qualify(
            category,
            &place,
            &details,
            opts.include_with_website,
            &opts.city,
            &opts.country,
        ),
        Err(e) => {
            warn!(error = %e, place = %id, "details fetch failed, skipping candidate");
            None
        }
    }
}
