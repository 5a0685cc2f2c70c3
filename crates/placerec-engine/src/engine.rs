use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future;
use tracing::{debug, info, warn};

use crate::{assemble, policy};
use placerec_core::error::{Error, Result};
use placerec_core::traits::VectorSearcher;
use placerec_core::types::{Category, EntityId, RecommendResponse, SearchHit};

/// Running aggregate of one entity's weighted similarity across all query
/// terms of a single request.
#[derive(Debug, Default)]
pub(crate) struct EntityScore {
    pub(crate) total_score: f32,
    pub(crate) keywords: HashSet<String>,
}

pub struct RecommendationEngine {
    store: Arc<dyn VectorSearcher>,
    search_limit: usize,
}

impl RecommendationEngine {
    pub fn new(store: Arc<dyn VectorSearcher>, search_limit: usize) -> Self {
        Self { store, search_limit }
    }

    /// Rank entities against the request's categorized keyword vectors.
    ///
    /// `categories` and `vectors` are parallel arrays, one entry per
    /// extracted keyword; a length mismatch is [`Error::InvalidRequest`].
    /// A request with no keywords at all echoes the hint with an empty
    /// list. Individual search failures are logged and skipped, so the
    /// result reflects every term that could be answered; dropping the
    /// returned future cancels the in-flight searches.
    pub async fn recommend(
        &self,
        categories: &[Category],
        vectors: &[Vec<f32>],
        place_category: Option<String>,
    ) -> Result<RecommendResponse> {
        if categories.len() != vectors.len() {
            return Err(Error::InvalidRequest(format!(
                "{} categories but {} vectors",
                categories.len(),
                vectors.len()
            )));
        }
        if categories.is_empty() {
            // No extracted keywords: nothing to search, hint only.
            return Ok(assemble::empty(place_category));
        }

        let policy = policy::derive(categories)?;
        info!(
            terms = categories.len(),
            weight = policy.keyword_weight,
            threshold = policy.threshold,
            "scoring request"
        );

        let scores = self
            .collect_scores(categories, vectors, policy.keyword_weight)
            .await;
        let ranked = filter_and_sort(scores, policy.threshold);
        Ok(assemble::response(ranked, place_category))
    }

    /// Fan out one search per term and fold the results into a per-entity
    /// score map. All searches run concurrently; the fold is the
    /// synchronization point and waits for every term to finish or fail.
    async fn collect_scores(
        &self,
        categories: &[Category],
        vectors: &[Vec<f32>],
        keyword_weight: f32,
    ) -> HashMap<EntityId, EntityScore> {
        let searches = categories.iter().zip(vectors).map(|(&category, vector)| async move {
            let outcome = self.store.search(category, vector, self.search_limit).await;
            (category, outcome)
        });

        let mut scores: HashMap<EntityId, EntityScore> = HashMap::new();
        for (category, outcome) in future::join_all(searches).await {
            match outcome {
                Ok(hits) => fold_hits(&mut scores, category, &hits, keyword_weight),
                Err(e) => warn!(category = %category, error = %e, "search failed, skipping term"),
            }
        }
        scores
    }
}

/// Fold one term's hit set into the running aggregate.
///
/// Within the hit set an entity gets at most one keyword credit: only the
/// best-scoring hit counts. Across terms the credits add up.
pub(crate) fn fold_hits(
    scores: &mut HashMap<EntityId, EntityScore>,
    category: Category,
    hits: &[SearchHit],
    keyword_weight: f32,
) {
    let mut best: HashMap<EntityId, (f32, &str)> = HashMap::new();
    for hit in hits {
        if hit.distance.is_nan() {
            debug!(category = %category, entity = hit.entity_id, "dropping hit with NaN distance");
            continue;
        }
        let mut score = 1.0 - hit.distance;
        if category == Category::PRIMARY {
            score *= keyword_weight;
        }
        match best.entry(hit.entity_id) {
            Entry::Vacant(slot) => {
                slot.insert((score, hit.keyword.as_str()));
            }
            Entry::Occupied(mut slot) if score > slot.get().0 => {
                slot.insert((score, hit.keyword.as_str()));
            }
            Entry::Occupied(_) => {}
        }
    }

    for (entity_id, (score, keyword)) in best {
        let entry = scores.entry(entity_id).or_default();
        entry.total_score += score;
        entry.keywords.insert(keyword.to_string());
    }
}

/// Keep entities at or above the threshold, best score first. Tie order is
/// whatever the map drain produced.
pub(crate) fn filter_and_sort(
    scores: HashMap<EntityId, EntityScore>,
    threshold: f32,
) -> Vec<(EntityId, EntityScore)> {
    let mut ranked: Vec<(EntityId, EntityScore)> = scores
        .into_iter()
        .filter(|(_, s)| s.total_score >= threshold)
        .collect();
    ranked.sort_by(|a, b| {
        b.1.total_score
            .partial_cmp(&a.1.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}
