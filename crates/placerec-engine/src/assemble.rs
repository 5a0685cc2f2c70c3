//! Projection of aggregated entity scores into the response shape. No
//! filtering or reordering happens here; the hint passes through untouched.

use crate::engine::EntityScore;
use placerec_core::types::{EntityId, Recommendation, RecommendResponse};

pub(crate) fn response(
    ranked: Vec<(EntityId, EntityScore)>,
    place_category: Option<String>,
) -> RecommendResponse {
    let recommendations = ranked
        .into_iter()
        .map(|(id, score)| Recommendation {
            id,
            similarity_score: score.total_score,
            keywords: score.keywords.into_iter().collect(),
        })
        .collect();
    RecommendResponse { recommendations, place_category }
}

pub(crate) fn empty(place_category: Option<String>) -> RecommendResponse {
    RecommendResponse { recommendations: Vec::new(), place_category }
}
