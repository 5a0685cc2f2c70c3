use crate::error::Result;
use crate::types::{Category, SearchHit};

/// Read-only nearest-neighbor lookup over per-category collections.
///
/// Hits come back in ascending distance order as produced by the index; tie
/// order within equal distances is not guaranteed. An empty result is a
/// normal outcome, not an error.
#[async_trait::async_trait]
pub trait VectorSearcher: Send + Sync {
    async fn search(
        &self,
        category: Category,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>>;
}

/// Interface of the external embedding model. The engine only ever consumes
/// vectors; this seam exists for the ingestion/demo path.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}
