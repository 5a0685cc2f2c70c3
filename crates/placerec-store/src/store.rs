use std::collections::HashMap;
use std::path::Path;

use arrow_array::{Array, Float32Array, Int64Array, StringArray};
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection, DistanceType};
use tracing::{debug, warn};

use placerec_core::error::{Error, Result};
use placerec_core::traits::VectorSearcher;
use placerec_core::types::{Category, SearchHit};

/// Read side of the per-category collections.
///
/// Only tables that exist at open time are registered; searching a category
/// without a backing table fails with [`Error::UnknownCategory`] so the
/// engine can skip that term.
pub struct PlaceVectorStore {
    db: Connection,
    collections: HashMap<Category, String>,
    dim: usize,
}

impl PlaceVectorStore {
    pub async fn open(db_path: &Path, dim: usize) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref())
            .execute()
            .await
            .map_err(|e| Error::BackendUnavailable(format!("connect failed: {e}")))?;
        let names = db
            .table_names()
            .execute()
            .await
            .map_err(|e| Error::BackendUnavailable(format!("listing tables failed: {e}")))?;

        let mut collections = HashMap::new();
        for name in names {
            match Category::from_collection_name(&name) {
                Some(cat) => {
                    collections.insert(cat, name);
                }
                None => warn!(table = %name, "ignoring table with no matching category"),
            }
        }
        Ok(Self { db, collections, dim })
    }

    /// Categories with a registered collection.
    pub fn registered(&self) -> impl Iterator<Item = Category> + '_ {
        self.collections.keys().copied()
    }

    async fn search_collection(
        &self,
        category: Category,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let table_name = self
            .collections
            .get(&category)
            .ok_or(Error::UnknownCategory(category))?;
        if vector.len() != self.dim {
            return Err(Error::InvalidRequest(format!(
                "query vector has {} dims, collection '{}' expects {}",
                vector.len(),
                table_name,
                self.dim
            )));
        }

        let table = self
            .db
            .open_table(table_name)
            .execute()
            .await
            .map_err(|e| Error::BackendUnavailable(format!("open '{table_name}': {e}")))?;
        let mut stream = table
            .vector_search(vector.to_vec())
            .map_err(|e| Error::BackendUnavailable(format!("query '{table_name}': {e}")))?
            .distance_type(DistanceType::Cosine)
            .limit(limit)
            .execute()
            .await
            .map_err(|e| Error::BackendUnavailable(format!("query '{table_name}': {e}")))?;

        let mut hits = Vec::new();
        while let Some(batch) = stream
            .try_next()
            .await
            .map_err(|e| Error::BackendUnavailable(format!("result stream '{table_name}': {e}")))?
        {
            let ids = downcast::<Int64Array>(&batch, "entity_id")?;
            let keywords = downcast::<StringArray>(&batch, "keyword")?;
            let distances = downcast::<Float32Array>(&batch, "_distance")?;
            for i in 0..batch.num_rows() {
                // A row without an entity id cannot be credited to anyone.
                if ids.is_null(i) {
                    debug!(table = %table_name, row = i, "dropping hit with null entity id");
                    continue;
                }
                hits.push(SearchHit {
                    entity_id: ids.value(i),
                    keyword: keywords.value(i).to_string(),
                    category,
                    distance: distances.value(i),
                });
            }
        }
        Ok(hits)
    }
}

fn downcast<'a, T: 'static>(batch: &'a arrow_array::RecordBatch, name: &str) -> Result<&'a T> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<T>())
        .ok_or_else(|| Error::BackendUnavailable(format!("missing or mistyped column '{name}'")))
}

#[async_trait::async_trait]
impl VectorSearcher for PlaceVectorStore {
    async fn search(
        &self,
        category: Category,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        self.search_collection(category, vector, limit).await
    }
}
