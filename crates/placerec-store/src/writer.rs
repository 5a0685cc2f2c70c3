use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};
use arrow_array::{FixedSizeListArray, Int64Array, RecordBatch, RecordBatchIterator, StringArray};
use arrow_schema::{DataType, Field, Schema};
use lancedb::{connect, Connection};
use tracing::info;

use placerec_core::types::{Category, EntityId};

/// One keyword occurrence to index: which entity it describes and its
/// embedding.
#[derive(Debug, Clone)]
pub struct KeywordRecord {
    pub entity_id: EntityId,
    pub keyword: String,
    pub vector: Vec<f32>,
}

/// Write side of the per-category collections. Creates the table on first
/// insert, appends afterwards.
pub struct KeywordIndexer {
    db: Connection,
    dim: usize,
}

impl KeywordIndexer {
    pub async fn open(db_path: &Path, dim: usize) -> Result<Self> {
        let db = connect(db_path.to_string_lossy().as_ref()).execute().await?;
        Ok(Self { db, dim })
    }

    pub async fn add_keywords(&self, category: Category, records: &[KeywordRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        for r in records {
            if r.vector.len() != self.dim {
                bail!(
                    "keyword '{}' has a {}-dim vector, expected {}",
                    r.keyword,
                    r.vector.len(),
                    self.dim
                );
            }
        }

        let batch = self.records_to_batch(records)?;
        let schema = batch.schema();
        let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));

        let table_name = category.collection_name();
        if self.db.table_names().execute().await?.contains(&table_name.to_string()) {
            self.db
                .open_table(table_name)
                .execute()
                .await?
                .add(reader)
                .execute()
                .await?;
        } else {
            self.db.create_table(table_name, reader).execute().await?;
        }
        info!(collection = table_name, rows = records.len(), "indexed keywords");
        Ok(())
    }

    fn records_to_batch(&self, records: &[KeywordRecord]) -> Result<RecordBatch> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("entity_id", DataType::Int64, false),
            Field::new("keyword", DataType::Utf8, false),
            Field::new(
                "vector",
                DataType::FixedSizeList(
                    Arc::new(Field::new("item", DataType::Float32, true)),
                    i32::try_from(self.dim)?,
                ),
                true,
            ),
        ]));

        let ids: Vec<i64> = records.iter().map(|r| r.entity_id).collect();
        let keywords: Vec<String> = records.iter().map(|r| r.keyword.clone()).collect();
        let vectors: Vec<Option<Vec<Option<f32>>>> = records
            .iter()
            .map(|r| Some(r.vector.iter().map(|&x| Some(x)).collect()))
            .collect();

        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(ids)),
                Arc::new(StringArray::from(keywords)),
                Arc::new(FixedSizeListArray::from_iter_primitive::<
                    arrow_array::types::Float32Type,
                    _,
                    _,
                >(vectors.into_iter(), i32::try_from(self.dim)?)),
            ],
        )?;
        Ok(batch)
    }
}
