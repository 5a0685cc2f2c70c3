use std::sync::Arc;

use arrow_array::{FixedSizeListArray, Int64Array, RecordBatch, RecordBatchIterator, StringArray};
use arrow_schema::{DataType, Field, Schema};
use tempfile::TempDir;

use placerec_core::error::Error;
use placerec_core::traits::VectorSearcher;
use placerec_core::types::Category;
use placerec_store::{KeywordIndexer, KeywordRecord, PlaceVectorStore};

const DIM: usize = 4;

fn axis(i: usize) -> Vec<f32> {
    let mut v = vec![0.0; DIM];
    v[i] = 1.0;
    v
}

fn record(entity_id: i64, keyword: &str, vector: Vec<f32>) -> KeywordRecord {
    KeywordRecord { entity_id, keyword: keyword.to_string(), vector }
}

async fn seeded_store(tmp: &TempDir) -> PlaceVectorStore {
    let indexer = KeywordIndexer::open(tmp.path(), DIM).await.expect("open indexer");
    indexer
        .add_keywords(
            Category::FoodProduct,
            &[
                record(7, "grilled lamb", axis(0)),
                record(9, "fresh seafood", axis(1)),
                record(12, "hand-drip coffee", axis(2)),
            ],
        )
        .await
        .expect("seed food_product");
    indexer
        .add_keywords(Category::AmbienceSpace, &[record(7, "quiet", axis(3))])
        .await
        .expect("seed ambience_space");

    PlaceVectorStore::open(tmp.path(), DIM).await.expect("open store")
}

#[tokio::test]
async fn search_orders_hits_by_ascending_distance() {
    let tmp = TempDir::new().unwrap();
    let store = seeded_store(&tmp).await;

    let hits = store.search(Category::FoodProduct, &axis(0), 50).await.expect("search");
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].entity_id, 7);
    assert_eq!(hits[0].keyword, "grilled lamb");
    assert_eq!(hits[0].category, Category::FoodProduct);
    assert!(hits[0].distance < 1e-5, "exact match should be at distance ~0");
    for pair in hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[tokio::test]
async fn search_respects_the_limit() {
    let tmp = TempDir::new().unwrap();
    let store = seeded_store(&tmp).await;

    let hits = store.search(Category::FoodProduct, &axis(0), 2).await.expect("search");
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn categories_are_isolated() {
    let tmp = TempDir::new().unwrap();
    let store = seeded_store(&tmp).await;

    let hits = store.search(Category::AmbienceSpace, &axis(3), 50).await.expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].keyword, "quiet");
}

#[tokio::test]
async fn unregistered_category_is_an_unknown_category_error() {
    let tmp = TempDir::new().unwrap();
    let store = seeded_store(&tmp).await;

    let err = store.search(Category::PriceValue, &axis(0), 50).await.unwrap_err();
    assert!(matches!(err, Error::UnknownCategory(Category::PriceValue)));
}

#[tokio::test]
async fn wrong_vector_dimensionality_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let store = seeded_store(&tmp).await;

    let err = store.search(Category::FoodProduct, &[1.0, 0.0], 50).await.unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn only_known_tables_are_registered() {
    let tmp = TempDir::new().unwrap();
    let store = seeded_store(&tmp).await;

    let mut registered: Vec<Category> = store.registered().collect();
    registered.sort_by_key(|c| c.collection_name());
    assert_eq!(registered, vec![Category::AmbienceSpace, Category::FoodProduct]);
}

#[tokio::test]
async fn appending_to_an_existing_collection_grows_it() {
    let tmp = TempDir::new().unwrap();
    let indexer = KeywordIndexer::open(tmp.path(), DIM).await.expect("open indexer");
    indexer
        .add_keywords(Category::ServiceStaff, &[record(1, "friendly", axis(0))])
        .await
        .expect("first insert");
    indexer
        .add_keywords(Category::ServiceStaff, &[record(2, "fast service", axis(1))])
        .await
        .expect("append");

    let store = PlaceVectorStore::open(tmp.path(), DIM).await.expect("open store");
    let hits = store.search(Category::ServiceStaff, &axis(0), 50).await.expect("search");
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn rows_without_an_entity_id_are_dropped() {
    // The indexer schema forbids null entity ids, so write the table by
    // hand with a nullable column to get a malformed row on disk.
    let tmp = TempDir::new().unwrap();
    let dim = i32::try_from(DIM).unwrap();
    let schema = Arc::new(Schema::new(vec![
        Field::new("entity_id", DataType::Int64, true),
        Field::new("keyword", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim),
            true,
        ),
    ]));
    let vectors: Vec<Option<Vec<Option<f32>>>> = vec![
        Some(axis(0).into_iter().map(Some).collect()),
        Some(axis(1).into_iter().map(Some).collect()),
    ];
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![None, Some(21)])),
            Arc::new(StringArray::from(vec!["orphan keyword", "free parking"])),
            Arc::new(FixedSizeListArray::from_iter_primitive::<
                arrow_array::types::Float32Type,
                _,
                _,
            >(vectors.into_iter(), dim)),
        ],
    )
    .unwrap();
    let reader = Box::new(RecordBatchIterator::new(vec![Ok(batch)].into_iter(), schema));
    let db = lancedb::connect(tmp.path().to_string_lossy().as_ref())
        .execute()
        .await
        .unwrap();
    db.create_table(Category::Accessibility.collection_name(), reader)
        .execute()
        .await
        .unwrap();

    let store = PlaceVectorStore::open(tmp.path(), DIM).await.expect("open store");
    let hits = store.search(Category::Accessibility, &axis(0), 50).await.expect("search");
    assert_eq!(hits.len(), 1, "the null-id row must not be credited");
    assert_eq!(hits[0].entity_id, 21);
    assert_eq!(hits[0].keyword, "free parking");
}

#[tokio::test]
async fn mismatched_record_vector_is_rejected_at_write_time() {
    let tmp = TempDir::new().unwrap();
    let indexer = KeywordIndexer::open(tmp.path(), DIM).await.expect("open indexer");
    let result = indexer
        .add_keywords(Category::FoodProduct, &[record(1, "short vector", vec![1.0])])
        .await;
    assert!(result.is_err());
}
